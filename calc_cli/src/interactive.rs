//! Interactive form mode.
//!
//! Every `field=value` line replaces one raw form field and recomputes the
//! whole calculation. A pass that fails keeps the previous report on screen.

use std::io::{BufRead, Write};

use calc_core::form::{AirHandlingForm, RoomLoadForm};
use calc_core::report::{air_handling_report, room_load_report};
use calc_core::session::{AirHandlingCalculator, LiveCalculation, RoomLoadCalculator};
use calc_core::{CalcError, CalcResult, DesignSettings};

/// A form plus the live calculation behind it
pub trait FormSession {
    fn title(&self) -> &'static str;

    /// Fields shown for the current form state
    fn fields(&self) -> Vec<&'static str>;

    fn value(&self, field: &str) -> Option<String>;

    fn set(&mut self, field: &str, value: &str) -> CalcResult<()>;

    /// Recompute and render the report on display, if any
    fn recalculate(&mut self) -> Option<String>;

    fn last_error(&self) -> Option<&CalcError>;
}

fn field_value<T: serde::Serialize>(form: &T, field: &str) -> Option<String> {
    let value = serde_json::to_value(form).ok()?;
    value.get(field)?.as_str().map(str::to_string)
}

pub struct AirFormSession {
    form: AirHandlingForm,
    live: LiveCalculation<AirHandlingCalculator>,
}

impl AirFormSession {
    pub fn new(settings: DesignSettings) -> Self {
        AirFormSession {
            form: AirHandlingForm::default(),
            live: LiveCalculation::new(settings),
        }
    }
}

impl FormSession for AirFormSession {
    fn title(&self) -> &'static str {
        "AIR-HANDLING FORM"
    }

    fn fields(&self) -> Vec<&'static str> {
        self.form.relevant_fields()
    }

    fn value(&self, field: &str) -> Option<String> {
        field_value(&self.form, field)
    }

    fn set(&mut self, field: &str, value: &str) -> CalcResult<()> {
        self.form.set(field, value)
    }

    fn recalculate(&mut self) -> Option<String> {
        let input = self.form.to_input();
        self.live
            .update(&input)
            .map(|result| air_handling_report(&input, result))
    }

    fn last_error(&self) -> Option<&CalcError> {
        self.live.last_error()
    }
}

pub struct RoomFormSession {
    form: RoomLoadForm,
    live: LiveCalculation<RoomLoadCalculator>,
}

impl RoomFormSession {
    pub fn new(settings: DesignSettings) -> Self {
        RoomFormSession {
            form: RoomLoadForm::default(),
            live: LiveCalculation::new(settings),
        }
    }
}

impl FormSession for RoomFormSession {
    fn title(&self) -> &'static str {
        "ROOM LOAD FORM"
    }

    fn fields(&self) -> Vec<&'static str> {
        RoomLoadForm::FIELDS.to_vec()
    }

    fn value(&self, field: &str) -> Option<String> {
        field_value(&self.form, field)
    }

    fn set(&mut self, field: &str, value: &str) -> CalcResult<()> {
        self.form.set(field, value)
    }

    fn recalculate(&mut self) -> Option<String> {
        let input = self.form.to_input();
        self.live
            .update(&input)
            .map(|result| room_load_report(&input, result))
    }

    fn last_error(&self) -> Option<&CalcError> {
        self.live.last_error()
    }
}

fn io_error(e: std::io::Error) -> CalcError {
    CalcError::Internal {
        message: format!("terminal I/O failed: {e}"),
    }
}

fn print_fields<W: Write>(session: &dyn FormSession, out: &mut W) -> std::io::Result<()> {
    for field in session.fields() {
        let value = session.value(field).unwrap_or_default();
        writeln!(out, "  {:<18} = {}", field, value)?;
    }
    Ok(())
}

fn print_pass<W: Write>(session: &mut dyn FormSession, out: &mut W) -> std::io::Result<()> {
    match session.recalculate() {
        Some(report) => writeln!(out, "{report}")?,
        None => writeln!(out, "(no valid result yet)")?,
    }
    if let Some(err) = session.last_error() {
        writeln!(out, "! {} [{}], showing last valid result", err, err.error_code())?;
    }
    Ok(())
}

/// Read commands until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(
    session: &mut dyn FormSession,
    input: &mut R,
    out: &mut W,
) -> CalcResult<()> {
    writeln!(out, "{}", session.title()).map_err(io_error)?;
    writeln!(out, "Enter field=value, 'show', 'fields' or 'quit'.").map_err(io_error)?;
    print_fields(session, out).map_err(io_error)?;
    print_pass(session, out).map_err(io_error)?;

    let mut line = String::new();
    loop {
        write!(out, "> ").map_err(io_error)?;
        out.flush().map_err(io_error)?;

        line.clear();
        if input.read_line(&mut line).map_err(io_error)? == 0 {
            break;
        }
        let command = line.trim();
        match command {
            "" => continue,
            "quit" | "exit" | "q" => break,
            "fields" => print_fields(session, out).map_err(io_error)?,
            "show" => print_pass(session, out).map_err(io_error)?,
            _ => match command.split_once('=') {
                Some((field, value)) => match session.set(field.trim(), value.trim()) {
                    Ok(()) => print_pass(session, out).map_err(io_error)?,
                    Err(e) => writeln!(out, "! {e}").map_err(io_error)?,
                },
                None => writeln!(out, "! expected field=value, got '{command}'").map_err(io_error)?,
            },
        }
    }
    Ok(())
}
