//! # Airside CLI Application
//!
//! Terminal front end for the HVAC calculators in `calc_core`.
//!
//! ```text
//! calc_cli air --mode dehumidifying --outdoor-temp 32 --outdoor-rh 40 --supply-temp 18
//! calc_cli room --room-type office --envelope modern --length 10 --width 8 --occupants 4
//! calc_cli form air        # interactive: type field=value, recalculates on every change
//! calc_cli run items.json   # batch of tagged AirHandling / RoomLoad items
//! calc_cli settings        # print effective design settings as TOML
//! ```

mod interactive;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use calc_core::calculations::air_handling::{self, AirHandlingInput, OperatingMode};
use calc_core::calculations::room_load::{self, RoomLoadInput};
use calc_core::calculations::{CalculationItem, CalculationOutput};
use calc_core::catalog::{EnvelopeType, RoomType};
use calc_core::report::{air_handling_report, room_load_report};
use calc_core::{CalcError, CalcResult, DesignSettings};

#[derive(Debug, Parser)]
#[command(
    name = "calc_cli",
    version,
    about = "Airside - HVAC air-handling and room load calculator"
)]
struct Cli {
    /// TOML file overriding design settings
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Psychrometric process chain of an air-handling unit
    Air(AirArgs),
    /// Ventilation flow, heating and cooling load of a room
    Room(RoomArgs),
    /// Interactive form: each `field=value` line triggers a full recalculation
    Form {
        #[arg(value_enum)]
        calculator: FormKind,
    },
    /// Run a JSON array of calculation items
    Run {
        /// File holding `[{"type": "AirHandling", ...}, {"type": "RoomLoad", ...}]`
        file: PathBuf,

        /// Print JSON instead of the text reports
        #[arg(long)]
        json: bool,
    },
    /// Print the effective design settings as TOML
    Settings,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormKind {
    Air,
    Room,
}

#[derive(Debug, Args)]
struct AirArgs {
    /// Label printed in the report
    #[arg(long, default_value = "AHU-1")]
    label: String,

    /// heating-only, sensible-cooling or dehumidifying
    #[arg(long, default_value = "heating-only", value_parser = OperatingMode::from_str_flexible)]
    mode: OperatingMode,

    /// Outdoor temperature (°C)
    #[arg(long, default_value_t = -12.0, allow_hyphen_values = true)]
    outdoor_temp: f64,

    /// Outdoor relative humidity (%)
    #[arg(long, default_value_t = 80.0)]
    outdoor_rh: f64,

    /// Target supply temperature (°C)
    #[arg(long, default_value_t = 20.0, allow_hyphen_values = true)]
    supply_temp: f64,

    /// Target supply relative humidity (%), dehumidifying only
    #[arg(long, default_value_t = 50.0)]
    supply_rh: f64,

    /// Supply air flow (m³/h)
    #[arg(long, default_value_t = 5000.0)]
    flow: f64,

    /// Absolute pressure (hPa)
    #[arg(long, default_value_t = 1013.25)]
    pressure: f64,

    /// Heating water supply temperature (°C)
    #[arg(long, default_value_t = 70.0)]
    heating_supply: f64,

    /// Heating water return temperature (°C)
    #[arg(long, default_value_t = 50.0)]
    heating_return: f64,

    /// Cooling water supply temperature (°C)
    #[arg(long, default_value_t = 6.0)]
    cooling_supply: f64,

    /// Cooling water return temperature (°C)
    #[arg(long, default_value_t = 12.0)]
    cooling_return: f64,

    /// Print JSON instead of the text report
    #[arg(long)]
    json: bool,
}

impl AirArgs {
    fn to_input(&self) -> AirHandlingInput {
        AirHandlingInput {
            label: self.label.clone(),
            mode: self.mode,
            outdoor_temp_c: self.outdoor_temp,
            outdoor_rh_pct: self.outdoor_rh,
            supply_temp_c: self.supply_temp,
            supply_rh_pct: self.supply_rh,
            volume_flow_m3_h: self.flow,
            pressure_hpa: self.pressure,
            heating_supply_c: self.heating_supply,
            heating_return_c: self.heating_return,
            cooling_supply_c: self.cooling_supply,
            cooling_return_c: self.cooling_return,
        }
    }
}

#[derive(Debug, Args)]
struct RoomArgs {
    /// Label printed in the report
    #[arg(long, default_value = "Room 1")]
    label: String,

    /// office, meeting-room, classroom, residential, server-room, kitchen
    #[arg(long, default_value = "office", value_parser = RoomType::from_str_flexible)]
    room_type: RoomType,

    /// old, standard or modern
    #[arg(long, default_value = "standard", value_parser = EnvelopeType::from_str_flexible)]
    envelope: EnvelopeType,

    /// Length along the exterior façade (m)
    #[arg(long, default_value_t = 5.0)]
    length: f64,

    /// Room depth (m)
    #[arg(long, default_value_t = 4.0)]
    width: f64,

    /// Room height (m)
    #[arg(long, default_value_t = 3.0)]
    height: f64,

    /// Number of occupants
    #[arg(long, default_value_t = 2)]
    occupants: u32,

    /// Equipment heat (W)
    #[arg(long, default_value_t = 300.0)]
    equipment: f64,

    /// Lighting power density (W/m²)
    #[arg(long, default_value_t = 10.0)]
    lighting: f64,

    /// Sensible heat per occupant (W)
    #[arg(long, default_value_t = 100.0)]
    heat_per_person: f64,

    /// Glazed share of the façade (0..1)
    #[arg(long, default_value_t = 0.3)]
    window_fraction: f64,

    /// Print JSON instead of the text report
    #[arg(long)]
    json: bool,
}

impl RoomArgs {
    fn to_input(&self) -> RoomLoadInput {
        RoomLoadInput {
            label: self.label.clone(),
            room_type: self.room_type,
            envelope: self.envelope,
            length_m: self.length,
            width_m: self.width,
            height_m: self.height,
            occupants: self.occupants,
            equipment_w: self.equipment,
            lighting_w_m2: self.lighting,
            heat_per_person_w: self.heat_per_person,
            window_fraction: self.window_fraction,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_settings(path: Option<&Path>) -> CalcResult<DesignSettings> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| CalcError::settings(format!("{}: {}", path.display(), e)))?;
            let settings = DesignSettings::from_toml_str(&text)?;
            info!(path = %path.display(), "loaded design settings");
            Ok(settings)
        }
        None => Ok(DesignSettings::default()),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CalcError::Internal {
        message: e.to_string(),
    })?;
    println!("{}", json);
    Ok(())
}

fn parse_batch(text: &str) -> CalcResult<Vec<CalculationItem>> {
    serde_json::from_str(text)
        .map_err(|e| CalcError::invalid_input("items", "JSON", e.to_string()))
}

/// Run every item in order; the first failing item aborts the batch.
fn run_batch(
    items: &[CalculationItem],
    settings: &DesignSettings,
) -> CalcResult<Vec<CalculationOutput>> {
    items
        .iter()
        .map(|item| {
            info!(label = item.label(), calc_type = item.calc_type(), "running item");
            item.run(settings)
        })
        .collect()
}

fn batch_report(items: &[CalculationItem], outputs: &[CalculationOutput]) -> CalcResult<String> {
    let mut blocks = Vec::with_capacity(items.len());
    for (item, output) in items.iter().zip(outputs) {
        let block = match (item, output) {
            (CalculationItem::AirHandling(input), CalculationOutput::AirHandling(result)) => {
                air_handling_report(input, result)
            }
            (CalculationItem::RoomLoad(input), CalculationOutput::RoomLoad(result)) => {
                room_load_report(input, result)
            }
            _ => {
                return Err(CalcError::Internal {
                    message: format!("output does not match item '{}'", item.label()),
                })
            }
        };
        blocks.push(block);
    }
    Ok(blocks.join("\n\n"))
}

fn run(cli: Cli) -> CalcResult<()> {
    let settings = load_settings(cli.settings.as_deref())?;

    match cli.command {
        Command::Air(args) => {
            let input = args.to_input();
            let result = air_handling::calculate(&input, &settings)?;
            if args.json {
                print_json(&result)?;
            } else {
                println!("{}", air_handling_report(&input, &result));
            }
        }
        Command::Room(args) => {
            let input = args.to_input();
            let result = room_load::calculate(&input, &settings)?;
            if args.json {
                print_json(&result)?;
            } else {
                println!("{}", room_load_report(&input, &result));
            }
        }
        Command::Form { calculator } => {
            let mut reader = std::io::stdin().lock();
            let mut out = std::io::stdout().lock();
            match calculator {
                FormKind::Air => {
                    let mut session = interactive::AirFormSession::new(settings);
                    interactive::run(&mut session, &mut reader, &mut out)?;
                }
                FormKind::Room => {
                    let mut session = interactive::RoomFormSession::new(settings);
                    interactive::run(&mut session, &mut reader, &mut out)?;
                }
            }
        }
        Command::Run { file, json } => {
            let text = std::fs::read_to_string(&file).map_err(|e| {
                CalcError::invalid_input("file", file.display().to_string(), e.to_string())
            })?;
            let items = parse_batch(&text)?;
            let outputs = run_batch(&items, &settings)?;
            if json {
                print_json(&outputs)?;
            } else {
                println!("{}", batch_report(&items, &outputs)?);
            }
        }
        Command::Settings => {
            print!("{}", settings.to_toml_string()?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}
