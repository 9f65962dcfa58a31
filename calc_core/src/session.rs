//! # Live Recalculation
//!
//! A front end recomputes the whole calculation on every input change. When a
//! pass fails (typically because a field is half-typed), the failure is logged
//! and the last valid result stays on display instead of being cleared.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::AirHandlingInput;
//! use calc_core::session::{AirHandlingCalculator, LiveCalculation};
//! use calc_core::settings::DesignSettings;
//!
//! let mut live = LiveCalculation::<AirHandlingCalculator>::new(DesignSettings::default());
//! let mut input = AirHandlingInput::default();
//! assert!(live.update(&input).is_some());
//!
//! // An impossible pressure fails, but the earlier result is kept
//! input.pressure_hpa = -1.0;
//! assert!(live.update(&input).is_some());
//! assert_eq!(live.failures(), 1);
//! ```

use tracing::{debug, warn};

use crate::calculations::{air_handling, room_load};
use crate::calculations::{AirHandlingInput, AirHandlingResult, RoomLoadInput, RoomLoadResult};
use crate::errors::{CalcError, CalcResult};
use crate::settings::DesignSettings;

/// A stateless calculation that can be driven by [`LiveCalculation`]
pub trait Calculator {
    type Input;
    type Output;

    /// Name used in log records
    const NAME: &'static str;

    fn calculate(input: &Self::Input, settings: &DesignSettings) -> CalcResult<Self::Output>;
}

/// Air-handling process chain
#[derive(Debug, Clone, Copy)]
pub struct AirHandlingCalculator;

impl Calculator for AirHandlingCalculator {
    type Input = AirHandlingInput;
    type Output = AirHandlingResult;
    const NAME: &'static str = "air-handling";

    fn calculate(input: &Self::Input, settings: &DesignSettings) -> CalcResult<Self::Output> {
        air_handling::calculate(input, settings)
    }
}

/// Room flow and load sizing
#[derive(Debug, Clone, Copy)]
pub struct RoomLoadCalculator;

impl Calculator for RoomLoadCalculator {
    type Input = RoomLoadInput;
    type Output = RoomLoadResult;
    const NAME: &'static str = "room-load";

    fn calculate(input: &Self::Input, settings: &DesignSettings) -> CalcResult<Self::Output> {
        room_load::calculate(input, settings)
    }
}

/// Keeps the latest valid result of a calculator across recalculations.
pub struct LiveCalculation<C: Calculator> {
    settings: DesignSettings,
    current: Option<C::Output>,
    last_error: Option<CalcError>,
    passes: u64,
    failures: u64,
}

impl<C: Calculator> LiveCalculation<C> {
    pub fn new(settings: DesignSettings) -> Self {
        LiveCalculation {
            settings,
            current: None,
            last_error: None,
            passes: 0,
            failures: 0,
        }
    }

    /// Run one full pass and return the result to display.
    ///
    /// On failure the previous result is returned (or `None` if there has
    /// never been a valid one).
    pub fn update(&mut self, input: &C::Input) -> Option<&C::Output> {
        self.passes += 1;
        match C::calculate(input, &self.settings) {
            Ok(output) => {
                debug!(calculator = C::NAME, pass = self.passes, "calculation pass ok");
                self.current = Some(output);
                self.last_error = None;
            }
            Err(err) => {
                self.failures += 1;
                warn!(
                    calculator = C::NAME,
                    code = err.error_code(),
                    error = %err,
                    "calculation pass failed, keeping previous result"
                );
                self.last_error = Some(err);
            }
        }
        self.current.as_ref()
    }

    /// Result currently on display
    pub fn current(&self) -> Option<&C::Output> {
        self.current.as_ref()
    }

    /// Error of the most recent pass, cleared by the next successful pass
    pub fn last_error(&self) -> Option<&CalcError> {
        self.last_error.as_ref()
    }

    pub fn settings(&self) -> &DesignSettings {
        &self.settings
    }

    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_pass_keeps_previous_result() {
        let mut live = LiveCalculation::<RoomLoadCalculator>::new(DesignSettings::default());
        let mut input = RoomLoadInput::default();
        let first = live.update(&input).cloned().unwrap();

        input.height_m = 0.0;
        let shown = live.update(&input).cloned().unwrap();
        assert_eq!(shown, first);
        assert_eq!(live.last_error().unwrap().error_code(), "INVALID_INPUT");
        assert_eq!(live.passes(), 2);
        assert_eq!(live.failures(), 1);

        input.height_m = 4.0;
        let updated = live.update(&input).unwrap();
        assert!(updated.volume_m3 > first.volume_m3);
        assert!(live.last_error().is_none());
    }

    #[test]
    fn test_no_result_before_first_success() {
        let mut live = LiveCalculation::<AirHandlingCalculator>::new(DesignSettings::default());
        let input = AirHandlingInput {
            outdoor_temp_c: f64::MAX,
            ..AirHandlingInput::default()
        };
        assert!(live.update(&input).is_none());
        assert_eq!(live.last_error().unwrap().error_code(), "NON_FINITE_STATE");
        assert!(live.current().is_none());
    }
}
