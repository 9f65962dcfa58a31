//! # HVAC Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, settings) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`air_handling`] - Psychrometric process chain of an air-handling unit
//! - [`room_load`] - Room ventilation flow, heating load and cooling load

pub mod air_handling;
pub mod room_load;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::settings::DesignSettings;

// Re-export commonly used types
pub use air_handling::{AirHandlingInput, AirHandlingResult, OperatingMode};
pub use room_load::{RoomLoadInput, RoomLoadResult, VentilationCriterion};

/// Enum wrapper for all calculation types.
///
/// Lets a front end hold either calculator behind one type while keeping a
/// clean, tagged JSON representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Air-handling unit process chain
    AirHandling(AirHandlingInput),
    /// Room flow and load sizing
    RoomLoad(RoomLoadInput),
}

/// Result of running a [`CalculationItem`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    AirHandling(AirHandlingResult),
    RoomLoad(RoomLoadResult),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::AirHandling(a) => &a.label,
            CalculationItem::RoomLoad(r) => &r.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::AirHandling(_) => "AirHandling",
            CalculationItem::RoomLoad(_) => "RoomLoad",
        }
    }

    /// Run the matching calculation
    pub fn run(&self, settings: &DesignSettings) -> CalcResult<CalculationOutput> {
        match self {
            CalculationItem::AirHandling(input) => {
                air_handling::calculate(input, settings).map(CalculationOutput::AirHandling)
            }
            CalculationItem::RoomLoad(input) => {
                room_load::calculate(input, settings).map(CalculationOutput::RoomLoad)
            }
        }
    }
}
