//! # calc_core - HVAC Calculation Engine
//!
//! `calc_core` holds the computations behind the Airside calculators:
//! the psychrometric process chain of an air-handling unit and the
//! ventilation/load sizing of a single room. All inputs and outputs are
//! JSON-serializable so any front end (CLI, GUI, web) can drive them.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Forgiving Forms**: Raw text inputs always resolve to a complete input
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::air_handling::{calculate, AirHandlingInput};
//! use calc_core::settings::DesignSettings;
//!
//! let result = calculate(&AirHandlingInput::default(), &DesignSettings::default()).unwrap();
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("total_heating_kw"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Air-handling and room load calculations
//! - [`equations`] - Psychrometric and heat-transfer formulas
//! - [`catalog`] - Room types and building envelopes
//! - [`form`] - Raw text form fields with parse fallbacks
//! - [`session`] - Live recalculation keeping the last valid result
//! - [`report`] - Display strings
//! - [`settings`] - Design constants
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod catalog;
pub mod equations;
pub mod errors;
pub mod form;
pub mod report;
pub mod session;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, CalculationOutput};
pub use errors::{CalcError, CalcResult};
pub use settings::DesignSettings;
