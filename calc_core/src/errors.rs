//! # Error Types
//!
//! Structured error types for calc_core. A failed calculation pass never
//! panics; it returns one of these variants so a front end can log it and
//! keep showing the last valid result (see [`crate::session`]).
//!
//! Domain problems that still allow a result (for example cooling water that
//! is too warm to reach the required dew point) are *advisories* on the
//! result types, not errors.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_flow(flow_m3_h: f64) -> CalcResult<()> {
//!     if flow_m3_h < 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "volume_flow_m3_h",
//!             flow_m3_h.to_string(),
//!             "Air flow cannot be negative",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_flow(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong sign, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Unknown catalog entry (room type, envelope, operating mode)
    #[error("Unknown {catalog} entry: {name}")]
    UnknownEntry { catalog: String, name: String },

    /// An intermediate quantity became NaN or infinite, e.g. a humidity ratio
    /// at or beyond saturation for the given pressure
    #[error("Non-finite {quantity} in {stage}")]
    NonFiniteState { stage: String, quantity: String },

    /// Design settings could not be read
    #[error("Settings error: {reason}")]
    Settings { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownEntry error
    pub fn unknown_entry(catalog: impl Into<String>, name: impl Into<String>) -> Self {
        CalcError::UnknownEntry {
            catalog: catalog.into(),
            name: name.into(),
        }
    }

    /// Create a NonFiniteState error
    pub fn non_finite(stage: impl Into<String>, quantity: impl Into<String>) -> Self {
        CalcError::NonFiniteState {
            stage: stage.into(),
            quantity: quantity.into(),
        }
    }

    /// Create a Settings error
    pub fn settings(reason: impl Into<String>) -> Self {
        CalcError::Settings {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownEntry { .. } => "UNKNOWN_ENTRY",
            CalcError::NonFiniteState { .. } => "NON_FINITE_STATE",
            CalcError::Settings { .. } => "SETTINGS_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

/// Return `value` unchanged if it is finite, otherwise a [`CalcError::NonFiniteState`].
pub fn ensure_finite(value: f64, stage: &str, quantity: &str) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::non_finite(stage, quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("height_m", "-3", "Height must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::non_finite("outdoor", "humidity ratio").error_code(),
            "NON_FINITE_STATE"
        );
        assert_eq!(
            CalcError::unknown_entry("room type", "garage").error_code(),
            "UNKNOWN_ENTRY"
        );
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite(1.5, "outdoor", "x").unwrap(), 1.5);
        let err = ensure_finite(f64::NAN, "outdoor", "x").unwrap_err();
        assert_eq!(err.error_code(), "NON_FINITE_STATE");
        assert!(ensure_finite(f64::INFINITY, "outdoor", "x").is_err());
    }
}
