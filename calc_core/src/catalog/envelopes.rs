//! Building Envelopes
//!
//! Representative U-values and glazing g-values for three construction eras.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Construction standard of the building envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnvelopeType {
    /// Unrenovated pre-1978 building
    #[default]
    Old,
    /// Building to the 2009-2014 energy-saving ordinance
    Standard,
    /// Current new build / passive-house level
    Modern,
}

/// Thermal properties of an envelope type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeProperties {
    /// Opaque exterior wall U-value (W/m²·K)
    pub u_wall_w_m2k: f64,
    /// Window U-value (W/m²·K)
    pub u_window_w_m2k: f64,
    /// Total solar energy transmittance of the glazing
    pub g_value: f64,
}

impl EnvelopeType {
    /// All envelope variants for UI selection
    pub const ALL: [EnvelopeType; 3] = [
        EnvelopeType::Old,
        EnvelopeType::Standard,
        EnvelopeType::Modern,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            EnvelopeType::Old => "old",
            EnvelopeType::Standard => "standard",
            EnvelopeType::Modern => "modern",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "old" | "altbau" | "existing" => Ok(EnvelopeType::Old),
            "standard" | "enev" => Ok(EnvelopeType::Standard),
            "modern" | "new" | "passive" | "geg" => Ok(EnvelopeType::Modern),
            _ => Err(CalcError::unknown_entry("envelope type", s)),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EnvelopeType::Old => "Old building",
            EnvelopeType::Standard => "Standard",
            EnvelopeType::Modern => "Modern",
        }
    }

    pub fn properties(&self) -> EnvelopeProperties {
        match self {
            EnvelopeType::Old => EnvelopeProperties {
                u_wall_w_m2k: 1.2,
                u_window_w_m2k: 2.8,
                g_value: 0.75,
            },
            EnvelopeType::Standard => EnvelopeProperties {
                u_wall_w_m2k: 0.35,
                u_window_w_m2k: 1.3,
                g_value: 0.6,
            },
            EnvelopeType::Modern => EnvelopeProperties {
                u_wall_w_m2k: 0.15,
                u_window_w_m2k: 0.8,
                g_value: 0.5,
            },
        }
    }
}

impl std::fmt::Display for EnvelopeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_envelopes_insulate_better() {
        let old = EnvelopeType::Old.properties();
        let std = EnvelopeType::Standard.properties();
        let modern = EnvelopeType::Modern.properties();
        assert!(old.u_wall_w_m2k > std.u_wall_w_m2k);
        assert!(std.u_wall_w_m2k > modern.u_wall_w_m2k);
        assert!(old.u_window_w_m2k > std.u_window_w_m2k);
        assert!(std.u_window_w_m2k > modern.u_window_w_m2k);
    }

    #[test]
    fn test_parsing() {
        assert_eq!(EnvelopeType::from_str_flexible(" Modern ").unwrap(), EnvelopeType::Modern);
        assert_eq!(EnvelopeType::from_str_flexible("altbau").unwrap(), EnvelopeType::Old);
        let err = EnvelopeType::from_str_flexible("tent").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_ENTRY");
    }
}
