//! # Design Settings
//!
//! Physical constants, thresholds and seasonal design values shared by both
//! calculators. Everything has a sensible default; a front end may override
//! individual keys from a TOML file.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::settings::DesignSettings;
//!
//! let settings = DesignSettings::from_toml_str("frost_protection_c = 3.0").unwrap();
//! assert_eq!(settings.frost_protection_c, 3.0);
//! // Keys that are not given keep their defaults
//! assert_eq!(settings.tolerance, 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Design constants for the air-handling and room load calculations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    /// Tolerance applied to every threshold comparison (K for temperatures,
    /// g/kg for humidity ratios)
    pub tolerance: f64,

    /// Frost-protection temperature the pre-heater heats to (°C)
    pub frost_protection_c: f64,

    /// Cooling water must be at least this much colder than the target dew point (K)
    pub dew_point_margin_k: f64,

    /// Air density (kg/m³)
    pub air_density_kg_m3: f64,

    /// Specific heat capacity of air (J/kg·K)
    pub air_heat_capacity_j_kgk: f64,

    /// Water density (kg/m³)
    pub water_density_kg_m3: f64,

    /// Specific heat capacity of water (kJ/kg·K)
    pub water_heat_capacity_kj_kgk: f64,

    /// Outdoor design temperature for heating (°C)
    pub winter_outdoor_c: f64,

    /// Indoor design temperature for heating (°C)
    pub heating_indoor_c: f64,

    /// Outdoor design temperature for cooling (°C)
    pub summer_outdoor_c: f64,

    /// Workplace comfort limit for room air temperature (°C)
    pub comfort_limit_c: f64,

    /// Fraction of internal gains credited against the heating load
    pub internal_gain_credit: f64,

    /// Solar irradiance on the window plane used for the cooling load (W/m²)
    pub solar_irradiance_w_m2: f64,

    /// Supply/room temperature difference for heat-removal air flow (K)
    pub heat_removal_delta_t_k: f64,
}

impl Default for DesignSettings {
    fn default() -> Self {
        DesignSettings {
            tolerance: 0.01,
            frost_protection_c: 5.0,
            dew_point_margin_k: 2.0,
            air_density_kg_m3: 1.2,
            air_heat_capacity_j_kgk: 1006.0,
            water_density_kg_m3: 1000.0,
            water_heat_capacity_kj_kgk: 4.186,
            winter_outdoor_c: -12.0,
            heating_indoor_c: 20.0,
            summer_outdoor_c: 32.0,
            comfort_limit_c: 26.0,
            internal_gain_credit: 0.5,
            solar_irradiance_w_m2: 400.0,
            heat_removal_delta_t_k: 6.0,
        }
    }
}

impl DesignSettings {
    /// Parse settings from TOML text and validate them.
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let settings: DesignSettings =
            toml::from_str(text).map_err(|e| CalcError::settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty TOML (used to print the effective settings).
    pub fn to_toml_string(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::settings(e.to_string()))
    }

    /// Validate settings values.
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("air_density_kg_m3", self.air_density_kg_m3),
            ("air_heat_capacity_j_kgk", self.air_heat_capacity_j_kgk),
            ("water_density_kg_m3", self.water_density_kg_m3),
            ("water_heat_capacity_kj_kgk", self.water_heat_capacity_kj_kgk),
            ("heat_removal_delta_t_k", self.heat_removal_delta_t_k),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Must be positive",
                ));
            }
        }
        if self.tolerance < 0.0 {
            return Err(CalcError::invalid_input(
                "tolerance",
                self.tolerance.to_string(),
                "Tolerance cannot be negative",
            ));
        }
        if !(0.0..=1.0).contains(&self.internal_gain_credit) {
            return Err(CalcError::invalid_input(
                "internal_gain_credit",
                self.internal_gain_credit.to_string(),
                "Credit must be a fraction between 0 and 1",
            ));
        }
        if self.heating_indoor_c <= self.winter_outdoor_c {
            return Err(CalcError::invalid_input(
                "heating_indoor_c",
                self.heating_indoor_c.to_string(),
                "Indoor heating temperature must exceed the winter outdoor temperature",
            ));
        }
        Ok(())
    }

    /// Volumetric heat capacity of air in Wh/(m³·K), about 0.34 with the defaults
    pub fn air_volumetric_heat_wh_m3k(&self) -> f64 {
        self.air_density_kg_m3 * self.air_heat_capacity_j_kgk / 3600.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(DesignSettings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let s = DesignSettings::from_toml_str("comfort_limit_c = 27.0\ntolerance = 0.05").unwrap();
        assert_eq!(s.comfort_limit_c, 27.0);
        assert_eq!(s.tolerance, 0.05);
        assert_eq!(s.frost_protection_c, 5.0);
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let err = DesignSettings::from_toml_str("tolerance = \"high\"").unwrap_err();
        assert_eq!(err.error_code(), "SETTINGS_ERROR");

        let err = DesignSettings::from_toml_str("air_density_kg_m3 = 0.0").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_toml_roundtrip() {
        let s = DesignSettings::default();
        let text = s.to_toml_string().unwrap();
        assert_eq!(DesignSettings::from_toml_str(&text).unwrap(), s);
    }

    #[test]
    fn test_volumetric_heat() {
        let s = DesignSettings::default();
        assert!((s.air_volumetric_heat_wh_m3k() - 0.3353).abs() < 1e-3);
    }
}
