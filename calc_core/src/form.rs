//! # Form Inputs
//!
//! Raw text fields as a user types them, converted into calculation inputs.
//! Parsing never fails: every field has a defined fallback, so a half-typed
//! value still produces a complete input for the next calculation pass.
//!
//! ## Fallback rules
//!
//! - The longest leading number is used (`"12abc"` → 12, `"21,5"` → 21.5)
//! - Empty, unparseable, non-finite or zero text yields the field's fallback
//! - Pressure falls back to 1013.25 hPa, every other number to 0
//! - Unknown mode / room type / envelope text falls back to the first variant
//!
//! ## Example
//!
//! ```rust
//! use calc_core::form::{parse_number_or, AirHandlingForm};
//!
//! assert_eq!(parse_number_or("21,5 °C", 0.0), 21.5);
//! assert_eq!(parse_number_or("", 1013.25), 1013.25);
//!
//! let mut form = AirHandlingForm::default();
//! form.set("pressure_hpa", "").unwrap();
//! assert_eq!(form.to_input().pressure_hpa, 1013.25);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::air_handling::{AirHandlingInput, OperatingMode};
use crate::calculations::room_load::RoomLoadInput;
use crate::catalog::{EnvelopeType, RoomType};
use crate::errors::{CalcError, CalcResult};

/// Standard atmosphere, used when the pressure field is empty or zero (hPa)
pub const FALLBACK_PRESSURE_HPA: f64 = 1013.25;

/// Parse the leading number of `raw`, or return `fallback`.
pub fn parse_number_or(raw: &str, fallback: f64) -> f64 {
    match leading_number(raw) {
        Some(value) if value.is_finite() && value != 0.0 => value,
        _ => fallback,
    }
}

fn leading_number(raw: &str) -> Option<f64> {
    let text = raw.trim().replace(',', ".");
    let candidate_len = text
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(text.len());
    (1..=candidate_len)
        .rev()
        .find_map(|len| text[..len].parse::<f64>().ok())
}

fn format_default(value: f64) -> String {
    value.to_string()
}

// =============================================================================
// Air-handling form
// =============================================================================

/// Raw text of the air-handling form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirHandlingForm {
    pub label: String,
    pub mode: String,
    pub outdoor_temp_c: String,
    pub outdoor_rh_pct: String,
    pub supply_temp_c: String,
    pub supply_rh_pct: String,
    pub volume_flow_m3_h: String,
    pub pressure_hpa: String,
    pub heating_supply_c: String,
    pub heating_return_c: String,
    pub cooling_supply_c: String,
    pub cooling_return_c: String,
}

impl AirHandlingForm {
    /// Field names accepted by [`AirHandlingForm::set`]
    pub const FIELDS: [&'static str; 12] = [
        "label",
        "mode",
        "outdoor_temp_c",
        "outdoor_rh_pct",
        "supply_temp_c",
        "supply_rh_pct",
        "volume_flow_m3_h",
        "pressure_hpa",
        "heating_supply_c",
        "heating_return_c",
        "cooling_supply_c",
        "cooling_return_c",
    ];

    /// Pre-fill the form from an input
    pub fn from_input(input: &AirHandlingInput) -> Self {
        AirHandlingForm {
            label: input.label.clone(),
            mode: input.mode.code().to_string(),
            outdoor_temp_c: format_default(input.outdoor_temp_c),
            outdoor_rh_pct: format_default(input.outdoor_rh_pct),
            supply_temp_c: format_default(input.supply_temp_c),
            supply_rh_pct: format_default(input.supply_rh_pct),
            volume_flow_m3_h: format_default(input.volume_flow_m3_h),
            pressure_hpa: format_default(input.pressure_hpa),
            heating_supply_c: format_default(input.heating_supply_c),
            heating_return_c: format_default(input.heating_return_c),
            cooling_supply_c: format_default(input.cooling_supply_c),
            cooling_return_c: format_default(input.cooling_return_c),
        }
    }

    /// Replace one field's raw text
    pub fn set(&mut self, field: &str, value: &str) -> CalcResult<()> {
        let slot = match field {
            "label" => &mut self.label,
            "mode" => &mut self.mode,
            "outdoor_temp_c" => &mut self.outdoor_temp_c,
            "outdoor_rh_pct" => &mut self.outdoor_rh_pct,
            "supply_temp_c" => &mut self.supply_temp_c,
            "supply_rh_pct" => &mut self.supply_rh_pct,
            "volume_flow_m3_h" => &mut self.volume_flow_m3_h,
            "pressure_hpa" => &mut self.pressure_hpa,
            "heating_supply_c" => &mut self.heating_supply_c,
            "heating_return_c" => &mut self.heating_return_c,
            "cooling_supply_c" => &mut self.cooling_supply_c,
            "cooling_return_c" => &mut self.cooling_return_c,
            _ => {
                return Err(CalcError::invalid_input(
                    "field",
                    field,
                    "Unknown air-handling form field",
                ))
            }
        };
        *slot = value.to_string();
        Ok(())
    }

    pub fn mode(&self) -> OperatingMode {
        OperatingMode::from_str_flexible(&self.mode).unwrap_or_default()
    }

    /// Fields the current mode actually reads
    pub fn relevant_fields(&self) -> Vec<&'static str> {
        let mode = self.mode();
        Self::FIELDS
            .iter()
            .copied()
            .filter(|field| match *field {
                "supply_rh_pct" => mode.uses_target_humidity(),
                "cooling_supply_c" | "cooling_return_c" => mode.uses_cooling_water(),
                _ => true,
            })
            .collect()
    }

    /// Read every field with its fallback
    pub fn to_input(&self) -> AirHandlingInput {
        AirHandlingInput {
            label: self.label.clone(),
            mode: self.mode(),
            outdoor_temp_c: parse_number_or(&self.outdoor_temp_c, 0.0),
            outdoor_rh_pct: parse_number_or(&self.outdoor_rh_pct, 0.0),
            supply_temp_c: parse_number_or(&self.supply_temp_c, 0.0),
            supply_rh_pct: parse_number_or(&self.supply_rh_pct, 0.0),
            volume_flow_m3_h: parse_number_or(&self.volume_flow_m3_h, 0.0),
            pressure_hpa: parse_number_or(&self.pressure_hpa, FALLBACK_PRESSURE_HPA),
            heating_supply_c: parse_number_or(&self.heating_supply_c, 0.0),
            heating_return_c: parse_number_or(&self.heating_return_c, 0.0),
            cooling_supply_c: parse_number_or(&self.cooling_supply_c, 0.0),
            cooling_return_c: parse_number_or(&self.cooling_return_c, 0.0),
        }
    }
}

impl Default for AirHandlingForm {
    fn default() -> Self {
        AirHandlingForm::from_input(&AirHandlingInput::default())
    }
}

// =============================================================================
// Room load form
// =============================================================================

/// Raw text of the room load form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomLoadForm {
    pub label: String,
    pub room_type: String,
    pub envelope: String,
    pub length_m: String,
    pub width_m: String,
    pub height_m: String,
    pub occupants: String,
    pub equipment_w: String,
    pub lighting_w_m2: String,
    pub heat_per_person_w: String,
    pub window_fraction: String,
}

impl RoomLoadForm {
    /// Field names accepted by [`RoomLoadForm::set`]
    pub const FIELDS: [&'static str; 11] = [
        "label",
        "room_type",
        "envelope",
        "length_m",
        "width_m",
        "height_m",
        "occupants",
        "equipment_w",
        "lighting_w_m2",
        "heat_per_person_w",
        "window_fraction",
    ];

    pub fn from_input(input: &RoomLoadInput) -> Self {
        RoomLoadForm {
            label: input.label.clone(),
            room_type: input.room_type.code().to_string(),
            envelope: input.envelope.code().to_string(),
            length_m: format_default(input.length_m),
            width_m: format_default(input.width_m),
            height_m: format_default(input.height_m),
            occupants: input.occupants.to_string(),
            equipment_w: format_default(input.equipment_w),
            lighting_w_m2: format_default(input.lighting_w_m2),
            heat_per_person_w: format_default(input.heat_per_person_w),
            window_fraction: format_default(input.window_fraction),
        }
    }

    /// Replace one field's raw text
    pub fn set(&mut self, field: &str, value: &str) -> CalcResult<()> {
        let slot = match field {
            "label" => &mut self.label,
            "room_type" => &mut self.room_type,
            "envelope" => &mut self.envelope,
            "length_m" => &mut self.length_m,
            "width_m" => &mut self.width_m,
            "height_m" => &mut self.height_m,
            "occupants" => &mut self.occupants,
            "equipment_w" => &mut self.equipment_w,
            "lighting_w_m2" => &mut self.lighting_w_m2,
            "heat_per_person_w" => &mut self.heat_per_person_w,
            "window_fraction" => &mut self.window_fraction,
            _ => {
                return Err(CalcError::invalid_input(
                    "field",
                    field,
                    "Unknown room form field",
                ))
            }
        };
        *slot = value.to_string();
        Ok(())
    }

    /// Read every field with its fallback
    pub fn to_input(&self) -> RoomLoadInput {
        let occupants = parse_number_or(&self.occupants, 0.0).round().max(0.0);
        RoomLoadInput {
            label: self.label.clone(),
            room_type: RoomType::from_str_flexible(&self.room_type).unwrap_or_default(),
            envelope: EnvelopeType::from_str_flexible(&self.envelope).unwrap_or_default(),
            length_m: parse_number_or(&self.length_m, 0.0),
            width_m: parse_number_or(&self.width_m, 0.0),
            height_m: parse_number_or(&self.height_m, 0.0),
            occupants: occupants.min(f64::from(u32::MAX)) as u32,
            equipment_w: parse_number_or(&self.equipment_w, 0.0),
            lighting_w_m2: parse_number_or(&self.lighting_w_m2, 0.0),
            heat_per_person_w: parse_number_or(&self.heat_per_person_w, 0.0),
            window_fraction: parse_number_or(&self.window_fraction, 0.0),
        }
    }
}

impl Default for RoomLoadForm {
    fn default() -> Self {
        RoomLoadForm::from_input(&RoomLoadInput::default())
    }
}
