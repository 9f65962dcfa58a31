//! # Room Air Flow and Load Calculation
//!
//! Sizes the outdoor air flow of a single room and estimates its design
//! heating and cooling loads.
//!
//! ## Assumptions
//!
//! - One exterior façade along the room length (length × height), glazed by
//!   `window_fraction`; all other surfaces border conditioned rooms
//! - Ventilation air enters at outdoor design temperature (no heat recovery)
//! - A fixed share of the internal gains is credited against the heating load
//! - Solar gain uses a single design irradiance on the window plane
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::room_load::{calculate, RoomLoadInput, VentilationCriterion};
//! use calc_core::catalog::{EnvelopeType, RoomType};
//! use calc_core::settings::DesignSettings;
//!
//! let input = RoomLoadInput {
//!     room_type: RoomType::Office,
//!     envelope: EnvelopeType::Modern,
//!     length_m: 10.0,
//!     width_m: 8.0,
//!     height_m: 3.0,
//!     occupants: 4,
//!     equipment_w: 800.0,
//!     ..RoomLoadInput::default()
//! };
//!
//! let result = calculate(&input, &DesignSettings::default()).unwrap();
//! assert_eq!(result.governing, VentilationCriterion::AirChange);
//! assert_eq!(result.ventilation_m3_h, 240.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{EnvelopeType, RoomType};
use crate::equations::{
    heat_removal_flow_m3_h, transmission_coefficient_w_k, ventilation_coefficient_w_k,
};
use crate::errors::{ensure_finite, CalcError, CalcResult};
use crate::settings::DesignSettings;

/// Input parameters for a room.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Office 2.14",
///   "room_type": "office",
///   "envelope": "modern",
///   "length_m": 10.0,
///   "width_m": 8.0,
///   "height_m": 3.0,
///   "occupants": 4,
///   "equipment_w": 800.0,
///   "lighting_w_m2": 10.0,
///   "heat_per_person_w": 100.0,
///   "window_fraction": 0.3
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomLoadInput {
    /// User label for this room
    pub label: String,

    pub room_type: RoomType,

    pub envelope: EnvelopeType,

    /// Room length along the exterior façade (m)
    pub length_m: f64,

    /// Room depth (m)
    pub width_m: f64,

    /// Clear room height (m)
    pub height_m: f64,

    /// Number of occupants
    pub occupants: u32,

    /// Equipment heat (W)
    pub equipment_w: f64,

    /// Lighting power density (W/m²)
    pub lighting_w_m2: f64,

    /// Sensible heat per occupant (W)
    pub heat_per_person_w: f64,

    /// Glazed share of the exterior façade (0..1)
    pub window_fraction: f64,
}

impl Default for RoomLoadInput {
    fn default() -> Self {
        RoomLoadInput {
            label: "Room 1".to_string(),
            room_type: RoomType::Office,
            envelope: EnvelopeType::Standard,
            length_m: 5.0,
            width_m: 4.0,
            height_m: 3.0,
            occupants: 2,
            equipment_w: 300.0,
            lighting_w_m2: 10.0,
            heat_per_person_w: 100.0,
            window_fraction: 0.3,
        }
    }
}

impl RoomLoadInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("length_m", self.length_m),
            ("width_m", self.width_m),
            ("height_m", self.height_m),
        ] {
            if !(value > 0.0) {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Room dimensions must be positive",
                ));
            }
        }
        for (field, value) in [
            ("equipment_w", self.equipment_w),
            ("lighting_w_m2", self.lighting_w_m2),
            ("heat_per_person_w", self.heat_per_person_w),
        ] {
            if value < 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Internal loads cannot be negative",
                ));
            }
        }
        if !(0.0..=1.0).contains(&self.window_fraction) {
            return Err(CalcError::invalid_input(
                "window_fraction",
                self.window_fraction.to_string(),
                "Window fraction must be between 0 and 1",
            ));
        }
        Ok(())
    }

    /// Floor area A = l × w (m²)
    pub fn floor_area_m2(&self) -> f64 {
        self.length_m * self.width_m
    }

    /// Room volume V = l × w × h (m³)
    pub fn volume_m3(&self) -> f64 {
        self.floor_area_m2() * self.height_m
    }

    /// Exterior façade area l × h (m²)
    pub fn facade_area_m2(&self) -> f64 {
        self.length_m * self.height_m
    }

    pub fn window_area_m2(&self) -> f64 {
        self.facade_area_m2() * self.window_fraction
    }
}

/// Sizing criterion for the outdoor air flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VentilationCriterion {
    /// Hygienic outdoor air per occupant
    PerPerson,
    /// Minimum air change rate
    AirChange,
    /// Outdoor air per floor area
    FloorArea,
    /// Removal of internal heat
    HeatRemoval,
}

impl VentilationCriterion {
    /// Evaluation order; earlier criteria win ties
    pub const ALL: [VentilationCriterion; 4] = [
        VentilationCriterion::PerPerson,
        VentilationCriterion::AirChange,
        VentilationCriterion::FloorArea,
        VentilationCriterion::HeatRemoval,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            VentilationCriterion::PerPerson => "Hygiene (per person)",
            VentilationCriterion::AirChange => "Minimum air change",
            VentilationCriterion::FloorArea => "Floor area",
            VentilationCriterion::HeatRemoval => "Heat removal",
        }
    }
}

impl std::fmt::Display for VentilationCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One candidate flow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowCandidate {
    pub criterion: VentilationCriterion,
    /// Candidate air flow (m³/h); zero when not applicable
    pub flow_m3_h: f64,
    /// False for heat removal in rooms without significant equipment heat
    pub applicable: bool,
}

/// Advisory and safety warnings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RoomWarning {
    /// More occupants per floor area than the room type allows
    Overcrowded {
        density_per_m2: f64,
        limit_per_m2: f64,
    },
    /// Without cooling the room would exceed the workplace comfort limit
    ComfortLimitExceeded { temperature_c: f64, limit_c: f64 },
}

impl RoomWarning {
    /// Human-readable warning text
    pub fn message(&self) -> String {
        match self {
            RoomWarning::Overcrowded {
                density_per_m2,
                limit_per_m2,
            } => format!(
                "Occupant density {:.2} persons/m² exceeds the limit of {:.2} persons/m² for this room type.",
                density_per_m2, limit_per_m2
            ),
            RoomWarning::ComfortLimitExceeded {
                temperature_c,
                limit_c,
            } => format!(
                "Without cooling the room reaches about {:.1} °C, above the {:.0} °C workplace limit. Cooling is required.",
                temperature_c, limit_c
            ),
        }
    }
}

/// Results from a room load calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomLoadResult {
    pub floor_area_m2: f64,
    pub volume_m3: f64,
    pub window_area_m2: f64,

    /// All four candidates in evaluation order
    pub candidates: Vec<FlowCandidate>,

    /// Design outdoor air flow (m³/h)
    pub ventilation_m3_h: f64,

    /// Criterion that produced the design flow
    pub governing: VentilationCriterion,

    /// Resulting air change rate (1/h)
    pub air_changes_per_h: f64,

    /// People + equipment + lighting (W)
    pub internal_gains_w: f64,

    /// Transmission heat-flow coefficient (W/K)
    pub transmission_coefficient_w_k: f64,

    /// Ventilation heat-flow coefficient (W/K)
    pub ventilation_coefficient_w_k: f64,

    /// Transmission loss at winter design conditions (W)
    pub transmission_loss_w: f64,

    /// Ventilation loss at winter design conditions (W)
    pub ventilation_loss_w: f64,

    /// Design heating load (W), never negative
    pub heating_load_w: f64,

    /// Solar gain through the windows (W)
    pub solar_gain_w: f64,

    /// Design cooling load (W)
    pub cooling_load_w: f64,

    /// Estimated room temperature without cooling (°C)
    pub unconditioned_temp_c: f64,

    /// Occupants per floor area (persons/m²)
    pub occupant_density_per_m2: f64,

    pub warnings: Vec<RoomWarning>,
}

impl RoomLoadResult {
    /// Flow for a given criterion
    pub fn candidate(&self, criterion: VentilationCriterion) -> Option<&FlowCandidate> {
        self.candidates.iter().find(|c| c.criterion == criterion)
    }
}

/// Calculate ventilation flow, heating load and cooling load for a room.
///
/// # Returns
///
/// * `Ok(RoomLoadResult)` - Flows, loads and warnings
/// * `Err(CalcError)` - If inputs are invalid or a load is not finite
pub fn calculate(input: &RoomLoadInput, settings: &DesignSettings) -> CalcResult<RoomLoadResult> {
    settings.validate()?;
    input.validate()?;

    let rates = input.room_type.rates();
    let envelope = input.envelope.properties();
    let tol = settings.tolerance;

    let floor_area = input.floor_area_m2();
    let volume = input.volume_m3();
    let window_area = input.window_area_m2();
    let opaque_area = input.facade_area_m2() - window_area;
    let occupants = f64::from(input.occupants);

    // Internal gains
    let people_w = occupants * input.heat_per_person_w;
    let lighting_w = input.lighting_w_m2 * floor_area;
    let internal_gains = people_w + input.equipment_w + lighting_w;

    // Ventilation candidates
    let heat_removal = if rates.heat_generating {
        heat_removal_flow_m3_h(
            internal_gains,
            settings.heat_removal_delta_t_k,
            settings.air_density_kg_m3,
            settings.air_heat_capacity_j_kgk,
        )
    } else {
        0.0
    };
    let candidates: Vec<FlowCandidate> = VentilationCriterion::ALL
        .iter()
        .map(|&criterion| {
            let (flow_m3_h, applicable) = match criterion {
                VentilationCriterion::PerPerson => (occupants * rates.per_person_m3_h, true),
                VentilationCriterion::AirChange => (volume * rates.air_changes_per_h, true),
                VentilationCriterion::FloorArea => (floor_area * rates.per_area_m3_h_m2, true),
                VentilationCriterion::HeatRemoval => (heat_removal, rates.heat_generating),
            };
            FlowCandidate {
                criterion,
                flow_m3_h,
                applicable,
            }
        })
        .collect();

    let governing_candidate = candidates
        .iter()
        .filter(|c| c.applicable)
        .fold(None, |best: Option<&FlowCandidate>, c| match best {
            Some(b) if c.flow_m3_h <= b.flow_m3_h + tol => Some(b),
            _ => Some(c),
        })
        .ok_or_else(|| CalcError::Internal {
            message: "no applicable ventilation criterion".to_string(),
        })?;
    let ventilation = governing_candidate.flow_m3_h;
    let governing = governing_candidate.criterion;
    debug!(%governing, ventilation_m3_h = ventilation, "ventilation sized");

    // Heating: transmission and ventilation losses minus credited gains
    let h_t = transmission_coefficient_w_k(&[
        (envelope.u_wall_w_m2k, opaque_area),
        (envelope.u_window_w_m2k, window_area),
    ]);
    let h_v = ventilation_coefficient_w_k(
        ventilation,
        settings.air_density_kg_m3,
        settings.air_heat_capacity_j_kgk,
    );
    let winter_dt = settings.heating_indoor_c - settings.winter_outdoor_c;
    let transmission_loss = h_t * winter_dt;
    let ventilation_loss = h_v * winter_dt;
    let losses = transmission_loss + ventilation_loss;
    let credited_gains = settings.internal_gain_credit * internal_gains;
    let heating_load = if losses > credited_gains {
        losses - credited_gains
    } else {
        0.0
    };

    // Cooling: internal gains plus solar gain through the windows
    let solar_gain = window_area * settings.solar_irradiance_w_m2 * envelope.g_value;
    let cooling_load = internal_gains + solar_gain;

    let unconditioned_temp = ensure_finite(
        settings.summer_outdoor_c + cooling_load / (h_t + h_v),
        "room balance",
        "unconditioned temperature",
    )?;

    let mut warnings = Vec::new();
    let density = occupants / floor_area;
    if density > rates.max_occupant_density {
        warnings.push(RoomWarning::Overcrowded {
            density_per_m2: density,
            limit_per_m2: rates.max_occupant_density,
        });
    }
    if unconditioned_temp > settings.comfort_limit_c + tol {
        warnings.push(RoomWarning::ComfortLimitExceeded {
            temperature_c: unconditioned_temp,
            limit_c: settings.comfort_limit_c,
        });
    }

    Ok(RoomLoadResult {
        floor_area_m2: floor_area,
        volume_m3: volume,
        window_area_m2: window_area,
        candidates,
        ventilation_m3_h: ventilation,
        governing,
        air_changes_per_h: ventilation / volume,
        internal_gains_w: internal_gains,
        transmission_coefficient_w_k: h_t,
        ventilation_coefficient_w_k: h_v,
        transmission_loss_w: transmission_loss,
        ventilation_loss_w: ventilation_loss,
        heating_load_w: heating_load,
        solar_gain_w: solar_gain,
        cooling_load_w: cooling_load,
        unconditioned_temp_c: unconditioned_temp,
        occupant_density_per_m2: density,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn office() -> RoomLoadInput {
        RoomLoadInput {
            label: "Test Office".to_string(),
            room_type: RoomType::Office,
            envelope: EnvelopeType::Modern,
            length_m: 10.0,
            width_m: 8.0,
            height_m: 3.0,
            occupants: 4,
            equipment_w: 800.0,
            lighting_w_m2: 10.0,
            heat_per_person_w: 100.0,
            window_fraction: 0.3,
        }
    }

    #[test]
    fn test_geometry() {
        let room = office();
        assert_eq!(room.floor_area_m2(), 80.0);
        assert_eq!(room.volume_m3(), 240.0);
        assert_eq!(room.facade_area_m2(), 30.0);
        assert!((room.window_area_m2() - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_office_flow_is_larger_of_person_and_air_change() {
        let result = calculate(&office(), &DesignSettings::default()).unwrap();
        let per_person = result.candidate(VentilationCriterion::PerPerson).unwrap();
        let air_change = result.candidate(VentilationCriterion::AirChange).unwrap();
        assert_eq!(per_person.flow_m3_h, 144.0);
        assert_eq!(air_change.flow_m3_h, 240.0);

        let expected = per_person.flow_m3_h.max(air_change.flow_m3_h);
        assert_eq!(result.ventilation_m3_h, expected);
        assert_eq!(result.governing, VentilationCriterion::AirChange);
        assert!((result.air_changes_per_h - 1.0).abs() < 1e-12);

        let heat_removal = result.candidate(VentilationCriterion::HeatRemoval).unwrap();
        assert!(!heat_removal.applicable);
    }

    #[test]
    fn test_crowded_office_governed_by_people() {
        let mut room = office();
        room.occupants = 8;
        let result = calculate(&room, &DesignSettings::default()).unwrap();
        assert_eq!(result.governing, VentilationCriterion::PerPerson);
        assert_eq!(result.ventilation_m3_h, 288.0);
    }

    fn office_with_air_change_flow(air_change_m3_h: f64) -> RoomLoadInput {
        // 80 m² floor and ACH 1.0, so the volume is the air-change flow
        RoomLoadInput {
            occupants: 10,
            height_m: air_change_m3_h / 80.0,
            ..office()
        }
    }

    #[test]
    fn test_equal_candidates_go_to_earlier_criterion() {
        let result =
            calculate(&office_with_air_change_flow(360.0), &DesignSettings::default()).unwrap();
        let air_change = result.candidate(VentilationCriterion::AirChange).unwrap();
        assert!((air_change.flow_m3_h - 360.0).abs() < 1e-9);
        assert_eq!(result.governing, VentilationCriterion::PerPerson);
        assert_eq!(result.ventilation_m3_h, 360.0);
    }

    #[test]
    fn test_later_candidate_must_exceed_by_more_than_tolerance() {
        let s = DesignSettings::default();

        let within = calculate(&office_with_air_change_flow(360.005), &s).unwrap();
        assert_eq!(within.governing, VentilationCriterion::PerPerson);
        assert_eq!(within.ventilation_m3_h, 360.0);

        let beyond = calculate(&office_with_air_change_flow(360.02), &s).unwrap();
        assert_eq!(beyond.governing, VentilationCriterion::AirChange);
        assert!((beyond.ventilation_m3_h - 360.02).abs() < 1e-9);
    }

    #[test]
    fn test_heating_load_balance() {
        let s = DesignSettings::default();
        let result = calculate(&office(), &s).unwrap();
        // H_T = 0.15·21 + 0.8·9 = 10.35 W/K
        assert!((result.transmission_coefficient_w_k - 10.35).abs() < 1e-9);
        // gains = 400 people + 800 equipment + 800 lighting
        assert_eq!(result.internal_gains_w, 2000.0);
        let expected = result.transmission_loss_w + result.ventilation_loss_w - 0.5 * 2000.0;
        assert!((result.heating_load_w - expected).abs() < 1e-9);
        assert!(result.heating_load_w > 0.0);
    }

    #[test]
    fn test_heating_load_never_negative() {
        let mut room = office();
        room.equipment_w = 20_000.0;
        let result = calculate(&room, &DesignSettings::default()).unwrap();
        assert_eq!(result.heating_load_w, 0.0);
    }

    #[test]
    fn test_cooling_load_includes_solar() {
        let result = calculate(&office(), &DesignSettings::default()).unwrap();
        // 9 m² · 400 W/m² · g 0.5
        assert!((result.solar_gain_w - 1800.0).abs() < 1e-9);
        assert!((result.cooling_load_w - 3800.0).abs() < 1e-9);
    }

    #[test]
    fn test_server_room_governed_by_heat_removal() {
        let room = RoomLoadInput {
            room_type: RoomType::ServerRoom,
            length_m: 5.0,
            width_m: 4.0,
            height_m: 3.0,
            occupants: 0,
            equipment_w: 5000.0,
            ..office()
        };
        let result = calculate(&room, &DesignSettings::default()).unwrap();
        assert_eq!(result.governing, VentilationCriterion::HeatRemoval);
        // (5000 + 200) W · 3600 / (1.2 · 1006 · 6)
        let expected = 5200.0 * 3600.0 / (1.2 * 1006.0 * 6.0);
        assert!((result.ventilation_m3_h - expected).abs() < 1e-6);
    }

    #[test]
    fn test_overcrowding_warning() {
        let room = RoomLoadInput {
            room_type: RoomType::MeetingRoom,
            length_m: 5.0,
            width_m: 4.0,
            occupants: 15,
            ..office()
        };
        let result = calculate(&room, &DesignSettings::default()).unwrap();
        assert!(result
            .warnings
            .iter()
            .any(|w| matches!(w, RoomWarning::Overcrowded { .. })));
        assert!((result.occupant_density_per_m2 - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_comfort_warning_depends_on_limit() {
        let result = calculate(&office(), &DesignSettings::default()).unwrap();
        assert!(result.unconditioned_temp_c > 26.0);
        let warning = result
            .warnings
            .iter()
            .find(|w| matches!(w, RoomWarning::ComfortLimitExceeded { .. }))
            .unwrap();
        assert!(warning.message().contains("26 °C"));

        let relaxed = DesignSettings {
            comfort_limit_c: 100.0,
            ..DesignSettings::default()
        };
        let result = calculate(&office(), &relaxed).unwrap();
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_invalid_inputs() {
        let mut room = office();
        room.height_m = 0.0;
        assert!(calculate(&room, &DesignSettings::default()).is_err());

        let mut room = office();
        room.window_fraction = 1.5;
        assert!(calculate(&room, &DesignSettings::default()).is_err());

        let mut room = office();
        room.equipment_w = -1.0;
        assert!(calculate(&room, &DesignSettings::default()).is_err());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let s = DesignSettings {
            heat_removal_delta_t_k: 0.0,
            ..DesignSettings::default()
        };
        let room = RoomLoadInput {
            room_type: RoomType::ServerRoom,
            ..office()
        };
        match calculate(&room, &s).unwrap_err() {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "heat_removal_delta_t_k"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_serialization() {
        let room = office();
        let json = serde_json::to_string_pretty(&room).unwrap();
        assert!(json.contains("\"modern\""));
        let roundtrip: RoomLoadInput = serde_json::from_str(&json).unwrap();
        assert_eq!(room, roundtrip);
    }
}
