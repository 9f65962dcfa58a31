//! # Air-Handling Process Calculation
//!
//! Follows outdoor air through the conditioning chain of an air-handling unit
//! and sizes each coil:
//!
//! ```text
//!  outdoor ──► pre-heater ──► cooler / dehumidifier ──► re-heater ──► supply
//!   node 0        node 1              node 2               node 3
//! ```
//!
//! ## Assumptions
//!
//! - Stages always run in the order above; a stage that is not needed is skipped
//! - Heating stages and sensible cooling keep the humidity ratio constant
//! - Dehumidification cools to the dew point of the target humidity ratio
//!   (ideal coil, bypass factor 0)
//! - Every threshold comparison uses the same tolerance from [`DesignSettings`]
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::air_handling::{calculate, AirHandlingInput, OperatingMode, Stage};
//! use calc_core::settings::DesignSettings;
//!
//! let input = AirHandlingInput {
//!     mode: OperatingMode::HeatingOnly,
//!     outdoor_temp_c: -10.0,
//!     outdoor_rh_pct: 80.0,
//!     supply_temp_c: 20.0,
//!     ..AirHandlingInput::default()
//! };
//!
//! let result = calculate(&input, &DesignSettings::default()).unwrap();
//! assert!(result.pre_heater.is_active());
//! assert!(result.re_heater.is_active());
//! assert_eq!(result.cooler.duty_kw, 0.0);
//! assert_eq!(result.active_stages(), vec![Stage::PreHeater, Stage::ReHeater]);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::{
    absolute_humidity_g_m3, air_mass_flow_kg_s, coil_duty_kw, condensate_kg_h, dew_point_c,
    enthalpy_kj_kg, humidity_ratio_g_kg, relative_humidity_pct, water_flow_m3_h,
};
use crate::errors::{ensure_finite, CalcError, CalcResult};
use crate::settings::DesignSettings;
use crate::units::{HectoPascals, Pascals};

// =============================================================================
// Operating mode
// =============================================================================

/// What the unit is allowed to do with the air
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperatingMode {
    /// Heating coils only, humidity follows the outdoor air
    #[default]
    HeatingOnly,
    /// Cooling coil may lower the temperature, humidity ratio is held
    SensibleCooling,
    /// Cooling coil may condense water to reach a target humidity
    Dehumidifying,
}

impl OperatingMode {
    /// All operating modes for UI selection
    pub const ALL: [OperatingMode; 3] = [
        OperatingMode::HeatingOnly,
        OperatingMode::SensibleCooling,
        OperatingMode::Dehumidifying,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            OperatingMode::HeatingOnly => "heating-only",
            OperatingMode::SensibleCooling => "sensible-cooling",
            OperatingMode::Dehumidifying => "dehumidifying",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "heating-only" | "heating" | "heat" | "heizen" => Ok(OperatingMode::HeatingOnly),
            "sensible-cooling" | "cooling" | "cool" | "kuehlen-sensibel" => {
                Ok(OperatingMode::SensibleCooling)
            }
            "dehumidifying" | "dehumidify" | "dehum" | "entfeuchten" => {
                Ok(OperatingMode::Dehumidifying)
            }
            _ => Err(CalcError::unknown_entry("operating mode", s)),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OperatingMode::HeatingOnly => "Heating only",
            OperatingMode::SensibleCooling => "Sensible cooling",
            OperatingMode::Dehumidifying => "Dehumidifying",
        }
    }

    /// Whether the cooling coil takes part in the process
    pub fn uses_cooler(&self) -> bool {
        !matches!(self, OperatingMode::HeatingOnly)
    }

    /// Whether the target relative humidity input is read
    pub fn uses_target_humidity(&self) -> bool {
        matches!(self, OperatingMode::Dehumidifying)
    }

    /// Whether the cooling-water temperatures are read
    pub fn uses_cooling_water(&self) -> bool {
        self.uses_cooler()
    }
}

impl std::fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// =============================================================================
// Input
// =============================================================================

/// Input parameters for an air-handling process.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "AHU-1",
///   "mode": "dehumidifying",
///   "outdoor_temp_c": 32.0,
///   "outdoor_rh_pct": 40.0,
///   "supply_temp_c": 18.0,
///   "supply_rh_pct": 50.0,
///   "volume_flow_m3_h": 5000.0,
///   "pressure_hpa": 1013.25,
///   "heating_supply_c": 70.0,
///   "heating_return_c": 50.0,
///   "cooling_supply_c": 4.0,
///   "cooling_return_c": 10.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirHandlingInput {
    /// User label for this unit (e.g., "AHU-1")
    pub label: String,

    /// Operating mode
    pub mode: OperatingMode,

    /// Outdoor air temperature (°C)
    pub outdoor_temp_c: f64,

    /// Outdoor relative humidity (%)
    pub outdoor_rh_pct: f64,

    /// Target supply air temperature (°C)
    pub supply_temp_c: f64,

    /// Target supply relative humidity (%), only read when dehumidifying
    pub supply_rh_pct: f64,

    /// Supply air volume flow (m³/h)
    pub volume_flow_m3_h: f64,

    /// Absolute air pressure (hPa)
    pub pressure_hpa: f64,

    /// Heating water supply temperature (°C)
    pub heating_supply_c: f64,

    /// Heating water return temperature (°C)
    pub heating_return_c: f64,

    /// Cooling water supply temperature (°C)
    pub cooling_supply_c: f64,

    /// Cooling water return temperature (°C)
    pub cooling_return_c: f64,
}

impl Default for AirHandlingInput {
    fn default() -> Self {
        AirHandlingInput {
            label: "AHU-1".to_string(),
            mode: OperatingMode::HeatingOnly,
            outdoor_temp_c: -12.0,
            outdoor_rh_pct: 80.0,
            supply_temp_c: 20.0,
            supply_rh_pct: 50.0,
            volume_flow_m3_h: 5000.0,
            pressure_hpa: 1013.25,
            heating_supply_c: 70.0,
            heating_return_c: 50.0,
            cooling_supply_c: 6.0,
            cooling_return_c: 12.0,
        }
    }
}

impl AirHandlingInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.volume_flow_m3_h < 0.0 {
            return Err(CalcError::invalid_input(
                "volume_flow_m3_h",
                self.volume_flow_m3_h.to_string(),
                "Air flow cannot be negative",
            ));
        }
        if !(self.pressure_hpa > 0.0) {
            return Err(CalcError::invalid_input(
                "pressure_hpa",
                self.pressure_hpa.to_string(),
                "Pressure must be positive",
            ));
        }
        check_relative_humidity("outdoor_rh_pct", self.outdoor_rh_pct)?;
        // The target humidity is only read while dehumidifying
        if self.mode.uses_target_humidity() {
            check_relative_humidity("supply_rh_pct", self.supply_rh_pct)?;
        }
        Ok(())
    }

    /// Absolute pressure in pascals
    pub fn pressure_pa(&self) -> f64 {
        Pascals::from(HectoPascals(self.pressure_hpa)).value()
    }
}

fn check_relative_humidity(field: &str, rh_pct: f64) -> CalcResult<()> {
    if (0.0..=100.0).contains(&rh_pct) {
        Ok(())
    } else {
        Err(CalcError::invalid_input(
            field,
            rh_pct.to_string(),
            "Relative humidity must be between 0 and 100 %",
        ))
    }
}

// =============================================================================
// Result types
// =============================================================================

/// Moist-air state at one node of the process chain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirState {
    /// Dry-bulb temperature (°C)
    pub temperature_c: f64,
    /// Relative humidity (%), capped at 100
    pub relative_humidity_pct: f64,
    /// Humidity ratio (g/kg dry air)
    pub humidity_ratio_g_kg: f64,
    /// Specific enthalpy (kJ/kg dry air)
    pub enthalpy_kj_kg: f64,
    /// Absolute humidity (g/m³)
    pub absolute_humidity_g_m3: f64,
}

impl AirState {
    /// Derive the full state from temperature and humidity ratio.
    pub fn from_temp_and_ratio(t_c: f64, x_g_kg: f64, p_pa: f64, air_density_kg_m3: f64) -> Self {
        AirState {
            temperature_c: t_c,
            relative_humidity_pct: relative_humidity_pct(t_c, x_g_kg, p_pa),
            humidity_ratio_g_kg: x_g_kg,
            enthalpy_kj_kg: enthalpy_kj_kg(t_c, x_g_kg),
            absolute_humidity_g_m3: absolute_humidity_g_m3(x_g_kg, air_density_kg_m3),
        }
    }
}

/// Component of the air-handling unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    PreHeater,
    Cooler,
    ReHeater,
}

impl Stage {
    /// Pipeline order
    pub const ALL: [Stage; 3] = [Stage::PreHeater, Stage::Cooler, Stage::ReHeater];

    /// Short tag used in process chains ("PH → CC → RH")
    pub fn code(&self) -> &'static str {
        match self {
            Stage::PreHeater => "PH",
            Stage::Cooler => "CC",
            Stage::ReHeater => "RH",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::PreHeater => "Pre-heater",
            Stage::Cooler => "Cooler",
            Stage::ReHeater => "Re-heater",
        }
    }

    /// Heating coils raise the enthalpy, the cooler lowers it
    pub fn is_heating(&self) -> bool {
        !matches!(self, Stage::Cooler)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Duty of one component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentDuty {
    pub stage: Stage,
    /// Thermal duty (kW); a magnitude, direction follows from the stage
    pub duty_kw: f64,
    /// Heating or cooling water flow (m³/h)
    pub water_flow_m3_h: f64,
    /// Condensate removed (kg/h), cooler only
    pub condensate_kg_h: f64,
}

impl ComponentDuty {
    fn idle(stage: Stage) -> Self {
        ComponentDuty {
            stage,
            duty_kw: 0.0,
            water_flow_m3_h: 0.0,
            condensate_kg_h: 0.0,
        }
    }

    /// A component counts as active when it transfers heat
    pub fn is_active(&self) -> bool {
        self.duty_kw > 0.0
    }
}

/// Direction the air has been conditioned in, up to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trend {
    Heated,
    Cooled,
    Unchanged,
}

/// A state in the chain plus how it should be presented
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateNode {
    pub state: AirState,
    pub trend: Trend,
    /// True when the component feeding this node did nothing
    pub inactive: bool,
}

/// One-line summary of the process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ProcessOverview {
    /// The configuration cannot work; shown instead of the chain
    Advisory { message: String },
    /// Active components in pipeline order
    Chain { stages: Vec<Stage> },
    /// Outdoor air already matches the supply target
    Ideal,
}

/// Results from an air-handling calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirHandlingResult {
    /// Outdoor, after pre-heater, after cooler, after re-heater
    pub nodes: Vec<StateNode>,

    /// Supply air leaving the unit
    pub supply: AirState,

    /// Supply compared with outdoor air
    pub supply_trend: Trend,

    pub pre_heater: ComponentDuty,
    pub cooler: ComponentDuty,
    pub re_heater: ComponentDuty,

    /// Pre-heater plus re-heater (kW)
    pub total_heating_kw: f64,

    /// Cooler (kW)
    pub total_cooling_kw: f64,

    /// Dry-air mass flow (kg/s)
    pub mass_flow_kg_s: f64,

    /// Humidity ratio the unit aims for (g/kg)
    pub target_humidity_ratio_g_kg: f64,

    /// Dew point of the target humidity ratio, when dehumidifying (°C)
    pub target_dew_point_c: Option<f64>,

    /// Plausibility advisory, e.g. cooling water too warm
    pub advisory: Option<String>,

    pub overview: ProcessOverview,
}

impl AirHandlingResult {
    /// Outdoor air state
    pub fn outdoor(&self) -> &AirState {
        &self.nodes[0].state
    }

    /// Components in pipeline order
    pub fn components(&self) -> [&ComponentDuty; 3] {
        [&self.pre_heater, &self.cooler, &self.re_heater]
    }

    /// Stages that transfer heat, in pipeline order
    pub fn active_stages(&self) -> Vec<Stage> {
        self.components()
            .iter()
            .filter(|c| c.is_active())
            .map(|c| c.stage)
            .collect()
    }
}

// =============================================================================
// Calculation
// =============================================================================

/// Run the air-handling process chain.
///
/// # Returns
///
/// * `Ok(AirHandlingResult)` - States, duties and overview
/// * `Err(CalcError)` - Invalid inputs, or a humidity ratio that is not finite
///   for the given pressure (the pass is abandoned without a result)
pub fn calculate(
    input: &AirHandlingInput,
    settings: &DesignSettings,
) -> CalcResult<AirHandlingResult> {
    settings.validate()?;
    input.validate()?;

    let p_pa = input.pressure_pa();
    let tol = settings.tolerance;
    let rho = settings.air_density_kg_m3;
    let state_at = |t_c: f64, x_g_kg: f64| AirState::from_temp_and_ratio(t_c, x_g_kg, p_pa, rho);

    let outdoor_x = ensure_finite(
        humidity_ratio_g_kg(input.outdoor_temp_c, input.outdoor_rh_pct, p_pa),
        "outdoor air",
        "humidity ratio",
    )?;
    if outdoor_x < 0.0 {
        return Err(CalcError::invalid_input(
            "pressure_hpa",
            input.pressure_hpa.to_string(),
            "Vapour pressure of the outdoor air exceeds the total pressure",
        ));
    }
    let outdoor = state_at(input.outdoor_temp_c, outdoor_x);

    let target_x = if input.mode.uses_target_humidity() {
        ensure_finite(
            humidity_ratio_g_kg(input.supply_temp_c, input.supply_rh_pct, p_pa),
            "supply target",
            "humidity ratio",
        )?
    } else {
        outdoor_x
    };

    let target_dew_point_c = if input.mode.uses_target_humidity() {
        Some(ensure_finite(
            dew_point_c(target_x, p_pa),
            "supply target",
            "dew point",
        )?)
    } else {
        None
    };

    let advisory = target_dew_point_c
        .filter(|td| *td < input.cooling_supply_c + settings.dew_point_margin_k - tol)
        .map(|td| {
            format!(
                "Cooling water temperature ({:.1} °C) too high to reach the dew point of {:.1} °C. Dehumidification not possible.",
                input.cooling_supply_c, td
            )
        });

    let mass_flow = air_mass_flow_kg_s(input.volume_flow_m3_h, rho);
    let mut current = outdoor;

    // Pre-heater: frost protection for the downstream coils
    let mut pre_heater = ComponentDuty::idle(Stage::PreHeater);
    if current.temperature_c < settings.frost_protection_c - tol {
        let next = state_at(settings.frost_protection_c, current.humidity_ratio_g_kg);
        pre_heater.duty_kw = coil_duty_kw(mass_flow, next.enthalpy_kj_kg - current.enthalpy_kj_kg);
        debug!(duty_kw = pre_heater.duty_kw, "pre-heater to frost protection");
        current = next;
    }
    let after_pre_heater = current;

    // Cooler: dehumidify to the target dew point, otherwise cool sensibly
    let mut cooler = ComponentDuty::idle(Stage::Cooler);
    if input.mode.uses_cooler() {
        let needs_dehumidification =
            input.mode.uses_target_humidity() && current.humidity_ratio_g_kg > target_x + tol;
        let needs_cooling = current.temperature_c > input.supply_temp_c + tol;

        if let (true, Some(dew_point)) = (needs_dehumidification, target_dew_point_c) {
            let next = state_at(dew_point, target_x);
            cooler.duty_kw = coil_duty_kw(mass_flow, current.enthalpy_kj_kg - next.enthalpy_kj_kg);
            cooler.condensate_kg_h =
                condensate_kg_h(mass_flow, current.humidity_ratio_g_kg - target_x);
            debug!(
                duty_kw = cooler.duty_kw,
                condensate_kg_h = cooler.condensate_kg_h,
                "cooler dehumidifying"
            );
            current = next;
        } else if needs_cooling {
            let next = state_at(input.supply_temp_c, current.humidity_ratio_g_kg);
            cooler.duty_kw = coil_duty_kw(mass_flow, current.enthalpy_kj_kg - next.enthalpy_kj_kg);
            debug!(duty_kw = cooler.duty_kw, "cooler sensible");
            current = next;
        }
    }
    let after_cooler = current;

    // Re-heater: bring the air up to the supply temperature
    let mut re_heater = ComponentDuty::idle(Stage::ReHeater);
    if current.temperature_c < input.supply_temp_c - tol {
        let next = state_at(input.supply_temp_c, current.humidity_ratio_g_kg);
        re_heater.duty_kw = coil_duty_kw(mass_flow, next.enthalpy_kj_kg - current.enthalpy_kj_kg);
        debug!(duty_kw = re_heater.duty_kw, "re-heater to supply temperature");
        current = next;
    }
    let supply = current;

    let heating_spread = input.heating_supply_c - input.heating_return_c;
    let cooling_spread = input.cooling_return_c - input.cooling_supply_c;
    for component in [&mut pre_heater, &mut re_heater] {
        component.water_flow_m3_h = water_flow_m3_h(
            component.duty_kw,
            heating_spread,
            settings.water_density_kg_m3,
            settings.water_heat_capacity_kj_kgk,
        );
    }
    cooler.water_flow_m3_h = water_flow_m3_h(
        cooler.duty_kw,
        cooling_spread,
        settings.water_density_kg_m3,
        settings.water_heat_capacity_kj_kgk,
    );

    let nodes = build_nodes(
        [outdoor, after_pre_heater, after_cooler, supply],
        [&pre_heater, &cooler, &re_heater],
    );
    let supply_trend = compare_temperatures(supply.temperature_c, outdoor.temperature_c, tol);

    let active: Vec<Stage> = [&pre_heater, &cooler, &re_heater]
        .iter()
        .filter(|c| c.is_active())
        .map(|c| c.stage)
        .collect();
    let overview = match &advisory {
        Some(message) => ProcessOverview::Advisory {
            message: message.clone(),
        },
        None if active.is_empty() => ProcessOverview::Ideal,
        None => ProcessOverview::Chain { stages: active },
    };

    Ok(AirHandlingResult {
        nodes,
        supply,
        supply_trend,
        total_heating_kw: pre_heater.duty_kw + re_heater.duty_kw,
        total_cooling_kw: cooler.duty_kw,
        pre_heater,
        cooler,
        re_heater,
        mass_flow_kg_s: mass_flow,
        target_humidity_ratio_g_kg: target_x,
        target_dew_point_c,
        advisory,
        overview,
    })
}

/// Node 0 is neutral; every later node keeps the previous trend unless the
/// component feeding it was active.
fn build_nodes(states: [AirState; 4], components: [&ComponentDuty; 3]) -> Vec<StateNode> {
    let mut nodes = Vec::with_capacity(states.len());
    let mut trend = Trend::Unchanged;
    nodes.push(StateNode {
        state: states[0],
        trend,
        inactive: false,
    });
    for (state, component) in states[1..].iter().zip(components) {
        if component.is_active() {
            trend = if component.stage.is_heating() {
                Trend::Heated
            } else {
                Trend::Cooled
            };
        }
        nodes.push(StateNode {
            state: *state,
            trend,
            inactive: !component.is_active(),
        });
    }
    nodes
}

fn compare_temperatures(t_c: f64, reference_c: f64, tol: f64) -> Trend {
    if t_c > reference_c + tol {
        Trend::Heated
    } else if t_c < reference_c - tol {
        Trend::Cooled
    } else {
        Trend::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> DesignSettings {
        DesignSettings::default()
    }

    fn winter_input(outdoor_temp_c: f64) -> AirHandlingInput {
        AirHandlingInput {
            label: "Test AHU".to_string(),
            mode: OperatingMode::HeatingOnly,
            outdoor_temp_c,
            outdoor_rh_pct: 80.0,
            supply_temp_c: 18.0,
            supply_rh_pct: 50.0,
            volume_flow_m3_h: 3000.0,
            pressure_hpa: 1013.25,
            heating_supply_c: 70.0,
            heating_return_c: 50.0,
            cooling_supply_c: 6.0,
            cooling_return_c: 12.0,
        }
    }

    fn summer_input(mode: OperatingMode) -> AirHandlingInput {
        AirHandlingInput {
            mode,
            outdoor_temp_c: 30.0,
            outdoor_rh_pct: 60.0,
            supply_temp_c: 18.0,
            supply_rh_pct: 50.0,
            cooling_supply_c: 4.0,
            cooling_return_c: 10.0,
            ..winter_input(30.0)
        }
    }

    #[test]
    fn test_frost_boundary_tie_does_not_preheat() {
        // 5 °C sits exactly on the frost-protection temperature
        let result = calculate(&winter_input(5.0), &settings()).unwrap();
        assert_eq!(result.pre_heater.duty_kw, 0.0);
        assert!(result.nodes[1].inactive);
        assert!(result.re_heater.is_active());
        assert_eq!(result.cooler.duty_kw, 0.0);
        assert!((result.supply.temperature_c - 18.0).abs() < 1e-12);
    }

    #[test]
    fn test_below_frost_boundary_preheats() {
        let result = calculate(&winter_input(4.0), &settings()).unwrap();
        assert!(result.pre_heater.is_active());
        assert_eq!(result.nodes[1].state.temperature_c, 5.0);
        assert!(result.re_heater.is_active());
        assert_eq!(result.cooler.duty_kw, 0.0);
        assert_eq!(
            result.overview,
            ProcessOverview::Chain {
                stages: vec![Stage::PreHeater, Stage::ReHeater]
            }
        );
        // humidity ratio is untouched by heating
        let x0 = result.outdoor().humidity_ratio_g_kg;
        assert!((result.supply.humidity_ratio_g_kg - x0).abs() < 1e-12);
        assert!(result.supply.relative_humidity_pct < result.outdoor().relative_humidity_pct);
    }

    #[test]
    fn test_heating_duty_matches_enthalpy_rise() {
        let result = calculate(&winter_input(-10.0), &settings()).unwrap();
        let dh = result.supply.enthalpy_kj_kg - result.outdoor().enthalpy_kj_kg;
        // 3000 m³/h · 1.2 kg/m³ = 1 kg/s
        assert!((result.total_heating_kw - dh).abs() < 1e-9);
        assert!((result.mass_flow_kg_s - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_heating_water_flow() {
        let result = calculate(&winter_input(-10.0), &settings()).unwrap();
        let expected = result.re_heater.duty_kw / (1000.0 * 4.186 * 20.0) * 3600.0;
        assert!((result.re_heater.water_flow_m3_h - expected).abs() < 1e-12);
        assert_eq!(result.cooler.water_flow_m3_h, 0.0);
    }

    #[test]
    fn test_zero_water_spread_gives_zero_flow() {
        let mut input = winter_input(-10.0);
        input.heating_return_c = input.heating_supply_c;
        let result = calculate(&input, &settings()).unwrap();
        assert!(result.re_heater.is_active());
        assert_eq!(result.re_heater.water_flow_m3_h, 0.0);
    }

    #[test]
    fn test_sensible_cooling_keeps_humidity_ratio() {
        let result = calculate(&summer_input(OperatingMode::SensibleCooling), &settings()).unwrap();
        assert!(result.cooler.is_active());
        assert_eq!(result.cooler.condensate_kg_h, 0.0);
        assert_eq!(result.re_heater.duty_kw, 0.0);
        assert_eq!(result.pre_heater.duty_kw, 0.0);
        assert_eq!(result.supply.temperature_c, 18.0);
        assert_eq!(
            result.supply.humidity_ratio_g_kg,
            result.outdoor().humidity_ratio_g_kg
        );
        assert_eq!(result.supply_trend, Trend::Cooled);
        assert!(result.cooler.water_flow_m3_h > 0.0);
    }

    #[test]
    fn test_heating_only_never_cools() {
        let result = calculate(&summer_input(OperatingMode::HeatingOnly), &settings()).unwrap();
        assert_eq!(result.total_cooling_kw, 0.0);
        assert_eq!(result.total_heating_kw, 0.0);
        assert_eq!(result.overview, ProcessOverview::Ideal);
        assert_eq!(result.supply.temperature_c, 30.0);
    }

    #[test]
    fn test_dehumidification_chain() {
        let result = calculate(&summer_input(OperatingMode::Dehumidifying), &settings()).unwrap();
        assert!(result.advisory.is_none());
        assert!(result.cooler.is_active());
        assert!(result.cooler.condensate_kg_h > 0.0);
        assert!(result.re_heater.is_active());

        let td = result.target_dew_point_c.unwrap();
        assert!((result.nodes[2].state.temperature_c - td).abs() < 1e-12);
        assert!((result.supply.relative_humidity_pct - 50.0).abs() < 1e-6);
        assert!((result.supply.temperature_c - 18.0).abs() < 1e-12);

        // condensate equals the humidity ratio drop carried by the air
        let dx = result.outdoor().humidity_ratio_g_kg - result.target_humidity_ratio_g_kg;
        assert!((result.cooler.condensate_kg_h - result.mass_flow_kg_s * dx * 3.6).abs() < 1e-9);

        assert_eq!(
            result.overview,
            ProcessOverview::Chain {
                stages: vec![Stage::Cooler, Stage::ReHeater]
            }
        );
        assert_eq!(result.nodes[2].trend, Trend::Cooled);
        assert_eq!(result.nodes[3].trend, Trend::Heated);
    }

    #[test]
    fn test_warm_cooling_water_raises_advisory() {
        let mut input = summer_input(OperatingMode::Dehumidifying);
        // target dew point is about 7.4 °C; 6 °C + 2 K margin is too warm
        input.cooling_supply_c = 6.0;
        let result = calculate(&input, &settings()).unwrap();
        let message = result.advisory.clone().unwrap();
        assert!(message.contains("6.0 °C"));
        assert!(matches!(result.overview, ProcessOverview::Advisory { .. }));
    }

    #[test]
    fn test_no_dehumidification_when_air_is_dry_enough() {
        let mut input = summer_input(OperatingMode::Dehumidifying);
        // 25 °C / 30 % holds less water than 18 °C / 60 %
        input.outdoor_temp_c = 25.0;
        input.outdoor_rh_pct = 30.0;
        input.supply_rh_pct = 60.0;
        let result = calculate(&input, &settings()).unwrap();
        assert!(result.target_humidity_ratio_g_kg >= result.outdoor().humidity_ratio_g_kg - 0.01);
        assert_eq!(result.cooler.condensate_kg_h, 0.0);
        // the cooler still cools sensibly down to 18 °C
        assert!(result.cooler.is_active());
        assert_eq!(
            result.supply.humidity_ratio_g_kg,
            result.outdoor().humidity_ratio_g_kg
        );
    }

    #[test]
    fn test_duties_never_negative() {
        let s = settings();
        for mode in OperatingMode::ALL {
            for &t_out in &[-20.0, 0.0, 4.99, 5.0, 12.0, 18.0, 24.0, 35.0] {
                for &rh_out in &[10.0, 50.0, 95.0] {
                    for &t_sup in &[14.0, 18.0, 22.0] {
                        let input = AirHandlingInput {
                            mode,
                            outdoor_temp_c: t_out,
                            outdoor_rh_pct: rh_out,
                            supply_temp_c: t_sup,
                            supply_rh_pct: 45.0,
                            ..AirHandlingInput::default()
                        };
                        let result = calculate(&input, &s).unwrap();
                        for c in result.components() {
                            assert!(
                                c.duty_kw >= 0.0,
                                "{:?} {mode:?} {t_out} {rh_out} {t_sup}",
                                c.stage
                            );
                            assert!(c.water_flow_m3_h >= 0.0);
                            assert!(c.condensate_kg_h >= 0.0);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_non_finite_humidity_ratio_aborts() {
        let mut input = winter_input(5.0);
        input.outdoor_temp_c = f64::MAX;
        let err = calculate(&input, &settings()).unwrap_err();
        assert_eq!(err.error_code(), "NON_FINITE_STATE");
    }

    #[test]
    fn test_vapour_pressure_above_total_pressure_rejected() {
        let mut input = winter_input(90.0);
        input.outdoor_rh_pct = 100.0;
        input.pressure_hpa = 500.0;
        let err = calculate(&input, &settings()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_invalid_inputs() {
        let mut input = winter_input(0.0);
        input.volume_flow_m3_h = -1.0;
        assert!(calculate(&input, &settings()).is_err());

        let mut input = winter_input(0.0);
        input.outdoor_rh_pct = 120.0;
        assert!(calculate(&input, &settings()).is_err());

        let mut input = winter_input(0.0);
        input.pressure_hpa = 0.0;
        assert!(calculate(&input, &settings()).is_err());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let s = DesignSettings {
            air_density_kg_m3: 0.0,
            ..DesignSettings::default()
        };
        let err = calculate(&winter_input(-5.0), &s).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_target_humidity_only_checked_when_dehumidifying() {
        let s = settings();
        for mode in [OperatingMode::HeatingOnly, OperatingMode::SensibleCooling] {
            let mut input = winter_input(-5.0);
            input.mode = mode;
            input.supply_rh_pct = 150.0;
            let result = calculate(&input, &s).unwrap();
            assert!(result.re_heater.is_active());
        }

        let mut input = summer_input(OperatingMode::Dehumidifying);
        input.supply_rh_pct = 150.0;
        match calculate(&input, &s).unwrap_err() {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "supply_rh_pct"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_mode_parsing_and_inputs_used() {
        assert_eq!(
            OperatingMode::from_str_flexible("entfeuchten").unwrap(),
            OperatingMode::Dehumidifying
        );
        assert_eq!(
            OperatingMode::from_str_flexible("Sensible Cooling").unwrap(),
            OperatingMode::SensibleCooling
        );
        assert!(!OperatingMode::HeatingOnly.uses_cooling_water());
        assert!(OperatingMode::SensibleCooling.uses_cooling_water());
        assert!(!OperatingMode::SensibleCooling.uses_target_humidity());
        assert!(OperatingMode::Dehumidifying.uses_target_humidity());
    }

    #[test]
    fn test_serialization() {
        let input = summer_input(OperatingMode::Dehumidifying);
        let json = serde_json::to_string_pretty(&input).unwrap();
        assert!(json.contains("\"dehumidifying\""));
        let roundtrip: AirHandlingInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);

        let result = calculate(&input, &settings()).unwrap();
        let json = serde_json::to_string(&result.overview).unwrap();
        assert!(json.contains("\"kind\":\"chain\""));
    }
}
