//! # Text Reports
//!
//! Formats calculation results into the display strings a front end shows.
//! Numbers use a fixed number of decimals and a `.` separator; a value that
//! is not a number prints as `--`.

use crate::calculations::air_handling::{
    AirHandlingInput, AirHandlingResult, AirState, ComponentDuty, ProcessOverview, StateNode, Trend,
};
use crate::calculations::room_load::{RoomLoadInput, RoomLoadResult};

const RULE: &str = "═══════════════════════════════════════════════════════";

/// Format a number with fixed decimals, `--` for NaN
///
/// ```rust
/// use calc_core::report::format_value;
///
/// assert_eq!(format_value(3.14159, 2), "3.14");
/// assert_eq!(format_value(f64::NAN, 1), "--");
/// ```
pub fn format_value(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "--".to_string()
    } else {
        format!("{:.*}", decimals, value)
    }
}

/// Single-line process summary
pub fn overview_text(overview: &ProcessOverview) -> String {
    match overview {
        ProcessOverview::Advisory { message } => format!("Note: {message}"),
        ProcessOverview::Chain { stages } => {
            let names: Vec<&str> = stages.iter().map(|s| s.code()).collect();
            format!("Process chain: {}", names.join(" → "))
        }
        ProcessOverview::Ideal => "Ideal state".to_string(),
    }
}

fn trend_marker(trend: Trend) -> &'static str {
    match trend {
        Trend::Heated => "+",
        Trend::Cooled => "-",
        Trend::Unchanged => "=",
    }
}

fn state_line(name: &str, state: &AirState) -> String {
    format!(
        "{:<18} {:>7} °C  {:>6} %  {:>6} g/kg  {:>7} kJ/kg",
        name,
        format_value(state.temperature_c, 1),
        format_value(state.relative_humidity_pct, 1),
        format_value(state.humidity_ratio_g_kg, 2),
        format_value(state.enthalpy_kj_kg, 2),
    )
}

fn node_line(name: &str, node: &StateNode) -> String {
    let flag = if node.inactive { " (bypassed)" } else { "" };
    format!(
        "[{}] {}{}",
        trend_marker(node.trend),
        state_line(name, &node.state),
        flag
    )
}

fn component_line(component: &ComponentDuty) -> String {
    let mut line = format!(
        "{:<11} {:>9} kW  water {:>7} m³/h",
        component.stage.display_name(),
        format_value(component.duty_kw, 2),
        format_value(component.water_flow_m3_h, 2),
    );
    if !component.stage.is_heating() {
        line.push_str(&format!(
            "  condensate {:>7} kg/h",
            format_value(component.condensate_kg_h, 2)
        ));
    }
    if !component.is_active() {
        line.push_str("  (inactive)");
    }
    line
}

/// Full text report of an air-handling calculation
pub fn air_handling_report(input: &AirHandlingInput, result: &AirHandlingResult) -> String {
    let node_names = ["Outdoor", "After pre-heater", "After cooler", "After re-heater"];
    let mut lines = vec![
        RULE.to_string(),
        format!("  AIR-HANDLING PROCESS: {} ({})", input.label, input.mode),
        RULE.to_string(),
        overview_text(&result.overview),
        String::new(),
        "States:".to_string(),
    ];
    lines.extend(
        result
            .nodes
            .iter()
            .zip(node_names)
            .map(|(node, name)| format!("  {}", node_line(name, node))),
    );
    lines.push(String::new());
    lines.push("Components:".to_string());
    lines.extend(
        result
            .components()
            .iter()
            .map(|c| format!("  {}", component_line(c))),
    );
    lines.push(String::new());
    lines.push("Summary:".to_string());
    lines.push(format!(
        "  Heating total: {} kW   Cooling total: {} kW",
        format_value(result.total_heating_kw, 2),
        format_value(result.total_cooling_kw, 2)
    ));
    for (name, state) in [("Outdoor", result.outdoor()), ("Supply", &result.supply)] {
        lines.push(format!(
            "  {:<8} {} °C  {} %  {} g/kg  {} g/m³",
            name,
            format_value(state.temperature_c, 1),
            format_value(state.relative_humidity_pct, 1),
            format_value(state.humidity_ratio_g_kg, 2),
            format_value(state.absolute_humidity_g_m3, 2),
        ));
    }
    lines.push(RULE.to_string());
    lines.join("\n")
}

/// Full text report of a room load calculation
pub fn room_load_report(input: &RoomLoadInput, result: &RoomLoadResult) -> String {
    let mut lines = vec![
        RULE.to_string(),
        format!(
            "  ROOM LOADS: {} ({}, {})",
            input.label, input.room_type, input.envelope
        ),
        RULE.to_string(),
        format!(
            "Geometry:  {} m²  {} m³  windows {} m²",
            format_value(result.floor_area_m2, 1),
            format_value(result.volume_m3, 1),
            format_value(result.window_area_m2, 1),
        ),
        String::new(),
        "Air flow candidates:".to_string(),
    ];
    for candidate in &result.candidates {
        let value = if candidate.applicable {
            format!("{} m³/h", format_value(candidate.flow_m3_h, 0))
        } else {
            "n/a".to_string()
        };
        let marker = if candidate.criterion == result.governing {
            "  <- governs"
        } else {
            ""
        };
        lines.push(format!(
            "  {:<22} {:>12}{}",
            candidate.criterion.display_name(),
            value,
            marker
        ));
    }
    lines.push(format!(
        "Design air flow: {} m³/h ({} 1/h)",
        format_value(result.ventilation_m3_h, 0),
        format_value(result.air_changes_per_h, 1)
    ));
    lines.push(String::new());
    lines.push(format!(
        "Heating load: {} W  (transmission {} W, ventilation {} W)",
        format_value(result.heating_load_w, 0),
        format_value(result.transmission_loss_w, 0),
        format_value(result.ventilation_loss_w, 0),
    ));
    lines.push(format!(
        "Cooling load: {} W  (internal {} W, solar {} W)",
        format_value(result.cooling_load_w, 0),
        format_value(result.internal_gains_w, 0),
        format_value(result.solar_gain_w, 0),
    ));
    if !result.warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings:".to_string());
        lines.extend(result.warnings.iter().map(|w| format!("  ! {}", w.message())));
    }
    lines.push(RULE.to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::air_handling::{self, OperatingMode, Stage};
    use crate::calculations::room_load;
    use crate::settings::DesignSettings;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(2.0, 0), "2");
        assert_eq!(format_value(-0.456, 2), "-0.46");
        assert_eq!(format_value(f64::NAN, 2), "--");
    }

    #[test]
    fn test_overview_text() {
        let chain = ProcessOverview::Chain {
            stages: vec![Stage::PreHeater, Stage::Cooler, Stage::ReHeater],
        };
        assert_eq!(overview_text(&chain), "Process chain: PH → CC → RH");
        assert_eq!(overview_text(&ProcessOverview::Ideal), "Ideal state");
    }

    #[test]
    fn test_air_handling_report_lists_all_nodes() {
        let input = AirHandlingInput {
            mode: OperatingMode::Dehumidifying,
            outdoor_temp_c: 30.0,
            outdoor_rh_pct: 60.0,
            supply_temp_c: 18.0,
            cooling_supply_c: 4.0,
            ..AirHandlingInput::default()
        };
        let result = air_handling::calculate(&input, &DesignSettings::default()).unwrap();
        let text = air_handling_report(&input, &result);
        for name in ["Outdoor", "After pre-heater", "After cooler", "After re-heater"] {
            assert!(text.contains(name), "missing {name}");
        }
        assert!(text.contains("Process chain: CC → RH"));
        assert!(text.contains("condensate"));
        assert!(text.contains("(bypassed)"));
    }

    #[test]
    fn test_room_report_marks_governing_criterion() {
        let input = RoomLoadInput::default();
        let result = room_load::calculate(&input, &DesignSettings::default()).unwrap();
        let text = room_load_report(&input, &result);
        let governing_line = text.lines().find(|l| l.contains("<- governs")).unwrap();
        assert!(governing_line.contains(result.governing.display_name()));
    }
}
