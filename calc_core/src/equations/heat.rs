//! # Heat and Flow Conversions
//!
//! Formulas turning enthalpy differences into coil duties, duties into
//! water flows, and room geometry into heat-flow coefficients.
//!
//! ## Sign Conventions
//!
//! - **Duty**: always a magnitude; the component kind says whether it heats or cools
//! - **Heat-flow coefficient** H (W/K): multiply by an indoor/outdoor ΔT to get watts

use crate::units::{CubicMetersPerHour, CubicMetersPerSecond};

/// Dry-air mass flow from a volume flow
///
/// # Formula
/// ṁ = V̇ / 3600 · ρ
#[inline]
pub fn air_mass_flow_kg_s(volume_flow_m3_h: f64, air_density_kg_m3: f64) -> f64 {
    let per_second: CubicMetersPerSecond = CubicMetersPerHour(volume_flow_m3_h).into();
    per_second.value() * air_density_kg_m3
}

/// Coil duty from a mass flow and an enthalpy difference
///
/// # Formula
/// Q̇ = ṁ · Δh (kW with kg/s and kJ/kg)
#[inline]
pub fn coil_duty_kw(mass_flow_kg_s: f64, delta_h_kj_kg: f64) -> f64 {
    mass_flow_kg_s * delta_h_kj_kg
}

/// Water flow needed to carry a duty at a given supply/return spread
///
/// # Formula
/// V̇_w = Q̇ / (ρ_w · c_w · ΔT) · 3600
///
/// Returns 0 when the spread is zero, since no flow can be derived.
///
/// # Example
/// ```rust
/// use calc_core::equations::heat::water_flow_m3_h;
///
/// // 10 kW at 70/50 °C
/// let v = water_flow_m3_h(10.0, 20.0, 1000.0, 4.186);
/// assert!((v - 0.43).abs() < 0.001);
/// assert_eq!(water_flow_m3_h(10.0, 0.0, 1000.0, 4.186), 0.0);
/// ```
#[inline]
pub fn water_flow_m3_h(
    duty_kw: f64,
    delta_t_k: f64,
    water_density_kg_m3: f64,
    water_heat_capacity_kj_kgk: f64,
) -> f64 {
    let spread = delta_t_k.abs();
    if spread > 0.0 {
        duty_kw / (water_density_kg_m3 * water_heat_capacity_kj_kgk * spread) * 3600.0
    } else {
        0.0
    }
}

/// Condensate removed when the humidity ratio drops by `delta_x_g_kg`
///
/// # Formula
/// ṁ_w = ṁ · Δx / 1000 · 3600 (kg/h)
#[inline]
pub fn condensate_kg_h(mass_flow_kg_s: f64, delta_x_g_kg: f64) -> f64 {
    mass_flow_kg_s * delta_x_g_kg / 1000.0 * 3600.0
}

/// Ventilation heat-flow coefficient
///
/// # Formula
/// H_V = V̇ · ρ · c_p / 3600 (W/K with m³/h, kg/m³, J/kg·K)
#[inline]
pub fn ventilation_coefficient_w_k(
    volume_flow_m3_h: f64,
    air_density_kg_m3: f64,
    air_heat_capacity_j_kgk: f64,
) -> f64 {
    volume_flow_m3_h * air_density_kg_m3 * air_heat_capacity_j_kgk / 3600.0
}

/// Transmission heat-flow coefficient of a set of building elements
///
/// # Formula
/// H_T = Σ U_i · A_i
pub fn transmission_coefficient_w_k(elements: &[(f64, f64)]) -> f64 {
    elements.iter().map(|(u, area)| u * area).sum()
}

/// Air flow needed to remove a heat load at a given supply temperature difference
///
/// # Formula
/// V̇ = Q̇ · 3600 / (ρ · c_p · ΔT) (m³/h)
#[inline]
pub fn heat_removal_flow_m3_h(
    load_w: f64,
    delta_t_k: f64,
    air_density_kg_m3: f64,
    air_heat_capacity_j_kgk: f64,
) -> f64 {
    load_w * 3600.0 / (air_density_kg_m3 * air_heat_capacity_j_kgk * delta_t_k)
}
