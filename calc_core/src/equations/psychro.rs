//! # Moist-Air Property Formulas
//!
//! Closed-form psychrometric relations used by the air-handling calculation.
//! The saturation pressure uses the Magnus approximation over water, which is
//! adequate for the -45 °C .. 60 °C range seen in air-handling units.
//!
//! ## Notation
//!
//! - `T` = dry-bulb temperature (°C)
//! - `φ` = relative humidity (%)
//! - `x` = humidity ratio (g water / kg dry air)
//! - `p` = absolute pressure (Pa)
//! - `p_s` = saturation vapour pressure (Pa)
//! - `p_v` = partial vapour pressure (Pa)
//! - `h` = specific enthalpy (kJ / kg dry air)
//!
//! ## References
//!
//! - DIN 4108-3 / WMO: Magnus coefficients 611.2 Pa, 17.62, 243.12 °C
//! - Mollier h,x diagram: h = c_pa·T + x·(r_0 + c_pv·T)

/// Magnus base pressure (Pa)
pub const MAGNUS_P0_PA: f64 = 611.2;
/// Magnus coefficient (dimensionless)
pub const MAGNUS_A: f64 = 17.62;
/// Magnus coefficient (°C)
pub const MAGNUS_B_C: f64 = 243.12;
/// Ratio of molar masses water / dry air, scaled to g/kg
pub const MOLAR_RATIO_G_KG: f64 = 622.0;

/// Specific heat of dry air (kJ/kg·K)
pub const CP_DRY_AIR_KJ_KGK: f64 = 1.006;
/// Specific heat of water vapour (kJ/kg·K)
pub const CP_VAPOUR_KJ_KGK: f64 = 1.86;
/// Latent heat of vaporisation at 0 °C (kJ/kg)
pub const LATENT_HEAT_KJ_KG: f64 = 2501.0;

/// Saturation vapour pressure over water
///
/// # Formula
/// p_s = 611.2 · exp(17.62·T / (243.12 + T))
///
/// # Example
/// ```rust
/// use calc_core::equations::psychro::saturation_pressure_pa;
///
/// // at 0 °C the formula returns its base value
/// assert!((saturation_pressure_pa(0.0) - 611.2).abs() < 1e-9);
/// ```
#[inline]
pub fn saturation_pressure_pa(t_c: f64) -> f64 {
    MAGNUS_P0_PA * ((MAGNUS_A * t_c) / (MAGNUS_B_C + t_c)).exp()
}

/// Humidity ratio from temperature, relative humidity and pressure
///
/// # Formula
/// x = 622 · p_v / (p − p_v), with p_v = φ/100 · p_s(T)
///
/// Returns a non-finite value when `p_v == p`; the caller decides how to treat it.
#[inline]
pub fn humidity_ratio_g_kg(t_c: f64, rh_pct: f64, p_pa: f64) -> f64 {
    let p_v = (rh_pct / 100.0) * saturation_pressure_pa(t_c);
    MOLAR_RATIO_G_KG * (p_v / (p_pa - p_v))
}

/// Partial vapour pressure for a humidity ratio
///
/// # Formula
/// p_v = p · x / (622 + x)
#[inline]
pub fn vapour_pressure_pa(x_g_kg: f64, p_pa: f64) -> f64 {
    (p_pa * x_g_kg) / (MOLAR_RATIO_G_KG + x_g_kg)
}

/// Relative humidity from temperature, humidity ratio and pressure, capped at 100 %
///
/// # Example
/// ```rust
/// use calc_core::equations::psychro::{humidity_ratio_g_kg, relative_humidity_pct};
///
/// let p = 101_325.0;
/// let x = humidity_ratio_g_kg(20.0, 50.0, p);
/// assert!((relative_humidity_pct(20.0, x, p) - 50.0).abs() < 1e-9);
/// ```
#[inline]
pub fn relative_humidity_pct(t_c: f64, x_g_kg: f64, p_pa: f64) -> f64 {
    let p_v = vapour_pressure_pa(x_g_kg, p_pa);
    ((p_v / saturation_pressure_pa(t_c)) * 100.0).min(100.0)
}

/// Dew point for a humidity ratio (inverse Magnus)
///
/// # Formula
/// T_d = 243.12 · ln(p_v/611.2) / (17.62 − ln(p_v/611.2))
#[inline]
pub fn dew_point_c(x_g_kg: f64, p_pa: f64) -> f64 {
    let ln = (vapour_pressure_pa(x_g_kg, p_pa) / MAGNUS_P0_PA).ln();
    (MAGNUS_B_C * ln) / (MAGNUS_A - ln)
}

/// Specific enthalpy of moist air per kg dry air
///
/// # Formula
/// h = 1.006·T + x/1000 · (2501 + 1.86·T)
#[inline]
pub fn enthalpy_kj_kg(t_c: f64, x_g_kg: f64) -> f64 {
    let x_kg_kg = x_g_kg / 1000.0;
    CP_DRY_AIR_KJ_KGK * t_c + x_kg_kg * (LATENT_HEAT_KJ_KG + CP_VAPOUR_KJ_KGK * t_c)
}

/// Approximate absolute humidity (g/m³) from the humidity ratio and air density
#[inline]
pub fn absolute_humidity_g_m3(x_g_kg: f64, air_density_kg_m3: f64) -> f64 {
    x_g_kg * air_density_kg_m3
}

#[cfg(test)]
mod tests {
    use super::*;

    const P_STD: f64 = 101_325.0;

    #[test]
    fn test_saturation_pressure_20c() {
        // Magnus at 20 °C ≈ 2333 Pa
        let ps = saturation_pressure_pa(20.0);
        assert!((ps - 2332.6).abs() < 1.0, "p_s = {ps}");
    }

    #[test]
    fn test_humidity_ratio_roundtrip() {
        for &t in &[-10.0, 0.0, 5.0, 18.0, 26.0, 35.0] {
            for &rh in &[5.0, 30.0, 50.0, 80.0, 99.0] {
                for &p in &[90_000.0, P_STD, 103_000.0] {
                    let x = humidity_ratio_g_kg(t, rh, p);
                    let back = relative_humidity_pct(t, x, p);
                    let x2 = humidity_ratio_g_kg(t, back, p);
                    assert!((x - x2).abs() < 1e-9, "T={t} rh={rh} p={p}");
                }
            }
        }
    }

    #[test]
    fn test_rh_capped_at_100() {
        let x_sat = humidity_ratio_g_kg(10.0, 100.0, P_STD);
        assert_eq!(relative_humidity_pct(5.0, x_sat, P_STD), 100.0);
    }

    #[test]
    fn test_dew_point_of_saturated_air() {
        let x = humidity_ratio_g_kg(12.0, 100.0, P_STD);
        assert!((dew_point_c(x, P_STD) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_enthalpy_reference_point() {
        // 20 °C, 7.3 g/kg ≈ 38.65 kJ/kg
        let h = enthalpy_kj_kg(20.0, 7.3);
        assert!((h - 38.65).abs() < 0.01, "h = {h}");
        assert_eq!(enthalpy_kj_kg(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_saturation_yields_non_finite() {
        // vapour pressure equal to total pressure
        let t = 100.0;
        let p = saturation_pressure_pa(t);
        assert!(!humidity_ratio_g_kg(t, 100.0, p).is_finite());
    }
}
