//! # HVAC Equations
//!
//! All closed-form physics used by the calculators lives here, so the
//! calculation modules only sequence formulas and never restate them.
//!
//! ## Modules
//!
//! - [`psychro`] - Moist-air properties (saturation pressure, humidity ratio, dew point, enthalpy)
//! - [`heat`] - Duties, water flows, condensate and heat-flow coefficients
//!
//! ## Units
//!
//! - Temperatures in °C, pressures in Pa, humidity ratios in g/kg
//! - Enthalpies in kJ/kg dry air, coil duties in kW, room loads in W

pub mod heat;
pub mod psychro;

pub use psychro::{
    absolute_humidity_g_m3,
    dew_point_c,
    enthalpy_kj_kg,
    humidity_ratio_g_kg,
    relative_humidity_pct,
    saturation_pressure_pa,
    vapour_pressure_pa,
};

pub use heat::{
    air_mass_flow_kg_s,
    coil_duty_kw,
    condensate_kg_h,
    heat_removal_flow_m3_h,
    transmission_coefficient_w_k,
    ventilation_coefficient_w_k,
    water_flow_m3_h,
};
