//! # Unit Types
//!
//! Newtypes for the two unit changes the calculators make at their
//! boundaries: form pressures arrive in hPa and the equations work in Pa,
//! flows arrive in m³/h and mass flows need m³/s.
//!
//! The calculators follow common European HVAC practice:
//! - Temperature: degrees Celsius (°C), differences in kelvin (K)
//! - Pressure: hectopascal (hPa) on forms, pascal (Pa) inside the equations
//! - Air flow: cubic metres per hour (m³/h), mass flow in kg/s
//! - Power: watt (W) for room loads, kilowatt (kW) for coil duties
//!
//! ```rust
//! use calc_core::units::{CubicMetersPerHour, CubicMetersPerSecond, HectoPascals, Pascals};
//!
//! let p: Pascals = HectoPascals(1013.25).into();
//! assert_eq!(p.value(), 101_325.0);
//!
//! let q: CubicMetersPerSecond = CubicMetersPerHour(7200.0).into();
//! assert_eq!(q.value(), 2.0);
//! ```

use serde::{Deserialize, Serialize};

/// Absolute pressure in pascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pascals(pub f64);

impl Pascals {
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Absolute pressure in hectopascals (1 hPa = 100 Pa)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HectoPascals(pub f64);

impl From<HectoPascals> for Pascals {
    fn from(hpa: HectoPascals) -> Self {
        Pascals(hpa.0 * 100.0)
    }
}

/// Volume flow in cubic metres per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMetersPerHour(pub f64);

/// Volume flow in cubic metres per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMetersPerSecond(pub f64);

impl CubicMetersPerSecond {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<CubicMetersPerHour> for CubicMetersPerSecond {
    fn from(q: CubicMetersPerHour) -> Self {
        CubicMetersPerSecond(q.0 / 3600.0)
    }
}
