//! Barometric Pressure Sensor Drivers
//!
//! Pressure and temperature readings are compensated with the per-device
//! calibration coefficients read out of the sensor at init, and reported in
//! Pa and °C.

use crate::platform::PlatformError;

pub mod dps310;

pub use dps310::{Dps310, Dps310Config};

/// Barometer error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BaroError {
    /// Bus communication failed
    Bus(PlatformError),

    /// Chip identification mismatch (contains the ID that was read)
    InvalidChipId(u8),

    /// Readiness poll exceeded the bounded attempt count
    Timeout,

    /// Driver not initialized
    NotInitialized,
}

impl From<PlatformError> for BaroError {
    fn from(err: PlatformError) -> Self {
        BaroError::Bus(err)
    }
}

/// One compensated pressure + temperature sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaroSample {
    /// Compensated pressure in Pa
    pub pressure_pa: f32,

    /// Compensated temperature in °C
    pub temperature_c: f32,
}
