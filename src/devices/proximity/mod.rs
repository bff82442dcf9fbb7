//! Proximity and Ambient Light Sensor Drivers
//!
//! Reflective IR proximity counts and ambient light readings. Proximity is
//! reported as raw counts (the scale depends on target reflectivity and LED
//! current), ambient light as sensor counts convertible to lux per device.

use crate::platform::PlatformError;

pub mod vcnl4010;

pub use vcnl4010::{Vcnl4010, Vcnl4010Config};

/// Proximity sensor error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProximityError {
    /// Bus communication failed
    Bus(PlatformError),

    /// Chip identification mismatch (contains the ID that was read)
    InvalidChipId(u8),

    /// Data-ready poll exceeded the bounded attempt count
    Timeout,

    /// Driver not initialized
    NotInitialized,
}

impl From<PlatformError> for ProximityError {
    fn from(err: PlatformError) -> Self {
        ProximityError::Bus(err)
    }
}
