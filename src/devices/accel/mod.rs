//! High-g Accelerometer Drivers
//!
//! Acceleration is reported in g; scale factors are fixed per device
//! (high-g parts have a single full-scale range).

use crate::platform::PlatformError;

pub mod adxl372;

pub use adxl372::{Adxl372, Adxl372Config, Adxl372Spi};

/// Accelerometer error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelError {
    /// Bus communication failed
    Bus(PlatformError),

    /// Chip identification mismatch (contains the ID that was read)
    InvalidChipId(u8),

    /// Data-ready poll exceeded the bounded attempt count
    Timeout,

    /// Driver not initialized
    NotInitialized,
}

impl From<PlatformError> for AccelError {
    fn from(err: PlatformError) -> Self {
        AccelError::Bus(err)
    }
}
