//! Digital Potentiometer Drivers
//!
//! SPI-attached resistor ladders with volatile and non-volatile wiper
//! settings. Resistance helpers map ohms onto the nearest tap of the
//! device's ladder.

use crate::platform::PlatformError;

pub mod mcp4161;

pub use mcp4161::Mcp4161;

/// Digital potentiometer error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigipotError {
    /// Bus communication failed
    Bus(PlatformError),

    /// Device flagged the command as invalid (CMDERR)
    CommandError,

    /// Requested wiper position is beyond full scale
    InvalidTap,

    /// EEPROM write-active poll exceeded the bounded attempt count
    Timeout,

    /// Driver not initialized
    NotInitialized,
}

impl From<PlatformError> for DigipotError {
    fn from(err: PlatformError) -> Self {
        DigipotError::Bus(err)
    }
}
