//! BLE Module Drivers
//!
//! UART-attached Bluetooth Low Energy modules driven through an ASCII
//! command protocol, with transparent-UART data passthrough.

use crate::platform::PlatformError;

pub mod rn4870;

pub use rn4870::Rn4870;

/// BLE module error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleError {
    /// Bus communication failed
    Bus(PlatformError),

    /// Response wait exceeded the bounded attempt count
    Timeout,

    /// The module answered `Err`
    CommandFailed,

    /// Command issued outside command mode
    NotInCommandMode,

    /// Command or argument does not fit the line buffer
    InvalidParameter,

    /// Module response overflowed the collection buffer
    ResponseOverflow,
}

impl From<PlatformError> for BleError {
    fn from(err: PlatformError) -> Self {
        BleError::Bus(err)
    }
}
