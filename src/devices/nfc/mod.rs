//! NFC Controller Drivers
//!
//! I2C-attached NFC controllers speaking length-prefixed NCI frames,
//! with interrupt and power-enable lines driven as GPIOs.

use crate::platform::PlatformError;

pub mod pn7150;

pub use pn7150::Pn7150;

/// NFC controller error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NfcError {
    /// Bus communication failed
    Bus(PlatformError),

    /// Bounded wait for the interrupt line or a response expired
    Timeout,

    /// Unexpected or malformed NCI packet
    Protocol,

    /// The controller answered with this non-zero NCI status
    Status(u8),

    /// Payload exceeds the NCI frame capacity
    PayloadTooLarge,

    /// Driver not initialized - call init() first
    NotInitialized,
}

impl From<PlatformError> for NfcError {
    fn from(err: PlatformError) -> Self {
        NfcError::Bus(err)
    }
}
