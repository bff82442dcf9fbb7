//! Radio Module Drivers
//!
//! UART-attached LoRa/LoRaWAN host-controller modules speaking
//! length-prefixed binary command frames.

use crate::platform::PlatformError;

pub mod mipot;

pub use mipot::Mipot;

/// Radio module error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// Bus communication failed
    Bus(PlatformError),

    /// Response wait exceeded the bounded attempt count
    Timeout,

    /// Frame-level violation: bad checksum, mismatched response code,
    /// or a malformed payload
    Protocol,

    /// The module rejected the command with this status code
    Status(u8),

    /// Payload exceeds the frame capacity
    PayloadTooLarge,
}

impl From<PlatformError> for RadioError {
    fn from(err: PlatformError) -> Self {
        RadioError::Bus(err)
    }
}
