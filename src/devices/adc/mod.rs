//! Analog-to-Digital Converter Front-End Drivers
//!
//! External ADCs used to digitize analog Click board sensors (piezo
//! elements, potentiometric probes). Voltages are derived from the raw
//! counts and the configured programmable-gain full scale.

use crate::platform::PlatformError;

pub mod ads1115;

pub use ads1115::{Ads1115, Ads1115Config};

/// ADC error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// Bus communication failed
    Bus(PlatformError),

    /// Conversion-ready poll exceeded the bounded attempt count
    Timeout,

    /// Driver not initialized
    NotInitialized,
}

impl From<PlatformError> for AdcError {
    fn from(err: PlatformError) -> Self {
        AdcError::Bus(err)
    }
}
