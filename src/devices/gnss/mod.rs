//! GNSS Receiver Driver
//!
//! UART-attached GNSS receivers emitting NMEA 0183 sentences. The driver
//! merges GGA, RMC and VTG into one fix snapshot; a u-blox submodule
//! configures which sentences the receiver emits.

use crate::platform::PlatformError;

mod driver;
pub mod ublox;

pub use driver::{FixQuality, Gnss, GnssFix, ParseStats};

/// GNSS receiver error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GnssError {
    /// Bus communication failed
    Bus(PlatformError),
}

impl From<PlatformError> for GnssError {
    fn from(err: PlatformError) -> Self {
        GnssError::Bus(err)
    }
}
