//! Inertial Measurement Unit Drivers
//!
//! Six-axis accelerometer + gyroscope devices. Readings are converted to SI
//! units (m/s² and rad/s) using the sensitivity of the configured full-scale
//! range.

use nalgebra::Vector3;

use crate::platform::PlatformError;

pub mod bmi160;

pub use bmi160::{Bmi160, Bmi160Config};

/// IMU error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImuError {
    /// Bus communication failed
    Bus(PlatformError),

    /// Chip identification mismatch (contains the ID that was read)
    InvalidChipId(u8),

    /// Power mode transition did not complete
    PowerMode,

    /// Data validation failed (e.g. invalid temperature word)
    InvalidData,

    /// Driver not initialized
    NotInitialized,
}

impl From<PlatformError> for ImuError {
    fn from(err: PlatformError) -> Self {
        ImuError::Bus(err)
    }
}

/// One six-axis sample in SI units, sensor body frame
#[derive(Debug, Clone, Copy)]
pub struct ImuSample {
    /// Accelerometer: m/s² (includes gravity)
    pub accel: Vector3<f32>,

    /// Gyroscope: rad/s
    pub gyro: Vector3<f32>,
}

impl Default for ImuSample {
    fn default() -> Self {
        Self {
            accel: Vector3::new(0.0, 0.0, 9.80665), // 1g down
            gyro: Vector3::zeros(),
        }
    }
}

/// Raw six-axis sample as read from the data registers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImuSampleRaw {
    /// Accelerometer LSB counts, \[x, y, z\]
    pub accel: [i16; 3],

    /// Gyroscope LSB counts, \[x, y, z\]
    pub gyro: [i16; 3],
}
