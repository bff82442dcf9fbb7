//! BMI160 6-Axis IMU Driver
//!
//! Driver for the Bosch BMI160 low-power IMU, usable over I2C or SPI
//! through the [`RegisterBus`](crate::bus::RegisterBus) transports.
//!
//! ## Features
//!
//! - 3-axis gyroscope: ±125 to ±2000 °/s
//! - 3-axis accelerometer: ±2 to ±16 g
//! - Output data rates from 25 Hz to 1600 Hz
//! - Die temperature and 24-bit sensor time readout
//! - I2C @ 1 MHz or SPI @ 10 MHz
//!
//! ## Usage
//!
//! ```ignore
//! use mikroclick::bus::I2cRegisters;
//! use mikroclick::devices::imu::bmi160::{Bmi160, Bmi160Config, BMI160_ADDR};
//!
//! let bus = I2cRegisters::new(i2c, BMI160_ADDR);
//! let mut imu = Bmi160::new(bus, Bmi160Config::default());
//! imu.init(&mut delay)?;
//! imu.apply_default_config(&mut delay)?;
//! let sample = imu.read_sample()?;
//! ```

mod config;
mod driver;
mod registers;

pub use config::{AccelRange, Bmi160Config, GyroRange, OutputDataRate};
pub use driver::Bmi160;
pub use registers::{BMI160_ADDR, BMI160_ADDR_ALT};
