//! DPS310 Barometric Pressure Sensor Driver
//!
//! Driver for the Infineon DPS310 digital barometer, usable over I2C or SPI
//! through the [`RegisterBus`](crate::bus::RegisterBus) transports.
//!
//! ## Features
//!
//! - Pressure 300..1200 hPa, temperature -40..85 °C
//! - 1x to 128x oversampling with per-setting compensation scale factors
//! - Calibration coefficients read and unpacked at init
//! - One-shot and continuous background measurement modes
//!
//! ## Usage
//!
//! ```ignore
//! use mikroclick::bus::I2cRegisters;
//! use mikroclick::devices::baro::dps310::{Dps310, Dps310Config, DPS310_ADDR};
//!
//! let bus = I2cRegisters::new(i2c, DPS310_ADDR);
//! let mut baro = Dps310::new(bus, Dps310Config::default());
//! baro.init(&mut delay)?;
//! baro.apply_default_config()?;
//! if baro.data_ready()? {
//!     let sample = baro.read_sample()?;
//! }
//! ```

mod config;
mod driver;
mod registers;

pub use config::{Dps310Config, MeasurementRate, Oversampling};
pub use driver::{CalibrationCoefficients, Dps310};
pub use registers::{DPS310_ADDR, DPS310_ADDR_ALT};
