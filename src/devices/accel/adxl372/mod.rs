//! ADXL372 High-g Accelerometer Driver
//!
//! Driver for the Analog Devices ADXL372 ±200 g, 3-axis MEMS accelerometer,
//! usable over I2C or SPI. The part's SPI framing differs from the common
//! convention (address shifted left, read flag in bit 0), so SPI wiring
//! uses the package-local [`Adxl372Spi`] transport.
//!
//! ## Features
//!
//! - Single ±200 g range, 100 mg/LSB
//! - Output data rates from 400 Hz to 6400 Hz
//! - Max-peak capture of the highest shock since last read
//! - Standby / wake-up / instant-on / full-bandwidth operating modes
//!
//! ## Usage
//!
//! ```ignore
//! use mikroclick::devices::accel::adxl372::{Adxl372, Adxl372Config, Adxl372Spi};
//!
//! let mut accel = Adxl372::new(Adxl372Spi::new(spi, cs), Adxl372Config::default());
//! accel.init(&mut delay)?;
//! accel.apply_default_config()?;
//! let g = accel.read_acceleration(&mut delay)?;
//! ```

mod config;
mod driver;
mod registers;
mod spi;

pub use config::{Adxl372Bandwidth, Adxl372Config, Adxl372Mode, Adxl372Odr};
pub use driver::{Adxl372, Adxl372Status};
pub use registers::{ADXL372_ADDR, ADXL372_ADDR_ALT};
pub use spi::Adxl372Spi;
