//! ADS1115 16-bit Delta-Sigma ADC Driver
//!
//! Driver for the Texas Instruments ADS1115 four-channel ADC, used as the
//! analog front-end for piezo and other analog Click boards (I2C only).
//!
//! ## Features
//!
//! - 4 single-ended or 4 differential input selections
//! - Programmable gain: ±0.256 V to ±6.144 V full scale
//! - 8 to 860 samples per second
//! - Single-shot trigger/poll/read state machine or continuous mode
//! - Comparator threshold programming
//!
//! ## Usage
//!
//! ```ignore
//! use mikroclick::devices::adc::ads1115::{Ads1115, Ads1115Config, Ads1115Mux, ADS1115_ADDR};
//!
//! let mut adc = Ads1115::new(i2c, ADS1115_ADDR, Ads1115Config::default());
//! adc.init()?;
//! let volts = adc.read_voltage(Ads1115Mux::Single0, &mut delay)?;
//! ```

mod config;
mod driver;
mod registers;

pub use config::{Ads1115Config, Ads1115DataRate, Ads1115Mode, Ads1115Mux, Ads1115Pga};
pub use driver::Ads1115;
pub use registers::{ADS1115_ADDR, ADS1115_ADDR_SCL, ADS1115_ADDR_SDA, ADS1115_ADDR_VDD};
