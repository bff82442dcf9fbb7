//! VCNL4010 Proximity and Ambient Light Driver
//!
//! Driver for the Vishay VCNL4010 combined IR proximity and ambient light
//! sensor (I2C only, fixed address 0x13).
//!
//! ## Features
//!
//! - On-demand single measurements with bounded ready polling
//! - Self-timed periodic mode with non-blocking ready queries
//! - IR LED current up to 200 mA in 10 mA steps
//! - Proximity window-threshold interrupt with write-1-to-clear status
//!
//! ## Usage
//!
//! ```ignore
//! use mikroclick::devices::proximity::vcnl4010::{Vcnl4010, Vcnl4010Config};
//!
//! let mut sensor = Vcnl4010::new(i2c, Vcnl4010Config::default());
//! sensor.init()?;
//! sensor.apply_default_config()?;
//! let counts = sensor.read_proximity_on_demand(&mut delay)?;
//! ```

mod config;
mod driver;
mod registers;

pub use config::{AlsAveraging, AlsRate, ProxRate, Vcnl4010Config};
pub use driver::Vcnl4010;
pub use registers::VCNL4010_ADDR;
