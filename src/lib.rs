#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! mikroclick - Platform-agnostic Rust drivers for MikroElektronika Click boards
//!
//! Each driver in this collection is a self-contained wrapper over the register
//! map of one Click board's chip, written against the bus traits in
//! [`platform::traits`]. Supply implementations of those traits (or use the
//! `embedded-hal` adapters in [`platform::hal`]) and every driver here runs on
//! your MCU unchanged.
//!
//! Drivers follow a common shape: build a config struct (defaults match the
//! Click board), construct the driver over an I2C/SPI/UART transport, call
//! `init()` to verify the chip identity, `apply_default_config()` to load the
//! baseline register sequence, then poll `read_*` functions from the main loop.
//!
//! ```ignore
//! use mikroclick::bus::I2cRegisters;
//! use mikroclick::devices::baro::dps310::{Dps310, DPS310_ADDR};
//!
//! let bus = I2cRegisters::new(i2c, DPS310_ADDR);
//! let mut baro = Dps310::new(bus, Default::default());
//! baro.init(&mut delay)?;
//! baro.apply_default_config()?;
//! loop {
//!     let sample = baro.read_sample()?;
//!     log_info!("{} Pa, {} degC", sample.pressure_pa, sample.temperature_c);
//! }
//! ```

// Platform abstraction layer: the HAL contract every driver is written against
pub mod platform;

// Register-bus transports (I2C or SPI chosen at construction)
pub mod bus;

// Device drivers, one package per Click board chip
pub mod devices;

// Logging macros (defmt on target, println in host tests)
pub mod core;
