//! MCP4161 Digital Potentiometer Driver
//!
//! Driver for the Microchip MCP4161 single-channel 8-bit digital
//! potentiometer with non-volatile wiper memory (SPI only). The Click
//! board variant carries the 10 kΩ ladder.
//!
//! ## Features
//!
//! - 257-tap wiper (0..=256), volatile and EEPROM-backed positions
//! - Single-tap increment/decrement commands
//! - Terminal connection (TCON) control
//! - Resistance helper mapping ohms to the nearest tap
//!
//! ## Usage
//!
//! ```ignore
//! use mikroclick::devices::digipot::mcp4161::Mcp4161;
//!
//! let mut pot = Mcp4161::new(spi, cs);
//! pot.init()?;
//! pot.set_resistance(2_200)?;
//! pot.save_wiper(128, &mut delay)?;
//! ```

mod driver;
mod registers;

pub use driver::Mcp4161;
pub use registers::{R_AB_OHMS, WIPER_MAX};
