//! Register-bus transports
//!
//! Most chips in this collection expose the same thing: a flat register map
//! reachable over either I2C or SPI. Drivers for those chips are generic over
//! [`RegisterBus`] and the caller picks the transport at construction:
//!
//! ```ignore
//! // I2C wiring
//! let mut imu = Bmi160::new(I2cRegisters::new(i2c, BMI160_I2C_ADDR), config);
//! // SPI wiring, same driver
//! let mut imu = Bmi160::new(SpiRegisters::new(spi, cs_pin), config);
//! ```
//!
//! The transport choice is part of the driver's type and cannot change after
//! construction.
//!
//! [`SpiRegisters`] implements the widespread "bit 7 of the register byte
//! selects read" convention. Chips with a different SPI framing (the ADXL372
//! shifts the address and puts the read bit in bit 0) provide their own
//! transport in their package, implementing the same trait.

mod i2c;
mod spi;

pub use i2c::I2cRegisters;
pub use spi::SpiRegisters;

use crate::platform::Result;

/// Register-level access to a chip, independent of the wire protocol
pub trait RegisterBus {
    /// Write a single register
    fn write_register(&mut self, reg: u8, value: u8) -> Result<()>;

    /// Write consecutive registers starting at `reg`
    ///
    /// Relies on the chip's register auto-increment, which every dual-bus
    /// chip in this collection supports.
    fn write_registers(&mut self, reg: u8, data: &[u8]) -> Result<()>;

    /// Read a single register
    fn read_register(&mut self, reg: u8) -> Result<u8>;

    /// Read consecutive registers starting at `reg`
    fn read_registers(&mut self, reg: u8, buffer: &mut [u8]) -> Result<()>;
}
