//! I2C register transport

use crate::bus::RegisterBus;
use crate::platform::{I2cInterface, PlatformError, Result};

/// Largest register-pointer-plus-payload frame a multi-register write
/// produces. Sized for the longest burst any driver here issues.
const MAX_WRITE_FRAME: usize = 16;

/// [`RegisterBus`] over I2C
///
/// Register writes send `[reg, data..]` in one transaction; register reads
/// use a write-read transaction with a repeated START, which doubles as the
/// auto-increment burst read on every supported chip.
pub struct I2cRegisters<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2cInterface> I2cRegisters<I2C> {
    /// Create a transport for the device at the given 7-bit address
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// The 7-bit device address this transport talks to
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Access the underlying bus (used by tests to inspect traffic)
    pub fn inner(&self) -> &I2C {
        &self.i2c
    }

    /// Release the underlying bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2cInterface> RegisterBus for I2cRegisters<I2C> {
    fn write_register(&mut self, reg: u8, value: u8) -> Result<()> {
        self.i2c.write(self.address, &[reg, value])
    }

    fn write_registers(&mut self, reg: u8, data: &[u8]) -> Result<()> {
        if data.len() + 1 > MAX_WRITE_FRAME {
            return Err(PlatformError::InvalidConfig);
        }
        let mut frame = [0u8; MAX_WRITE_FRAME];
        frame[0] = reg;
        frame[1..=data.len()].copy_from_slice(data);
        self.i2c.write(self.address, &frame[..=data.len()])
    }

    fn read_register(&mut self, reg: u8) -> Result<u8> {
        let mut value = [0u8; 1];
        self.i2c.write_read(self.address, &[reg], &mut value)?;
        Ok(value[0])
    }

    fn read_registers(&mut self, reg: u8, buffer: &mut [u8]) -> Result<()> {
        self.i2c.write_read(self.address, &[reg], buffer)
    }
}
