//! SPI register transport

use crate::bus::RegisterBus;
use crate::platform::{GpioInterface, Result, SpiInterface};

/// Read flag ORed into the register byte (bit 7 convention)
const READ_BIT: u8 = 0x80;

/// [`RegisterBus`] over SPI with a GPIO chip select
///
/// Implements the convention shared by the Bosch and Infineon parts in this
/// collection: bit 7 of the register byte set for reads, cleared for writes,
/// with auto-increment on the remaining clocks. CS is asserted low around
/// every transaction and released even when the transfer fails.
pub struct SpiRegisters<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI: SpiInterface, CS: GpioInterface> SpiRegisters<SPI, CS> {
    /// Create a transport over the given bus and chip-select pin
    ///
    /// The CS pin must already be configured as an output; it is driven high
    /// (deselected) here so a floating line cannot leave the chip listening.
    pub fn new(spi: SPI, mut cs: CS) -> Self {
        let _ = cs.set_high();
        Self { spi, cs }
    }

    /// Access the underlying bus (used by tests to inspect traffic)
    pub fn inner(&self) -> &SPI {
        &self.spi
    }

    /// Access the chip-select pin
    pub fn chip_select(&self) -> &CS {
        &self.cs
    }

    /// Release the underlying bus and chip-select pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI: SpiInterface, CS: GpioInterface> RegisterBus for SpiRegisters<SPI, CS> {
    fn write_register(&mut self, reg: u8, value: u8) -> Result<()> {
        self.cs.set_low()?;
        let result = self.spi.write(&[reg & !READ_BIT, value]);
        self.cs.set_high()?;
        result
    }

    fn write_registers(&mut self, reg: u8, data: &[u8]) -> Result<()> {
        self.cs.set_low()?;
        let result = self
            .spi
            .write(&[reg & !READ_BIT])
            .and_then(|_| self.spi.write(data));
        self.cs.set_high()?;
        result
    }

    fn read_register(&mut self, reg: u8) -> Result<u8> {
        let mut value = [0u8; 1];
        self.read_registers(reg, &mut value)?;
        Ok(value[0])
    }

    fn read_registers(&mut self, reg: u8, buffer: &mut [u8]) -> Result<()> {
        self.cs.set_low()?;
        let result = self
            .spi
            .write(&[reg | READ_BIT])
            .and_then(|_| self.spi.read(buffer));
        self.cs.set_high()?;
        result
    }
}
