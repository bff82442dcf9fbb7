//! ADXL372 SPI transport
//!
//! The ADXL372 does not follow the common "bit 7 = read" SPI convention:
//! the 7-bit register address is shifted left one position and the read
//! flag occupies bit 0. This transport implements [`RegisterBus`] with that
//! framing so the generic driver stays bus-agnostic.

use crate::bus::RegisterBus;
use crate::platform::{GpioInterface, Result, SpiInterface};

/// Read flag in bit 0 of the shifted address byte
const READ_BIT: u8 = 0x01;

/// [`RegisterBus`] with the ADXL372's shifted-address SPI framing
pub struct Adxl372Spi<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI: SpiInterface, CS: GpioInterface> Adxl372Spi<SPI, CS> {
    /// Create a transport over the given bus and chip-select pin
    ///
    /// The CS pin must already be configured as an output; it is driven
    /// high (deselected) here.
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

impl<SPI: SpiInterface, CS: GpioInterface> RegisterBus for Adxl372Spi<SPI, CS> {
    fn write_register(&mut self, reg: u8, value: u8) -> Result<()> {
        self.cs.set_low()?;
        let result = self.spi.write(&[reg << 1, value]);
        self.cs.set_high()?;
        result
    }

    fn write_registers(&mut self, reg: u8, data: &[u8]) -> Result<()> {
        self.cs.set_low()?;
        let result = self
            .spi
            .write(&[reg << 1])
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
            .write(&[reg << 1 | READ_BIT])
            .and_then(|_| self.spi.read(buffer));
        self.cs.set_high()?;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{MockGpio, MockSpi, SpiTransaction};

    fn transport() -> Adxl372Spi<MockSpi, MockGpio> {
        Adxl372Spi::new(MockSpi::new(Default::default()), MockGpio::new_output())
    }

    #[test]
    fn test_write_register_shifts_address() {
        let mut bus = transport();
        bus.write_register(0x3F, 0x03).unwrap();

        // 0x3F << 1 = 0x7E, read bit clear
        assert_eq!(
            bus.spi.transactions(),
            vec![SpiTransaction::Write {
                data: vec![0x7E, 0x03]
            }]
        );
        assert!(bus.cs.read());
    }

    #[test]
    fn test_read_register_sets_bit_zero() {
        let mut bus = transport();
        bus.spi.set_read_data(&[0xAD]);

        let value = bus.read_register(0x00).unwrap();
        assert_eq!(value, 0xAD);
        assert_eq!(
            bus.spi.transactions(),
            vec![
                SpiTransaction::Write { data: vec![0x01] },
                SpiTransaction::Read { len: 1 },
            ]
        );
    }

    #[test]
    fn test_read_registers_burst() {
        let mut bus = transport();
        bus.spi.set_read_data(&[0x12, 0x30]);

        let mut buf = [0u8; 2];
        bus.read_registers(0x08, &mut buf).unwrap();
        assert_eq!(buf, [0x12, 0x30]);
        assert_eq!(
            bus.spi.transactions(),
            vec![
                SpiTransaction::Write { data: vec![0x11] },
                SpiTransaction::Read { len: 2 },
            ]
        );
    }
}
