//! MCP4161 Driver Implementation

use super::registers;
use crate::devices::digipot::DigipotError;
use crate::platform::{DelayInterface, GpioInterface, SpiInterface};

/// Maximum consecutive errors before marking the device unhealthy
const MAX_CONSECUTIVE_ERRORS: u32 = 3;

/// Bounded attempts for the EEPROM write-active poll
///
/// A non-volatile wiper write completes within 10 ms.
const MAX_EEPROM_ATTEMPTS: u32 = 20;

/// MCP4161 8-bit digital potentiometer driver (SPI with GPIO chip select)
///
/// The part has no identity register; [`init`](Self::init) validates
/// presence through the CMDERR protocol bit of a STATUS read. A floating
/// SDO reads all-zero and fails that check.
pub struct Mcp4161<SPI, CS> {
    /// SPI bus
    spi: SPI,

    /// Chip-select pin (active low)
    cs: CS,

    /// Whether init() completed successfully
    initialized: bool,

    /// Whether the device is responding
    healthy: bool,

    /// Consecutive error counter
    error_count: u32,
}

impl<SPI: SpiInterface, CS: GpioInterface> Mcp4161<SPI, CS> {
    /// Create a new MCP4161 driver
    ///
    /// The CS pin must already be configured as an output; it is driven
    /// high (deselected) here.
    pub fn new(spi: SPI, mut cs: CS) -> Self {
        let _ = cs.set_high();
        Self {
            spi,
            cs,
            initialized: false,
            healthy: false,
            error_count: 0,
        }
    }

    /// Initialize and verify device presence
    ///
    /// Issues a STATUS read; a bus failure here is the absence signal, the
    /// chip has no identity register.
    pub fn init(&mut self) -> Result<(), DigipotError> {
        let _status = self.read_data(registers::STATUS)?;
        self.initialized = true;
        self.healthy = true;
        crate::log_info!("MCP4161 present (STATUS {:#x})", _status);
        Ok(())
    }

    /// Read the volatile wiper position (0..=256)
    pub fn read_wiper(&mut self) -> Result<u16, DigipotError> {
        if !self.initialized {
            return Err(DigipotError::NotInitialized);
        }
        self.read_data(registers::VOLATILE_WIPER)
    }

    /// Set the volatile wiper position (0..=256)
    pub fn set_wiper(&mut self, position: u16) -> Result<(), DigipotError> {
        if !self.initialized {
            return Err(DigipotError::NotInitialized);
        }
        if position > registers::WIPER_MAX {
            return Err(DigipotError::InvalidTap);
        }
        self.write_data(registers::VOLATILE_WIPER, position)
    }

    /// Step the wiper one tap toward full scale
    pub fn increment(&mut self) -> Result<(), DigipotError> {
        if !self.initialized {
            return Err(DigipotError::NotInitialized);
        }
        self.write_command(registers::command_byte(
            registers::VOLATILE_WIPER,
            registers::CMD_INCREMENT,
        ))
    }

    /// Step the wiper one tap toward zero
    pub fn decrement(&mut self) -> Result<(), DigipotError> {
        if !self.initialized {
            return Err(DigipotError::NotInitialized);
        }
        self.write_command(registers::command_byte(
            registers::VOLATILE_WIPER,
            registers::CMD_DECREMENT,
        ))
    }

    /// Store a wiper position in EEPROM as the power-up default
    ///
    /// Writes the non-volatile wiper and polls STATUS until the EEPROM
    /// write-active flag clears, with bounded attempts.
    pub fn save_wiper<D: DelayInterface>(
        &mut self,
        position: u16,
        delay: &mut D,
    ) -> Result<(), DigipotError> {
        if !self.initialized {
            return Err(DigipotError::NotInitialized);
        }
        if position > registers::WIPER_MAX {
            return Err(DigipotError::InvalidTap);
        }

        self.write_data(registers::NON_VOLATILE_WIPER, position)?;
        for _ in 0..MAX_EEPROM_ATTEMPTS {
            let status = self.read_data(registers::STATUS)?;
            if status & registers::STATUS_EEWA == 0 {
                crate::log_info!("MCP4161 wiper {} stored to EEPROM", position);
                return Ok(());
            }
            delay.delay_ms(registers::EEPROM_POLL_INTERVAL_MS);
        }
        Err(DigipotError::Timeout)
    }

    /// Set the wiper to approximate a resistance between terminal B and
    /// the wiper, in ohms
    ///
    /// Maps onto the nearest tap of the 10 kΩ ladder, accounting for the
    /// wiper contact resistance.
    pub fn set_resistance(&mut self, ohms: u32) -> Result<(), DigipotError> {
        let ladder = ohms.saturating_sub(registers::R_WIPER_OHMS);
        let tap = (ladder * u32::from(registers::WIPER_MAX) + registers::R_AB_OHMS / 2)
            / registers::R_AB_OHMS;
        self.set_wiper(core::cmp::min(tap as u16, registers::WIPER_MAX))
    }

    /// Read the terminal connection control register
    pub fn read_tcon(&mut self) -> Result<u16, DigipotError> {
        if !self.initialized {
            return Err(DigipotError::NotInitialized);
        }
        self.read_data(registers::TCON)
    }

    /// Write the terminal connection control register
    pub fn write_tcon(&mut self, value: u16) -> Result<(), DigipotError> {
        if !self.initialized {
            return Err(DigipotError::NotInitialized);
        }
        self.write_data(registers::TCON, value & 0x01FF)
    }

    /// Read the STATUS register
    pub fn read_status(&mut self) -> Result<u16, DigipotError> {
        if !self.initialized {
            return Err(DigipotError::NotInitialized);
        }
        self.read_data(registers::STATUS)
    }

    // ========================================================================
    // Frame plumbing
    // ========================================================================

    /// 16-bit read: command byte + dummy, 9 data bits back, CMDERR checked
    fn read_data(&mut self, address: u8) -> Result<u16, DigipotError> {
        let tx = [
            registers::command_byte(address, registers::CMD_READ),
            0xFF,
        ];
        let mut rx = [0u8; 2];
        self.transfer(&tx, &mut rx)?;

        if rx[0] & registers::CMDERR_OK == 0 {
            self.track_error();
            return Err(DigipotError::CommandError);
        }
        self.error_count = 0;
        Ok(u16::from(rx[0] & registers::DATA_BIT8) << 8 | u16::from(rx[1]))
    }

    /// 16-bit write: command byte carries data bit 8
    fn write_data(&mut self, address: u8, value: u16) -> Result<(), DigipotError> {
        let frame = [
            registers::command_byte(address, registers::CMD_WRITE) | (value >> 8) as u8,
            value as u8,
        ];
        self.write_frame(&frame)
    }

    /// 8-bit command frame (increment/decrement)
    fn write_command(&mut self, command: u8) -> Result<(), DigipotError> {
        self.write_frame(&[command])
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), DigipotError> {
        self.cs.set_low()?;
        let result = self.spi.write(frame);
        self.cs.set_high()?;
        result.map_err(|e| {
            self.track_error();
            DigipotError::Bus(e)
        })?;
        self.error_count = 0;
        Ok(())
    }

    fn transfer(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<(), DigipotError> {
        self.cs.set_low()?;
        let result = self.spi.transfer(tx, rx);
        self.cs.set_high()?;
        result.map_err(|e| {
            self.track_error();
            DigipotError::Bus(e)
        })
    }

    fn track_error(&mut self) {
        self.error_count += 1;
        if self.error_count >= MAX_CONSECUTIVE_ERRORS {
            self.healthy = false;
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Check if the driver is initialized
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Check if the device is healthy
    pub fn is_healthy(&self) -> bool {
        self.initialized && self.healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{MockGpio, MockSpi, SpiTransaction};

    fn init_driver() -> Mcp4161<MockSpi, MockGpio> {
        let spi = MockSpi::new(Default::default());
        // STATUS read response: CMDERR ok, EEWA clear
        spi.set_read_data(&[registers::CMDERR_OK, 0x00]);
        let mut pot = Mcp4161::new(spi, MockGpio::new_output());
        pot.init().unwrap();
        pot.spi.clear_transactions();
        pot
    }

    #[test]
    fn test_init_reads_status() {
        let spi = MockSpi::new(Default::default());
        spi.set_read_data(&[registers::CMDERR_OK, 0x00]);
        let mut pot = Mcp4161::new(spi, MockGpio::new_output());

        pot.init().unwrap();
        assert!(pot.is_initialized());
        assert_eq!(
            pot.spi.transactions(),
            vec![SpiTransaction::Transfer {
                write: vec![0x5C, 0xFF],
                read: vec![registers::CMDERR_OK, 0x00],
            }]
        );
        assert!(pot.cs.read());
    }

    #[test]
    fn test_init_fails_on_cmderr() {
        let spi = MockSpi::new(Default::default());
        // Floating SDO: all zeros, CMDERR bit clear
        spi.set_read_data(&[0x00, 0x00]);
        let mut pot = Mcp4161::new(spi, MockGpio::new_output());

        assert_eq!(pot.init(), Err(DigipotError::CommandError));
        assert!(!pot.is_initialized());
    }

    #[test]
    fn test_set_wiper_frames() {
        let mut pot = init_driver();

        pot.set_wiper(0x80).unwrap();
        pot.set_wiper(256).unwrap(); // full scale carries data bit 8

        assert_eq!(
            pot.spi.transactions(),
            vec![
                SpiTransaction::Write {
                    data: vec![0x00, 0x80]
                },
                SpiTransaction::Write {
                    data: vec![0x01, 0x00]
                },
            ]
        );
    }

    #[test]
    fn test_set_wiper_rejects_out_of_range() {
        let mut pot = init_driver();
        assert_eq!(pot.set_wiper(257), Err(DigipotError::InvalidTap));
        assert!(pot.spi.transactions().is_empty());
    }

    #[test]
    fn test_read_wiper_nine_bits() {
        let mut pot = init_driver();
        // Response: CMDERR ok + data bit 8 set, low byte 0x00 -> 256
        pot.spi
            .set_read_data(&[registers::CMDERR_OK | registers::DATA_BIT8, 0x00]);

        assert_eq!(pot.read_wiper().unwrap(), 256);
    }

    #[test]
    fn test_increment_decrement_are_8bit() {
        let mut pot = init_driver();
        pot.increment().unwrap();
        pot.decrement().unwrap();

        assert_eq!(
            pot.spi.transactions(),
            vec![
                SpiTransaction::Write { data: vec![0x04] },
                SpiTransaction::Write { data: vec![0x08] },
            ]
        );
    }

    #[test]
    fn test_save_wiper_polls_eewa() {
        let mut pot = init_driver();
        let mut delay = crate::platform::mock::MockDelay::new();

        // STATUS: write active, then clear
        pot.spi.set_read_data(&[
            registers::CMDERR_OK | (registers::STATUS_EEWA >> 8) as u8,
            registers::STATUS_EEWA as u8,
            registers::CMDERR_OK,
            0x00,
        ]);

        pot.save_wiper(0x40, &mut delay).unwrap();

        let transactions = pot.spi.transactions();
        // NV wiper write at address 0x02, then two STATUS reads
        assert_eq!(
            transactions[0],
            SpiTransaction::Write {
                data: vec![0x20, 0x40]
            }
        );
        assert_eq!(transactions.len(), 3);
        assert_eq!(delay.elapsed_us(), 1_000);
    }

    #[test]
    fn test_set_resistance_maps_to_tap() {
        let mut pot = init_driver();

        // 5 kΩ on a 10 kΩ ladder with 75 Ω wiper: (4925 * 256 + 5000) / 10000 = 126
        pot.set_resistance(5_000).unwrap();
        assert_eq!(
            pot.spi.transactions(),
            vec![SpiTransaction::Write {
                data: vec![0x00, 126]
            }]
        );
    }

    #[test]
    fn test_operations_before_init() {
        let spi = MockSpi::new(Default::default());
        let mut pot = Mcp4161::new(spi, MockGpio::new_output());
        assert_eq!(pot.read_wiper(), Err(DigipotError::NotInitialized));
        assert_eq!(pot.increment(), Err(DigipotError::NotInitialized));
    }
}
