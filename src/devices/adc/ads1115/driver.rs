//! ADS1115 Driver Implementation
//!
//! The driver talks to the chip's four 16-bit registers directly over I2C
//! (pointer byte followed by the big-endian register word), so it does not
//! go through the byte-register transports.

use super::config::{Ads1115Config, Ads1115Mode, Ads1115Mux};
use super::registers;
use crate::devices::adc::AdcError;
use crate::platform::{DelayInterface, I2cInterface};

/// Maximum consecutive errors before marking the converter unhealthy
const MAX_CONSECUTIVE_ERRORS: u32 = 3;

/// Bounded attempts for the conversion-ready poll
///
/// At the slowest rate (8 SPS) a conversion takes 125 ms; 300 polls at
/// 500 µs cover it with margin.
const MAX_CONVERSION_ATTEMPTS: u32 = 300;

/// ADS1115 16-bit delta-sigma ADC driver (I2C only)
pub struct Ads1115<I2C> {
    /// I2C bus
    i2c: I2C,

    /// 7-bit device address (ADDR pin strap)
    address: u8,

    /// Current configuration
    config: Ads1115Config,

    /// Whether init() completed successfully
    initialized: bool,

    /// Whether the converter is responding
    healthy: bool,

    /// Consecutive error counter
    error_count: u32,
}

impl<I2C: I2cInterface> Ads1115<I2C> {
    /// Create a new ADS1115 driver
    pub fn new(i2c: I2C, address: u8, config: Ads1115Config) -> Self {
        Self {
            i2c,
            address,
            config,
            initialized: false,
            healthy: false,
            error_count: 0,
        }
    }

    /// Initialize the converter
    ///
    /// The chip has no identity register, so presence is detected by a
    /// successful CONFIG read: a missing device NACKs the transaction. The
    /// value is compared against the datasheet reset pattern only as a
    /// plausibility hint, never as an error.
    pub fn init(&mut self) -> Result<(), AdcError> {
        let config = self.read_reg(registers::CONFIG)?;
        if config != registers::CONFIG_RESET_VALUE {
            crate::log_warn!(
                "ADS1115 CONFIG not at reset value ({:#x}), device already configured?",
                config
            );
        }
        self.initialized = true;
        self.healthy = true;
        crate::log_info!("ADS1115 present at {:#x}", self.address);
        Ok(())
    }

    /// Write the stored configuration to the CONFIG register
    ///
    /// In continuous mode this also starts the free-running conversions.
    pub fn apply_default_config(&mut self) -> Result<(), AdcError> {
        if !self.initialized {
            return Err(AdcError::NotInitialized);
        }
        let config = self.config;
        self.configure(config)
    }

    /// Write a new configuration to the CONFIG register
    pub fn configure(&mut self, config: Ads1115Config) -> Result<(), AdcError> {
        if !self.initialized {
            return Err(AdcError::NotInitialized);
        }
        self.write_reg(registers::CONFIG, config.register_value())?;
        self.config = config;
        crate::log_info!("ADS1115 configured ({:#x})", config.register_value());
        Ok(())
    }

    /// Trigger a single-shot conversion on the given input
    ///
    /// Writes CONFIG with the OS bit set and the requested multiplexer
    /// selection; the stored gain, rate and mode are kept.
    pub fn start_conversion(&mut self, mux: Ads1115Mux) -> Result<(), AdcError> {
        if !self.initialized {
            return Err(AdcError::NotInitialized);
        }
        self.config.mux = mux;
        self.config.mode = Ads1115Mode::SingleShot;
        let word = self.config.register_value() | registers::CONFIG_OS;
        self.write_reg(registers::CONFIG, word)
    }

    /// Check whether the last triggered conversion has completed
    ///
    /// Reads the OS bit of CONFIG: 0 while converting, 1 when idle.
    pub fn conversion_ready(&mut self) -> Result<bool, AdcError> {
        if !self.initialized {
            return Err(AdcError::NotInitialized);
        }
        let config = self.read_reg(registers::CONFIG)?;
        Ok(config & registers::CONFIG_OS != 0)
    }

    /// Read the conversion register as a signed raw count
    pub fn read_conversion_raw(&mut self) -> Result<i16, AdcError> {
        if !self.initialized {
            return Err(AdcError::NotInitialized);
        }
        Ok(self.read_reg(registers::CONVERSION)? as i16)
    }

    /// Run the full single-shot sequence and return the input voltage
    ///
    /// Trigger, poll OS with bounded attempts, read and scale by the PGA
    /// full-scale range.
    pub fn read_voltage<D: DelayInterface>(
        &mut self,
        mux: Ads1115Mux,
        delay: &mut D,
    ) -> Result<f32, AdcError> {
        self.start_conversion(mux)?;
        for _ in 0..MAX_CONVERSION_ATTEMPTS {
            if self.conversion_ready()? {
                let raw = self.read_conversion_raw()?;
                return Ok(self.to_voltage(raw));
            }
            delay.delay_us(registers::CONVERSION_POLL_INTERVAL_US);
        }
        Err(AdcError::Timeout)
    }

    /// Convert a raw count to volts using the configured gain
    pub fn to_voltage(&self, raw: i16) -> f32 {
        raw as f32 * self.config.pga.full_scale_v() / registers::FULL_SCALE_COUNTS
    }

    /// Program the comparator threshold registers
    pub fn set_thresholds(&mut self, low: i16, high: i16) -> Result<(), AdcError> {
        if !self.initialized {
            return Err(AdcError::NotInitialized);
        }
        self.write_reg(registers::LO_THRESH, low as u16)?;
        self.write_reg(registers::HI_THRESH, high as u16)
    }

    // ========================================================================
    // Register Access (16-bit big-endian behind a pointer byte)
    // ========================================================================

    fn read_reg(&mut self, pointer: u8) -> Result<u16, AdcError> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[pointer], &mut buf)
            .map_err(|e| {
                self.track_error();
                AdcError::Bus(e)
            })?;
        self.error_count = 0;
        Ok(u16::from_be_bytes(buf))
    }

    fn write_reg(&mut self, pointer: u8, value: u16) -> Result<(), AdcError> {
        let bytes = value.to_be_bytes();
        self.i2c
            .write(self.address, &[pointer, bytes[0], bytes[1]])
            .map_err(|e| {
                self.track_error();
                AdcError::Bus(e)
            })?;
        self.error_count = 0;
        Ok(())
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

    /// Check if the converter is healthy
    pub fn is_healthy(&self) -> bool {
        self.initialized && self.healthy
    }

    /// Get the configuration
    pub fn config(&self) -> &Ads1115Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::adc::ads1115::config::{Ads1115DataRate, Ads1115Pga};
    use crate::platform::mock::{I2cTransaction, MockDelay, MockI2c};
    use crate::platform::{error::I2cError, PlatformError};

    fn init_driver() -> Ads1115<MockI2c> {
        let i2c = MockI2c::new(Default::default());
        i2c.set_read_data(&registers::CONFIG_RESET_VALUE.to_be_bytes());
        let mut adc = Ads1115::new(i2c, registers::ADS1115_ADDR, Ads1115Config::default());
        adc.init().unwrap();
        adc.i2c.clear_transactions();
        adc
    }

    #[test]
    fn test_init_reads_config() {
        let i2c = MockI2c::new(Default::default());
        i2c.set_read_data(&[0x85, 0x83]);
        let mut adc = Ads1115::new(i2c, registers::ADS1115_ADDR, Ads1115Config::default());

        adc.init().unwrap();
        assert!(adc.is_initialized());
        assert_eq!(
            adc.i2c.transactions(),
            vec![I2cTransaction::WriteRead {
                addr: registers::ADS1115_ADDR,
                write_data: vec![registers::CONFIG],
                read_len: 2,
            }]
        );
    }

    #[test]
    fn test_init_nack_is_failure() {
        let i2c = MockI2c::new(Default::default());
        i2c.inject_error(PlatformError::I2c(I2cError::Nack));
        let mut adc = Ads1115::new(i2c, registers::ADS1115_ADDR, Ads1115Config::default());

        assert!(matches!(adc.init(), Err(AdcError::Bus(_))));
        assert!(!adc.is_initialized());
    }

    #[test]
    fn test_start_conversion_sets_os_and_mux() {
        let mut adc = init_driver();
        adc.start_conversion(Ads1115Mux::Single0).unwrap();

        // OS | MUX=100 | PGA=010 | MODE=1 | DR=100 | COMP disabled
        assert_eq!(
            adc.i2c.transactions(),
            vec![I2cTransaction::Write {
                addr: registers::ADS1115_ADDR,
                data: vec![registers::CONFIG, 0xC5, 0x83],
            }]
        );
    }

    #[test]
    fn test_single_shot_read_voltage() {
        let mut adc = init_driver();
        let mut delay = MockDelay::new();

        // Poll 1: still converting (OS=0); poll 2: done; then the result.
        // 16384 counts at ±2.048 V = 1.024 V
        adc.i2c.set_read_data(&[0x45, 0x83, 0xC5, 0x83, 0x40, 0x00]);

        let volts = adc.read_voltage(Ads1115Mux::Single0, &mut delay).unwrap();
        assert!((volts - 1.024).abs() < 1e-4);
        // One backoff for the not-ready poll
        assert_eq!(delay.elapsed_us(), 500);
    }

    #[test]
    fn test_read_voltage_timeout() {
        let mut adc = init_driver();
        let mut delay = MockDelay::new();

        // OS stays clear forever: queue nothing, mock reads return zeros
        let result = adc.read_voltage(Ads1115Mux::Single0, &mut delay);
        assert_eq!(result, Err(AdcError::Timeout));
    }

    #[test]
    fn test_negative_counts_to_voltage() {
        let mut adc = init_driver();
        adc.configure(Ads1115Config {
            pga: Ads1115Pga::Fs4V096,
            data_rate: Ads1115DataRate::Sps860,
            ..Ads1115Config::default()
        })
        .unwrap();

        assert!((adc.to_voltage(-32768) + 4.096).abs() < 1e-4);
        assert!((adc.to_voltage(8192) - 1.024).abs() < 1e-4);
    }

    #[test]
    fn test_set_thresholds() {
        let mut adc = init_driver();
        adc.set_thresholds(-100, 100).unwrap();

        assert_eq!(
            adc.i2c.transactions(),
            vec![
                I2cTransaction::Write {
                    addr: registers::ADS1115_ADDR,
                    data: vec![registers::LO_THRESH, 0xFF, 0x9C],
                },
                I2cTransaction::Write {
                    addr: registers::ADS1115_ADDR,
                    data: vec![registers::HI_THRESH, 0x00, 0x64],
                },
            ]
        );
    }

    #[test]
    fn test_operations_before_init() {
        let i2c = MockI2c::new(Default::default());
        let mut adc = Ads1115::new(i2c, registers::ADS1115_ADDR, Ads1115Config::default());

        assert_eq!(
            adc.start_conversion(Ads1115Mux::Single0),
            Err(AdcError::NotInitialized)
        );
        assert_eq!(adc.read_conversion_raw(), Err(AdcError::NotInitialized));
    }
}
