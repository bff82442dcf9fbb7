//! ADXL372 Driver Implementation

use bitflags::bitflags;
use nalgebra::Vector3;

use super::config::{Adxl372Config, Adxl372Mode};
use super::registers;
use crate::bus::RegisterBus;
use crate::devices::accel::AccelError;
use crate::platform::DelayInterface;

/// Maximum consecutive errors before marking sensor unhealthy
const MAX_CONSECUTIVE_ERRORS: u32 = 3;

/// Bounded attempts for the data-ready poll in blocking reads
const MAX_DATA_READY_ATTEMPTS: u32 = 100;

bitflags! {
    /// STATUS register flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Adxl372Status: u8 {
        /// New acceleration data available
        const DATA_RDY = 0x01;
        /// FIFO watermark reached
        const FIFO_RDY = 0x02;
        /// FIFO full
        const FIFO_FULL = 0x04;
        /// FIFO overrun, data lost
        const FIFO_OVR = 0x08;
        /// Part is awake (wake-up mode)
        const AWAKE = 0x40;
        /// A user register failed its parity check
        const ERR_USER_REGS = 0x80;
    }
}

/// ADXL372 ±200 g accelerometer driver
///
/// Generic over the register transport. Over SPI the part needs its own
/// framing, so use [`Adxl372Spi`](super::Adxl372Spi) instead of the common
/// transport; over I2C the standard
/// [`I2cRegisters`](crate::bus::I2cRegisters) works.
pub struct Adxl372<B> {
    /// Register transport
    bus: B,

    /// Current configuration
    config: Adxl372Config,

    /// Whether init() completed successfully
    initialized: bool,

    /// Whether the sensor is responding
    healthy: bool,

    /// Consecutive error counter
    error_count: u32,
}

impl<B: RegisterBus> Adxl372<B> {
    /// Create a new ADXL372 driver
    pub fn new(bus: B, config: Adxl372Config) -> Self {
        Self {
            bus,
            config,
            initialized: false,
            healthy: false,
            error_count: 0,
        }
    }

    /// Initialize the sensor
    ///
    /// Verifies all three identification registers (manufacturer, MEMS and
    /// part ID), then issues a soft reset. The part boots into standby.
    pub fn init<D: DelayInterface>(&mut self, delay: &mut D) -> Result<(), AccelError> {
        let mut ids = [0u8; 3];
        self.read_registers(registers::DEVID_AD, &mut ids)?;

        if ids[0] != registers::DEVID_AD_VALUE {
            crate::log_error!("ADXL372 manufacturer ID mismatch: got {:#x}", ids[0]);
            return Err(AccelError::InvalidChipId(ids[0]));
        }
        if ids[1] != registers::DEVID_MST_VALUE {
            crate::log_error!("ADXL372 MEMS ID mismatch: got {:#x}", ids[1]);
            return Err(AccelError::InvalidChipId(ids[1]));
        }
        if ids[2] != registers::PARTID_VALUE {
            crate::log_error!("ADXL372 part ID mismatch: got {:#x}", ids[2]);
            return Err(AccelError::InvalidChipId(ids[2]));
        }
        crate::log_info!("ADXL372 detected (part ID {:#x})", ids[2]);

        self.write_register(registers::SRESET, registers::SRESET_VALUE)?;
        delay.delay_ms(registers::SOFT_RESET_DELAY_MS);

        self.initialized = true;
        self.healthy = true;
        crate::log_info!("ADXL372 initialized");
        Ok(())
    }

    /// Apply the stored configuration and enter full-bandwidth measurement
    ///
    /// Writes TIMING (output data rate), MEASURE (bandwidth, low-noise),
    /// then POWER_CTL to leave standby.
    pub fn apply_default_config(&mut self) -> Result<(), AccelError> {
        if !self.initialized {
            return Err(AccelError::NotInitialized);
        }

        let config = self.config;
        self.write_register(registers::TIMING, config.odr.register_value())?;

        let mut measure = config.bandwidth.register_value();
        if config.low_noise {
            measure |= registers::MEASURE_LOW_NOISE;
        }
        self.write_register(registers::MEASURE, measure)?;

        self.set_mode(Adxl372Mode::FullBandwidth)?;
        crate::log_info!("ADXL372 default configuration applied");
        Ok(())
    }

    /// Switch the operating mode (POWER_CTL bits 1..0)
    pub fn set_mode(&mut self, mode: Adxl372Mode) -> Result<(), AccelError> {
        if !self.initialized {
            return Err(AccelError::NotInitialized);
        }
        self.write_register(registers::POWER_CTL, mode.register_value())
    }

    /// Put the part in standby (configuration registers writable)
    pub fn standby(&mut self) -> Result<(), AccelError> {
        self.set_mode(Adxl372Mode::Standby)
    }

    /// Read the STATUS register
    pub fn read_status(&mut self) -> Result<Adxl372Status, AccelError> {
        if !self.initialized {
            return Err(AccelError::NotInitialized);
        }
        let raw = self.read_register(registers::STATUS)?;
        Ok(Adxl372Status::from_bits_truncate(raw))
    }

    /// Read one acceleration sample in g, blocking on data ready
    ///
    /// Polls STATUS.DATA_RDY with a bounded attempt count, then burst-reads
    /// the three axis pairs.
    pub fn read_acceleration<D: DelayInterface>(
        &mut self,
        delay: &mut D,
    ) -> Result<Vector3<f32>, AccelError> {
        for _ in 0..MAX_DATA_READY_ATTEMPTS {
            if self.read_status()?.contains(Adxl372Status::DATA_RDY) {
                let raw = self.read_axes(registers::XDATA_H)?;
                return Ok(Self::convert(raw));
            }
            delay.delay_us(registers::DATA_READY_POLL_INTERVAL_US);
        }
        Err(AccelError::Timeout)
    }

    /// Read the current raw axis counts without waiting for data ready
    pub fn read_raw(&mut self) -> Result<[i16; 3], AccelError> {
        if !self.initialized {
            return Err(AccelError::NotInitialized);
        }
        self.read_axes(registers::XDATA_H)
    }

    /// Read the highest-magnitude event captured since the last read, in g
    pub fn read_max_peak(&mut self) -> Result<Vector3<f32>, AccelError> {
        if !self.initialized {
            return Err(AccelError::NotInitialized);
        }
        let raw = self.read_axes(registers::MAXPEAK_X_H)?;
        Ok(Self::convert(raw))
    }

    /// Burst-read three 12-bit left-justified big-endian axis pairs
    fn read_axes(&mut self, start_reg: u8) -> Result<[i16; 3], AccelError> {
        let mut buf = [0u8; 6];
        self.read_registers(start_reg, &mut buf)?;
        Ok([
            i16::from_be_bytes([buf[0], buf[1]]) >> 4,
            i16::from_be_bytes([buf[2], buf[3]]) >> 4,
            i16::from_be_bytes([buf[4], buf[5]]) >> 4,
        ])
    }

    /// Convert raw counts to g (100 mg/LSB)
    fn convert(raw: [i16; 3]) -> Vector3<f32> {
        Vector3::new(raw[0] as f32, raw[1] as f32, raw[2] as f32) * registers::SCALE_G_PER_LSB
    }

    // ========================================================================
    // Register Access
    // ========================================================================

    fn read_register(&mut self, reg: u8) -> Result<u8, AccelError> {
        let value = self.bus.read_register(reg).map_err(|e| {
            self.track_error();
            AccelError::Bus(e)
        })?;
        self.error_count = 0;
        Ok(value)
    }

    fn read_registers(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), AccelError> {
        self.bus.read_registers(reg, buf).map_err(|e| {
            self.track_error();
            AccelError::Bus(e)
        })?;
        self.error_count = 0;
        Ok(())
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), AccelError> {
        self.bus.write_register(reg, value).map_err(|e| {
            self.track_error();
            AccelError::Bus(e)
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

    /// Check if the sensor is healthy
    pub fn is_healthy(&self) -> bool {
        self.initialized && self.healthy
    }

    /// Get the configuration
    pub fn config(&self) -> &Adxl372Config {
        &self.config
    }
}
