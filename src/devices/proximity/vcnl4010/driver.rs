//! VCNL4010 Driver Implementation

use super::config::Vcnl4010Config;
use super::registers;
use crate::devices::proximity::ProximityError;
use crate::platform::{DelayInterface, I2cInterface};

/// Maximum consecutive errors before marking sensor unhealthy
const MAX_CONSECUTIVE_ERRORS: u32 = 3;

/// Bounded attempts for on-demand data-ready polls
///
/// An on-demand proximity measurement completes well under 1 ms; ambient
/// light with 128-sample averaging can take several hundred ms, so the
/// bound is generous.
const MAX_ON_DEMAND_ATTEMPTS: u32 = 600;

/// VCNL4010 proximity and ambient light sensor driver (I2C only, fixed
/// address)
pub struct Vcnl4010<I2C> {
    /// I2C bus
    i2c: I2C,

    /// Current configuration
    config: Vcnl4010Config,

    /// Whether init() completed successfully
    initialized: bool,

    /// Whether the sensor is responding
    healthy: bool,

    /// Consecutive error counter
    error_count: u32,
}

impl<I2C: I2cInterface> Vcnl4010<I2C> {
    /// Create a new VCNL4010 driver
    pub fn new(i2c: I2C, config: Vcnl4010Config) -> Self {
        Self {
            i2c,
            config,
            initialized: false,
            healthy: false,
            error_count: 0,
        }
    }

    /// Initialize the sensor
    ///
    /// Verifies the product ID nibble of the PRODUCT_ID register.
    pub fn init(&mut self) -> Result<(), ProximityError> {
        let id = self.read_register(registers::PRODUCT_ID)?;
        if id & registers::PRODUCT_ID_MASK != registers::PRODUCT_ID_VALUE {
            crate::log_error!("VCNL4010 product ID mismatch: got {:#x}", id);
            return Err(ProximityError::InvalidChipId(id));
        }

        self.initialized = true;
        self.healthy = true;
        crate::log_info!("VCNL4010 detected (product ID {:#x})", id);
        Ok(())
    }

    /// Write the stored rate, LED current and ALS parameters
    pub fn apply_default_config(&mut self) -> Result<(), ProximityError> {
        if !self.initialized {
            return Err(ProximityError::NotInitialized);
        }

        let config = self.config;
        self.write_register(registers::PROX_RATE, config.prox_rate.register_value())?;
        self.write_register(registers::IR_LED_CURRENT, config.led_current_value())?;
        self.write_register(registers::ALS_PARAM, config.als_param_value())?;

        crate::log_info!("VCNL4010 default configuration applied");
        Ok(())
    }

    /// Run one on-demand proximity measurement
    ///
    /// Sets the prox_od trigger bit, polls prox_data_rdy with bounded
    /// attempts, then reads the 16-bit result.
    pub fn read_proximity_on_demand<D: DelayInterface>(
        &mut self,
        delay: &mut D,
    ) -> Result<u16, ProximityError> {
        self.on_demand_measure(
            registers::CMD_PROX_OD,
            registers::CMD_PROX_DATA_RDY,
            registers::PROX_RESULT_H,
            delay,
        )
    }

    /// Run one on-demand ambient light measurement
    pub fn read_ambient_on_demand<D: DelayInterface>(
        &mut self,
        delay: &mut D,
    ) -> Result<u16, ProximityError> {
        self.on_demand_measure(
            registers::CMD_ALS_OD,
            registers::CMD_ALS_DATA_RDY,
            registers::ALS_RESULT_H,
            delay,
        )
    }

    /// Enable periodic self-timed proximity + ambient light measurements
    pub fn enable_self_timed(&mut self) -> Result<(), ProximityError> {
        if !self.initialized {
            return Err(ProximityError::NotInitialized);
        }
        self.write_register(
            registers::COMMAND,
            registers::CMD_PROX_EN | registers::CMD_ALS_EN | registers::CMD_SELFTIMED_EN,
        )
    }

    /// Stop self-timed measurements
    pub fn disable_self_timed(&mut self) -> Result<(), ProximityError> {
        if !self.initialized {
            return Err(ProximityError::NotInitialized);
        }
        self.write_register(registers::COMMAND, 0)
    }

    /// Check (non-blocking) whether a self-timed proximity result is ready
    pub fn proximity_ready(&mut self) -> Result<bool, ProximityError> {
        if !self.initialized {
            return Err(ProximityError::NotInitialized);
        }
        let command = self.read_register(registers::COMMAND)?;
        Ok(command & registers::CMD_PROX_DATA_RDY != 0)
    }

    /// Read the latest self-timed proximity result
    ///
    /// Reading the result registers clears the data-ready flag.
    pub fn read_proximity_periodic(&mut self) -> Result<u16, ProximityError> {
        if !self.initialized {
            return Err(ProximityError::NotInitialized);
        }
        self.read_result(registers::PROX_RESULT_H)
    }

    /// Check (non-blocking) whether a self-timed ambient light result is ready
    pub fn ambient_ready(&mut self) -> Result<bool, ProximityError> {
        if !self.initialized {
            return Err(ProximityError::NotInitialized);
        }
        let command = self.read_register(registers::COMMAND)?;
        Ok(command & registers::CMD_ALS_DATA_RDY != 0)
    }

    /// Read the latest self-timed ambient light result
    pub fn read_ambient_periodic(&mut self) -> Result<u16, ProximityError> {
        if !self.initialized {
            return Err(ProximityError::NotInitialized);
        }
        self.read_result(registers::ALS_RESULT_H)
    }

    /// Program the proximity threshold interrupt
    ///
    /// The INT pin asserts when the proximity count leaves the
    /// low..=high window.
    pub fn set_proximity_thresholds(&mut self, low: u16, high: u16) -> Result<(), ProximityError> {
        if !self.initialized {
            return Err(ProximityError::NotInitialized);
        }
        let low_bytes = low.to_be_bytes();
        let high_bytes = high.to_be_bytes();
        self.write_register(registers::LOW_THRES_H, low_bytes[0])?;
        self.write_register(registers::LOW_THRES_H + 1, low_bytes[1])?;
        self.write_register(registers::HIGH_THRES_H, high_bytes[0])?;
        self.write_register(registers::HIGH_THRES_H + 1, high_bytes[1])?;
        self.write_register(registers::INT_CTRL, registers::INT_THRES_EN)
    }

    /// Clear all latched interrupt flags (write-1-to-clear)
    pub fn clear_interrupts(&mut self) -> Result<(), ProximityError> {
        if !self.initialized {
            return Err(ProximityError::NotInitialized);
        }
        self.write_register(registers::INT_STATUS, registers::INT_STATUS_ALL)
    }

    // ========================================================================
    // Measurement plumbing
    // ========================================================================

    fn on_demand_measure<D: DelayInterface>(
        &mut self,
        trigger_bit: u8,
        ready_bit: u8,
        result_reg: u8,
        delay: &mut D,
    ) -> Result<u16, ProximityError> {
        if !self.initialized {
            return Err(ProximityError::NotInitialized);
        }

        self.write_register(registers::COMMAND, trigger_bit)?;
        for _ in 0..MAX_ON_DEMAND_ATTEMPTS {
            let command = self.read_register(registers::COMMAND)?;
            if command & ready_bit != 0 {
                return self.read_result(result_reg);
            }
            delay.delay_ms(registers::ON_DEMAND_POLL_INTERVAL_MS);
        }
        Err(ProximityError::Timeout)
    }

    fn read_result(&mut self, reg: u8) -> Result<u16, ProximityError> {
        let mut buf = [0u8; 2];
        self.read_registers(reg, &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    // ========================================================================
    // Register Access
    // ========================================================================

    fn read_register(&mut self, reg: u8) -> Result<u8, ProximityError> {
        let mut value = [0u8; 1];
        self.i2c
            .write_read(registers::VCNL4010_ADDR, &[reg], &mut value)
            .map_err(|e| {
                self.track_error();
                ProximityError::Bus(e)
            })?;
        self.error_count = 0;
        Ok(value[0])
    }

    fn read_registers(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), ProximityError> {
        self.i2c
            .write_read(registers::VCNL4010_ADDR, &[reg], buf)
            .map_err(|e| {
                self.track_error();
                ProximityError::Bus(e)
            })?;
        self.error_count = 0;
        Ok(())
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), ProximityError> {
        self.i2c
            .write(registers::VCNL4010_ADDR, &[reg, value])
            .map_err(|e| {
                self.track_error();
                ProximityError::Bus(e)
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
    pub fn config(&self) -> &Vcnl4010Config {
        &self.config
    }
}
