//! DPS310 Driver Implementation

use super::config::Dps310Config;
use super::registers;
use crate::bus::RegisterBus;
use crate::devices::baro::{BaroError, BaroSample};
use crate::platform::DelayInterface;

/// Maximum consecutive errors before marking sensor unhealthy
const MAX_CONSECUTIVE_ERRORS: u32 = 3;

/// Bounded attempts for the startup readiness poll
const MAX_READY_ATTEMPTS: u32 = 10;

/// Bounded attempts for a one-shot measurement poll
///
/// 128x pressure oversampling takes about 210 ms, which this covers with
/// margin at the 10 ms poll interval.
const MAX_MEASUREMENT_ATTEMPTS: u32 = 25;

/// Calibration coefficients read from the sensor at init
///
/// c0/c1 are 12-bit, c00/c10 20-bit and the rest 16-bit values, all two's
/// complement, unpacked from the 18-byte COEF block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationCoefficients {
    pub c0: i32,
    pub c1: i32,
    pub c00: i32,
    pub c10: i32,
    pub c01: i32,
    pub c11: i32,
    pub c20: i32,
    pub c21: i32,
    pub c30: i32,
}

impl CalibrationCoefficients {
    /// Unpack the 18-byte COEF register block
    pub fn from_registers(buf: &[u8; registers::COEF_LEN]) -> Self {
        let c0 = (u32::from(buf[0]) << 4) | (u32::from(buf[1]) >> 4);
        let c1 = (u32::from(buf[1] & 0x0F) << 8) | u32::from(buf[2]);
        let c00 = (u32::from(buf[3]) << 12) | (u32::from(buf[4]) << 4) | (u32::from(buf[5]) >> 4);
        let c10 = (u32::from(buf[5] & 0x0F) << 16) | (u32::from(buf[6]) << 8) | u32::from(buf[7]);

        Self {
            c0: sign_extend(c0, 12),
            c1: sign_extend(c1, 12),
            c00: sign_extend(c00, 20),
            c10: sign_extend(c10, 20),
            c01: i32::from(i16::from_be_bytes([buf[8], buf[9]])),
            c11: i32::from(i16::from_be_bytes([buf[10], buf[11]])),
            c20: i32::from(i16::from_be_bytes([buf[12], buf[13]])),
            c21: i32::from(i16::from_be_bytes([buf[14], buf[15]])),
            c30: i32::from(i16::from_be_bytes([buf[16], buf[17]])),
        }
    }
}

/// Sign-extend an unsigned value holding a `bits`-wide two's complement number
#[inline]
fn sign_extend(value: u32, bits: u32) -> i32 {
    if value & (1 << (bits - 1)) != 0 {
        (value | !((1 << bits) - 1)) as i32
    } else {
        value as i32
    }
}

/// DPS310 barometric pressure sensor driver
///
/// Generic over the register transport, so the same driver runs on either
/// the I2C or the SPI wiring of the board.
pub struct Dps310<B> {
    /// Register transport
    bus: B,

    /// Current configuration
    config: Dps310Config,

    /// Calibration coefficients read at init
    coefficients: CalibrationCoefficients,

    /// Whether the coefficients were calibrated with the external sensor;
    /// TMP_CFG must select the same sensor or readings drift by several °C
    tmp_ext: bool,

    /// Pressure compensation scale factor for the active oversampling
    kp: f32,

    /// Temperature compensation scale factor for the active oversampling
    kt: f32,

    /// Most recent scaled temperature, used in pressure compensation
    t_raw_sc: f32,

    /// Whether init() completed successfully
    initialized: bool,

    /// Whether the sensor is responding
    healthy: bool,

    /// Consecutive error counter
    error_count: u32,
}

impl<B: RegisterBus> Dps310<B> {
    /// Create a new DPS310 driver
    pub fn new(bus: B, config: Dps310Config) -> Self {
        Self {
            bus,
            config,
            coefficients: CalibrationCoefficients::default(),
            tmp_ext: false,
            kp: config.pressure_oversampling.scale_factor(),
            kt: config.temperature_oversampling.scale_factor(),
            t_raw_sc: 0.0,
            initialized: false,
            healthy: false,
            error_count: 0,
        }
    }

    /// Initialize the sensor
    ///
    /// Initialization sequence:
    /// 1. Verify PROD_ID
    /// 2. Soft reset (also flushes the FIFO) and wait for reboot
    /// 3. Poll MEAS_CFG until the sensor and its coefficients are ready
    /// 4. Read and unpack the calibration coefficient block
    /// 5. Record which temperature sensor the calibration used
    pub fn init<D: DelayInterface>(&mut self, delay: &mut D) -> Result<(), BaroError> {
        // Step 1: Verify PROD_ID
        let prod_id = self.read_register(registers::PROD_ID)?;
        if prod_id != registers::PROD_ID_VALUE {
            crate::log_error!(
                "DPS310 product ID mismatch: expected {:#x}, got {:#x}",
                registers::PROD_ID_VALUE,
                prod_id
            );
            return Err(BaroError::InvalidChipId(prod_id));
        }
        crate::log_info!("DPS310 detected (product ID {:#x})", prod_id);

        // Step 2: Soft reset
        self.write_register(registers::RESET, registers::RESET_VALUE)?;
        delay.delay_ms(registers::RESET_DELAY_MS);

        // Step 3: Wait for sensor and coefficient readiness
        let ready_mask = registers::MEAS_CFG_COEF_RDY | registers::MEAS_CFG_SENSOR_RDY;
        self.poll_meas_cfg(delay, ready_mask, MAX_READY_ATTEMPTS, registers::READY_POLL_INTERVAL_MS)?;

        // Step 4: Read calibration coefficients
        let mut buf = [0u8; registers::COEF_LEN];
        self.read_registers(registers::COEF, &mut buf)?;
        self.coefficients = CalibrationCoefficients::from_registers(&buf);

        // Step 5: Which temperature sensor produced the calibration
        let srce = self.read_register(registers::COEF_SRCE)?;
        self.tmp_ext = srce & registers::COEF_SRCE_EXT != 0;

        self.initialized = true;
        self.healthy = true;
        crate::log_info!("DPS310 initialized (c0 {}, c00 {})", self.coefficients.c0, self.coefficients.c00);
        Ok(())
    }

    /// Apply the stored configuration and enter background measurement mode
    ///
    /// Sequence:
    /// 1. Pressure rate and oversampling
    /// 2. Temperature rate and oversampling, on the calibration's sensor
    /// 3. Result shift bits for oversampling above 8x
    /// 4. Continuous pressure + temperature mode
    pub fn apply_default_config(&mut self) -> Result<(), BaroError> {
        if !self.initialized {
            return Err(BaroError::NotInitialized);
        }
        let config = self.config;
        self.apply_config(config)?;
        self.write_register(registers::MEAS_CFG, registers::MODE_BACKGROUND_ALL)?;
        crate::log_info!("DPS310 default configuration applied");
        Ok(())
    }

    /// Write channel configuration registers without changing the mode
    pub fn apply_config(&mut self, config: Dps310Config) -> Result<(), BaroError> {
        if !self.initialized {
            return Err(BaroError::NotInitialized);
        }

        let prs_cfg = config.pressure_rate.register_value() << 4
            | config.pressure_oversampling.register_value();
        self.write_register(registers::PRS_CFG, prs_cfg)?;

        let mut tmp_cfg = config.temperature_rate.register_value() << 4
            | config.temperature_oversampling.register_value();
        if self.tmp_ext {
            tmp_cfg |= registers::TMP_CFG_TMP_EXT;
        }
        self.write_register(registers::TMP_CFG, tmp_cfg)?;

        let mut cfg_reg = 0u8;
        if config.pressure_oversampling.needs_shift() {
            cfg_reg |= registers::CFG_P_SHIFT;
        }
        if config.temperature_oversampling.needs_shift() {
            cfg_reg |= registers::CFG_T_SHIFT;
        }
        self.write_register(registers::CFG_REG, cfg_reg)?;

        self.config = config;
        self.kp = config.pressure_oversampling.scale_factor();
        self.kt = config.temperature_oversampling.scale_factor();
        Ok(())
    }

    /// Stop background measurements
    pub fn set_idle(&mut self) -> Result<(), BaroError> {
        if !self.initialized {
            return Err(BaroError::NotInitialized);
        }
        self.write_register(registers::MEAS_CFG, registers::MODE_IDLE)?;
        Ok(())
    }

    /// Check whether both background results are fresh
    pub fn data_ready(&mut self) -> Result<bool, BaroError> {
        if !self.initialized {
            return Err(BaroError::NotInitialized);
        }
        let meas_cfg = self.read_register(registers::MEAS_CFG)?;
        let mask = registers::MEAS_CFG_PRS_RDY | registers::MEAS_CFG_TMP_RDY;
        Ok(meas_cfg & mask == mask)
    }

    /// Read both background results and compensate them
    ///
    /// Burst-reads PRS_B2..TMP_B0 in one transaction. The temperature result
    /// also refreshes the thermal term used in pressure compensation.
    pub fn read_sample(&mut self) -> Result<BaroSample, BaroError> {
        if !self.initialized {
            return Err(BaroError::NotInitialized);
        }

        let mut buf = [0u8; 6];
        self.read_registers(registers::PRS_B2, &mut buf)?;
        let p_raw = raw_24bit(&buf[0..3]);
        let t_raw = raw_24bit(&buf[3..6]);

        let temperature_c = self.compensate_temperature(t_raw);
        let pressure_pa = self.compensate_pressure(p_raw);
        Ok(BaroSample {
            pressure_pa,
            temperature_c,
        })
    }

    /// Trigger a one-shot temperature measurement and wait for the result
    pub fn read_temperature_oneshot<D: DelayInterface>(
        &mut self,
        delay: &mut D,
    ) -> Result<f32, BaroError> {
        if !self.initialized {
            return Err(BaroError::NotInitialized);
        }

        self.write_register(registers::MEAS_CFG, registers::MODE_COMMAND_TMP)?;
        self.poll_meas_cfg(
            delay,
            registers::MEAS_CFG_TMP_RDY,
            MAX_MEASUREMENT_ATTEMPTS,
            registers::MEASUREMENT_POLL_INTERVAL_MS,
        )?;

        let mut buf = [0u8; 3];
        self.read_registers(registers::TMP_B2, &mut buf)?;
        Ok(self.compensate_temperature(raw_24bit(&buf)))
    }

    /// Trigger a one-shot pressure measurement and wait for the result
    ///
    /// Pressure compensation uses the most recent temperature term; read the
    /// temperature first after power-up or large thermal swings.
    pub fn read_pressure_oneshot<D: DelayInterface>(
        &mut self,
        delay: &mut D,
    ) -> Result<f32, BaroError> {
        if !self.initialized {
            return Err(BaroError::NotInitialized);
        }

        self.write_register(registers::MEAS_CFG, registers::MODE_COMMAND_PRS)?;
        self.poll_meas_cfg(
            delay,
            registers::MEAS_CFG_PRS_RDY,
            MAX_MEASUREMENT_ATTEMPTS,
            registers::MEASUREMENT_POLL_INTERVAL_MS,
        )?;

        let mut buf = [0u8; 3];
        self.read_registers(registers::PRS_B2, &mut buf)?;
        Ok(self.compensate_pressure(raw_24bit(&buf)))
    }

    /// One-shot temperature followed by one-shot pressure
    pub fn read_sample_oneshot<D: DelayInterface>(
        &mut self,
        delay: &mut D,
    ) -> Result<BaroSample, BaroError> {
        let temperature_c = self.read_temperature_oneshot(delay)?;
        let pressure_pa = self.read_pressure_oneshot(delay)?;
        Ok(BaroSample {
            pressure_pa,
            temperature_c,
        })
    }

    // ========================================================================
    // Compensation
    // ========================================================================

    /// Compensate a raw temperature reading, updating the thermal term
    fn compensate_temperature(&mut self, t_raw: i32) -> f32 {
        self.t_raw_sc = t_raw as f32 / self.kt;
        self.coefficients.c0 as f32 * 0.5 + self.coefficients.c1 as f32 * self.t_raw_sc
    }

    /// Compensate a raw pressure reading using the stored thermal term
    fn compensate_pressure(&self, p_raw: i32) -> f32 {
        let c = &self.coefficients;
        let p_sc = p_raw as f32 / self.kp;
        let t_sc = self.t_raw_sc;

        c.c00 as f32
            + p_sc * (c.c10 as f32 + p_sc * (c.c20 as f32 + p_sc * c.c30 as f32))
            + t_sc * c.c01 as f32
            + t_sc * p_sc * (c.c11 as f32 + p_sc * c.c21 as f32)
    }

    // ========================================================================
    // Register Access
    // ========================================================================

    /// Poll MEAS_CFG until all bits in `mask` are set, with bounded attempts
    fn poll_meas_cfg<D: DelayInterface>(
        &mut self,
        delay: &mut D,
        mask: u8,
        max_attempts: u32,
        interval_ms: u32,
    ) -> Result<(), BaroError> {
        for _ in 0..max_attempts {
            let meas_cfg = self.read_register(registers::MEAS_CFG)?;
            if meas_cfg & mask == mask {
                return Ok(());
            }
            delay.delay_ms(interval_ms);
        }
        crate::log_warn!("DPS310 readiness poll timed out (mask {:#x})", mask);
        Err(BaroError::Timeout)
    }

    /// Read a single register with error tracking
    fn read_register(&mut self, reg: u8) -> Result<u8, BaroError> {
        let value = self.bus.read_register(reg).map_err(|e| {
            self.track_error();
            BaroError::Bus(e)
        })?;
        self.error_count = 0;
        Ok(value)
    }

    /// Read a register block with error tracking
    fn read_registers(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), BaroError> {
        self.bus.read_registers(reg, buf).map_err(|e| {
            self.track_error();
            BaroError::Bus(e)
        })?;
        self.error_count = 0;
        Ok(())
    }

    /// Write a single register with error tracking
    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), BaroError> {
        self.bus.write_register(reg, value).map_err(|e| {
            self.track_error();
            BaroError::Bus(e)
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
    pub fn config(&self) -> &Dps310Config {
        &self.config
    }

    /// Get the calibration coefficients read at init
    pub fn coefficients(&self) -> &CalibrationCoefficients {
        &self.coefficients
    }
}

/// Assemble a 24-bit two's complement big-endian value
#[inline]
fn raw_24bit(buf: &[u8]) -> i32 {
    let value = (u32::from(buf[0]) << 16) | (u32::from(buf[1]) << 8) | u32::from(buf[2]);
    sign_extend(value, 24)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::I2cRegisters;
    use crate::platform::mock::{I2cTransaction, MockDelay, MockI2c};
    use crate::platform::traits::I2cConfig;

    const EPS: f32 = 1e-3;

    /// Packed coefficient block holding:
    /// c0 = -100, c1 = -200, c00 = 80000, c10 = -60000,
    /// c01 = -2000, c11 = 1000, c20 = -3000, c21 = 250, c30 = -100
    const COEF_BLOCK: [u8; 18] = [
        0xF9, 0xCF, 0x38, // c0 = 0xF9C, c1 = 0xF38
        0x13, 0x88, 0x0F, // c00 = 0x13880, c10 high nibble
        0x15, 0xA0, // c10 = 0xF15A0
        0xF8, 0x30, // c01
        0x03, 0xE8, // c11
        0xF4, 0x48, // c20
        0x00, 0xFA, // c21
        0xFF, 0x9C, // c30
    ];

    fn i2c_driver() -> Dps310<I2cRegisters<MockI2c>> {
        let i2c = MockI2c::new(I2cConfig::default());
        Dps310::new(
            I2cRegisters::new(i2c, registers::DPS310_ADDR),
            Dps310Config::default(),
        )
    }

    fn init_read_data() -> Vec<u8> {
        // PROD_ID, MEAS_CFG ready, 18 coefficient bytes, COEF_SRCE
        let mut data = vec![registers::PROD_ID_VALUE, 0xC0];
        data.extend_from_slice(&COEF_BLOCK);
        data.push(registers::COEF_SRCE_EXT);
        data
    }

    #[test]
    fn test_coefficient_unpacking() {
        let coef = CalibrationCoefficients::from_registers(&COEF_BLOCK);
        assert_eq!(coef.c0, -100);
        assert_eq!(coef.c1, -200);
        assert_eq!(coef.c00, 80_000);
        assert_eq!(coef.c10, -60_000);
        assert_eq!(coef.c01, -2_000);
        assert_eq!(coef.c11, 1_000);
        assert_eq!(coef.c20, -3_000);
        assert_eq!(coef.c21, 250);
        assert_eq!(coef.c30, -100);
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0xF9C, 12), -100);
        assert_eq!(sign_extend(0x07FF, 12), 2047);
        assert_eq!(sign_extend(0x800, 12), -2048);
        assert_eq!(sign_extend(0xFFFFF, 20), -1);
        assert_eq!(sign_extend(0x7FFFF, 20), 524_287);
    }

    #[test]
    fn test_init_reads_coefficients() {
        let mut driver = i2c_driver();
        driver.bus.inner().set_read_data(&init_read_data());
        let mut delay = MockDelay::new();

        driver.init(&mut delay).unwrap();
        assert!(driver.is_initialized());
        assert_eq!(driver.coefficients().c00, 80_000);
        assert!(driver.tmp_ext);
        assert!(delay.elapsed_us() >= 40_000);

        let transactions = driver.bus.inner().transactions();
        assert_eq!(
            transactions[1],
            I2cTransaction::Write {
                addr: registers::DPS310_ADDR,
                data: vec![registers::RESET, registers::RESET_VALUE],
            }
        );
        // Coefficient block burst read
        assert_eq!(
            transactions[3],
            I2cTransaction::WriteRead {
                addr: registers::DPS310_ADDR,
                write_data: vec![registers::COEF],
                read_len: registers::COEF_LEN,
            }
        );
    }

    #[test]
    fn test_init_wrong_product_id() {
        let mut driver = i2c_driver();
        driver.bus.inner().set_read_data(&[0x34]);
        let mut delay = MockDelay::new();

        assert_eq!(
            driver.init(&mut delay),
            Err(BaroError::InvalidChipId(0x34))
        );
        assert!(!driver.is_initialized());
    }

    #[test]
    fn test_default_config_mirrors_coefficient_source() {
        let mut driver = i2c_driver();
        driver.bus.inner().set_read_data(&init_read_data());
        let mut delay = MockDelay::new();
        driver.init(&mut delay).unwrap();
        driver.bus.inner().clear_transactions();

        driver.apply_default_config().unwrap();

        let transactions = driver.bus.inner().transactions();
        let writes: Vec<_> = transactions
            .iter()
            .filter_map(|t| match t {
                I2cTransaction::Write { data, .. } => Some(data.clone()),
                _ => None,
            })
            .collect();
        // 4 Hz rate (2) << 4, 64x oversampling (6)
        assert_eq!(writes[0], vec![registers::PRS_CFG, 0x26]);
        // External sensor bit mirrored from COEF_SRCE, 4 Hz, 1x
        assert_eq!(writes[1], vec![registers::TMP_CFG, 0xA0]);
        // Pressure shift required at 64x, temperature not at 1x
        assert_eq!(writes[2], vec![registers::CFG_REG, registers::CFG_P_SHIFT]);
        assert_eq!(
            writes[3],
            vec![registers::MEAS_CFG, registers::MODE_BACKGROUND_ALL]
        );
    }

    #[test]
    fn test_compensation_math() {
        let mut driver = i2c_driver();
        driver.bus.inner().set_read_data(&init_read_data());
        let mut delay = MockDelay::new();
        driver.init(&mut delay).unwrap();

        // Hand-checkable coefficients
        driver.coefficients = CalibrationCoefficients {
            c0: 200,
            c1: 1,
            c00: 1000,
            c10: 2,
            c01: 5,
            c11: 6,
            c20: 3,
            c21: 7,
            c30: 4,
        };
        driver.kt = 524_288.0;
        driver.kp = 253_952.0;

        // t_raw = kt and p_raw = kp scale both to exactly 1.0
        let t = driver.compensate_temperature(524_288);
        assert!((t - 101.0).abs() < EPS);

        // P = c00 + 1*(c10 + 1*(c20 + c30)) + 1*c01 + 1*(c11 + c21)
        let p = driver.compensate_pressure(253_952);
        assert!((p - 1027.0).abs() < EPS);
    }

    #[test]
    fn test_oneshot_temperature_poll() {
        let mut driver = i2c_driver();
        driver.bus.inner().set_read_data(&init_read_data());
        let mut delay = MockDelay::new();
        driver.init(&mut delay).unwrap();
        driver.bus.inner().clear_transactions();

        // First poll not ready, second ready, then the 3-byte result
        driver
            .bus
            .inner()
            .queue_read_data(&[0x00, registers::MEAS_CFG_TMP_RDY, 0x08, 0x00, 0x00]);

        let _ = driver.read_temperature_oneshot(&mut delay).unwrap();

        let transactions = driver.bus.inner().transactions();
        assert_eq!(
            transactions[0],
            I2cTransaction::Write {
                addr: registers::DPS310_ADDR,
                data: vec![registers::MEAS_CFG, registers::MODE_COMMAND_TMP],
            }
        );
        // Two status polls before the result read
        assert_eq!(transactions.len(), 4);
    }

    #[test]
    fn test_oneshot_timeout() {
        let mut driver = i2c_driver();
        driver.bus.inner().set_read_data(&init_read_data());
        let mut delay = MockDelay::new();
        driver.init(&mut delay).unwrap();

        // Status never becomes ready
        let zeros = vec![0u8; MAX_MEASUREMENT_ATTEMPTS as usize];
        driver.bus.inner().queue_read_data(&zeros);

        assert_eq!(
            driver.read_pressure_oneshot(&mut delay),
            Err(BaroError::Timeout)
        );
    }

    #[test]
    fn test_background_sample_read() {
        let mut driver = i2c_driver();
        driver.bus.inner().set_read_data(&init_read_data());
        let mut delay = MockDelay::new();
        driver.init(&mut delay).unwrap();

        driver.coefficients = CalibrationCoefficients {
            c0: 200,
            c1: 1,
            c00: 1000,
            c10: 2,
            c01: 5,
            c11: 6,
            c20: 3,
            c21: 7,
            c30: 4,
        };
        driver.kt = 524_288.0;
        driver.kp = 253_952.0;

        // PRS = kp (0x03E000), TMP = kt (0x080000)
        driver
            .bus
            .inner()
            .queue_read_data(&[0x03, 0xE0, 0x00, 0x08, 0x00, 0x00]);

        let sample = driver.read_sample().unwrap();
        assert!((sample.temperature_c - 101.0).abs() < EPS);
        assert!((sample.pressure_pa - 1027.0).abs() < EPS);
    }

    #[test]
    fn test_read_before_init() {
        let mut driver = i2c_driver();
        assert_eq!(driver.read_sample(), Err(BaroError::NotInitialized));
        assert_eq!(driver.data_ready(), Err(BaroError::NotInitialized));
    }
}
