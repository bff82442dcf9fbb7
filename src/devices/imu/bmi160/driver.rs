//! BMI160 Driver Implementation

use nalgebra::Vector3;

use super::config::Bmi160Config;
use super::registers;
use crate::bus::RegisterBus;
use crate::devices::imu::{ImuError, ImuSample, ImuSampleRaw};
use crate::platform::DelayInterface;

/// Maximum consecutive errors before marking sensor unhealthy
const MAX_CONSECUTIVE_ERRORS: u32 = 3;

/// BMI160 6-axis IMU driver
///
/// Generic over the register transport, so the same driver runs on either
/// the I2C or the SPI wiring of the board.
pub struct Bmi160<B> {
    /// Register transport
    bus: B,

    /// Current configuration
    config: Bmi160Config,

    /// Cached scale factor: raw accel LSB to m/s²
    accel_scale: f32,

    /// Cached scale factor: raw gyro LSB to rad/s
    gyro_scale: f32,

    /// Whether init() completed successfully
    initialized: bool,

    /// Whether the sensor is responding
    healthy: bool,

    /// Consecutive error counter
    error_count: u32,
}

impl<B: RegisterBus> Bmi160<B> {
    /// Create a new BMI160 driver
    ///
    /// The driver starts uninitialized; call [`init`](Self::init) and then
    /// [`apply_default_config`](Self::apply_default_config) before reading.
    pub fn new(bus: B, config: Bmi160Config) -> Self {
        Self {
            bus,
            config,
            accel_scale: config.accel_range.scale_to_m_s2(),
            gyro_scale: config.gyro_range.scale_to_rad_s(),
            initialized: false,
            healthy: false,
            error_count: 0,
        }
    }

    /// Initialize the sensor
    ///
    /// Initialization sequence:
    /// 1. Dummy read to latch the serial interface (needed on SPI, harmless on I2C)
    /// 2. Verify CHIP_ID
    /// 3. Soft reset and wait for reboot
    /// 4. Repeat the dummy read, since reset reverts the interface mode
    pub fn init<D: DelayInterface>(&mut self, delay: &mut D) -> Result<(), ImuError> {
        // Step 1: Latch the serial interface
        self.read_register(registers::SPI_MODE_TRIGGER)?;

        // Step 2: Verify CHIP_ID
        let chip_id = self.read_register(registers::CHIP_ID)?;
        if chip_id != registers::CHIP_ID_VALUE {
            crate::log_error!(
                "BMI160 chip ID mismatch: expected {:#x}, got {:#x}",
                registers::CHIP_ID_VALUE,
                chip_id
            );
            return Err(ImuError::InvalidChipId(chip_id));
        }
        crate::log_info!("BMI160 detected (chip ID {:#x})", chip_id);

        // Step 3: Soft reset
        self.write_register(registers::CMD, registers::CMD_SOFT_RESET)?;
        delay.delay_ms(registers::SOFT_RESET_DELAY_MS);

        // Step 4: Reset reverts the interface mode, latch it again
        self.read_register(registers::SPI_MODE_TRIGGER)?;

        self.initialized = true;
        self.healthy = true;
        crate::log_info!("BMI160 initialized");
        Ok(())
    }

    /// Power up both sensors and apply the stored configuration
    ///
    /// Sequence:
    /// 1. Accelerometer to normal mode, verify via PMU_STATUS
    /// 2. Gyroscope to normal mode, verify via PMU_STATUS
    /// 3. Write ODR and range registers for both sensors
    pub fn apply_default_config<D: DelayInterface>(
        &mut self,
        delay: &mut D,
    ) -> Result<(), ImuError> {
        if !self.initialized {
            return Err(ImuError::NotInitialized);
        }

        // Step 1: Accelerometer to normal mode
        self.write_register(registers::CMD, registers::CMD_ACC_NORMAL)?;
        delay.delay_ms(registers::ACC_POWER_UP_DELAY_MS);
        let pmu = self.read_register(registers::PMU_STATUS)?;
        if pmu & registers::PMU_STATUS_ACC_MASK != registers::PMU_STATUS_ACC_NORMAL {
            crate::log_warn!("BMI160 accel power-up incomplete (PMU_STATUS {:#x})", pmu);
            return Err(ImuError::PowerMode);
        }

        // Step 2: Gyroscope to normal mode
        self.write_register(registers::CMD, registers::CMD_GYR_NORMAL)?;
        delay.delay_ms(registers::GYR_POWER_UP_DELAY_MS);
        let pmu = self.read_register(registers::PMU_STATUS)?;
        if pmu & registers::PMU_STATUS_GYR_MASK != registers::PMU_STATUS_GYR_NORMAL {
            crate::log_warn!("BMI160 gyro power-up incomplete (PMU_STATUS {:#x})", pmu);
            return Err(ImuError::PowerMode);
        }

        // Step 3: ODR and range registers
        let config = self.config;
        self.apply_config(config)?;

        crate::log_info!("BMI160 default configuration applied");
        Ok(())
    }

    /// Write range and ODR registers for the given configuration
    ///
    /// Updates the cached conversion scales to match.
    pub fn apply_config(&mut self, config: Bmi160Config) -> Result<(), ImuError> {
        if !self.initialized {
            return Err(ImuError::NotInitialized);
        }

        self.write_register(registers::ACC_CONF, config.accel_odr.conf_value())?;
        self.write_register(registers::ACC_RANGE, config.accel_range.register_value())?;
        self.write_register(registers::GYR_CONF, config.gyro_odr.conf_value())?;
        self.write_register(registers::GYR_RANGE, config.gyro_range.register_value())?;

        self.config = config;
        self.accel_scale = config.accel_range.scale_to_m_s2();
        self.gyro_scale = config.gyro_range.scale_to_rad_s();
        Ok(())
    }

    /// Check whether both sensors have fresh data
    pub fn data_ready(&mut self) -> Result<bool, ImuError> {
        if !self.initialized {
            return Err(ImuError::NotInitialized);
        }
        let status = self.read_register(registers::STATUS)?;
        let mask = registers::STATUS_DRDY_ACC | registers::STATUS_DRDY_GYR;
        Ok(status & mask == mask)
    }

    /// Read one raw six-axis sample
    ///
    /// Burst-reads the 12-byte data block (gyro X/Y/Z then accel X/Y/Z,
    /// little-endian).
    pub fn read_raw(&mut self) -> Result<ImuSampleRaw, ImuError> {
        if !self.initialized {
            return Err(ImuError::NotInitialized);
        }

        let mut buf = [0u8; 12];
        self.read_registers(registers::DATA_GYR_X_L, &mut buf)?;

        Ok(ImuSampleRaw {
            gyro: [
                i16::from_le_bytes([buf[0], buf[1]]),
                i16::from_le_bytes([buf[2], buf[3]]),
                i16::from_le_bytes([buf[4], buf[5]]),
            ],
            accel: [
                i16::from_le_bytes([buf[6], buf[7]]),
                i16::from_le_bytes([buf[8], buf[9]]),
                i16::from_le_bytes([buf[10], buf[11]]),
            ],
        })
    }

    /// Read one six-axis sample in SI units
    pub fn read_sample(&mut self) -> Result<ImuSample, ImuError> {
        let raw = self.read_raw()?;
        Ok(ImuSample {
            accel: self.convert_accel(raw.accel),
            gyro: self.convert_gyro(raw.gyro),
        })
    }

    /// Read only the accelerometer (m/s²)
    pub fn read_accel(&mut self) -> Result<Vector3<f32>, ImuError> {
        if !self.initialized {
            return Err(ImuError::NotInitialized);
        }
        let mut buf = [0u8; 6];
        self.read_registers(registers::DATA_ACC_X_L, &mut buf)?;
        let raw = [
            i16::from_le_bytes([buf[0], buf[1]]),
            i16::from_le_bytes([buf[2], buf[3]]),
            i16::from_le_bytes([buf[4], buf[5]]),
        ];
        Ok(self.convert_accel(raw))
    }

    /// Read only the gyroscope (rad/s)
    pub fn read_gyro(&mut self) -> Result<Vector3<f32>, ImuError> {
        if !self.initialized {
            return Err(ImuError::NotInitialized);
        }
        let mut buf = [0u8; 6];
        self.read_registers(registers::DATA_GYR_X_L, &mut buf)?;
        let raw = [
            i16::from_le_bytes([buf[0], buf[1]]),
            i16::from_le_bytes([buf[2], buf[3]]),
            i16::from_le_bytes([buf[4], buf[5]]),
        ];
        Ok(self.convert_gyro(raw))
    }

    /// Read the die temperature in °C
    ///
    /// The temperature word reads 0x8000 while the gyroscope is suspended,
    /// which is reported as `InvalidData`.
    pub fn read_temperature(&mut self) -> Result<f32, ImuError> {
        if !self.initialized {
            return Err(ImuError::NotInitialized);
        }
        let mut buf = [0u8; 2];
        self.read_registers(registers::TEMPERATURE_0, &mut buf)?;
        let raw = i16::from_le_bytes(buf);
        if raw == registers::TEMPERATURE_INVALID {
            return Err(ImuError::InvalidData);
        }
        Ok(registers::TEMP_OFFSET_C + raw as f32 / registers::TEMP_RESOLUTION)
    }

    /// Read the free-running 24-bit sensor time counter (39 µs per LSB)
    pub fn sensor_time(&mut self) -> Result<u32, ImuError> {
        if !self.initialized {
            return Err(ImuError::NotInitialized);
        }
        let mut buf = [0u8; 3];
        self.read_registers(registers::SENSORTIME_0, &mut buf)?;
        Ok(u32::from(buf[0]) | u32::from(buf[1]) << 8 | u32::from(buf[2]) << 16)
    }

    /// Read the hardware error flags (ERR_REG)
    pub fn error_flags(&mut self) -> Result<u8, ImuError> {
        self.read_register(registers::ERR_REG)
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    /// Convert raw accelerometer counts to m/s²
    fn convert_accel(&self, raw: [i16; 3]) -> Vector3<f32> {
        Vector3::new(raw[0] as f32, raw[1] as f32, raw[2] as f32) * self.accel_scale
    }

    /// Convert raw gyroscope counts to rad/s
    fn convert_gyro(&self, raw: [i16; 3]) -> Vector3<f32> {
        Vector3::new(raw[0] as f32, raw[1] as f32, raw[2] as f32) * self.gyro_scale
    }

    // ========================================================================
    // Register Access
    // ========================================================================

    /// Read a single register with error tracking
    fn read_register(&mut self, reg: u8) -> Result<u8, ImuError> {
        let value = self.bus.read_register(reg).map_err(|e| {
            self.track_error();
            ImuError::Bus(e)
        })?;
        self.error_count = 0;
        Ok(value)
    }

    /// Read a register block with error tracking
    fn read_registers(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), ImuError> {
        self.bus.read_registers(reg, buf).map_err(|e| {
            self.track_error();
            ImuError::Bus(e)
        })?;
        self.error_count = 0;
        Ok(())
    }

    /// Write a single register with error tracking
    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), ImuError> {
        self.bus.write_register(reg, value).map_err(|e| {
            self.track_error();
            ImuError::Bus(e)
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
    pub fn config(&self) -> &Bmi160Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{I2cRegisters, SpiRegisters};
    use crate::platform::mock::{I2cTransaction, MockDelay, MockGpio, MockI2c, SpiTransaction};
    use crate::platform::traits::{GpioInterface, I2cConfig, SpiConfig};
    use crate::platform::PlatformError;

    const EPS: f32 = 1e-3;

    fn i2c_driver(read_data: &[u8]) -> Bmi160<I2cRegisters<MockI2c>> {
        let i2c = MockI2c::new(I2cConfig::default());
        i2c.set_read_data(read_data);
        Bmi160::new(
            I2cRegisters::new(i2c, registers::BMI160_ADDR),
            Bmi160Config::default(),
        )
    }

    #[test]
    fn test_init_success() {
        // Reads consumed: interface latch, chip ID, interface latch again
        let mut driver = i2c_driver(&[0x00, registers::CHIP_ID_VALUE, 0x00]);
        let mut delay = MockDelay::new();

        driver.init(&mut delay).unwrap();
        assert!(driver.is_initialized());
        assert!(driver.is_healthy());
        assert!(delay.elapsed_us() >= 10_000);

        let transactions = driver.bus.inner().transactions();
        assert_eq!(
            transactions[0],
            I2cTransaction::WriteRead {
                addr: registers::BMI160_ADDR,
                write_data: vec![registers::SPI_MODE_TRIGGER],
                read_len: 1,
            }
        );
        assert_eq!(
            transactions[1],
            I2cTransaction::WriteRead {
                addr: registers::BMI160_ADDR,
                write_data: vec![registers::CHIP_ID],
                read_len: 1,
            }
        );
        assert_eq!(
            transactions[2],
            I2cTransaction::Write {
                addr: registers::BMI160_ADDR,
                data: vec![registers::CMD, registers::CMD_SOFT_RESET],
            }
        );
        assert_eq!(
            transactions[3],
            I2cTransaction::WriteRead {
                addr: registers::BMI160_ADDR,
                write_data: vec![registers::SPI_MODE_TRIGGER],
                read_len: 1,
            }
        );
    }

    #[test]
    fn test_init_wrong_chip_id() {
        let mut driver = i2c_driver(&[0x00, 0x23]);
        let mut delay = MockDelay::new();

        let result = driver.init(&mut delay);
        assert_eq!(result, Err(ImuError::InvalidChipId(0x23)));
        assert!(!driver.is_initialized());
    }

    #[test]
    fn test_init_bus_error() {
        let mut driver = i2c_driver(&[]);
        let mut delay = MockDelay::new();
        driver
            .bus
            .inner()
            .inject_error(PlatformError::I2c(crate::platform::error::I2cError::Nack));

        let result = driver.init(&mut delay);
        assert!(matches!(result, Err(ImuError::Bus(_))));
        assert!(!driver.is_initialized());
    }

    #[test]
    fn test_default_config_sequence() {
        // Init reads, then PMU_STATUS after each power command
        let mut driver = i2c_driver(&[0x00, registers::CHIP_ID_VALUE, 0x00, 0x10, 0x14]);
        let mut delay = MockDelay::new();

        driver.init(&mut delay).unwrap();
        driver.bus.inner().clear_transactions();
        delay.reset();

        driver.apply_default_config(&mut delay).unwrap();

        let transactions = driver.bus.inner().transactions();
        let writes: Vec<_> = transactions
            .iter()
            .filter_map(|t| match t {
                I2cTransaction::Write { data, .. } => Some(data.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(writes[0], vec![registers::CMD, registers::CMD_ACC_NORMAL]);
        assert_eq!(writes[1], vec![registers::CMD, registers::CMD_GYR_NORMAL]);
        assert_eq!(writes[2], vec![registers::ACC_CONF, 0x28]);
        assert_eq!(writes[3], vec![registers::ACC_RANGE, 0x08]);
        assert_eq!(writes[4], vec![registers::GYR_CONF, 0x28]);
        assert_eq!(writes[5], vec![registers::GYR_RANGE, 0x00]);

        // Power-up waits: 5 ms accel + 81 ms gyro
        assert!(delay.elapsed_us() >= 86_000);
    }

    #[test]
    fn test_read_sample_conversion() {
        let mut driver = i2c_driver(&[0x00, registers::CHIP_ID_VALUE, 0x00]);
        let mut delay = MockDelay::new();
        driver.init(&mut delay).unwrap();

        // Gyro X/Y/Z then accel X/Y/Z, little-endian
        let raw: [i16; 6] = [164, -164, 0, 4096, -4096, 16384];
        let mut data = [0u8; 12];
        for (i, v) in raw.iter().enumerate() {
            let bytes = v.to_le_bytes();
            data[i * 2] = bytes[0];
            data[i * 2 + 1] = bytes[1];
        }
        driver.bus.inner().queue_read_data(&data);

        let sample = driver.read_sample().unwrap();

        // Default gyro range ±2000 °/s: 16.4 LSB per °/s, 164 LSB = 10 °/s
        let expected_gyro_x = 10.0 * core::f32::consts::PI / 180.0;
        assert!((sample.gyro.x - expected_gyro_x).abs() < EPS);
        assert!((sample.gyro.y + expected_gyro_x).abs() < EPS);
        assert!(sample.gyro.z.abs() < EPS);

        // Default accel range ±8g: 4096 LSB/g
        assert!((sample.accel.x - 9.80665).abs() < EPS);
        assert!((sample.accel.y + 9.80665).abs() < EPS);
        assert!((sample.accel.z - 4.0 * 9.80665).abs() < EPS);
    }

    #[test]
    fn test_read_before_init() {
        let mut driver = i2c_driver(&[]);
        assert!(matches!(driver.read_sample(), Err(ImuError::NotInitialized)));
        assert_eq!(driver.data_ready(), Err(ImuError::NotInitialized));
    }

    #[test]
    fn test_data_ready() {
        let mut driver = i2c_driver(&[0x00, registers::CHIP_ID_VALUE, 0x00]);
        let mut delay = MockDelay::new();
        driver.init(&mut delay).unwrap();

        driver.bus.inner().queue_read_data(&[0xC0]);
        assert!(driver.data_ready().unwrap());

        // Only accel ready
        driver.bus.inner().queue_read_data(&[0x80]);
        assert!(!driver.data_ready().unwrap());
    }

    #[test]
    fn test_temperature_decode() {
        let mut driver = i2c_driver(&[0x00, registers::CHIP_ID_VALUE, 0x00]);
        let mut delay = MockDelay::new();
        driver.init(&mut delay).unwrap();

        // 2048 LSB = 4 °C above the 23 °C offset
        driver.bus.inner().queue_read_data(&[0x00, 0x08]);
        let temp = driver.read_temperature().unwrap();
        assert!((temp - 27.0).abs() < EPS);

        // 0x8000 marks an invalid reading
        driver.bus.inner().queue_read_data(&[0x00, 0x80]);
        assert_eq!(driver.read_temperature(), Err(ImuError::InvalidData));
    }

    #[test]
    fn test_max_consecutive_errors() {
        let mut driver = i2c_driver(&[0x00, registers::CHIP_ID_VALUE, 0x00]);
        let mut delay = MockDelay::new();
        driver.init(&mut delay).unwrap();
        assert!(driver.is_healthy());

        for _ in 0..MAX_CONSECUTIVE_ERRORS {
            driver
                .bus
                .inner()
                .inject_error(PlatformError::I2c(crate::platform::error::I2cError::Nack));
            let _ = driver.read_temperature();
        }
        assert!(!driver.is_healthy());
    }

    #[test]
    fn test_init_over_spi() {
        let spi = crate::platform::mock::MockSpi::new(SpiConfig::default());
        spi.set_read_data(&[0x00, registers::CHIP_ID_VALUE, 0x00]);
        let cs = MockGpio::new_output();
        let bus = SpiRegisters::new(spi, cs);
        let mut driver = Bmi160::new(bus, Bmi160Config::default());
        let mut delay = MockDelay::new();

        driver.init(&mut delay).unwrap();
        assert!(driver.is_initialized());

        let transactions = driver.bus.inner().transactions();
        // First operation: interface latch read with the read bit set
        assert_eq!(
            transactions[0],
            SpiTransaction::Write {
                data: vec![registers::SPI_MODE_TRIGGER | 0x80],
            }
        );
        // Chip select must end deasserted
        assert!(driver.bus.chip_select().read());
    }
}
