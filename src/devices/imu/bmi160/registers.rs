//! BMI160 Register Definitions
//!
//! Register map for the Bosch BMI160 6-axis IMU. All registers live in a
//! single flat bank; data registers are little-endian with the low byte at
//! the lower address.

// =============================================================================
// I2C Addresses
// =============================================================================

/// BMI160 default I2C address (SDO = LOW)
pub const BMI160_ADDR: u8 = 0x68;

/// BMI160 alternate I2C address (SDO = HIGH)
pub const BMI160_ADDR_ALT: u8 = 0x69;

// =============================================================================
// Identification
// =============================================================================

/// Chip ID register
pub const CHIP_ID: u8 = 0x00;

/// Expected chip ID value
pub const CHIP_ID_VALUE: u8 = 0xD1;

// =============================================================================
// Status Registers
// =============================================================================

/// Error status flags
pub const ERR_REG: u8 = 0x02;

/// Power mode status
pub const PMU_STATUS: u8 = 0x03;

/// Accelerometer PMU status mask (bits 5:4)
pub const PMU_STATUS_ACC_MASK: u8 = 0x30;

/// Accelerometer normal mode in PMU_STATUS
pub const PMU_STATUS_ACC_NORMAL: u8 = 0x10;

/// Gyroscope PMU status mask (bits 3:2)
pub const PMU_STATUS_GYR_MASK: u8 = 0x0C;

/// Gyroscope normal mode in PMU_STATUS
pub const PMU_STATUS_GYR_NORMAL: u8 = 0x04;

/// Sensor status flags
pub const STATUS: u8 = 0x1B;

/// Accelerometer data ready bit in STATUS
pub const STATUS_DRDY_ACC: u8 = 0x80;

/// Gyroscope data ready bit in STATUS
pub const STATUS_DRDY_GYR: u8 = 0x40;

// =============================================================================
// Data Registers
// =============================================================================

/// Start of gyroscope data block (GYR_X low byte)
pub const DATA_GYR_X_L: u8 = 0x0C;

/// Start of accelerometer data block (ACC_X low byte)
pub const DATA_ACC_X_L: u8 = 0x12;

/// Sensor time counter, 24-bit little-endian (39 µs per LSB)
pub const SENSORTIME_0: u8 = 0x18;

/// Temperature, 16-bit little-endian signed
pub const TEMPERATURE_0: u8 = 0x20;

/// Temperature reading when the sensor value is invalid
pub const TEMPERATURE_INVALID: i16 = i16::MIN;

// =============================================================================
// Configuration Registers
// =============================================================================

/// Accelerometer ODR and bandwidth
pub const ACC_CONF: u8 = 0x40;

/// Accelerometer full-scale range
pub const ACC_RANGE: u8 = 0x41;

/// Gyroscope ODR and bandwidth
pub const GYR_CONF: u8 = 0x42;

/// Gyroscope full-scale range
pub const GYR_RANGE: u8 = 0x43;

/// Normal filter bandwidth setting (bwp field of ACC_CONF / GYR_CONF)
pub const CONF_BWP_NORMAL: u8 = 0x20;

// =============================================================================
// Command Register
// =============================================================================

/// Command register
pub const CMD: u8 = 0x7E;

/// Soft reset command
pub const CMD_SOFT_RESET: u8 = 0xB6;

/// Set accelerometer to normal power mode
pub const CMD_ACC_NORMAL: u8 = 0x11;

/// Set gyroscope to normal power mode
pub const CMD_GYR_NORMAL: u8 = 0x15;

/// Reserved register read to latch the serial interface into SPI mode.
/// Harmless over I2C.
pub const SPI_MODE_TRIGGER: u8 = 0x7F;

// =============================================================================
// Range Values
// =============================================================================

/// ACC_RANGE value for ±2g
pub const ACC_RANGE_2G: u8 = 0x03;

/// ACC_RANGE value for ±4g
pub const ACC_RANGE_4G: u8 = 0x05;

/// ACC_RANGE value for ±8g
pub const ACC_RANGE_8G: u8 = 0x08;

/// ACC_RANGE value for ±16g
pub const ACC_RANGE_16G: u8 = 0x0C;

/// GYR_RANGE value for ±2000 °/s
pub const GYR_RANGE_2000DPS: u8 = 0x00;

/// GYR_RANGE value for ±1000 °/s
pub const GYR_RANGE_1000DPS: u8 = 0x01;

/// GYR_RANGE value for ±500 °/s
pub const GYR_RANGE_500DPS: u8 = 0x02;

/// GYR_RANGE value for ±250 °/s
pub const GYR_RANGE_250DPS: u8 = 0x03;

/// GYR_RANGE value for ±125 °/s
pub const GYR_RANGE_125DPS: u8 = 0x04;

// =============================================================================
// Output Data Rate Values
// =============================================================================

/// ODR field value for 25 Hz
pub const ODR_25HZ: u8 = 0x06;

/// ODR field value for 50 Hz
pub const ODR_50HZ: u8 = 0x07;

/// ODR field value for 100 Hz
pub const ODR_100HZ: u8 = 0x08;

/// ODR field value for 200 Hz
pub const ODR_200HZ: u8 = 0x09;

/// ODR field value for 400 Hz
pub const ODR_400HZ: u8 = 0x0A;

/// ODR field value for 800 Hz
pub const ODR_800HZ: u8 = 0x0B;

/// ODR field value for 1600 Hz
pub const ODR_1600HZ: u8 = 0x0C;

// =============================================================================
// Sensitivity Constants
// =============================================================================

/// Accelerometer sensitivity at ±2g (LSB/g)
pub const ACCEL_SENSITIVITY_2G: f32 = 16384.0;

/// Accelerometer sensitivity at ±4g (LSB/g)
pub const ACCEL_SENSITIVITY_4G: f32 = 8192.0;

/// Accelerometer sensitivity at ±8g (LSB/g)
pub const ACCEL_SENSITIVITY_8G: f32 = 4096.0;

/// Accelerometer sensitivity at ±16g (LSB/g)
pub const ACCEL_SENSITIVITY_16G: f32 = 2048.0;

/// Gyroscope sensitivity at ±125 °/s (LSB per °/s)
pub const GYRO_SENSITIVITY_125DPS: f32 = 262.4;

/// Gyroscope sensitivity at ±250 °/s (LSB per °/s)
pub const GYRO_SENSITIVITY_250DPS: f32 = 131.2;

/// Gyroscope sensitivity at ±500 °/s (LSB per °/s)
pub const GYRO_SENSITIVITY_500DPS: f32 = 65.6;

/// Gyroscope sensitivity at ±1000 °/s (LSB per °/s)
pub const GYRO_SENSITIVITY_1000DPS: f32 = 32.8;

/// Gyroscope sensitivity at ±2000 °/s (LSB per °/s)
pub const GYRO_SENSITIVITY_2000DPS: f32 = 16.4;

/// Temperature resolution (LSB per °C)
pub const TEMP_RESOLUTION: f32 = 512.0;

/// Temperature offset (°C at raw value 0)
pub const TEMP_OFFSET_C: f32 = 23.0;

// =============================================================================
// Physical Constants
// =============================================================================

/// Standard gravity (m/s²)
pub const GRAVITY: f32 = 9.80665;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;

// =============================================================================
// Timing
// =============================================================================

/// Delay after soft reset (ms)
pub const SOFT_RESET_DELAY_MS: u32 = 10;

/// Accelerometer power-up time to normal mode (ms)
pub const ACC_POWER_UP_DELAY_MS: u32 = 5;

/// Gyroscope power-up time to normal mode (ms)
pub const GYR_POWER_UP_DELAY_MS: u32 = 81;
