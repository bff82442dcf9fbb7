//! BMI160 Configuration
//!
//! Configuration structs for gyroscope and accelerometer range and output
//! data rate settings.

use super::registers;

/// Gyroscope full scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroRange {
    /// ±125 °/s
    Dps125,
    /// ±250 °/s
    Dps250,
    /// ±500 °/s
    Dps500,
    /// ±1000 °/s
    Dps1000,
    /// ±2000 °/s (default for high dynamics)
    #[default]
    Dps2000,
}

impl GyroRange {
    /// Get the register value for this range
    pub fn register_value(self) -> u8 {
        match self {
            GyroRange::Dps125 => registers::GYR_RANGE_125DPS,
            GyroRange::Dps250 => registers::GYR_RANGE_250DPS,
            GyroRange::Dps500 => registers::GYR_RANGE_500DPS,
            GyroRange::Dps1000 => registers::GYR_RANGE_1000DPS,
            GyroRange::Dps2000 => registers::GYR_RANGE_2000DPS,
        }
    }

    /// Get the sensitivity (LSB per °/s) for this range
    pub fn sensitivity(self) -> f32 {
        match self {
            GyroRange::Dps125 => registers::GYRO_SENSITIVITY_125DPS,
            GyroRange::Dps250 => registers::GYRO_SENSITIVITY_250DPS,
            GyroRange::Dps500 => registers::GYRO_SENSITIVITY_500DPS,
            GyroRange::Dps1000 => registers::GYRO_SENSITIVITY_1000DPS,
            GyroRange::Dps2000 => registers::GYRO_SENSITIVITY_2000DPS,
        }
    }

    /// Get scale factor to convert raw value to rad/s
    pub fn scale_to_rad_s(self) -> f32 {
        registers::DEG_TO_RAD / self.sensitivity()
    }
}

/// Accelerometer full scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
    /// ±2 g
    G2,
    /// ±4 g
    G4,
    /// ±8 g (default, good balance of range and resolution)
    #[default]
    G8,
    /// ±16 g
    G16,
}

impl AccelRange {
    /// Get the register value for this range
    pub fn register_value(self) -> u8 {
        match self {
            AccelRange::G2 => registers::ACC_RANGE_2G,
            AccelRange::G4 => registers::ACC_RANGE_4G,
            AccelRange::G8 => registers::ACC_RANGE_8G,
            AccelRange::G16 => registers::ACC_RANGE_16G,
        }
    }

    /// Get the sensitivity (LSB per g) for this range
    pub fn sensitivity(self) -> f32 {
        match self {
            AccelRange::G2 => registers::ACCEL_SENSITIVITY_2G,
            AccelRange::G4 => registers::ACCEL_SENSITIVITY_4G,
            AccelRange::G8 => registers::ACCEL_SENSITIVITY_8G,
            AccelRange::G16 => registers::ACCEL_SENSITIVITY_16G,
        }
    }

    /// Get scale factor to convert raw value to m/s²
    pub fn scale_to_m_s2(self) -> f32 {
        registers::GRAVITY / self.sensitivity()
    }
}

/// Output data rate shared by both sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputDataRate {
    /// 25 Hz
    Hz25,
    /// 50 Hz
    Hz50,
    /// 100 Hz (default)
    #[default]
    Hz100,
    /// 200 Hz
    Hz200,
    /// 400 Hz
    Hz400,
    /// 800 Hz
    Hz800,
    /// 1600 Hz
    Hz1600,
}

impl OutputDataRate {
    /// Get the ODR field value for ACC_CONF / GYR_CONF
    pub fn register_value(self) -> u8 {
        match self {
            OutputDataRate::Hz25 => registers::ODR_25HZ,
            OutputDataRate::Hz50 => registers::ODR_50HZ,
            OutputDataRate::Hz100 => registers::ODR_100HZ,
            OutputDataRate::Hz200 => registers::ODR_200HZ,
            OutputDataRate::Hz400 => registers::ODR_400HZ,
            OutputDataRate::Hz800 => registers::ODR_800HZ,
            OutputDataRate::Hz1600 => registers::ODR_1600HZ,
        }
    }

    /// Get the full CONF register value with the normal filter bandwidth
    pub fn conf_value(self) -> u8 {
        registers::CONF_BWP_NORMAL | self.register_value()
    }
}

/// Complete BMI160 configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bmi160Config {
    /// Accelerometer full scale range
    pub accel_range: AccelRange,
    /// Gyroscope full scale range
    pub gyro_range: GyroRange,
    /// Accelerometer output data rate
    pub accel_odr: OutputDataRate,
    /// Gyroscope output data rate
    pub gyro_odr: OutputDataRate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Bmi160Config::default();
        assert_eq!(config.accel_range, AccelRange::G8);
        assert_eq!(config.gyro_range, GyroRange::Dps2000);
        assert_eq!(config.accel_odr, OutputDataRate::Hz100);
        assert_eq!(config.gyro_odr, OutputDataRate::Hz100);
    }

    #[test]
    fn test_accel_range_values() {
        assert_eq!(AccelRange::G2.register_value(), 0x03);
        assert_eq!(AccelRange::G4.register_value(), 0x05);
        assert_eq!(AccelRange::G8.register_value(), 0x08);
        assert_eq!(AccelRange::G16.register_value(), 0x0C);
    }

    #[test]
    fn test_gyro_range_values() {
        assert_eq!(GyroRange::Dps2000.register_value(), 0x00);
        assert_eq!(GyroRange::Dps125.register_value(), 0x04);
    }

    #[test]
    fn test_accel_scale() {
        // ±2g: 16384 LSB/g, full scale raw 32768 maps to ~19.6 m/s²
        let scale = AccelRange::G2.scale_to_m_s2();
        let full_scale = 32768.0 * scale;
        assert!((full_scale - 2.0 * 9.80665).abs() < 0.01);
    }

    #[test]
    fn test_gyro_scale() {
        // ±2000 °/s: 16.4 LSB per °/s
        let scale = GyroRange::Dps2000.scale_to_rad_s();
        let one_dps_raw = 16.4;
        let rad_s = one_dps_raw * scale;
        assert!((rad_s - core::f32::consts::PI / 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_odr_conf_value() {
        // Normal bandwidth (0b010 << 4) plus the ODR field
        assert_eq!(OutputDataRate::Hz100.conf_value(), 0x28);
        assert_eq!(OutputDataRate::Hz1600.conf_value(), 0x2C);
    }
}
