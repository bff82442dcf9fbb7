//! DPS310 Configuration
//!
//! Measurement rate and oversampling settings for the pressure and
//! temperature channels. The compensation scale factor is a property of the
//! oversampling setting and is cached by the driver when a configuration is
//! applied.

/// Background measurement rate (shared field layout for both channels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasurementRate {
    /// 1 measurement per second
    Hz1,
    /// 2 measurements per second
    Hz2,
    /// 4 measurements per second (default)
    #[default]
    Hz4,
    /// 8 measurements per second
    Hz8,
    /// 16 measurements per second
    Hz16,
    /// 32 measurements per second
    Hz32,
    /// 64 measurements per second
    Hz64,
    /// 128 measurements per second
    Hz128,
}

impl MeasurementRate {
    /// Get the rate field value (bits 6:4 of PRS_CFG / TMP_CFG)
    pub fn register_value(self) -> u8 {
        match self {
            MeasurementRate::Hz1 => 0,
            MeasurementRate::Hz2 => 1,
            MeasurementRate::Hz4 => 2,
            MeasurementRate::Hz8 => 3,
            MeasurementRate::Hz16 => 4,
            MeasurementRate::Hz32 => 5,
            MeasurementRate::Hz64 => 6,
            MeasurementRate::Hz128 => 7,
        }
    }
}

/// Oversampling (precision) setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oversampling {
    /// Single measurement
    #[default]
    X1,
    /// 2x oversampling
    X2,
    /// 4x oversampling
    X4,
    /// 8x oversampling
    X8,
    /// 16x oversampling
    X16,
    /// 32x oversampling
    X32,
    /// 64x oversampling (high precision)
    X64,
    /// 128x oversampling
    X128,
}

impl Oversampling {
    /// Get the oversampling field value (bits 3:0)
    pub fn register_value(self) -> u8 {
        match self {
            Oversampling::X1 => 0,
            Oversampling::X2 => 1,
            Oversampling::X4 => 2,
            Oversampling::X8 => 3,
            Oversampling::X16 => 4,
            Oversampling::X32 => 5,
            Oversampling::X64 => 6,
            Oversampling::X128 => 7,
        }
    }

    /// Get the compensation scale factor for this oversampling setting
    pub fn scale_factor(self) -> f32 {
        match self {
            Oversampling::X1 => 524_288.0,
            Oversampling::X2 => 1_572_864.0,
            Oversampling::X4 => 3_670_016.0,
            Oversampling::X8 => 7_864_320.0,
            Oversampling::X16 => 253_952.0,
            Oversampling::X32 => 516_096.0,
            Oversampling::X64 => 1_040_384.0,
            Oversampling::X128 => 2_088_960.0,
        }
    }

    /// Whether the result shift bit in CFG_REG is required
    ///
    /// Above 8x oversampling the 24-bit result would overflow without it.
    pub fn needs_shift(self) -> bool {
        matches!(
            self,
            Oversampling::X16 | Oversampling::X32 | Oversampling::X64 | Oversampling::X128
        )
    }
}

/// Complete DPS310 configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dps310Config {
    /// Pressure background measurement rate
    pub pressure_rate: MeasurementRate,
    /// Pressure oversampling
    pub pressure_oversampling: Oversampling,
    /// Temperature background measurement rate
    pub temperature_rate: MeasurementRate,
    /// Temperature oversampling
    pub temperature_oversampling: Oversampling,
}

impl Default for Dps310Config {
    /// High-precision pressure at a modest rate, single temperature
    /// measurements to track the thermal drift.
    fn default() -> Self {
        Self {
            pressure_rate: MeasurementRate::Hz4,
            pressure_oversampling: Oversampling::X64,
            temperature_rate: MeasurementRate::Hz4,
            temperature_oversampling: Oversampling::X1,
        }
    }
}
