//! VCNL4010 Configuration

use super::registers;

/// Proximity measurement rate in self-timed mode (PROX_RATE bits 2..0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProxRate {
    /// 1.95 measurements/s
    Hz1_95,
    /// 3.9 measurements/s
    Hz3_9,
    /// 7.8 measurements/s (default)
    #[default]
    Hz7_8,
    /// 16.6 measurements/s
    Hz16_6,
    /// 31.2 measurements/s
    Hz31_2,
    /// 62.5 measurements/s
    Hz62_5,
    /// 125 measurements/s
    Hz125,
    /// 250 measurements/s
    Hz250,
}

impl ProxRate {
    /// Get the PROX_RATE register value
    pub fn register_value(self) -> u8 {
        match self {
            ProxRate::Hz1_95 => 0,
            ProxRate::Hz3_9 => 1,
            ProxRate::Hz7_8 => 2,
            ProxRate::Hz16_6 => 3,
            ProxRate::Hz31_2 => 4,
            ProxRate::Hz62_5 => 5,
            ProxRate::Hz125 => 6,
            ProxRate::Hz250 => 7,
        }
    }
}

/// Ambient light measurement rate (ALS_PARAM bits 6..4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlsRate {
    /// 1 sample/s
    Hz1,
    /// 2 samples/s (default)
    #[default]
    Hz2,
    /// 3 samples/s
    Hz3,
    /// 4 samples/s
    Hz4,
    /// 5 samples/s
    Hz5,
    /// 6 samples/s
    Hz6,
    /// 8 samples/s
    Hz8,
    /// 10 samples/s
    Hz10,
}

impl AlsRate {
    /// Get the ALS_PARAM rate field value
    pub fn register_value(self) -> u8 {
        let field = match self {
            AlsRate::Hz1 => 0,
            AlsRate::Hz2 => 1,
            AlsRate::Hz3 => 2,
            AlsRate::Hz4 => 3,
            AlsRate::Hz5 => 4,
            AlsRate::Hz6 => 5,
            AlsRate::Hz8 => 6,
            AlsRate::Hz10 => 7,
        };
        field << 4
    }
}

/// Ambient light averaging (ALS_PARAM bits 2..0, 2^n samples per result)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlsAveraging {
    /// 1 sample
    X1,
    /// 2 samples
    X2,
    /// 4 samples
    X4,
    /// 8 samples
    X8,
    /// 16 samples
    X16,
    /// 32 samples (default)
    #[default]
    X32,
    /// 64 samples
    X64,
    /// 128 samples
    X128,
}

impl AlsAveraging {
    /// Get the ALS_PARAM averaging field value
    pub fn register_value(self) -> u8 {
        match self {
            AlsAveraging::X1 => 0,
            AlsAveraging::X2 => 1,
            AlsAveraging::X4 => 2,
            AlsAveraging::X8 => 3,
            AlsAveraging::X16 => 4,
            AlsAveraging::X32 => 5,
            AlsAveraging::X64 => 6,
            AlsAveraging::X128 => 7,
        }
    }
}

/// Complete VCNL4010 configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vcnl4010Config {
    /// Proximity rate in self-timed mode
    pub prox_rate: ProxRate,
    /// IR LED current in mA, rounded down to 10 mA steps (max 200)
    pub led_current_ma: u16,
    /// Ambient light rate
    pub als_rate: AlsRate,
    /// Ambient light averaging
    pub als_averaging: AlsAveraging,
    /// Automatic ALS offset compensation
    pub als_auto_offset: bool,
}

impl Default for Vcnl4010Config {
    fn default() -> Self {
        Self {
            prox_rate: ProxRate::Hz7_8,
            led_current_ma: 125, // Click board default, safe for continuous use
            als_rate: AlsRate::Hz2,
            als_averaging: AlsAveraging::X32,
            als_auto_offset: true,
        }
    }
}

impl Vcnl4010Config {
    /// Get the IR_LED_CURRENT register value (mA / 10, clamped to 20)
    pub fn led_current_value(self) -> u8 {
        core::cmp::min(
            (self.led_current_ma / 10) as u8,
            registers::IR_LED_CURRENT_MAX,
        )
    }

    /// Assemble the ALS_PARAM register value
    pub fn als_param_value(self) -> u8 {
        let mut value = self.als_rate.register_value() | self.als_averaging.register_value();
        if self.als_auto_offset {
            value |= registers::ALS_AUTO_OFFSET;
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Vcnl4010Config::default();
        assert_eq!(config.prox_rate.register_value(), 2);
        assert_eq!(config.led_current_value(), 12); // 125 mA -> 120 mA step
        assert_eq!(config.als_param_value(), 0x1D); // rate 2/s, auto offset, 32x
    }

    #[test]
    fn test_led_current_clamped() {
        let config = Vcnl4010Config {
            led_current_ma: 400,
            ..Vcnl4010Config::default()
        };
        assert_eq!(config.led_current_value(), 20);
    }
}
