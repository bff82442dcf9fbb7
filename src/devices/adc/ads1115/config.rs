//! ADS1115 Configuration
//!
//! Typed renditions of the CONFIG register fields: input multiplexer,
//! programmable gain, conversion mode and data rate.

use super::registers;

/// Input multiplexer selection (CONFIG bits 14..12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ads1115Mux {
    /// Differential AIN0 - AIN1 (default)
    #[default]
    Diff0_1,
    /// Differential AIN0 - AIN3
    Diff0_3,
    /// Differential AIN1 - AIN3
    Diff1_3,
    /// Differential AIN2 - AIN3
    Diff2_3,
    /// Single-ended AIN0
    Single0,
    /// Single-ended AIN1
    Single1,
    /// Single-ended AIN2
    Single2,
    /// Single-ended AIN3
    Single3,
}

impl Ads1115Mux {
    /// Get the MUX field value
    pub fn register_value(self) -> u16 {
        match self {
            Ads1115Mux::Diff0_1 => 0,
            Ads1115Mux::Diff0_3 => 1,
            Ads1115Mux::Diff1_3 => 2,
            Ads1115Mux::Diff2_3 => 3,
            Ads1115Mux::Single0 => 4,
            Ads1115Mux::Single1 => 5,
            Ads1115Mux::Single2 => 6,
            Ads1115Mux::Single3 => 7,
        }
    }
}

/// Programmable gain amplifier full-scale range (CONFIG bits 11..9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ads1115Pga {
    /// ±6.144 V
    Fs6V144,
    /// ±4.096 V
    Fs4V096,
    /// ±2.048 V (default)
    #[default]
    Fs2V048,
    /// ±1.024 V
    Fs1V024,
    /// ±0.512 V
    Fs0V512,
    /// ±0.256 V
    Fs0V256,
}

impl Ads1115Pga {
    /// Get the PGA field value
    pub fn register_value(self) -> u16 {
        match self {
            Ads1115Pga::Fs6V144 => 0,
            Ads1115Pga::Fs4V096 => 1,
            Ads1115Pga::Fs2V048 => 2,
            Ads1115Pga::Fs1V024 => 3,
            Ads1115Pga::Fs0V512 => 4,
            Ads1115Pga::Fs0V256 => 5,
        }
    }

    /// Full-scale input voltage for this gain
    pub fn full_scale_v(self) -> f32 {
        match self {
            Ads1115Pga::Fs6V144 => 6.144,
            Ads1115Pga::Fs4V096 => 4.096,
            Ads1115Pga::Fs2V048 => 2.048,
            Ads1115Pga::Fs1V024 => 1.024,
            Ads1115Pga::Fs0V512 => 0.512,
            Ads1115Pga::Fs0V256 => 0.256,
        }
    }
}

/// Data rate in samples per second (CONFIG bits 7..5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ads1115DataRate {
    /// 8 SPS
    Sps8,
    /// 16 SPS
    Sps16,
    /// 32 SPS
    Sps32,
    /// 64 SPS
    Sps64,
    /// 128 SPS (default)
    #[default]
    Sps128,
    /// 250 SPS
    Sps250,
    /// 475 SPS
    Sps475,
    /// 860 SPS
    Sps860,
}

impl Ads1115DataRate {
    /// Get the DR field value
    pub fn register_value(self) -> u16 {
        match self {
            Ads1115DataRate::Sps8 => 0,
            Ads1115DataRate::Sps16 => 1,
            Ads1115DataRate::Sps32 => 2,
            Ads1115DataRate::Sps64 => 3,
            Ads1115DataRate::Sps128 => 4,
            Ads1115DataRate::Sps250 => 5,
            Ads1115DataRate::Sps475 => 6,
            Ads1115DataRate::Sps860 => 7,
        }
    }
}

/// Conversion mode (CONFIG bit 8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ads1115Mode {
    /// One conversion per trigger, then power down (default)
    #[default]
    SingleShot,
    /// Free-running conversions at the configured data rate
    Continuous,
}

/// Complete ADS1115 configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ads1115Config {
    /// Input multiplexer
    pub mux: Ads1115Mux,
    /// Programmable gain
    pub pga: Ads1115Pga,
    /// Conversion mode
    pub mode: Ads1115Mode,
    /// Data rate
    pub data_rate: Ads1115DataRate,
}

impl Ads1115Config {
    /// Assemble the CONFIG register word (comparator disabled)
    pub fn register_value(self) -> u16 {
        let mut word = self.mux.register_value() << registers::CONFIG_MUX_SHIFT
            | self.pga.register_value() << registers::CONFIG_PGA_SHIFT
            | self.data_rate.register_value() << registers::CONFIG_DR_SHIFT
            | registers::CONFIG_COMP_DISABLE;
        if self.mode == Ads1115Mode::SingleShot {
            word |= registers::CONFIG_MODE_SINGLE;
        }
        word
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_word() {
        // Diff0_1, ±2.048 V, single-shot, 128 SPS, comparator disabled:
        // matches the datasheet reset value with OS clear
        let word = Ads1115Config::default().register_value();
        assert_eq!(word, 0x0583);
    }

    #[test]
    fn test_single_ended_channel_word() {
        let config = Ads1115Config {
            mux: Ads1115Mux::Single2,
            pga: Ads1115Pga::Fs4V096,
            mode: Ads1115Mode::Continuous,
            data_rate: Ads1115DataRate::Sps860,
        };
        // MUX=110, PGA=001, MODE=0, DR=111
        assert_eq!(config.register_value(), 0x62E3);
    }

    #[test]
    fn test_pga_full_scale() {
        assert!((Ads1115Pga::Fs2V048.full_scale_v() - 2.048).abs() < 1e-6);
        assert!((Ads1115Pga::Fs0V256.full_scale_v() - 0.256).abs() < 1e-6);
    }
}
