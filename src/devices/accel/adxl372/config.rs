//! ADXL372 Configuration
//!
//! Output data rate, filter bandwidth, and operating mode settings. The
//! part has a single ±200 g range, so there is no range selection.

/// Output data rate (TIMING bits 7..5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Adxl372Odr {
    /// 400 Hz
    Hz400,
    /// 800 Hz
    Hz800,
    /// 1600 Hz
    Hz1600,
    /// 3200 Hz
    Hz3200,
    /// 6400 Hz (default, shock capture)
    #[default]
    Hz6400,
}

impl Adxl372Odr {
    /// Get the TIMING register value for this rate
    pub fn register_value(self) -> u8 {
        let field = match self {
            Adxl372Odr::Hz400 => 0,
            Adxl372Odr::Hz800 => 1,
            Adxl372Odr::Hz1600 => 2,
            Adxl372Odr::Hz3200 => 3,
            Adxl372Odr::Hz6400 => 4,
        };
        field << 5
    }
}

/// Antialiasing filter bandwidth (MEASURE bits 2..0)
///
/// Must be no more than half the output data rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Adxl372Bandwidth {
    /// 200 Hz
    Hz200,
    /// 400 Hz
    Hz400,
    /// 800 Hz
    Hz800,
    /// 1600 Hz
    Hz1600,
    /// 3200 Hz (default)
    #[default]
    Hz3200,
}

impl Adxl372Bandwidth {
    /// Get the MEASURE bandwidth field value
    pub fn register_value(self) -> u8 {
        match self {
            Adxl372Bandwidth::Hz200 => 0,
            Adxl372Bandwidth::Hz400 => 1,
            Adxl372Bandwidth::Hz800 => 2,
            Adxl372Bandwidth::Hz1600 => 3,
            Adxl372Bandwidth::Hz3200 => 4,
        }
    }
}

/// Operating mode (POWER_CTL bits 1..0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Adxl372Mode {
    /// Standby, no measurement
    #[default]
    Standby,
    /// Wake-up mode, periodic coarse measurement
    WakeUp,
    /// Instant-on, waits for a shock above threshold
    InstantOn,
    /// Full-bandwidth continuous measurement
    FullBandwidth,
}

impl Adxl372Mode {
    /// Get the POWER_CTL mode field value
    pub fn register_value(self) -> u8 {
        match self {
            Adxl372Mode::Standby => 0,
            Adxl372Mode::WakeUp => 1,
            Adxl372Mode::InstantOn => 2,
            Adxl372Mode::FullBandwidth => 3,
        }
    }
}

/// Complete ADXL372 configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Adxl372Config {
    /// Output data rate
    pub odr: Adxl372Odr,
    /// Antialiasing filter bandwidth
    pub bandwidth: Adxl372Bandwidth,
    /// Low-noise mode (higher supply current)
    pub low_noise: bool,
}

impl Default for Adxl372Config {
    fn default() -> Self {
        Self {
            odr: Adxl372Odr::Hz6400,
            bandwidth: Adxl372Bandwidth::Hz3200,
            low_noise: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Adxl372Config::default();
        assert_eq!(config.odr, Adxl372Odr::Hz6400);
        assert_eq!(config.bandwidth, Adxl372Bandwidth::Hz3200);
        assert!(!config.low_noise);
    }

    #[test]
    fn test_odr_field_position() {
        // ODR lives in bits 7..5 of TIMING
        assert_eq!(Adxl372Odr::Hz400.register_value(), 0x00);
        assert_eq!(Adxl372Odr::Hz6400.register_value(), 0x80);
    }

    #[test]
    fn test_mode_values() {
        assert_eq!(Adxl372Mode::Standby.register_value(), 0);
        assert_eq!(Adxl372Mode::FullBandwidth.register_value(), 3);
    }
}
