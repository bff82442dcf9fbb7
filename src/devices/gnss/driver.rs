//! GNSS Driver Implementation

use nmea0183::{ParseResult, Parser};

use crate::devices::gnss::GnssError;
use crate::platform::UartInterface;

/// Knots to meters per second
const KNOTS_TO_MPS: f32 = 0.514_444;

/// Fix quality derived from the NMEA stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FixQuality {
    /// No position solution
    NoFix,
    /// Horizontal position only
    Fix2D,
    /// Position with altitude
    Fix3D,
}

/// One merged position snapshot
///
/// GGA contributes position, altitude and satellite count; RMC and VTG
/// contribute speed and course over ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GnssFix {
    /// Latitude in degrees (-90 to +90)
    pub latitude: f32,
    /// Longitude in degrees (-180 to +180)
    pub longitude: f32,
    /// Altitude in meters above sea level
    pub altitude: f32,
    /// Ground speed in meters per second
    pub speed: f32,
    /// Course over ground in degrees, `None` when the receiver omits it
    /// (typically while stationary)
    pub course: Option<f32>,
    /// Fix quality
    pub quality: FixQuality,
    /// Satellites used in the solution
    pub satellites: u8,
}

/// Sentence statistics for monitoring and diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseStats {
    /// Sentences merged into the fix state
    pub sentences_merged: u32,
    /// Sentences rejected by the NMEA parser
    pub parse_errors: u32,
}

/// Accumulated per-sentence fields until a fix can be assembled
#[derive(Debug, Clone, Copy, Default)]
struct FixState {
    latitude: Option<f32>,
    longitude: Option<f32>,
    altitude: Option<f32>,
    satellites: Option<u8>,
    speed: Option<f32>,
    course: Option<f32>,
    quality: Option<FixQuality>,
}

impl FixState {
    /// A fix requires at least a GGA position
    fn to_fix(self) -> Option<GnssFix> {
        let (latitude, longitude) = match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => return None,
        };
        Some(GnssFix {
            latitude,
            longitude,
            altitude: self.altitude.unwrap_or(0.0),
            speed: self.speed.unwrap_or(0.0),
            course: self.course,
            quality: self.quality.unwrap_or(FixQuality::NoFix),
            satellites: self.satellites.unwrap_or(0),
        })
    }

    fn merge_gga(&mut self, gga: &nmea0183::GGA) {
        self.latitude = Some(gga.latitude.as_f64() as f32);
        self.longitude = Some(gga.longitude.as_f64() as f32);
        self.altitude = Some(gga.altitude.meters);
        self.satellites = Some(gga.sat_in_use);
        // A non-zero altitude distinguishes 3D from 2D solutions
        self.quality = Some(if gga.altitude.meters.abs() > 0.01 {
            FixQuality::Fix3D
        } else {
            FixQuality::Fix2D
        });
    }

    fn merge_rmc(&mut self, rmc: &nmea0183::RMC) {
        self.speed = Some(rmc.speed.as_knots() * KNOTS_TO_MPS);
        if let Some(course) = &rmc.course {
            self.course = Some(course.degrees);
        }
    }

    fn merge_vtg(&mut self, vtg: &nmea0183::VTG) {
        self.speed = Some(vtg.speed.as_knots() * KNOTS_TO_MPS);
        if let Some(course) = &vtg.course {
            self.course = Some(course.degrees);
        }
    }
}

/// GNSS receiver driver (UART, NMEA 0183)
///
/// [`poll`](Self::poll) drains the UART through a byte-fed NMEA parser
/// and merges GGA, RMC and VTG sentences into one fix snapshot.
pub struct Gnss<U> {
    /// UART link to the receiver
    uart: U,

    /// Byte-fed NMEA parser
    parser: Parser,

    /// Merged per-sentence state
    state: FixState,

    /// Sentence statistics
    stats: ParseStats,
}

impl<U: UartInterface> Gnss<U> {
    /// Create a new GNSS driver
    pub fn new(uart: U) -> Self {
        Self {
            uart,
            parser: Parser::new(),
            state: FixState::default(),
            stats: ParseStats::default(),
        }
    }

    /// Direct UART access for vendor configuration commands
    ///
    /// ```ignore
    /// use mikroclick::devices::gnss::{ublox, Gnss};
    ///
    /// let mut gnss = Gnss::new(uart);
    /// ublox::initialize(gnss.uart_mut())?;
    /// ```
    pub fn uart_mut(&mut self) -> &mut U {
        &mut self.uart
    }

    /// Drain pending UART data through the parser
    ///
    /// Returns the merged fix when at least one sentence completed during
    /// this call and a GGA position has been seen, `None` otherwise.
    pub fn poll(&mut self) -> Result<Option<GnssFix>, GnssError> {
        let mut merged = false;
        let mut buf = [0u8; 64];
        loop {
            let count = self.uart.read(&mut buf)?;
            if count == 0 {
                break;
            }
            for &byte in &buf[..count] {
                match self.parser.parse_from_byte(byte) {
                    Some(Ok(ParseResult::GGA(Some(gga)))) => {
                        self.state.merge_gga(&gga);
                        self.stats.sentences_merged += 1;
                        merged = true;
                    }
                    Some(Ok(ParseResult::RMC(Some(rmc)))) => {
                        self.state.merge_rmc(&rmc);
                        self.stats.sentences_merged += 1;
                        merged = true;
                    }
                    Some(Ok(ParseResult::VTG(Some(vtg)))) => {
                        self.state.merge_vtg(&vtg);
                        self.stats.sentences_merged += 1;
                        merged = true;
                    }
                    Some(Err(_)) => {
                        self.stats.parse_errors += 1;
                    }
                    // Other sentence types, or mid-sentence
                    _ => {}
                }
            }
        }

        if merged {
            Ok(self.state.to_fix())
        } else {
            Ok(None)
        }
    }

    /// Last merged fix without touching the UART
    pub fn fix(&self) -> Option<GnssFix> {
        self.state.to_fix()
    }

    /// Whether a position solution is available
    pub fn has_fix(&self) -> bool {
        self.state.to_fix().is_some()
    }

    /// Get sentence statistics
    pub fn stats(&self) -> ParseStats {
        self.stats
    }
}
