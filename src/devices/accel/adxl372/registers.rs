//! ADXL372 Register Definitions
//!
//! Register map for the Analog Devices ADXL372 ±200 g accelerometer.
//! Data registers are 12-bit left-justified big-endian pairs (high byte at
//! the lower address).

// =============================================================================
// I2C Addresses
// =============================================================================

/// ADXL372 default I2C address (ASEL = LOW)
pub const ADXL372_ADDR: u8 = 0x1D;

/// ADXL372 alternate I2C address (ASEL = HIGH)
pub const ADXL372_ADDR_ALT: u8 = 0x53;

// =============================================================================
// Identification
// =============================================================================

/// Analog Devices manufacturer ID register
pub const DEVID_AD: u8 = 0x00;

/// Expected DEVID_AD value
pub const DEVID_AD_VALUE: u8 = 0xAD;

/// Analog Devices MEMS ID register
pub const DEVID_MST: u8 = 0x01;

/// Expected DEVID_MST value
pub const DEVID_MST_VALUE: u8 = 0x1D;

/// Part ID register
pub const PARTID: u8 = 0x02;

/// Expected PARTID value
pub const PARTID_VALUE: u8 = 0xFA;

/// Revision ID register
pub const REVID: u8 = 0x03;

// =============================================================================
// Status
// =============================================================================

/// Status register
pub const STATUS: u8 = 0x04;

// =============================================================================
// Data Registers
// =============================================================================

/// Start of the acceleration data block (XDATA high byte)
pub const XDATA_H: u8 = 0x08;

/// Start of the max-peak data block (highest magnitude event since last read)
pub const MAXPEAK_X_H: u8 = 0x15;

// =============================================================================
// Configuration Registers
// =============================================================================

/// Output data rate (bits 7..5)
pub const TIMING: u8 = 0x3D;

/// Bandwidth (bits 2..0) and low-noise mode (bit 3)
pub const MEASURE: u8 = 0x3E;

/// Low-noise mode bit in MEASURE
pub const MEASURE_LOW_NOISE: u8 = 0x08;

/// Operating mode (bits 1..0)
pub const POWER_CTL: u8 = 0x3F;

/// Soft reset register
pub const SRESET: u8 = 0x41;

/// Soft reset key
pub const SRESET_VALUE: u8 = 0x52;

// =============================================================================
// Scaling
// =============================================================================

/// Sensitivity: g per LSB (fixed 100 mg/LSB, single ±200 g range)
pub const SCALE_G_PER_LSB: f32 = 0.1;

// =============================================================================
// Timing
// =============================================================================

/// Delay after soft reset (ms)
pub const SOFT_RESET_DELAY_MS: u32 = 1;

/// Interval between data-ready polls (µs)
pub const DATA_READY_POLL_INTERVAL_US: u32 = 100;
