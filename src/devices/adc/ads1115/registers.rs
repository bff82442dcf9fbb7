//! ADS1115 Register Definitions
//!
//! The ADS1115 exposes four 16-bit big-endian registers selected through a
//! pointer byte. There is no identity register; presence is detected by a
//! successful CONFIG read.

// =============================================================================
// I2C Addresses (set by the ADDR pin strap)
// =============================================================================

/// ADDR tied to GND (default)
pub const ADS1115_ADDR: u8 = 0x48;

/// ADDR tied to VDD
pub const ADS1115_ADDR_VDD: u8 = 0x49;

/// ADDR tied to SDA
pub const ADS1115_ADDR_SDA: u8 = 0x4A;

/// ADDR tied to SCL
pub const ADS1115_ADDR_SCL: u8 = 0x4B;

// =============================================================================
// Register Pointers
// =============================================================================

/// Conversion result (read-only, 16-bit two's complement)
pub const CONVERSION: u8 = 0x00;

/// Configuration register
pub const CONFIG: u8 = 0x01;

/// Comparator low threshold
pub const LO_THRESH: u8 = 0x02;

/// Comparator high threshold
pub const HI_THRESH: u8 = 0x03;

// =============================================================================
// CONFIG Fields
// =============================================================================

/// Operational status / single-shot trigger (bit 15)
///
/// Write 1 to start a conversion; reads back 0 while converting.
pub const CONFIG_OS: u16 = 0x8000;

/// MUX field shift (bits 14..12)
pub const CONFIG_MUX_SHIFT: u16 = 12;

/// PGA field shift (bits 11..9)
pub const CONFIG_PGA_SHIFT: u16 = 9;

/// Single-shot / power-down mode (bit 8); clear for continuous
pub const CONFIG_MODE_SINGLE: u16 = 0x0100;

/// Data rate field shift (bits 7..5)
pub const CONFIG_DR_SHIFT: u16 = 5;

/// Comparator queue: disable comparator (bits 1..0 = 0b11)
pub const CONFIG_COMP_DISABLE: u16 = 0x0003;

/// Datasheet power-on reset value of CONFIG
pub const CONFIG_RESET_VALUE: u16 = 0x8583;

// =============================================================================
// Scaling
// =============================================================================

/// Full-scale raw count (positive side of the 16-bit range)
pub const FULL_SCALE_COUNTS: f32 = 32768.0;

// =============================================================================
// Timing
// =============================================================================

/// Interval between conversion-ready polls (µs)
pub const CONVERSION_POLL_INTERVAL_US: u32 = 500;
