//! MCP4161 Memory Map and Command Encoding
//!
//! The MCP4161 is command-driven: each SPI frame carries a 4-bit memory
//! address, a 2-bit command, and (for read/write) 9 data bits spread over
//! the 16-bit frame. Increment/decrement use 8-bit frames.

// =============================================================================
// Memory Map
// =============================================================================

/// Volatile wiper 0
pub const VOLATILE_WIPER: u8 = 0x00;

/// Non-volatile wiper 0 (EEPROM, loaded at power-up)
pub const NON_VOLATILE_WIPER: u8 = 0x02;

/// Terminal connection control
pub const TCON: u8 = 0x04;

/// Status register
pub const STATUS: u8 = 0x05;

// =============================================================================
// Commands (bits 3..2 of the command byte)
// =============================================================================

/// Write 9 data bits
pub const CMD_WRITE: u8 = 0x00;

/// Increment wiper (8-bit frame)
pub const CMD_INCREMENT: u8 = 0x04;

/// Decrement wiper (8-bit frame)
pub const CMD_DECREMENT: u8 = 0x08;

/// Read 9 data bits
pub const CMD_READ: u8 = 0x0C;

// =============================================================================
// Frame Bits
// =============================================================================

/// CMDERR flag in the first response byte (1 = command accepted)
pub const CMDERR_OK: u8 = 0x02;

/// Data bit 8 position in the command/response byte
pub const DATA_BIT8: u8 = 0x01;

// =============================================================================
// STATUS Bits
// =============================================================================

/// EEPROM write cycle in progress
pub const STATUS_EEWA: u16 = 0x0010;

// =============================================================================
// Device Parameters (10 kΩ Click board variant)
// =============================================================================

/// Full-scale wiper position (257 taps: 0..=256)
pub const WIPER_MAX: u16 = 256;

/// End-to-end ladder resistance in ohms
pub const R_AB_OHMS: u32 = 10_000;

/// Typical wiper contact resistance in ohms
pub const R_WIPER_OHMS: u32 = 75;

// =============================================================================
// Timing
// =============================================================================

/// Interval between EEPROM write-active polls (ms)
pub const EEPROM_POLL_INTERVAL_MS: u32 = 1;

/// Build the command byte for a memory address and command
pub const fn command_byte(address: u8, command: u8) -> u8 {
    address << 4 | command
}
