//! Mipot Host-Controller Frame Protocol
//!
//! Every exchange with the module is a length-prefixed binary frame:
//!
//! ```text
//! [0xAA] [command] [length] [payload × length] [checksum]
//! ```
//!
//! The checksum makes the byte sum of the whole frame zero modulo 256.
//! A response carries the request's command code with bit 7 set;
//! unsolicited indications use their own command codes.

use heapless::Vec;

/// Frame header byte
pub const FRAME_HEADER: u8 = 0xAA;

/// Response frames echo the request command with this bit set
pub const RESPONSE_FLAG: u8 = 0x80;

/// Largest payload carried in either direction
pub const MAX_PAYLOAD: usize = 128;

// =============================================================================
// Command Codes
// =============================================================================

/// Module software reset
pub const CMD_RESET: u8 = 0x30;

/// Restore factory defaults
pub const CMD_FACTORY_RESET: u8 = 0x31;

/// Write module EEPROM
pub const CMD_EEPROM_WRITE: u8 = 0x32;

/// Read module EEPROM
pub const CMD_EEPROM_READ: u8 = 0x33;

/// Firmware version query
pub const CMD_GET_FW_VERSION: u8 = 0x34;

/// Serial number query
pub const CMD_GET_SERIAL_NO: u8 = 0x35;

/// Start a network join
pub const CMD_JOIN: u8 = 0x40;

/// Unsolicited: join procedure finished
pub const CMD_JOIN_IND: u8 = 0x41;

/// Network activation state query
pub const CMD_GET_ACTIVATION_STATUS: u8 = 0x42;

/// Program the application key
pub const CMD_SET_APP_KEY: u8 = 0x43;

/// Queue an uplink message
pub const CMD_TX_MSG: u8 = 0x46;

/// Unsolicited: confirmed uplink completed
pub const CMD_TX_MSG_CONFIRMED_IND: u8 = 0x47;

/// Unsolicited: unconfirmed uplink completed
pub const CMD_TX_MSG_UNCONFIRMED_IND: u8 = 0x48;

/// Unsolicited: downlink message received
pub const CMD_RX_MSG_IND: u8 = 0x49;

/// Session status query
pub const CMD_GET_SESSION_STATUS: u8 = 0x4A;

/// One parsed frame (response or indication)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Command code as received
    pub command: u8,
    /// Payload bytes
    pub payload: Vec<u8, MAX_PAYLOAD>,
}

impl Frame {
    /// Whether this frame is the response to the given request command
    pub fn is_response_to(&self, request: u8) -> bool {
        self.command == request | RESPONSE_FLAG
    }
}

/// Checksum over header, command, length and payload: the value that
/// brings the frame's byte sum to zero modulo 256
pub fn checksum(command: u8, payload: &[u8]) -> u8 {
    let mut sum = FRAME_HEADER
        .wrapping_add(command)
        .wrapping_add(payload.len() as u8);
    for &byte in payload {
        sum = sum.wrapping_add(byte);
    }
    sum.wrapping_neg()
}

/// Encode a complete frame
///
/// Returns `None` when the payload exceeds [`MAX_PAYLOAD`].
pub fn encode(command: u8, payload: &[u8]) -> Option<Vec<u8, { MAX_PAYLOAD + 4 }>> {
    if payload.len() > MAX_PAYLOAD {
        return None;
    }
    let mut frame = Vec::new();
    // Capacity checked above; pushes cannot fail
    let _ = frame.push(FRAME_HEADER);
    let _ = frame.push(command);
    let _ = frame.push(payload.len() as u8);
    let _ = frame.extend_from_slice(payload);
    let _ = frame.push(checksum(command, payload));
    Some(frame)
}

/// Parser statistics for monitoring and diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParserStats {
    /// Complete frames delivered
    pub frames_received: u32,
    /// Frames dropped for a bad checksum
    pub checksum_errors: u32,
    /// Frames dropped because the announced length exceeded capacity
    pub overruns: u32,
}

/// Parser state between bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Hunting for the header byte
    Idle,
    /// Header seen, expecting the command code
    Command,
    /// Expecting the payload length
    Length,
    /// Collecting payload bytes
    Payload,
    /// Expecting the checksum
    Checksum,
}

/// Incremental byte-fed frame parser
///
/// Feed received bytes one at a time; a complete, checksum-verified frame
/// is returned from the byte that finishes it. Garbage between frames is
/// skipped while hunting for the header byte.
pub struct FrameParser {
    state: State,
    command: u8,
    length: usize,
    payload: Vec<u8, MAX_PAYLOAD>,
    stats: ParserStats,
}

impl FrameParser {
    /// Create an idle parser
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            command: 0,
            length: 0,
            payload: Vec::new(),
            stats: ParserStats::default(),
        }
    }

    /// Get parser statistics
    pub fn stats(&self) -> ParserStats {
        self.stats
    }

    /// Feed one received byte
    pub fn push_byte(&mut self, byte: u8) -> Option<Frame> {
        match self.state {
            State::Idle => {
                if byte == FRAME_HEADER {
                    self.state = State::Command;
                }
                None
            }
            State::Command => {
                self.command = byte;
                self.state = State::Length;
                None
            }
            State::Length => {
                let length = byte as usize;
                if length > MAX_PAYLOAD {
                    self.stats.overruns += 1;
                    self.state = State::Idle;
                    return None;
                }
                self.length = length;
                self.payload.clear();
                self.state = if length == 0 {
                    State::Checksum
                } else {
                    State::Payload
                };
                None
            }
            State::Payload => {
                // Length bounded above; push cannot fail
                let _ = self.payload.push(byte);
                if self.payload.len() == self.length {
                    self.state = State::Checksum;
                }
                None
            }
            State::Checksum => {
                self.state = State::Idle;
                if byte != checksum(self.command, &self.payload) {
                    self.stats.checksum_errors += 1;
                    crate::log_warn!("Mipot frame checksum mismatch (cmd {:#x})", self.command);
                    return None;
                }
                self.stats.frames_received += 1;
                Some(Frame {
                    command: self.command,
                    payload: core::mem::take(&mut self.payload),
                })
            }
        }
    }
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}
