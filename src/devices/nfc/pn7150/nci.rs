//! NCI Packet Framing
//!
//! NFC Controller Interface framing as carried over the PN7150's I2C
//! link: a 3-byte header followed by up to 255 payload bytes.
//!
//! ```text
//! control: [mt | pbf | gid] [oid] [len] payload...
//! data:    [conn_id]        [rfu] [len] payload...
//! ```

use heapless::Vec;

/// I2C slave address
pub const PN7150_ADDR: u8 = 0x28;

/// Header size in bytes
pub const HEADER_LEN: usize = 3;

/// Largest NCI payload
pub const MAX_PAYLOAD: usize = 255;

// =============================================================================
// Header Fields
// =============================================================================

/// Message type: data packet
pub const MT_DATA: u8 = 0x00;

/// Message type: command (host to controller)
pub const MT_CMD: u8 = 0x20;

/// Message type: response
pub const MT_RSP: u8 = 0x40;

/// Message type: notification
pub const MT_NTF: u8 = 0x60;

/// Message type mask (header byte 0, bits 7:5)
pub const MT_MASK: u8 = 0xE0;

/// Group identifier mask (header byte 0, bits 3:0)
pub const GID_MASK: u8 = 0x0F;

/// Opcode identifier mask (header byte 1, bits 5:0)
pub const OID_MASK: u8 = 0x3F;

/// Core group
pub const GID_CORE: u8 = 0x00;

/// RF management group
pub const GID_RF: u8 = 0x01;

// =============================================================================
// Opcodes
// =============================================================================

/// CORE_RESET
pub const OID_CORE_RESET: u8 = 0x00;

/// CORE_INIT
pub const OID_CORE_INIT: u8 = 0x01;

/// CORE_CONN_CREDITS (notification only)
pub const OID_CORE_CONN_CREDITS: u8 = 0x06;

/// RF_DISCOVER
pub const OID_RF_DISCOVER: u8 = 0x03;

/// RF_INTF_ACTIVATED (notification only)
pub const OID_RF_INTF_ACTIVATED: u8 = 0x05;

/// RF_DEACTIVATE
pub const OID_RF_DEACTIVATE: u8 = 0x06;

/// Generic NCI status: success
pub const STATUS_OK: u8 = 0x00;

// =============================================================================
// RF Technology and Mode Codes
// =============================================================================

/// NFC-A passive poll mode
pub const NFC_A_PASSIVE_POLL: u8 = 0x00;

/// NFC-B passive poll mode
pub const NFC_B_PASSIVE_POLL: u8 = 0x01;

/// NFC-F passive poll mode
pub const NFC_F_PASSIVE_POLL: u8 = 0x02;

/// One NCI packet, control or data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Raw 3-byte header
    pub header: [u8; HEADER_LEN],
    /// Payload bytes
    pub payload: Vec<u8, MAX_PAYLOAD>,
}

impl Packet {
    /// Build a control command packet
    ///
    /// Returns `None` when the payload exceeds [`MAX_PAYLOAD`].
    pub fn command(gid: u8, oid: u8, payload: &[u8]) -> Option<Self> {
        if payload.len() > MAX_PAYLOAD {
            return None;
        }
        let mut body = Vec::new();
        let _ = body.extend_from_slice(payload);
        Some(Self {
            header: [MT_CMD | (gid & GID_MASK), oid & OID_MASK, payload.len() as u8],
            payload: body,
        })
    }

    /// Build a data packet on the given logical connection
    pub fn data(conn_id: u8, payload: &[u8]) -> Option<Self> {
        if payload.len() > MAX_PAYLOAD {
            return None;
        }
        let mut body = Vec::new();
        let _ = body.extend_from_slice(payload);
        Some(Self {
            header: [MT_DATA | (conn_id & GID_MASK), 0x00, payload.len() as u8],
            payload: body,
        })
    }

    /// Message type field
    pub fn mt(&self) -> u8 {
        self.header[0] & MT_MASK
    }

    /// Group identifier (control packets)
    pub fn gid(&self) -> u8 {
        self.header[0] & GID_MASK
    }

    /// Opcode identifier (control packets)
    pub fn oid(&self) -> u8 {
        self.header[1] & OID_MASK
    }

    /// Whether this is a control packet with the given type, group and opcode
    pub fn is_control(&self, mt: u8, gid: u8, oid: u8) -> bool {
        self.mt() == mt && self.gid() == gid && self.oid() == oid
    }

    /// Whether this is a data packet
    pub fn is_data(&self) -> bool {
        self.mt() == MT_DATA
    }
}
