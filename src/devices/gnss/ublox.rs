//! u-blox Receiver Configuration
//!
//! UBX-CFG-MSG commands selecting which NMEA sentences a u-blox receiver
//! (NEO-M8 family and compatible) emits. Needed when a module ships with
//! GGA/RMC/VTG disabled and only satellite chatter reaches the parser.
//!
//! UBX frame layout:
//!
//! ```text
//! [0xB5 0x62] [class] [id] [len lo] [len hi] payload... [ck_a] [ck_b]
//! ```

use crate::devices::gnss::GnssError;
use crate::platform::UartInterface;

/// NMEA standard message class in UBX-CFG-MSG
const NMEA_CLASS: u8 = 0xF0;

/// NMEA message id: GGA
const NMEA_GGA: u8 = 0x00;

/// NMEA message id: RMC
const NMEA_RMC: u8 = 0x04;

/// NMEA message id: VTG
const NMEA_VTG: u8 = 0x05;

/// Enable the sentences the fix-merging driver consumes
///
/// Sends UBX-CFG-MSG for GGA, RMC and VTG at rate 1 (every navigation
/// solution). Call once after opening the UART.
pub fn initialize<U: UartInterface>(uart: &mut U) -> Result<(), GnssError> {
    uart.write(&build_cfg_msg(NMEA_CLASS, NMEA_GGA, 1))?;
    uart.write(&build_cfg_msg(NMEA_CLASS, NMEA_RMC, 1))?;
    uart.write(&build_cfg_msg(NMEA_CLASS, NMEA_VTG, 1))?;
    uart.flush()?;
    Ok(())
}

/// Build a UBX-CFG-MSG frame setting one message's output rate
///
/// `rate` 0 disables the message, 1 emits it every solution, n every
/// n-th solution.
pub(crate) fn build_cfg_msg(msg_class: u8, msg_id: u8, rate: u8) -> [u8; 11] {
    let mut frame = [0u8; 11];

    // Sync characters
    frame[0] = 0xB5;
    frame[1] = 0x62;

    // CFG-MSG
    frame[2] = 0x06;
    frame[3] = 0x01;

    // Payload length, little endian
    frame[4] = 3;
    frame[5] = 0;

    frame[6] = msg_class;
    frame[7] = msg_id;
    frame[8] = rate;

    // Checksum covers class through payload
    let (ck_a, ck_b) = ubx_checksum(&frame[2..9]);
    frame[9] = ck_a;
    frame[10] = ck_b;

    frame
}

/// 8-bit Fletcher checksum as specified by the UBX protocol
pub(crate) fn ubx_checksum(data: &[u8]) -> (u8, u8) {
    let mut ck_a: u8 = 0;
    let mut ck_b: u8 = 0;
    for &byte in data {
        ck_a = ck_a.wrapping_add(byte);
        ck_b = ck_b.wrapping_add(ck_a);
    }
    (ck_a, ck_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockUart;

    #[test]
    fn test_ubx_checksum() {
        // CFG-MSG enabling GGA: class, id, length, payload
        let data = [0x06, 0x01, 0x03, 0x00, 0xF0, 0x00, 0x01];
        let (ck_a, ck_b) = ubx_checksum(&data);
        assert_eq!(ck_a, 0xFB);
        assert_eq!(ck_b, 0x10);
    }

    #[test]
    fn test_build_cfg_msg_gga() {
        let frame = build_cfg_msg(NMEA_CLASS, NMEA_GGA, 1);

        assert_eq!(&frame[..2], &[0xB5, 0x62]);
        assert_eq!(&frame[2..4], &[0x06, 0x01]);
        assert_eq!(&frame[4..6], &[3, 0]);
        assert_eq!(&frame[6..9], &[0xF0, 0x00, 1]);
        assert_eq!(&frame[9..], &[0xFB, 0x10]);
    }

    #[test]
    fn test_initialize_writes_three_frames() {
        let mut uart = MockUart::new(Default::default());
        initialize(&mut uart).unwrap();

        let tx = uart.tx_buffer();
        assert_eq!(tx.len(), 33);
        // One frame per sentence, in GGA/RMC/VTG order
        assert_eq!(tx[7], NMEA_GGA);
        assert_eq!(tx[18], NMEA_RMC);
        assert_eq!(tx[29], NMEA_VTG);
    }
}
