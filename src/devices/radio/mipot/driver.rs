//! Mipot Module Driver Implementation

use heapless::Vec;

use super::protocol::{self, Frame, FrameParser, ParserStats, MAX_PAYLOAD};
use crate::devices::radio::RadioError;
use crate::platform::{DelayInterface, UartInterface};

/// Bounded attempts while waiting for a command response
const MAX_RESPONSE_ATTEMPTS: u32 = 100;

/// Delay between response-wait attempts (ms)
const RESPONSE_POLL_INTERVAL_MS: u32 = 10;

/// UART drain chunk size
const DRAIN_CHUNK: usize = 32;

/// Module reboot time after a reset command (ms)
const RESET_SETTLE_MS: u32 = 200;

/// Network join procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JoinMode {
    /// Activation by personalization (session keys preprogrammed)
    Abp,
    /// Over-the-air activation
    Otaa,
}

impl JoinMode {
    fn code(self) -> u8 {
        match self {
            JoinMode::Abp => 0x00,
            JoinMode::Otaa => 0x01,
        }
    }
}

/// Network activation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActivationStatus {
    /// Not activated
    NotActivated,
    /// Join in progress
    Joining,
    /// Joined, session established
    Joined,
    /// MAC layer error during activation
    MacError,
}

/// Unsolicited module event, returned from [`Mipot::poll_indication`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indication {
    /// Join procedure finished (`true` = network joined)
    JoinCompleted { success: bool },
    /// Confirmed uplink finished, status 0 = acknowledged
    TxConfirmed { status: u8 },
    /// Unconfirmed uplink finished
    TxUnconfirmed { status: u8 },
    /// Downlink message received on the given port
    RxMessage {
        /// Application port
        port: u8,
        /// Message payload
        data: Vec<u8, MAX_PAYLOAD>,
    },
}

/// Mipot 32001409 LoRaWAN module driver (UART)
///
/// Commands are request/response over the binary frame protocol; network
/// events arrive as unsolicited indication frames collected through
/// [`poll_indication`](Self::poll_indication).
pub struct Mipot<U> {
    /// UART link to the module
    uart: U,

    /// Incremental frame parser
    parser: FrameParser,

    /// Indication received while waiting for a command response
    pending: Option<Frame>,
}

impl<U: UartInterface> Mipot<U> {
    /// Create a new module driver
    pub fn new(uart: U) -> Self {
        Self {
            uart,
            parser: FrameParser::new(),
            pending: None,
        }
    }

    /// Software-reset the module and wait for it to reboot
    pub fn reset<D: DelayInterface>(&mut self, delay: &mut D) -> Result<(), RadioError> {
        self.transact(protocol::CMD_RESET, &[], delay)?;
        delay.delay_ms(RESET_SETTLE_MS);
        crate::log_info!("Mipot module reset");
        Ok(())
    }

    /// Restore factory defaults (EEPROM parameters included)
    pub fn factory_reset<D: DelayInterface>(&mut self, delay: &mut D) -> Result<(), RadioError> {
        let response = self.transact(protocol::CMD_FACTORY_RESET, &[], delay)?;
        Self::check_status(&response)?;
        delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }

    /// Read the module firmware version
    pub fn firmware_version<D: DelayInterface>(&mut self, delay: &mut D) -> Result<u32, RadioError> {
        let response = self.transact(protocol::CMD_GET_FW_VERSION, &[], delay)?;
        Self::word(&response)
    }

    /// Read the module serial number
    pub fn serial_number<D: DelayInterface>(&mut self, delay: &mut D) -> Result<u32, RadioError> {
        let response = self.transact(protocol::CMD_GET_SERIAL_NO, &[], delay)?;
        Self::word(&response)
    }

    /// Read `len` bytes of module EEPROM starting at `address`
    pub fn eeprom_read<D: DelayInterface>(
        &mut self,
        address: u8,
        len: u8,
        delay: &mut D,
    ) -> Result<Vec<u8, MAX_PAYLOAD>, RadioError> {
        let response = self.transact(protocol::CMD_EEPROM_READ, &[address, len], delay)?;
        Ok(response.payload)
    }

    /// Write module EEPROM starting at `address`
    pub fn eeprom_write<D: DelayInterface>(
        &mut self,
        address: u8,
        data: &[u8],
        delay: &mut D,
    ) -> Result<(), RadioError> {
        if data.len() + 1 > MAX_PAYLOAD {
            return Err(RadioError::PayloadTooLarge);
        }
        let mut payload: Vec<u8, MAX_PAYLOAD> = Vec::new();
        let _ = payload.push(address);
        let _ = payload.extend_from_slice(data);
        let response = self.transact(protocol::CMD_EEPROM_WRITE, &payload, delay)?;
        Self::check_status(&response)
    }

    /// Program the 16-byte application key
    pub fn set_app_key<D: DelayInterface>(
        &mut self,
        key: &[u8; 16],
        delay: &mut D,
    ) -> Result<(), RadioError> {
        let response = self.transact(protocol::CMD_SET_APP_KEY, key, delay)?;
        Self::check_status(&response)
    }

    /// Start a network join; completion arrives as
    /// [`Indication::JoinCompleted`]
    pub fn join<D: DelayInterface>(
        &mut self,
        mode: JoinMode,
        delay: &mut D,
    ) -> Result<(), RadioError> {
        let response = self.transact(protocol::CMD_JOIN, &[mode.code()], delay)?;
        Self::check_status(&response)
    }

    /// Query the network activation state
    pub fn activation_status<D: DelayInterface>(
        &mut self,
        delay: &mut D,
    ) -> Result<ActivationStatus, RadioError> {
        let response = self.transact(protocol::CMD_GET_ACTIVATION_STATUS, &[], delay)?;
        match response.payload.first() {
            Some(0x00) => Ok(ActivationStatus::NotActivated),
            Some(0x01) => Ok(ActivationStatus::Joining),
            Some(0x02) => Ok(ActivationStatus::Joined),
            Some(0x03) => Ok(ActivationStatus::MacError),
            _ => Err(RadioError::Protocol),
        }
    }

    /// Query the MAC session status byte
    pub fn session_status<D: DelayInterface>(&mut self, delay: &mut D) -> Result<u8, RadioError> {
        let response = self.transact(protocol::CMD_GET_SESSION_STATUS, &[], delay)?;
        response.payload.first().copied().ok_or(RadioError::Protocol)
    }

    /// Queue an unconfirmed uplink on the given port
    pub fn send_unconfirmed<D: DelayInterface>(
        &mut self,
        port: u8,
        data: &[u8],
        delay: &mut D,
    ) -> Result<(), RadioError> {
        self.send_message(0x00, port, data, delay)
    }

    /// Queue a confirmed uplink on the given port
    pub fn send_confirmed<D: DelayInterface>(
        &mut self,
        port: u8,
        data: &[u8],
        delay: &mut D,
    ) -> Result<(), RadioError> {
        self.send_message(0x01, port, data, delay)
    }

    /// Drain the UART and return the next unsolicited indication, if any
    ///
    /// Returned-value rendition of the original callback interface: the
    /// caller owns the polling loop.
    pub fn poll_indication(&mut self) -> Result<Option<Indication>, RadioError> {
        if let Some(frame) = self.pending.take() {
            return Ok(Self::classify_indication(&frame));
        }

        let mut buf = [0u8; DRAIN_CHUNK];
        loop {
            let count = self.uart.read(&mut buf)?;
            if count == 0 {
                return Ok(None);
            }
            for &byte in &buf[..count] {
                if let Some(frame) = self.parser.push_byte(byte) {
                    return Ok(Self::classify_indication(&frame));
                }
            }
        }
    }

    /// Get frame parser statistics
    pub fn parser_stats(&self) -> ParserStats {
        self.parser.stats()
    }

    // ========================================================================
    // Command plumbing
    // ========================================================================

    fn send_message<D: DelayInterface>(
        &mut self,
        options: u8,
        port: u8,
        data: &[u8],
        delay: &mut D,
    ) -> Result<(), RadioError> {
        if data.len() + 2 > MAX_PAYLOAD {
            return Err(RadioError::PayloadTooLarge);
        }
        let mut payload: Vec<u8, MAX_PAYLOAD> = Vec::new();
        let _ = payload.push(options);
        let _ = payload.push(port);
        let _ = payload.extend_from_slice(data);
        let response = self.transact(protocol::CMD_TX_MSG, &payload, delay)?;
        Self::check_status(&response)
    }

    /// Send a request and wait for its response with bounded polling
    ///
    /// Indications arriving in the meantime are stashed for
    /// [`poll_indication`](Self::poll_indication); any other frame counts
    /// as a protocol error.
    fn transact<D: DelayInterface>(
        &mut self,
        command: u8,
        payload: &[u8],
        delay: &mut D,
    ) -> Result<Frame, RadioError> {
        let frame = protocol::encode(command, payload).ok_or(RadioError::PayloadTooLarge)?;
        self.uart.write(&frame)?;
        self.uart.flush()?;

        let mut buf = [0u8; DRAIN_CHUNK];
        for _ in 0..MAX_RESPONSE_ATTEMPTS {
            loop {
                let count = self.uart.read(&mut buf)?;
                if count == 0 {
                    break;
                }
                for &byte in &buf[..count] {
                    if let Some(received) = self.parser.push_byte(byte) {
                        if received.is_response_to(command) {
                            return Ok(received);
                        }
                        if received.command & protocol::RESPONSE_FLAG == 0 {
                            // Unsolicited indication interleaved with the
                            // response; keep the most recent one
                            self.pending = Some(received);
                        } else {
                            crate::log_warn!(
                                "Mipot unexpected response {:#x} to command {:#x}",
                                received.command,
                                command
                            );
                            return Err(RadioError::Protocol);
                        }
                    }
                }
            }
            delay.delay_ms(RESPONSE_POLL_INTERVAL_MS);
        }
        Err(RadioError::Timeout)
    }

    fn classify_indication(frame: &Frame) -> Option<Indication> {
        match frame.command {
            protocol::CMD_JOIN_IND => Some(Indication::JoinCompleted {
                success: frame.payload.first() == Some(&0x00),
            }),
            protocol::CMD_TX_MSG_CONFIRMED_IND => Some(Indication::TxConfirmed {
                status: frame.payload.first().copied().unwrap_or(0xFF),
            }),
            protocol::CMD_TX_MSG_UNCONFIRMED_IND => Some(Indication::TxUnconfirmed {
                status: frame.payload.first().copied().unwrap_or(0xFF),
            }),
            protocol::CMD_RX_MSG_IND => {
                let port = *frame.payload.first()?;
                let mut data = Vec::new();
                let _ = data.extend_from_slice(&frame.payload[1..]);
                Some(Indication::RxMessage { port, data })
            }
            _ => None,
        }
    }

    fn check_status(response: &Frame) -> Result<(), RadioError> {
        match response.payload.first() {
            Some(0x00) | None => Ok(()),
            Some(&code) => Err(RadioError::Status(code)),
        }
    }

    fn word(response: &Frame) -> Result<u32, RadioError> {
        let bytes: [u8; 4] = response.payload[..]
            .try_into()
            .map_err(|_| RadioError::Protocol)?;
        Ok(u32::from_le_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{MockDelay, MockUart};

    fn driver() -> Mipot<MockUart> {
        Mipot::new(MockUart::new(Default::default()))
    }

    fn response(command: u8, payload: &[u8]) -> std::vec::Vec<u8> {
        protocol::encode(command | protocol::RESPONSE_FLAG, payload)
            .unwrap()
            .to_vec()
    }

    #[test]
    fn test_firmware_version_round_trip() {
        let mut lora = driver();
        let mut delay = MockDelay::new();
        lora.uart
            .inject_rx_data(&response(protocol::CMD_GET_FW_VERSION, &[0x04, 0x03, 0x02, 0x01]));

        let version = lora.firmware_version(&mut delay).unwrap();
        assert_eq!(version, 0x01020304);

        // Request on the wire: [0xAA, 0x34, 0x00, ck]
        assert_eq!(lora.uart.tx_buffer(), vec![0xAA, 0x34, 0x00, 0x22]);
    }

    #[test]
    fn test_join_and_indication() {
        let mut lora = driver();
        let mut delay = MockDelay::new();
        lora.uart.inject_rx_data(&response(protocol::CMD_JOIN, &[0x00]));

        lora.join(JoinMode::Otaa, &mut delay).unwrap();

        // Join request carries the OTAA mode byte
        let tx = lora.uart.tx_buffer();
        assert_eq!(tx[1], protocol::CMD_JOIN);
        assert_eq!(tx[3], 0x01);

        // Later the join indication arrives
        lora.uart
            .inject_rx_data(&protocol::encode(protocol::CMD_JOIN_IND, &[0x00]).unwrap());
        assert_eq!(
            lora.poll_indication().unwrap(),
            Some(Indication::JoinCompleted { success: true })
        );
        // Queue drained
        assert_eq!(lora.poll_indication().unwrap(), None);
    }

    #[test]
    fn test_command_rejected_status() {
        let mut lora = driver();
        let mut delay = MockDelay::new();
        lora.uart.inject_rx_data(&response(protocol::CMD_JOIN, &[0x02]));

        assert_eq!(
            lora.join(JoinMode::Abp, &mut delay),
            Err(RadioError::Status(0x02))
        );
    }

    #[test]
    fn test_response_timeout() {
        let mut lora = driver();
        let mut delay = MockDelay::new();

        assert_eq!(
            lora.firmware_version(&mut delay),
            Err(RadioError::Timeout)
        );
        // One backoff delay per attempt
        assert_eq!(
            delay.elapsed_us(),
            u64::from(MAX_RESPONSE_ATTEMPTS) * 10_000
        );
    }

    #[test]
    fn test_send_unconfirmed_framing() {
        let mut lora = driver();
        let mut delay = MockDelay::new();
        lora.uart
            .inject_rx_data(&response(protocol::CMD_TX_MSG, &[0x00]));

        lora.send_unconfirmed(7, &[0xCA, 0xFE], &mut delay).unwrap();

        let tx = lora.uart.tx_buffer();
        assert_eq!(tx[1], protocol::CMD_TX_MSG);
        assert_eq!(tx[2], 4); // options + port + 2 data bytes
        assert_eq!(&tx[3..7], &[0x00, 0x07, 0xCA, 0xFE]);
    }

    #[test]
    fn test_indication_stashed_during_transact() {
        let mut lora = driver();
        let mut delay = MockDelay::new();

        // Downlink indication interleaved before the TX response
        let mut rx = protocol::encode(protocol::CMD_RX_MSG_IND, &[0x01, 0x55]).unwrap().to_vec();
        rx.extend_from_slice(&response(protocol::CMD_TX_MSG, &[0x00]));
        lora.uart.inject_rx_data(&rx);

        lora.send_confirmed(1, &[0x00], &mut delay).unwrap();

        let indication = lora.poll_indication().unwrap().unwrap();
        match indication {
            Indication::RxMessage { port, data } => {
                assert_eq!(port, 0x01);
                assert_eq!(&data[..], &[0x55]);
            }
            other => panic!("unexpected indication {:?}", other),
        }
    }

    #[test]
    fn test_rx_message_indication() {
        let mut lora = driver();
        lora.uart.inject_rx_data(
            &protocol::encode(protocol::CMD_RX_MSG_IND, &[0x0A, 0x01, 0x02, 0x03]).unwrap(),
        );

        match lora.poll_indication().unwrap().unwrap() {
            Indication::RxMessage { port, data } => {
                assert_eq!(port, 0x0A);
                assert_eq!(&data[..], &[0x01, 0x02, 0x03]);
            }
            other => panic!("unexpected indication {:?}", other),
        }
    }

    #[test]
    fn test_eeprom_read_write() {
        let mut lora = driver();
        let mut delay = MockDelay::new();

        lora.uart
            .inject_rx_data(&response(protocol::CMD_EEPROM_READ, &[0x11, 0x22]));
        let data = lora.eeprom_read(0x10, 2, &mut delay).unwrap();
        assert_eq!(&data[..], &[0x11, 0x22]);

        lora.uart.clear_tx_buffer();
        lora.uart
            .inject_rx_data(&response(protocol::CMD_EEPROM_WRITE, &[0x00]));
        lora.eeprom_write(0x10, &[0x33], &mut delay).unwrap();
        let tx = lora.uart.tx_buffer();
        assert_eq!(tx[2], 2); // address + 1 data byte
        assert_eq!(&tx[3..5], &[0x10, 0x33]);
    }
}
