//! PN7150 Driver Implementation

use heapless::Vec;

use super::nci::{self, Packet};
use crate::devices::nfc::NfcError;
use crate::platform::{DelayInterface, GpioInterface, I2cInterface};

/// VEN settle time after a power transition (ms)
const VEN_SETTLE_MS: u32 = 10;

/// Bounded attempts while waiting for the IRQ line before a response
const MAX_RESPONSE_ATTEMPTS: u32 = 100;

/// IRQ poll interval (ms)
const IRQ_POLL_INTERVAL_MS: u32 = 1;

/// Static RF connection for tag data exchange
const STATIC_RF_CONN_ID: u8 = 0x00;

/// RF protocol activated on a discovered tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RfProtocol {
    /// Type 1 tag (Topaz)
    T1t,
    /// Type 2 tag (MIFARE Ultralight family)
    T2t,
    /// Type 3 tag (FeliCa)
    T3t,
    /// ISO-DEP (ISO 14443-4)
    IsoDep,
    /// NFC-DEP (peer to peer)
    NfcDep,
    /// Protocol code not understood by this driver
    Unknown(u8),
}

impl RfProtocol {
    fn from_code(code: u8) -> Self {
        match code {
            0x01 => RfProtocol::T1t,
            0x02 => RfProtocol::T2t,
            0x03 => RfProtocol::T3t,
            0x04 => RfProtocol::IsoDep,
            0x05 => RfProtocol::NfcDep,
            other => RfProtocol::Unknown(other),
        }
    }
}

/// RF technology the tag was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RfTechnology {
    /// NFC-A (ISO 14443 type A)
    NfcA,
    /// NFC-B (ISO 14443 type B)
    NfcB,
    /// NFC-F (FeliCa)
    NfcF,
    /// Technology/mode code not understood by this driver
    Unknown(u8),
}

impl RfTechnology {
    fn from_code(code: u8) -> Self {
        match code {
            nci::NFC_A_PASSIVE_POLL => RfTechnology::NfcA,
            nci::NFC_B_PASSIVE_POLL => RfTechnology::NfcB,
            nci::NFC_F_PASSIVE_POLL => RfTechnology::NfcF,
            other => RfTechnology::Unknown(other),
        }
    }
}

/// Activated tag description from RF_INTF_ACTIVATED_NTF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    /// Discovery identifier assigned by the controller
    pub discovery_id: u8,
    /// Activated RF protocol
    pub protocol: RfProtocol,
    /// RF technology and mode
    pub technology: RfTechnology,
    /// Tag identifier (NFCID1 for NFC-A, NFCID0 for NFC-B)
    pub nfcid: Vec<u8, 10>,
}

/// PN7150 NFC controller driver (I2C + IRQ/VEN GPIOs)
///
/// The controller signals pending data by raising the IRQ line; every
/// read is header-first, then payload. VEN gates chip power.
pub struct Pn7150<I2C, IRQ, VEN> {
    /// I2C bus
    i2c: I2C,

    /// Data-ready interrupt input
    irq: IRQ,

    /// Power enable output
    ven: VEN,

    /// Initialization state
    initialized: bool,

    /// NCI version reported by CORE_RESET
    nci_version: u8,
}

impl<I2C, IRQ, VEN> Pn7150<I2C, IRQ, VEN>
where
    I2C: I2cInterface,
    IRQ: GpioInterface,
    VEN: GpioInterface,
{
    /// Create a new PN7150 driver
    pub fn new(i2c: I2C, irq: IRQ, ven: VEN) -> Self {
        Self {
            i2c,
            irq,
            ven,
            initialized: false,
            nci_version: 0,
        }
    }

    /// Raise VEN and let the chip boot
    pub fn power_on<D: DelayInterface>(&mut self, delay: &mut D) -> Result<(), NfcError> {
        self.ven.set_high()?;
        delay.delay_ms(VEN_SETTLE_MS);
        Ok(())
    }

    /// Drop VEN, powering the chip off
    pub fn power_off(&mut self) -> Result<(), NfcError> {
        self.ven.set_low()?;
        self.initialized = false;
        Ok(())
    }

    /// Toggle VEN for a full hardware reset
    pub fn hard_reset<D: DelayInterface>(&mut self, delay: &mut D) -> Result<(), NfcError> {
        self.ven.set_low()?;
        delay.delay_ms(VEN_SETTLE_MS);
        self.ven.set_high()?;
        delay.delay_ms(VEN_SETTLE_MS);
        self.initialized = false;
        Ok(())
    }

    /// Power the chip and run the NCI core bring-up
    ///
    /// CORE_RESET clears the controller configuration; its response carries
    /// the NCI version, kept for diagnostics. CORE_INIT completes the
    /// handshake.
    pub fn init<D: DelayInterface>(&mut self, delay: &mut D) -> Result<(), NfcError> {
        self.power_on(delay)?;

        // 0x01 = reset configuration to defaults
        let reset = self.transact(nci::GID_CORE, nci::OID_CORE_RESET, &[0x01], delay)?;
        self.nci_version = reset.payload.get(1).copied().unwrap_or(0);

        let _init = self.transact(nci::GID_CORE, nci::OID_CORE_INIT, &[], delay)?;
        crate::log_info!(
            "PN7150 initialized, NCI version {:#x} ({} init bytes)",
            self.nci_version,
            _init.payload.len()
        );

        self.initialized = true;
        Ok(())
    }

    /// Check if driver is initialized
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// NCI version reported by the controller (valid after `init`)
    pub fn nci_version(&self) -> u8 {
        self.nci_version
    }

    /// Start passive polling on NFC-A, NFC-B and NFC-F
    pub fn start_discovery<D: DelayInterface>(&mut self, delay: &mut D) -> Result<(), NfcError> {
        if !self.initialized {
            return Err(NfcError::NotInitialized);
        }
        // [count, (technology+mode, frequency) pairs]
        let configs = [
            0x03,
            nci::NFC_A_PASSIVE_POLL,
            0x01,
            nci::NFC_B_PASSIVE_POLL,
            0x01,
            nci::NFC_F_PASSIVE_POLL,
            0x01,
        ];
        self.transact(nci::GID_RF, nci::OID_RF_DISCOVER, &configs, delay)?;
        Ok(())
    }

    /// Wait up to `timeout_ms` for a tag to enter the field
    ///
    /// Polls the IRQ line once per millisecond until an
    /// RF_INTF_ACTIVATED_NTF arrives; unrelated notifications are skipped.
    pub fn wait_for_tag<D: DelayInterface>(
        &mut self,
        timeout_ms: u32,
        delay: &mut D,
    ) -> Result<TagInfo, NfcError> {
        if !self.initialized {
            return Err(NfcError::NotInitialized);
        }
        for _ in 0..timeout_ms {
            if !self.irq.read() {
                delay.delay_ms(IRQ_POLL_INTERVAL_MS);
                continue;
            }
            let packet = self.read_packet()?;
            if packet.is_control(nci::MT_NTF, nci::GID_RF, nci::OID_RF_INTF_ACTIVATED) {
                return Self::parse_activation(&packet);
            }
            crate::log_debug!(
                "PN7150 skipping packet {:#x}/{:#x} while waiting for tag",
                packet.header[0],
                packet.header[1]
            );
        }
        Err(NfcError::Timeout)
    }

    /// Exchange one frame with the activated tag on RF connection 0
    ///
    /// Returns the number of response bytes copied into `response`.
    /// CORE_CONN_CREDITS_NTF packets interleaved with the answer are
    /// consumed silently.
    pub fn data_exchange<D: DelayInterface>(
        &mut self,
        data: &[u8],
        response: &mut [u8],
        delay: &mut D,
    ) -> Result<usize, NfcError> {
        if !self.initialized {
            return Err(NfcError::NotInitialized);
        }
        let packet = Packet::data(STATIC_RF_CONN_ID, data).ok_or(NfcError::PayloadTooLarge)?;
        self.write_packet(&packet)?;

        for _ in 0..MAX_RESPONSE_ATTEMPTS {
            if !self.irq.read() {
                delay.delay_ms(IRQ_POLL_INTERVAL_MS);
                continue;
            }
            let received = self.read_packet()?;
            if received.is_data() {
                let len = received.payload.len();
                if len > response.len() {
                    return Err(NfcError::Protocol);
                }
                response[..len].copy_from_slice(&received.payload);
                return Ok(len);
            }
            if received.is_control(nci::MT_NTF, nci::GID_CORE, nci::OID_CORE_CONN_CREDITS) {
                continue;
            }
            crate::log_warn!(
                "PN7150 unexpected control packet {:#x}/{:#x} during data exchange",
                received.header[0],
                received.header[1]
            );
            return Err(NfcError::Protocol);
        }
        Err(NfcError::Timeout)
    }

    /// Deactivate the RF interface back to idle
    pub fn deactivate<D: DelayInterface>(&mut self, delay: &mut D) -> Result<(), NfcError> {
        if !self.initialized {
            return Err(NfcError::NotInitialized);
        }
        // 0x00 = idle mode
        self.transact(nci::GID_RF, nci::OID_RF_DEACTIVATE, &[0x00], delay)?;
        Ok(())
    }

    // ========================================================================
    // NCI plumbing
    // ========================================================================

    /// Send a command and wait for its response, skipping notifications
    fn transact<D: DelayInterface>(
        &mut self,
        gid: u8,
        oid: u8,
        payload: &[u8],
        delay: &mut D,
    ) -> Result<Packet, NfcError> {
        let command = Packet::command(gid, oid, payload).ok_or(NfcError::PayloadTooLarge)?;
        self.write_packet(&command)?;

        for _ in 0..MAX_RESPONSE_ATTEMPTS {
            if !self.irq.read() {
                delay.delay_ms(IRQ_POLL_INTERVAL_MS);
                continue;
            }
            let received = self.read_packet()?;
            if received.is_control(nci::MT_RSP, gid, oid) {
                // First payload byte of every response is the NCI status
                match received.payload.first() {
                    Some(&nci::STATUS_OK) => return Ok(received),
                    Some(&code) => return Err(NfcError::Status(code)),
                    None => return Err(NfcError::Protocol),
                }
            }
            if received.mt() == nci::MT_NTF {
                continue;
            }
            crate::log_warn!(
                "PN7150 unexpected packet {:#x}/{:#x}, expected response {:#x}/{:#x}",
                received.header[0],
                received.header[1],
                gid,
                oid
            );
            return Err(NfcError::Protocol);
        }
        Err(NfcError::Timeout)
    }

    /// Header-first read: 3 header bytes, then the announced payload
    fn read_packet(&mut self) -> Result<Packet, NfcError> {
        let mut header = [0u8; nci::HEADER_LEN];
        self.i2c.read(nci::PN7150_ADDR, &mut header)?;

        let len = header[2] as usize;
        let mut payload: Vec<u8, { nci::MAX_PAYLOAD }> = Vec::new();
        if len > 0 {
            // Length byte cannot exceed the capacity
            let _ = payload.resize(len, 0);
            self.i2c.read(nci::PN7150_ADDR, &mut payload)?;
        }
        Ok(Packet { header, payload })
    }

    fn write_packet(&mut self, packet: &Packet) -> Result<(), NfcError> {
        let mut frame: Vec<u8, { nci::HEADER_LEN + nci::MAX_PAYLOAD }> = Vec::new();
        let _ = frame.extend_from_slice(&packet.header);
        let _ = frame.extend_from_slice(&packet.payload);
        self.i2c.write(nci::PN7150_ADDR, &frame)?;
        Ok(())
    }

    /// Decode RF_INTF_ACTIVATED_NTF into a tag description
    ///
    /// Payload layout: discovery id, RF interface, protocol, technology and
    /// mode, max payload, credits, tech parameter length, parameters.
    fn parse_activation(packet: &Packet) -> Result<TagInfo, NfcError> {
        let p = &packet.payload;
        if p.len() < 7 {
            return Err(NfcError::Protocol);
        }
        let technology = RfTechnology::from_code(p[3]);
        let params_len = p[6] as usize;
        let params = p.get(7..7 + params_len).ok_or(NfcError::Protocol)?;

        let mut nfcid: Vec<u8, 10> = Vec::new();
        match technology {
            RfTechnology::NfcA => {
                // SENS_RES(2), NFCID1 length, NFCID1
                if let Some(&id_len) = params.get(2) {
                    if let Some(id) = params.get(3..3 + id_len as usize) {
                        let _ = nfcid.extend_from_slice(id);
                    }
                }
            }
            RfTechnology::NfcB => {
                // SENSB_RES: first byte is its length, NFCID0 follows
                if let Some(id) = params.get(1..5) {
                    let _ = nfcid.extend_from_slice(id);
                }
            }
            _ => {}
        }

        Ok(TagInfo {
            discovery_id: p[0],
            protocol: RfProtocol::from_code(p[2]),
            technology,
            nfcid,
        })
    }
}
