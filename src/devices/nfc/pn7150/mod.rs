//! PN7150 NFC Controller Driver
//!
//! Driver for the NXP PN7150 NFC controller (I2C plus IRQ and VEN
//! GPIOs). The controller speaks NCI over length-prefixed I2C frames;
//! the IRQ line signals pending read data and VEN gates chip power.
//!
//! ## Features
//!
//! - Power control through VEN, including hard reset
//! - NCI core bring-up (CORE_RESET + CORE_INIT)
//! - Passive poll discovery on NFC-A/B/F
//! - Tag activation parsing (protocol, technology, NFCID)
//! - Raw frame exchange with the activated tag (e.g. T2T READ)
//!
//! ## Usage
//!
//! ```ignore
//! use mikroclick::devices::nfc::pn7150::Pn7150;
//!
//! let mut nfc = Pn7150::new(i2c, irq_pin, ven_pin);
//! nfc.init(&mut delay)?;
//! nfc.start_discovery(&mut delay)?;
//!
//! let tag = nfc.wait_for_tag(5_000, &mut delay)?;
//! let mut page = [0u8; 16];
//! let len = nfc.data_exchange(&[0x30, 0x00], &mut page, &mut delay)?;
//! nfc.deactivate(&mut delay)?;
//! ```

mod driver;
pub mod nci;

pub use driver::{Pn7150, RfProtocol, RfTechnology, TagInfo};
