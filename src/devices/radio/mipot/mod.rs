//! Mipot 32001409 LoRaWAN Module Driver
//!
//! Driver for the Mipot 32001409 dual-core LoRaWAN module (UART). The
//! host talks to the module through a binary frame protocol; network
//! events such as join completion and downlink messages arrive as
//! unsolicited indication frames.
//!
//! ## Features
//!
//! - Module management: reset, factory reset, firmware version, serial
//!   number, EEPROM access
//! - LoRaWAN session control: application key, ABP/OTAA join, activation
//!   and session status
//! - Confirmed and unconfirmed uplinks, downlink reception
//! - Incremental frame parser with checksum verification and statistics
//!
//! ## Usage
//!
//! ```ignore
//! use mikroclick::devices::radio::mipot::{Indication, JoinMode, Mipot};
//!
//! let mut lora = Mipot::new(uart);
//! lora.reset(&mut delay)?;
//! lora.set_app_key(&app_key, &mut delay)?;
//! lora.join(JoinMode::Otaa, &mut delay)?;
//!
//! loop {
//!     if let Some(Indication::JoinCompleted { success: true }) = lora.poll_indication()? {
//!         break;
//!     }
//!     delay.delay_ms(100);
//! }
//!
//! lora.send_unconfirmed(1, b"hello", &mut delay)?;
//! ```

mod driver;
pub mod protocol;

pub use driver::{ActivationStatus, Indication, JoinMode, Mipot};
