//! RN4870 BLE Module Driver
//!
//! Driver for the Microchip RN4870 Bluetooth Low Energy module (UART
//! plus RST GPIO). The module is configured through an ASCII command
//! protocol and carries application data over its transparent UART
//! service.
//!
//! ## Features
//!
//! - Hardware reset through the RST line
//! - Command mode entry/exit (`$$$` / `---`)
//! - Device name, serialized name and default-services configuration
//! - Advertising control and module reboot
//! - Transparent UART passthrough to the connected peer
//!
//! ## Usage
//!
//! ```ignore
//! use mikroclick::devices::ble::rn4870::Rn4870;
//!
//! let mut ble = Rn4870::new(uart, rst_pin);
//! ble.hardware_reset(&mut delay)?;
//! ble.enter_command_mode(&mut delay)?;
//! ble.set_device_name("sensor-node", &mut delay)?;
//! ble.set_default_services(0xC0, &mut delay)?;
//! ble.reboot(&mut delay)?;
//!
//! // Back in transparent mode: exchange data with the peer
//! ble.write(b"hello")?;
//! ```

mod driver;

pub use driver::{Reply, Rn4870};
