//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod delay;
pub mod gpio;
pub mod i2c;
pub mod spi;
pub mod uart;

// Re-export trait interfaces
pub use delay::DelayInterface;
pub use gpio::{GpioInterface, GpioMode};
pub use i2c::{I2cConfig, I2cInterface};
pub use spi::{SpiBitOrder, SpiConfig, SpiInterface, SpiMode};
pub use uart::{UartConfig, UartInterface, UartParity, UartStopBits};
