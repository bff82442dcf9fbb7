//! Platform abstraction layer
//!
//! Drivers in this collection never touch MCU peripherals directly: they are
//! written against the bus and pin traits defined here, and the host platform
//! supplies the implementations. The `embedded-hal` adapters in [`hal`] cover
//! most real hardware; the [`mock`] module covers host tests.

pub mod error;
pub mod traits;

#[cfg(feature = "embedded-hal")]
pub mod hal;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{DelayInterface, GpioInterface, I2cInterface, SpiInterface, UartInterface};
