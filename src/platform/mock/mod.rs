//! Mock platform implementation for testing
//!
//! This module provides mock implementations of the platform traits so every
//! driver in the collection can be unit tested on the host: scripted register
//! reads, transaction-log assertions, simulated interrupt pins, and counted
//! settling delays.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled (for downstream crates' tests)

#![cfg(any(test, feature = "mock"))]

mod delay;
mod gpio;
mod i2c;
mod spi;
mod uart;

pub use delay::MockDelay;
pub use gpio::MockGpio;
pub use i2c::{I2cTransaction, MockI2c};
pub use spi::{MockSpi, SpiTransaction};
pub use uart::MockUart;
