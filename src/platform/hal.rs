//! Adapters from `embedded-hal` 1.0 implementations to the platform traits
//!
//! MCU HALs in the ecosystem (rp2040-hal, esp-hal, stm32 HALs, ...) expose
//! their peripherals through `embedded-hal` traits. These newtypes wrap any
//! such peripheral so the drivers in this collection can use it directly:
//!
//! ```ignore
//! let i2c = HalI2c::new(hal_i2c_peripheral);
//! let bus = I2cRegisters::new(i2c, DPS310_I2C_ADDR);
//! let mut baro = Dps310::new(bus, Default::default());
//! ```
//!
//! `embedded-hal` 1.0 has no UART trait, so UART-attached modules take a
//! platform-specific [`UartInterface`] implementation instead.
//!
//! [`UartInterface`]: crate::platform::traits::UartInterface

#![cfg(feature = "embedded-hal")]

use core::cell::RefCell;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, StatefulOutputPin};
use embedded_hal::i2c::{ErrorKind as I2cErrorKind, I2c};
use embedded_hal::spi::{ErrorKind as SpiErrorKind, SpiBus};

use crate::platform::error::{GpioError, I2cError, SpiError};
use crate::platform::traits::{DelayInterface, GpioInterface, GpioMode, I2cInterface, SpiInterface};
use crate::platform::{PlatformError, Result};

fn map_i2c_error<E: embedded_hal::i2c::Error>(e: E) -> PlatformError {
    let kind = match e.kind() {
        I2cErrorKind::NoAcknowledge(_) => I2cError::Nack,
        I2cErrorKind::ArbitrationLoss => I2cError::ArbitrationLost,
        I2cErrorKind::Bus => I2cError::BusError,
        _ => I2cError::BusError,
    };
    PlatformError::I2c(kind)
}

fn map_spi_error<E: embedded_hal::spi::Error>(e: E) -> PlatformError {
    let kind = match e.kind() {
        SpiErrorKind::Overrun => SpiError::Overrun,
        SpiErrorKind::ModeFault => SpiError::ModeFault,
        _ => SpiError::TransferFailed,
    };
    PlatformError::Spi(kind)
}

/// [`I2cInterface`] over any `embedded_hal::i2c::I2c` implementation
///
/// [`I2cInterface`]: crate::platform::traits::I2cInterface
pub struct HalI2c<T> {
    inner: T,
}

impl<T> HalI2c<T> {
    /// Wrap an `embedded-hal` I2C peripheral
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Release the wrapped peripheral
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: I2c> I2cInterface for HalI2c<T> {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.inner.write(addr, data).map_err(map_i2c_error)
    }

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()> {
        self.inner.read(addr, buffer).map_err(map_i2c_error)
    }

    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        self.inner
            .write_read(addr, write_data, read_buffer)
            .map_err(map_i2c_error)
    }

    fn set_frequency(&mut self, _frequency: u32) -> Result<()> {
        // Bus frequency is fixed when the HAL peripheral is constructed;
        // accepted here so drivers with a frequency preference still run.
        Ok(())
    }
}

/// [`SpiInterface`] over any `embedded_hal::spi::SpiBus` implementation
///
/// [`SpiInterface`]: crate::platform::traits::SpiInterface
pub struct HalSpi<T> {
    inner: T,
}

impl<T> HalSpi<T> {
    /// Wrap an `embedded-hal` SPI bus
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Release the wrapped peripheral
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: SpiBus> SpiInterface for HalSpi<T> {
    fn transfer(&mut self, write_buffer: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        self.inner
            .transfer(read_buffer, write_buffer)
            .map_err(map_spi_error)?;
        self.inner.flush().map_err(map_spi_error)
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.inner.write(data).map_err(map_spi_error)?;
        self.inner.flush().map_err(map_spi_error)
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<()> {
        self.inner.read(buffer).map_err(map_spi_error)?;
        self.inner.flush().map_err(map_spi_error)
    }

    fn set_frequency(&mut self, _frequency: u32) -> Result<()> {
        Ok(())
    }
}

/// [`GpioInterface`] over an `embedded-hal` output pin (CS, reset, enable)
///
/// The pin arrives configured as an output; mode changes are not supported
/// through `embedded-hal` 1.0 and return `GpioError::InvalidMode`.
///
/// [`GpioInterface`]: crate::platform::traits::GpioInterface
pub struct HalOutputPin<T> {
    inner: RefCell<T>,
}

impl<T> HalOutputPin<T> {
    /// Wrap an `embedded-hal` output pin
    pub fn new(inner: T) -> Self {
        Self {
            inner: RefCell::new(inner),
        }
    }
}

impl<T: StatefulOutputPin> GpioInterface for HalOutputPin<T> {
    fn set_high(&mut self) -> Result<()> {
        self.inner
            .get_mut()
            .set_high()
            .map_err(|_| PlatformError::Gpio(GpioError::InvalidPin))
    }

    fn set_low(&mut self) -> Result<()> {
        self.inner
            .get_mut()
            .set_low()
            .map_err(|_| PlatformError::Gpio(GpioError::InvalidPin))
    }

    fn toggle(&mut self) -> Result<()> {
        self.inner
            .get_mut()
            .toggle()
            .map_err(|_| PlatformError::Gpio(GpioError::InvalidPin))
    }

    fn read(&self) -> bool {
        self.inner.borrow_mut().is_set_high().unwrap_or(false)
    }

    fn set_mode(&mut self, _mode: GpioMode) -> Result<()> {
        Err(PlatformError::Gpio(GpioError::InvalidMode))
    }

    fn mode(&self) -> GpioMode {
        GpioMode::OutputPushPull
    }
}

/// [`GpioInterface`] over an `embedded-hal` input pin (interrupt/data-ready)
///
/// [`GpioInterface`]: crate::platform::traits::GpioInterface
pub struct HalInputPin<T> {
    inner: RefCell<T>,
}

impl<T> HalInputPin<T> {
    /// Wrap an `embedded-hal` input pin
    pub fn new(inner: T) -> Self {
        Self {
            inner: RefCell::new(inner),
        }
    }
}

impl<T: InputPin> GpioInterface for HalInputPin<T> {
    fn set_high(&mut self) -> Result<()> {
        Err(PlatformError::Gpio(GpioError::InvalidMode))
    }

    fn set_low(&mut self) -> Result<()> {
        Err(PlatformError::Gpio(GpioError::InvalidMode))
    }

    fn toggle(&mut self) -> Result<()> {
        Err(PlatformError::Gpio(GpioError::InvalidMode))
    }

    fn read(&self) -> bool {
        self.inner.borrow_mut().is_high().unwrap_or(false)
    }

    fn set_mode(&mut self, _mode: GpioMode) -> Result<()> {
        Err(PlatformError::Gpio(GpioError::InvalidMode))
    }

    fn mode(&self) -> GpioMode {
        GpioMode::Input
    }
}

/// [`DelayInterface`] over any `embedded_hal::delay::DelayNs` implementation
///
/// [`DelayInterface`]: crate::platform::traits::DelayInterface
pub struct HalDelay<T> {
    inner: T,
}

impl<T> HalDelay<T> {
    /// Wrap an `embedded-hal` delay provider
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T: DelayNs> DelayInterface for HalDelay<T> {
    fn delay_us(&mut self, us: u32) {
        self.inner.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.inner.delay_ms(ms);
    }
}
