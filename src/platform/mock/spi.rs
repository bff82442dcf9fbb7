//! Mock SPI implementation for testing

use crate::platform::{
    traits::{SpiConfig, SpiInterface},
    PlatformError, Result,
};
use core::cell::RefCell;
use std::vec::Vec;

/// SPI transaction type for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpiTransaction {
    /// Transfer (full-duplex)
    Transfer { write: Vec<u8>, read: Vec<u8> },
    /// Write only
    Write { data: Vec<u8> },
    /// Read only
    Read { len: usize },
}

/// Mock SPI implementation
///
/// Records all transactions for test verification, returns pre-programmed
/// read data, and can inject a one-shot error to exercise failure paths.
#[derive(Debug)]
pub struct MockSpi {
    config: SpiConfig,
    transactions: RefCell<Vec<SpiTransaction>>,
    read_data: RefCell<Vec<u8>>,
    fail_next: RefCell<Option<PlatformError>>,
}

impl MockSpi {
    /// Create a new mock SPI
    pub fn new(config: SpiConfig) -> Self {
        Self {
            config,
            transactions: RefCell::new(Vec::new()),
            read_data: RefCell::new(Vec::new()),
            fail_next: RefCell::new(None),
        }
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> Vec<SpiTransaction> {
        self.transactions.borrow().clone()
    }

    /// Clear transaction log
    pub fn clear_transactions(&self) {
        self.transactions.borrow_mut().clear();
    }

    /// Set data to return for read operations
    ///
    /// Reads drain this buffer front-to-back. Takes `&self` so tests can
    /// keep seeding a mock that a driver already owns.
    pub fn set_read_data(&self, data: &[u8]) {
        *self.read_data.borrow_mut() = data.to_vec();
    }

    /// Append data to the read queue
    pub fn queue_read_data(&self, data: &[u8]) {
        self.read_data.borrow_mut().extend_from_slice(data);
    }

    /// Make the next bus operation fail with `error`
    pub fn inject_error(&self, error: PlatformError) {
        *self.fail_next.borrow_mut() = Some(error);
    }

    /// Get current frequency
    pub fn frequency(&self) -> u32 {
        self.config.frequency
    }

    fn take_injected_error(&self) -> Result<()> {
        match self.fail_next.borrow_mut().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn fill_from_read_data(&self, buffer: &mut [u8]) {
        let mut read_data = self.read_data.borrow_mut();
        let to_read = core::cmp::min(buffer.len(), read_data.len());
        buffer[..to_read].copy_from_slice(&read_data[..to_read]);
        read_data.drain(..to_read);
    }
}

impl SpiInterface for MockSpi {
    fn transfer(&mut self, write_buffer: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        self.take_injected_error()?;
        self.fill_from_read_data(read_buffer);

        self.transactions
            .borrow_mut()
            .push(SpiTransaction::Transfer {
                write: write_buffer.to_vec(),
                read: read_buffer.to_vec(),
            });

        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.take_injected_error()?;
        self.transactions.borrow_mut().push(SpiTransaction::Write {
            data: data.to_vec(),
        });
        Ok(())
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<()> {
        self.take_injected_error()?;
        self.fill_from_read_data(buffer);

        self.transactions
            .borrow_mut()
            .push(SpiTransaction::Read { len: buffer.len() });

        Ok(())
    }

    fn set_frequency(&mut self, frequency: u32) -> Result<()> {
        self.config.frequency = frequency;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::error::SpiError;

    #[test]
    fn test_mock_spi_write() {
        let mut spi = MockSpi::new(SpiConfig::default());
        spi.write(&[0x01, 0x02, 0x03]).unwrap();

        let transactions = spi.transactions();
        assert_eq!(transactions.len(), 1);
        assert_eq!(
            transactions[0],
            SpiTransaction::Write {
                data: vec![0x01, 0x02, 0x03]
            }
        );
    }

    #[test]
    fn test_mock_spi_transfer() {
        let mut spi = MockSpi::new(SpiConfig::default());
        spi.set_read_data(&[0xAA, 0xBB]);

        let mut rx = [0u8; 2];
        spi.transfer(&[0x80, 0x00], &mut rx).unwrap();
        assert_eq!(rx, [0xAA, 0xBB]);

        let transactions = spi.transactions();
        assert_eq!(
            transactions[0],
            SpiTransaction::Transfer {
                write: vec![0x80, 0x00],
                read: vec![0xAA, 0xBB]
            }
        );
    }

    #[test]
    fn test_mock_spi_read() {
        let mut spi = MockSpi::new(SpiConfig::default());
        spi.set_read_data(&[0x11, 0x22, 0x33]);

        let mut buf = [0u8; 3];
        spi.read(&mut buf).unwrap();
        assert_eq!(buf, [0x11, 0x22, 0x33]);

        let transactions = spi.transactions();
        assert_eq!(transactions[0], SpiTransaction::Read { len: 3 });
    }

    #[test]
    fn test_mock_spi_injected_error() {
        let mut spi = MockSpi::new(SpiConfig::default());
        spi.inject_error(PlatformError::Spi(SpiError::TransferFailed));

        let err = spi.write(&[0x00]).unwrap_err();
        assert_eq!(err, PlatformError::Spi(SpiError::TransferFailed));
        assert!(spi.transactions().is_empty());

        spi.write(&[0x00]).unwrap();
        assert_eq!(spi.transactions().len(), 1);
    }

    #[test]
    fn test_mock_spi_frequency() {
        let mut spi = MockSpi::new(SpiConfig::default());
        assert_eq!(spi.frequency(), 1_000_000);

        spi.set_frequency(8_000_000).unwrap();
        assert_eq!(spi.frequency(), 8_000_000);
    }
}
