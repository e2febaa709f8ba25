//! Mock SPI implementation for testing

use crate::platform::{
    error::{PlatformError, SpiError},
    traits::{SpiConfig, SpiInterface},
    Result,
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
}

/// Mock SPI implementation
///
/// Records all transactions for test verification and replays
/// pre-programmed MISO bytes in order.
#[derive(Debug)]
pub struct MockSpi {
    config: SpiConfig,
    transactions: RefCell<Vec<SpiTransaction>>,
    read_data: RefCell<Vec<u8>>,
}

impl MockSpi {
    /// Create a new mock SPI
    pub fn new(config: SpiConfig) -> Self {
        Self {
            config,
            transactions: RefCell::new(Vec::new()),
            read_data: RefCell::new(Vec::new()),
        }
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> Vec<SpiTransaction> {
        self.transactions.borrow().clone()
    }

    /// Clear transaction log
    pub fn clear_transactions(&mut self) {
        self.transactions.borrow_mut().clear();
    }

    /// Set bytes to clock in on subsequent transfers
    pub fn set_read_data(&mut self, data: &[u8]) {
        *self.read_data.borrow_mut() = data.to_vec();
    }

    /// Get current frequency
    pub fn frequency(&self) -> u32 {
        self.config.frequency
    }
}

impl SpiInterface for MockSpi {
    fn transfer(&mut self, write_buffer: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        if write_buffer.len() != read_buffer.len() {
            return Err(PlatformError::Spi(SpiError::TransferFailed));
        }

        let mut read_data = self.read_data.borrow_mut();
        let to_read = core::cmp::min(read_buffer.len(), read_data.len());
        read_buffer[..to_read].copy_from_slice(&read_data[..to_read]);
        read_data.drain(..to_read);

        self.transactions
            .borrow_mut()
            .push(SpiTransaction::Transfer {
                write: write_buffer.to_vec(),
                read: read_buffer.to_vec(),
            });

        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.transactions.borrow_mut().push(SpiTransaction::Write {
            data: data.to_vec(),
        });
        Ok(())
    }
}
