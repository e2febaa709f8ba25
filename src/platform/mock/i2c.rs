//! Mock I2C implementation for testing

use crate::platform::{
    error::{I2cError, PlatformError},
    traits::{I2cConfig, I2cInterface},
    Result,
};
use core::cell::RefCell;
use std::vec::Vec;

/// I2C transaction type for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cTransaction {
    /// Write transaction
    Write { addr: u8, data: Vec<u8> },
    /// Read transaction
    Read { addr: u8, len: usize },
    /// Write-Read transaction
    WriteRead {
        addr: u8,
        write_data: Vec<u8>,
        read_len: usize,
    },
}

/// Mock I2C implementation
///
/// Records all transactions for test verification and replays
/// pre-programmed read data in order. Transactions can be made to NACK.
#[derive(Debug)]
pub struct MockI2c {
    config: I2cConfig,
    transactions: RefCell<Vec<I2cTransaction>>,
    read_data: RefCell<Vec<u8>>,
    nack_after: Option<usize>,
}

impl MockI2c {
    /// Create a new mock I2C
    pub fn new(config: I2cConfig) -> Self {
        Self {
            config,
            transactions: RefCell::new(Vec::new()),
            read_data: RefCell::new(Vec::new()),
            nack_after: None,
        }
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> Vec<I2cTransaction> {
        self.transactions.borrow().clone()
    }

    /// Clear transaction log
    pub fn clear_transactions(&mut self) {
        self.transactions.borrow_mut().clear();
    }

    /// Set data to return for read operations
    pub fn set_read_data(&mut self, data: &[u8]) {
        *self.read_data.borrow_mut() = data.to_vec();
    }

    /// Append data to return for later read operations
    pub fn push_read_data(&mut self, data: &[u8]) {
        self.read_data.borrow_mut().extend_from_slice(data);
    }

    /// NACK every transaction once `count` more have succeeded
    ///
    /// `None` restores normal operation.
    pub fn nack_after(&mut self, count: Option<usize>) {
        self.nack_after = count;
    }

    /// Get current frequency
    pub fn frequency(&self) -> u32 {
        self.config.frequency
    }

    fn check_ack(&mut self) -> Result<()> {
        match self.nack_after {
            Some(0) => Err(PlatformError::I2c(I2cError::Nack)),
            Some(n) => {
                self.nack_after = Some(n - 1);
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn fill(&self, buffer: &mut [u8]) {
        let mut read_data = self.read_data.borrow_mut();
        let to_read = core::cmp::min(buffer.len(), read_data.len());
        buffer[..to_read].copy_from_slice(&read_data[..to_read]);
        read_data.drain(..to_read);
    }
}

impl I2cInterface for MockI2c {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.transactions.borrow_mut().push(I2cTransaction::Write {
            addr,
            data: data.to_vec(),
        });
        self.check_ack()
    }

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()> {
        self.transactions.borrow_mut().push(I2cTransaction::Read {
            addr,
            len: buffer.len(),
        });
        self.check_ack()?;
        self.fill(buffer);
        Ok(())
    }

    fn write_read(
        &mut self,
        addr: u8,
        write_data: &[u8],
        read_buffer: &mut [u8],
    ) -> Result<()> {
        self.transactions
            .borrow_mut()
            .push(I2cTransaction::WriteRead {
                addr,
                write_data: write_data.to_vec(),
                read_len: read_buffer.len(),
            });
        self.check_ack()?;
        self.fill(read_buffer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_i2c_write() {
        let mut i2c = MockI2c::new(I2cConfig::default());
        i2c.write(0x0C, &[0x0A, 0x01]).unwrap();

        assert_eq!(
            i2c.transactions(),
            vec![I2cTransaction::Write {
                addr: 0x0C,
                data: vec![0x0A, 0x01]
            }]
        );
    }

    #[test]
    fn test_mock_i2c_write_read_replays_data() {
        let mut i2c = MockI2c::new(I2cConfig::default());
        i2c.set_read_data(&[0x12, 0x34]);
        i2c.push_read_data(&[0x56]);

        let mut first = [0u8; 2];
        i2c.write_read(0x0C, &[0x03], &mut first).unwrap();
        let mut second = [0u8; 1];
        i2c.read(0x0C, &mut second).unwrap();

        assert_eq!(first, [0x12, 0x34]);
        assert_eq!(second, [0x56]);
    }

    #[test]
    fn test_mock_i2c_nack_after() {
        let mut i2c = MockI2c::new(I2cConfig::default());
        i2c.nack_after(Some(1));

        assert!(i2c.write(0x0C, &[0x00]).is_ok());
        assert_eq!(
            i2c.write(0x0C, &[0x00]),
            Err(PlatformError::I2c(I2cError::Nack))
        );

        i2c.nack_after(None);
        assert!(i2c.write(0x0C, &[0x00]).is_ok());
        assert_eq!(i2c.transactions().len(), 3);
    }

    #[test]
    fn test_mock_i2c_frequency() {
        let i2c = MockI2c::new(I2cConfig::default());
        assert_eq!(i2c.frequency(), 400_000);
    }
}
