//! I2C interface trait
//!
//! Blocking two-wire bus access used by the direct magnetometer path and by an
//! I2C-attached bridge device.

use crate::platform::Result;

/// I2C configuration
#[derive(Debug, Clone, Copy)]
pub struct I2cConfig {
    /// Bus frequency in Hz (the AK8963 supports up to 400 kHz)
    pub frequency: u32,
    /// Timeout in microseconds
    pub timeout_us: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 400_000,
            timeout_us: 10_000,
        }
    }
}

/// I2C interface trait
///
/// # Safety Invariants
///
/// - Only one owner per I2C bus instance
/// - No concurrent access to the same I2C bus from multiple contexts
/// - Address must be 7-bit (valid range: 0x00..=0x7F)
pub trait I2cInterface {
    /// Write data to a device: START - ADDR(W) - DATA - STOP
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::I2c` on NACK, bus error or timeout.
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()>;

    /// Read data from a device: START - ADDR(R) - DATA - STOP
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::I2c` on NACK, bus error or timeout.
    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()>;

    /// Write then read with a repeated START
    ///
    /// Used to select a register and read it back in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::I2c` on NACK, bus error or timeout.
    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()>;
}
