//! Register access trait
//!
//! Byte-level register access to a device whose transport (SPI or I2C) is
//! already bound. This is the primitive the bridge proxy is built on.

use crate::platform::Result;

/// Register-addressed device access
pub trait RegisterInterface {
    /// Write one register
    ///
    /// # Errors
    ///
    /// Returns the transport's `PlatformError` if the write is not acknowledged.
    fn write_register(&mut self, reg: u8, value: u8) -> Result<()>;

    /// Read `buffer.len()` consecutive registers starting at `reg`
    ///
    /// # Errors
    ///
    /// Returns the transport's `PlatformError` if the read is not acknowledged.
    fn read_registers(&mut self, reg: u8, buffer: &mut [u8]) -> Result<()>;

    /// Read a single register
    ///
    /// # Errors
    ///
    /// Returns the transport's `PlatformError` if the read is not acknowledged.
    fn read_register(&mut self, reg: u8) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_registers(reg, &mut buf)?;
        Ok(buf[0])
    }
}
