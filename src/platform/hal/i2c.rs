//! I2C adapter for `embedded_hal::i2c::I2c`

use crate::platform::{
    error::{I2cError, PlatformError},
    traits::I2cInterface,
    Result,
};
use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

/// Blocking I2C bus from any embedded-hal 1.0 implementation
pub struct HalI2c<T> {
    i2c: T,
}

impl<T: I2c> HalI2c<T> {
    /// Wrap a HAL I2C bus
    pub fn new(i2c: T) -> Self {
        Self { i2c }
    }

    /// Release the HAL bus
    pub fn release(self) -> T {
        self.i2c
    }
}

impl<T: I2c> I2cInterface for HalI2c<T> {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.i2c.write(addr, data).map_err(|e| map_error(e.kind()))
    }

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()> {
        self.i2c.read(addr, buffer).map_err(|e| map_error(e.kind()))
    }

    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        self.i2c
            .write_read(addr, write_data, read_buffer)
            .map_err(|e| map_error(e.kind()))
    }
}

/// Map embedded-hal I2C error kinds to platform I2C errors
fn map_error(kind: ErrorKind) -> PlatformError {
    let err = match kind {
        ErrorKind::NoAcknowledge(_) => I2cError::Nack,
        ErrorKind::ArbitrationLoss => I2cError::ArbitrationLost,
        ErrorKind::Overrun => I2cError::Overrun,
        _ => I2cError::BusError,
    };
    PlatformError::I2c(err)
}
