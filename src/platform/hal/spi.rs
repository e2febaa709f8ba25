//! SPI adapter for `embedded_hal::spi::SpiDevice`

use crate::platform::{
    error::{PlatformError, SpiError},
    traits::SpiInterface,
    Result,
};
use embedded_hal::spi::{Error as _, ErrorKind, SpiDevice};

/// SPI device from any embedded-hal 1.0 implementation
///
/// `SpiDevice` owns chip select, so every call is one framed transaction.
pub struct HalSpi<T> {
    spi: T,
}

impl<T: SpiDevice> HalSpi<T> {
    /// Wrap a HAL SPI device
    pub fn new(spi: T) -> Self {
        Self { spi }
    }

    /// Release the HAL device
    pub fn release(self) -> T {
        self.spi
    }
}

impl<T: SpiDevice> SpiInterface for HalSpi<T> {
    fn transfer(&mut self, write_buffer: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        if write_buffer.len() != read_buffer.len() {
            return Err(PlatformError::Spi(SpiError::TransferFailed));
        }
        self.spi
            .transfer(read_buffer, write_buffer)
            .map_err(|e| map_error(e.kind()))
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.spi.write(data).map_err(|e| map_error(e.kind()))
    }
}

/// Map embedded-hal SPI error kinds to platform SPI errors
fn map_error(kind: ErrorKind) -> PlatformError {
    let err = match kind {
        ErrorKind::Overrun => SpiError::Overrun,
        ErrorKind::ModeFault => SpiError::ModeFault,
        ErrorKind::ChipSelectFault => SpiError::ChipSelect,
        _ => SpiError::TransferFailed,
    };
    PlatformError::Spi(err)
}
