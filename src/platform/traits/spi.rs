//! SPI interface trait
//!
//! Full-duplex access to an SPI-attached bridge device. Chip select framing is
//! owned by the implementation: one call is one selected transaction.

use crate::platform::Result;

/// SPI configuration
#[derive(Debug, Clone, Copy)]
pub struct SpiConfig {
    /// Bus frequency in Hz
    pub frequency: u32,
    /// SPI mode (CPOL and CPHA)
    pub mode: SpiMode,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            // MPU-9250 register access is limited to 1 MHz
            frequency: 1_000_000,
            mode: SpiMode::Mode3,
        }
    }
}

/// SPI mode (Clock Polarity and Phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiMode {
    /// CPOL=0, CPHA=0
    Mode0,
    /// CPOL=0, CPHA=1
    Mode1,
    /// CPOL=1, CPHA=0
    Mode2,
    /// CPOL=1, CPHA=1
    Mode3,
}

/// SPI interface trait
///
/// # Safety Invariants
///
/// - Only one owner per SPI device instance
/// - No concurrent access to the same device from multiple contexts
pub trait SpiInterface {
    /// Transfer data (full-duplex)
    ///
    /// Both buffers must have the same length.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Spi` if the transfer fails or the buffer
    /// lengths differ.
    fn transfer(&mut self, write_buffer: &[u8], read_buffer: &mut [u8]) -> Result<()>;

    /// Write data, discarding received bytes
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Spi` if the write fails.
    fn write(&mut self, data: &[u8]) -> Result<()>;
}
