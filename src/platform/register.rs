//! Register access adapters
//!
//! Bind an SPI device or an I2C bus address to [`RegisterInterface`], so the
//! bridge proxy can talk to its host device without caring how it is wired.

use crate::platform::{
    error::{PlatformError, SpiError},
    traits::{I2cInterface, RegisterInterface, SpiInterface},
    Result,
};

/// Register address bit that selects a read on InvenSense SPI devices
pub const SPI_READ_FLAG: u8 = 0x80;

/// Longest burst read supported over SPI (the full EXT_SENS_DATA window)
pub const SPI_MAX_BURST: usize = 24;

/// Register access over SPI
///
/// The first byte of every transaction is the register address, with bit 7
/// set for reads.
pub struct SpiRegisters<S> {
    spi: S,
}

impl<S: SpiInterface> SpiRegisters<S> {
    /// Wrap an SPI device
    pub fn new(spi: S) -> Self {
        Self { spi }
    }

    /// Release the underlying SPI device
    pub fn release(self) -> S {
        self.spi
    }

    /// Borrow the underlying SPI device
    pub fn spi(&mut self) -> &mut S {
        &mut self.spi
    }
}

impl<S: SpiInterface> RegisterInterface for SpiRegisters<S> {
    fn write_register(&mut self, reg: u8, value: u8) -> Result<()> {
        self.spi.write(&[reg & !SPI_READ_FLAG, value])
    }

    fn read_registers(&mut self, reg: u8, buffer: &mut [u8]) -> Result<()> {
        if buffer.len() > SPI_MAX_BURST {
            return Err(PlatformError::Spi(SpiError::Overrun));
        }

        let len = buffer.len() + 1;
        let mut tx = [0u8; SPI_MAX_BURST + 1];
        let mut rx = [0u8; SPI_MAX_BURST + 1];
        tx[0] = reg | SPI_READ_FLAG;

        self.spi.transfer(&tx[..len], &mut rx[..len])?;
        buffer.copy_from_slice(&rx[1..len]);
        Ok(())
    }
}

/// Register access to one I2C address
pub struct I2cRegisters<I> {
    i2c: I,
    address: u8,
}

impl<I: I2cInterface> I2cRegisters<I> {
    /// Bind an I2C bus to a 7-bit device address
    pub fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address this adapter talks to
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the underlying bus
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2cInterface> RegisterInterface for I2cRegisters<I> {
    fn write_register(&mut self, reg: u8, value: u8) -> Result<()> {
        self.i2c.write(self.address, &[reg, value])
    }

    fn read_registers(&mut self, reg: u8, buffer: &mut [u8]) -> Result<()> {
        self.i2c.write_read(self.address, &[reg], buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{
        i2c::I2cTransaction, spi::SpiTransaction, MockI2c, MockSpi,
    };
    use crate::platform::traits::{I2cConfig, SpiConfig};

    #[test]
    fn spi_write_clears_read_flag() {
        let mut regs = SpiRegisters::new(MockSpi::new(SpiConfig::default()));
        regs.write_register(0xA5, 0x12).unwrap();

        assert_eq!(
            regs.spi().transactions(),
            vec![SpiTransaction::Write {
                data: vec![0x25, 0x12]
            }]
        );
    }

    #[test]
    fn spi_burst_read_skips_address_byte() {
        let mut spi = MockSpi::new(SpiConfig::default());
        spi.set_read_data(&[0xFF, 0x10, 0x20, 0x30]);
        let mut regs = SpiRegisters::new(spi);

        let mut buf = [0u8; 3];
        regs.read_registers(0x49, &mut buf).unwrap();
        assert_eq!(buf, [0x10, 0x20, 0x30]);

        let log = regs.spi().transactions();
        assert_eq!(log.len(), 1);
        match &log[0] {
            SpiTransaction::Transfer { write, .. } => {
                assert_eq!(write, &vec![0xC9, 0x00, 0x00, 0x00]);
            }
            other => panic!("unexpected transaction {:?}", other),
        }
    }

    #[test]
    fn spi_rejects_oversized_burst() {
        let mut regs = SpiRegisters::new(MockSpi::new(SpiConfig::default()));
        let mut buf = [0u8; SPI_MAX_BURST + 1];
        assert_eq!(
            regs.read_registers(0x49, &mut buf),
            Err(PlatformError::Spi(SpiError::Overrun))
        );
        assert!(regs.spi().transactions().is_empty());
    }

    #[test]
    fn i2c_registers_use_bound_address() {
        let mut i2c = MockI2c::new(I2cConfig::default());
        i2c.set_read_data(&[0x71]);
        let mut regs = I2cRegisters::new(i2c, 0x68);

        regs.write_register(0x6B, 0x01).unwrap();
        assert_eq!(regs.read_register(0x75).unwrap(), 0x71);

        let i2c = regs.release();
        assert_eq!(
            i2c.transactions(),
            vec![
                I2cTransaction::Write {
                    addr: 0x68,
                    data: vec![0x6B, 0x01]
                },
                I2cTransaction::WriteRead {
                    addr: 0x68,
                    write_data: vec![0x75],
                    read_len: 1
                },
            ]
        );
    }
}
