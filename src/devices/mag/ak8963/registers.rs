//! AK8963 and MPU-9250 bridge register definitions
//!
//! Based on the MPU-9250 Register Map (RM-MPU-9250A-00 v1.6)
//! and the AK8963 datasheet.

#![allow(dead_code)]

use crate::devices::traits::MagError;
use bitflags::bitflags;

// ============================================================================
// AK8963 I2C Address
// ============================================================================

/// AK8963 magnetometer I2C address
pub const AK8963_ADDR: u8 = 0x0C;

// ============================================================================
// AK8963 Registers
// ============================================================================

/// Device ID register
pub const AK8963_WIA: u8 = 0x00;

/// Information register
pub const AK8963_INFO: u8 = 0x01;

/// Status register 1 (data ready, overrun)
pub const AK8963_ST1: u8 = 0x02;

/// Measurement data (low byte first)
pub const AK8963_HXL: u8 = 0x03;
pub const AK8963_HXH: u8 = 0x04;
pub const AK8963_HYL: u8 = 0x05;
pub const AK8963_HYH: u8 = 0x06;
pub const AK8963_HZL: u8 = 0x07;
pub const AK8963_HZH: u8 = 0x08;

/// Status register 2 (error, overflow). Reading it ends a measurement.
pub const AK8963_ST2: u8 = 0x09;

/// Control register 1 (mode, output bit)
pub const AK8963_CNTL1: u8 = 0x0A;

/// Control register 2 (soft reset)
pub const AK8963_CNTL2: u8 = 0x0B;

/// Self-test control
pub const AK8963_ASTC: u8 = 0x0C;

/// Sensitivity adjustment values (readable in fuse ROM access mode)
pub const AK8963_ASAX: u8 = 0x10;
pub const AK8963_ASAY: u8 = 0x11;
pub const AK8963_ASAZ: u8 = 0x12;

// ============================================================================
// AK8963 Register Values
// ============================================================================

/// WIA expected value ('H')
pub const AK8963_WHO_AM_I_VALUE: u8 = 0x48;

/// CNTL2 soft reset
pub const AK8963_CNTL2_SRST: u8 = 0x01;

/// HXL..HZH plus ST2, read as one burst
pub const DATA_FRAME_LEN: usize = 7;

/// Raw measurement burst: three little-endian words then ST2
pub type DataFrame = [u8; DATA_FRAME_LEN];

bitflags! {
    /// ST1 bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status1: u8 {
        /// New measurement available
        const DATA_READY = 0x01;
        /// A measurement was skipped before being read
        const DATA_OVERRUN = 0x02;
    }
}

bitflags! {
    /// ST2 bits
    ///
    /// Bits 0 and 1 together are the error/overflow pair reported through the
    /// MPU bridge; `HOFL` is the overflow bit from the AK8963 datasheet.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status2: u8 {
        /// Overflow, as reported through the bridge
        const OVERFLOW = 0x01;
        /// Data read error
        const DATA_ERROR = 0x02;
        /// Magnetic sensor overflow
        const HOFL = 0x08;
        /// Output bit setting mirror (set in 16-bit mode)
        const BITM = 0x10;
    }
}

impl Status2 {
    /// Classify the status byte that trails a data frame
    pub fn check(self) -> Result<(), MagError> {
        if self.contains(Self::DATA_ERROR) {
            Err(MagError::SensorFault)
        } else if self.intersects(Self::OVERFLOW | Self::HOFL) {
            Err(MagError::Overflow)
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// MPU-9250 Bridge Registers (I2C master, slave 0)
// ============================================================================

/// I2C master control
pub const MPU_I2C_MST_CTRL: u8 = 0x24;

/// I2C slave 0 address (bit 7 selects read)
pub const MPU_I2C_SLV0_ADDR: u8 = 0x25;

/// I2C slave 0 register
pub const MPU_I2C_SLV0_REG: u8 = 0x26;

/// I2C slave 0 control (enable, byte count)
pub const MPU_I2C_SLV0_CTRL: u8 = 0x27;

/// Interrupt pin configuration
pub const MPU_INT_PIN_CFG: u8 = 0x37;

/// External sensor data window, filled by the I2C master
pub const MPU_EXT_SENS_DATA_00: u8 = 0x49;

/// I2C slave 0 data out
pub const MPU_I2C_SLV0_DO: u8 = 0x63;

/// User control
pub const MPU_USER_CTRL: u8 = 0x6A;

// ============================================================================
// MPU-9250 Bridge Register Values
// ============================================================================

/// I2C_SLVx_ADDR read flag
pub const I2C_SLV_READ_FLAG: u8 = 0x80;

/// I2C_SLVx_CTRL enable bit (low nibble is the byte count)
pub const I2C_SLV_EN: u8 = 0x80;

/// Longest burst the I2C_SLVx_CTRL length field can carry
pub const I2C_SLV_LEN_MAX: u8 = 0x0F;

/// INT_PIN_CFG: clear interrupt status on any read
pub const INT_PIN_CFG_INT_ANYRD_2CLEAR: u8 = 0x10;

/// INT_PIN_CFG: I2C bypass enable
pub const INT_PIN_CFG_BYPASS_EN: u8 = 0x02;

/// I2C_MST_CTRL: multi-master, 400 kHz master clock
pub const I2C_MST_CTRL_400KHZ: u8 = 0x0D;

/// USER_CTRL: I2C master enable
pub const USER_CTRL_I2C_MST_EN: u8 = 0x20;

/// USER_CTRL: disable the I2C slave interface (SPI only)
pub const USER_CTRL_I2C_IF_DIS: u8 = 0x10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status2_clear_is_ok() {
        assert_eq!(Status2::from_bits_retain(0x00).check(), Ok(()));
        assert_eq!(Status2::from_bits_retain(0x10).check(), Ok(()));
    }

    #[test]
    fn status2_faults() {
        assert_eq!(
            Status2::from_bits_retain(0x02).check(),
            Err(MagError::SensorFault)
        );
        assert_eq!(
            Status2::from_bits_retain(0x03).check(),
            Err(MagError::SensorFault)
        );
        assert_eq!(
            Status2::from_bits_retain(0x01).check(),
            Err(MagError::Overflow)
        );
        assert_eq!(
            Status2::from_bits_retain(0x18).check(),
            Err(MagError::Overflow)
        );
    }

    #[test]
    fn status1_ready_bit() {
        assert!(Status1::from_bits_retain(0x01).contains(Status1::DATA_READY));
        assert!(!Status1::from_bits_retain(0x02).contains(Status1::DATA_READY));
    }
}
