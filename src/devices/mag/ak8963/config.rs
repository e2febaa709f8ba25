//! AK8963 Configuration
//!
//! Timing constants of the bridge protocol and the detection sequence, with
//! defaults taken from the hardware.

use super::registers;

/// CNTL1 operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MagMode {
    /// Power down mode
    #[default]
    PowerDown,
    /// One conversion, then back to power down
    SingleMeasure,
    /// Continuous measurement at 8Hz
    Continuous8Hz,
    /// Continuous measurement at 100Hz
    Continuous100Hz,
    /// Self-test
    SelfTest,
    /// Fuse ROM access (sensitivity adjustment readout)
    FuseRom,
}

impl MagMode {
    /// Get the CNTL1 register value for this mode
    pub fn register_value(self) -> u8 {
        match self {
            MagMode::PowerDown => 0x00,
            MagMode::SingleMeasure => 0x01,
            MagMode::Continuous8Hz => 0x02,
            MagMode::Continuous100Hz => 0x06,
            MagMode::SelfTest => 0x08,
            MagMode::FuseRom => 0x0F,
        }
    }
}

/// Bridge proxy timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyTiming {
    /// Delay after every bridge control-register write (µs)
    pub settle_delay_us: u32,
    /// Host delay between setup and fetch of a blocking read (ms)
    pub sync_read_delay_ms: u32,
    /// Time a queued read needs before its result is valid (µs)
    pub conversion_budget_us: u32,
}

impl Default for ProxyTiming {
    fn default() -> Self {
        Self {
            settle_delay_us: 10,
            sync_read_delay_ms: 4,
            conversion_budget_us: 8_000,
        }
    }
}

/// AK8963 driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ak8963Config {
    /// Magnetometer I2C address (as seen by the host or the bridge)
    pub address: u8,

    /// Settle time after soft reset, before the identity read (ms)
    pub reset_delay_ms: u32,

    /// Re-issue a failed or not-ready status read once within the same poll
    pub status_retry: bool,

    /// Bridge proxy timing (unused on the direct path)
    pub proxy: ProxyTiming,
}

impl Default for Ak8963Config {
    fn default() -> Self {
        Self {
            address: registers::AK8963_ADDR,
            reset_delay_ms: 4,
            status_retry: true,
            proxy: ProxyTiming::default(),
        }
    }
}
