//! Magnetometer transports
//!
//! The AK8963 is reached either directly on an I2C bus, or through the
//! MPU-9250's auxiliary I2C master ("bridge"). The choice is made once, by the
//! transport handed to [`detect`](super::detect).

use super::config::Ak8963Config;
use super::proxy::BridgeProxy;
use super::read_cycle::ReadCycle;
use super::registers::{DataFrame, Status1, AK8963_HXL, AK8963_ST1, DATA_FRAME_LEN};
use crate::devices::traits::MagError;
use crate::platform::traits::{I2cInterface, RegisterInterface, TimerInterface};

/// Outcome of one per-tick data acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFetch {
    /// A read is queued or still within its conversion budget
    Pending,
    /// HXL..HZH plus ST2, not yet checked
    Frame(DataFrame),
    /// The data read was issued but its result is gone. The measurement may
    /// have been consumed, so the device needs re-arming.
    Lost(MagError),
}

/// Register-level path to the magnetometer
pub trait MagTransport {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Adopt the timing and retry policy of `config`
    fn configure(&mut self, _config: &Ak8963Config) {}

    /// Make the device reachable. Called once, before detection.
    fn prepare(&mut self) -> Result<(), MagError> {
        Ok(())
    }

    /// Write one register
    fn write(&mut self, addr: u8, reg: u8, value: u8) -> Result<(), MagError>;

    /// Blocking burst read starting at `reg`
    fn read(&mut self, addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), MagError>;

    /// Blocking delay
    fn delay_ms(&mut self, ms: u32) -> Result<(), MagError>;

    /// Per-tick data acquisition
    ///
    /// `Err` means the cycle ended before a data read was issued:
    /// `MagError::NotReady` when the status register reported no new data,
    /// `MagError::Bus` when a status transaction failed.
    fn fetch_frame(&mut self, addr: u8) -> Result<FrameFetch, MagError>;
}

/// AK8963 on the host's own I2C bus
///
/// Stateless: every fetch checks ST1 and, if data is ready, reads the frame.
pub struct DirectTransport<I, T> {
    i2c: I,
    timer: T,
}

impl<I: I2cInterface, T: TimerInterface> DirectTransport<I, T> {
    pub fn new(i2c: I, timer: T) -> Self {
        Self { i2c, timer }
    }

    /// Borrow the I2C bus
    pub fn i2c(&mut self) -> &mut I {
        &mut self.i2c
    }

    /// Release the bus and timer
    pub fn release(self) -> (I, T) {
        (self.i2c, self.timer)
    }
}

impl<I: I2cInterface, T: TimerInterface> MagTransport for DirectTransport<I, T> {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn write(&mut self, addr: u8, reg: u8, value: u8) -> Result<(), MagError> {
        self.i2c.write(addr, &[reg, value])?;
        Ok(())
    }

    fn read(&mut self, addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), MagError> {
        self.i2c.write_read(addr, &[reg], buf)?;
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) -> Result<(), MagError> {
        self.timer.delay_ms(ms)?;
        Ok(())
    }

    fn fetch_frame(&mut self, addr: u8) -> Result<FrameFetch, MagError> {
        let mut status = [0u8; 1];
        self.read(addr, AK8963_ST1, &mut status)?;
        if !Status1::from_bits_retain(status[0]).contains(Status1::DATA_READY) {
            return Err(MagError::NotReady);
        }

        let mut frame = [0u8; DATA_FRAME_LEN];
        match self.read(addr, AK8963_HXL, &mut frame) {
            Ok(()) => Ok(FrameFetch::Frame(frame)),
            Err(err) => Ok(FrameFetch::Lost(err)),
        }
    }
}

/// AK8963 behind the MPU-9250 I2C master
///
/// Owns the bridge proxy and the read cycle, so each driver instance carries
/// its own in-flight read.
pub struct BridgeTransport<B, T> {
    proxy: BridgeProxy<B, T>,
    cycle: ReadCycle,
}

impl<B: RegisterInterface, T: TimerInterface> BridgeTransport<B, T> {
    /// Create a bridge transport with default timing
    ///
    /// [`detect`](super::detect) replaces the timing and retry policy with
    /// those of the configuration it is given.
    pub fn new(bus: B, timer: T) -> Self {
        let config = Ak8963Config::default();
        Self {
            proxy: BridgeProxy::new(bus, timer, config.proxy),
            cycle: ReadCycle::new(config.status_retry),
        }
    }

    /// Bridge proxy
    pub fn proxy(&mut self) -> &mut BridgeProxy<B, T> {
        &mut self.proxy
    }

    /// Read cycle
    pub fn cycle(&self) -> &ReadCycle {
        &self.cycle
    }

    /// Release the bridge bus and timer
    pub fn release(self) -> (B, T) {
        self.proxy.release()
    }
}

impl<B: RegisterInterface, T: TimerInterface> MagTransport for BridgeTransport<B, T> {
    fn name(&self) -> &'static str {
        "bridge"
    }

    fn configure(&mut self, config: &Ak8963Config) {
        self.proxy.set_timing(config.proxy);
        self.cycle.set_status_retry(config.status_retry);
    }

    fn prepare(&mut self) -> Result<(), MagError> {
        self.proxy.enable_master()
    }

    fn write(&mut self, addr: u8, reg: u8, value: u8) -> Result<(), MagError> {
        self.proxy.write(addr, reg, value)
    }

    fn read(&mut self, addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), MagError> {
        self.proxy.read(addr, reg, buf)
    }

    fn delay_ms(&mut self, ms: u32) -> Result<(), MagError> {
        self.proxy.timer().delay_ms(ms)?;
        Ok(())
    }

    fn fetch_frame(&mut self, addr: u8) -> Result<FrameFetch, MagError> {
        self.cycle.step(&mut self.proxy, addr)
    }
}
