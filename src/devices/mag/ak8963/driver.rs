//! AK8963 Driver Implementation
//!
//! Detection, one-time bring-up and per-tick polling over any
//! [`MagTransport`].

use super::calibration::{decode_frame, AxisGain};
use super::config::{Ak8963Config, MagMode};
use super::registers::{
    AK8963_ASAX, AK8963_CNTL1, AK8963_CNTL2, AK8963_CNTL2_SRST, AK8963_ST1, AK8963_ST2,
    AK8963_WHO_AM_I_VALUE, AK8963_WIA,
};
use super::transport::{FrameFetch, MagTransport};
use crate::devices::traits::{MagError, MagSample, Magnetometer};

/// Probe for an AK8963 behind `transport`
///
/// Applies `config` to the transport, prepares it, soft-resets the device
/// and checks its identity byte. On success the transport moves into the
/// returned driver; on failure it is handed back so the caller can try
/// something else.
pub fn detect<T: MagTransport>(mut transport: T, config: Ak8963Config) -> Result<Ak8963<T>, T> {
    let addr = config.address;
    transport.configure(&config);

    if let Err(err) = transport.prepare() {
        crate::log_warn!("AK8963 {} transport setup failed: {:?}", transport.name(), err);
    }

    // The reset write is not acknowledged reliably; the identity read decides.
    let _ = transport.write(addr, AK8963_CNTL2, AK8963_CNTL2_SRST);
    let _ = transport.delay_ms(config.reset_delay_ms);

    let mut wia = [0u8; 1];
    let result = transport
        .read(addr, AK8963_WIA, &mut wia)
        .and_then(|()| {
            if wia[0] == AK8963_WHO_AM_I_VALUE {
                Ok(())
            } else {
                Err(MagError::NotDetected)
            }
        });

    match result {
        Ok(()) => {
            crate::log_info!(
                "AK8963 detected over {} at {:#x} (WIA: {:#x})",
                transport.name(),
                addr,
                wia[0]
            );
            Ok(Ak8963::new(transport, config))
        }
        Err(err) => {
            crate::log_warn!(
                "AK8963 not found over {} at {:#x}: {:?} (WIA: {:#x})",
                transport.name(),
                addr,
                err,
                wia[0]
            );
            Err(transport)
        }
    }
}

/// AK8963 3-axis magnetometer
///
/// Only [`detect`] creates one.
pub struct Ak8963<T> {
    /// Register path to the device
    transport: T,

    /// Driver configuration
    config: Ak8963Config,

    /// Sensitivity adjustment from fuse ROM
    gain: AxisGain,

    /// Initialization complete flag
    initialized: bool,
}

impl<T: MagTransport> Ak8963<T> {
    fn new(transport: T, config: Ak8963Config) -> Self {
        Self {
            transport,
            config,
            gain: AxisGain::UNITY,
            initialized: false,
        }
    }

    /// Gains in use
    pub fn gain(&self) -> AxisGain {
        self.gain
    }

    /// Configuration in use
    pub fn config(&self) -> &Ak8963Config {
        &self.config
    }

    /// `init` has run
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Borrow the transport
    pub fn transport(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give the transport back
    pub fn release(self) -> T {
        self.transport
    }

    /// Switch CNTL1 mode
    pub fn set_mode(&mut self, mode: MagMode) -> Result<(), MagError> {
        self.transport
            .write(self.config.address, AK8963_CNTL1, mode.register_value())
    }

    fn read(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), MagError> {
        self.transport.read(self.config.address, reg, buf)
    }

    fn bring_up_step(step: &str, result: Result<(), MagError>) {
        if let Err(err) = result {
            crate::log_warn!("AK8963 init: {} failed: {:?}", step, err);
        }
    }
}

impl<T: MagTransport> Magnetometer for Ak8963<T> {
    /// Read the fuse ROM trim and arm the first measurement. Blocks for
    /// several milliseconds over the bridge.
    fn init(&mut self) -> bool {
        Self::bring_up_step("power down", self.set_mode(MagMode::PowerDown));
        Self::bring_up_step("fuse ROM access", self.set_mode(MagMode::FuseRom));

        let mut trim = [0u8; 3];
        match self.read(AK8963_ASAX, &mut trim) {
            Ok(()) => self.gain = AxisGain::from_trim(trim),
            Err(err) => crate::log_warn!("AK8963 init: trim read failed: {:?}", err),
        }

        Self::bring_up_step("power down", self.set_mode(MagMode::PowerDown));

        // Clear any stale status before the first measurement
        let mut status = [0u8; 1];
        Self::bring_up_step("ST1 read", self.read(AK8963_ST1, &mut status));
        Self::bring_up_step("ST2 read", self.read(AK8963_ST2, &mut status));

        Self::bring_up_step("arm", self.set_mode(MagMode::SingleMeasure));

        self.initialized = true;
        crate::log_info!(
            "AK8963 initialized over {} (ASA: {}, {}, {})",
            self.transport.name(),
            trim[0],
            trim[1],
            trim[2]
        );
        true
    }

    fn poll(&mut self) -> Option<MagSample> {
        if !self.initialized {
            return None;
        }

        let decoded = match self.transport.fetch_frame(self.config.address) {
            Ok(FrameFetch::Pending) => return None,
            Ok(FrameFetch::Frame(frame)) => {
                let decoded = decode_frame(&frame, &self.gain);
                if let Err(err) = decoded {
                    crate::log_debug!("AK8963 frame rejected: {:?} (ST2: {:#x})", err, frame[6]);
                }
                decoded.ok()
            }
            Ok(FrameFetch::Lost(err)) => {
                crate::log_debug!("AK8963 data read failed: {:?}", err);
                None
            }
            Err(err) => {
                crate::log_trace!("AK8963 no data: {:?}", err);
                return None;
            }
        };

        // Single measurement mode drops back to power down once the data has
        // been read out, so re-arm whenever a data read ran, usable or not.
        if let Err(err) = self.set_mode(MagMode::SingleMeasure) {
            crate::log_debug!("AK8963 re-arm failed: {:?}", err);
        }

        decoded
    }

    fn name(&self) -> &'static str {
        "AK8963"
    }
}
