//! Non-blocking read cycle over the bridge
//!
//! One status read, then one data read, each queued on the bridge and
//! collected on a later tick once its conversion budget has elapsed. A call to
//! [`ReadCycle::step`] never waits for a budget that has not run out yet.

use super::proxy::BridgeProxy;
use super::registers::{Status1, AK8963_HXL, AK8963_ST1, DATA_FRAME_LEN};
use super::transport::FrameFetch;
use crate::devices::traits::MagError;
use crate::platform::traits::{RegisterInterface, TimerInterface};

/// Where the read cycle stands between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadState {
    /// Next tick queues a status (ST1) read
    #[default]
    AwaitingStatusRequest,
    /// A status read is queued
    AwaitingStatusResult,
    /// A data (HXL..ST2) read is queued
    AwaitingDataResult,
}

/// Read state machine driving a [`BridgeProxy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadCycle {
    state: ReadState,
    status_retry: bool,
}

impl ReadCycle {
    /// Create a cycle waiting to request status
    ///
    /// With `status_retry`, a failed or not-ready status result re-issues the
    /// status read within the same step instead of on the next one.
    pub fn new(status_retry: bool) -> Self {
        Self {
            state: ReadState::AwaitingStatusRequest,
            status_retry,
        }
    }

    /// Current state
    pub fn state(&self) -> ReadState {
        self.state
    }

    /// Enable or disable the immediate status re-issue
    pub fn set_status_retry(&mut self, status_retry: bool) {
        self.status_retry = status_retry;
    }

    /// Go back to requesting status
    pub fn reset(&mut self) {
        self.state = ReadState::AwaitingStatusRequest;
    }

    /// Advance the cycle by one tick
    ///
    /// Returns:
    /// - `Ok(FrameFetch::Frame(frame))`: a complete data frame, ST2 not yet checked
    /// - `Ok(FrameFetch::Pending)`: a read is queued or still within its budget
    /// - `Ok(FrameFetch::Lost(err))`: the data fetch failed after the bridge
    ///   had already read the measurement out
    /// - `Err(MagError::NotReady)`: status read found no new data
    /// - `Err(MagError::Bus)`: a status transaction failed
    pub fn step<B, T>(
        &mut self,
        proxy: &mut BridgeProxy<B, T>,
        addr: u8,
    ) -> Result<FrameFetch, MagError>
    where
        B: RegisterInterface,
        T: TimerInterface,
    {
        let mut retry = self.status_retry;

        loop {
            match self.state {
                ReadState::AwaitingStatusRequest => {
                    if !proxy.start_read(addr, AK8963_ST1, 1) {
                        return Err(MagError::Bus);
                    }
                    self.state = ReadState::AwaitingStatusResult;
                    return Ok(FrameFetch::Pending);
                }

                ReadState::AwaitingStatusResult => {
                    if proxy.remaining_time_us() > 0 {
                        return Ok(FrameFetch::Pending);
                    }

                    let mut status = [0u8; 1];
                    let checked = proxy.complete_read(&mut status).and_then(|()| {
                        if Status1::from_bits_retain(status[0]).contains(Status1::DATA_READY) {
                            Ok(())
                        } else {
                            Err(MagError::NotReady)
                        }
                    });

                    if let Err(err) = checked {
                        self.state = ReadState::AwaitingStatusRequest;
                        if retry {
                            crate::log_trace!("AK8963 status {:?}, re-issuing", err);
                            retry = false;
                            continue;
                        }
                        return Err(err);
                    }

                    if !proxy.start_read(addr, AK8963_HXL, DATA_FRAME_LEN as u8) {
                        self.state = ReadState::AwaitingStatusRequest;
                        return Err(MagError::Bus);
                    }
                    self.state = ReadState::AwaitingDataResult;
                    return Ok(FrameFetch::Pending);
                }

                ReadState::AwaitingDataResult => {
                    if proxy.remaining_time_us() > 0 {
                        return Ok(FrameFetch::Pending);
                    }

                    let mut frame = [0u8; DATA_FRAME_LEN];
                    let fetched = proxy.complete_read(&mut frame);
                    self.state = ReadState::AwaitingStatusRequest;
                    return Ok(match fetched {
                        Ok(()) => FrameFetch::Frame(frame),
                        Err(err) => FrameFetch::Lost(err),
                    });
                }
            }
        }
    }
}

impl Default for ReadCycle {
    fn default() -> Self {
        Self::new(true)
    }
}
