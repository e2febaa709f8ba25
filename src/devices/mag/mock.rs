//! Mock magnetometer for testing
//!
//! Scripted [`Magnetometer`] for code that consumes magnetometer samples.
//! Each queued sample is handed out by exactly one `poll`; polls with an
//! empty queue return `None`, like a device between conversions.

use crate::devices::traits::{MagSample, Magnetometer};
use heapless::Deque;

/// Maximum number of queued samples
pub const MOCK_QUEUE_DEPTH: usize = 32;

/// Scripted magnetometer
#[derive(Debug)]
pub struct MockMagnetometer {
    samples: Deque<Option<MagSample>, MOCK_QUEUE_DEPTH>,
    init_result: bool,
    init_calls: u32,
    poll_count: u32,
}

impl MockMagnetometer {
    /// Create a mock whose `init` succeeds and which has nothing queued
    pub fn new() -> Self {
        Self {
            samples: Deque::new(),
            init_result: true,
            init_calls: 0,
            poll_count: 0,
        }
    }

    /// Set what `init` returns
    pub fn set_init_result(&mut self, result: bool) {
        self.init_result = result;
    }

    /// Queue a sample for a later poll
    ///
    /// Returns `false` if the queue is full.
    pub fn push_sample(&mut self, sample: MagSample) -> bool {
        self.samples.push_back(Some(sample)).is_ok()
    }

    /// Queue an empty tick: the poll that reaches it returns `None`
    pub fn push_gap(&mut self) -> bool {
        self.samples.push_back(None).is_ok()
    }

    /// Queued ticks not polled yet
    pub fn pending(&self) -> usize {
        self.samples.len()
    }

    /// Number of `init` calls
    pub fn init_calls(&self) -> u32 {
        self.init_calls
    }

    /// Number of `poll` calls
    pub fn poll_count(&self) -> u32 {
        self.poll_count
    }
}

impl Default for MockMagnetometer {
    fn default() -> Self {
        Self::new()
    }
}

impl Magnetometer for MockMagnetometer {
    fn init(&mut self) -> bool {
        self.init_calls += 1;
        self.init_result
    }

    fn poll(&mut self) -> Option<MagSample> {
        self.poll_count += 1;
        self.samples.pop_front().flatten()
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
