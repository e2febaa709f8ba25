//! Mock Timer implementation for testing

use crate::platform::{traits::TimerInterface, Result};
use core::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

/// Mock Timer implementation
///
/// Simulated clock that only moves when a test advances it or when the code
/// under test delays. Clones share the same clock, so a test can keep one
/// handle while the driver owns another.
#[derive(Debug, Clone, Default)]
pub struct MockTimer {
    now_us: Rc<Cell<u64>>,
    delays: Rc<RefCell<Vec<u32>>>,
}

impl MockTimer {
    /// Create a new mock timer at t = 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new mock timer at the given time
    pub fn with_initial(us: u64) -> Self {
        let timer = Self::default();
        timer.set(us);
        timer
    }

    /// Move the clock forward without recording a delay
    pub fn advance(&self, us: u64) {
        self.now_us.set(self.now_us.get().wrapping_add(us));
    }

    /// Set the clock to an absolute value
    pub fn set(&self, us: u64) {
        self.now_us.set(us);
    }

    /// Delays requested so far, in microseconds
    pub fn delays(&self) -> Vec<u32> {
        self.delays.borrow().clone()
    }

    /// Sum of all requested delays
    pub fn total_delay_us(&self) -> u64 {
        self.delays.borrow().iter().map(|&us| us as u64).sum()
    }

    /// Forget recorded delays
    pub fn clear_delays(&self) {
        self.delays.borrow_mut().clear();
    }
}

impl TimerInterface for MockTimer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        self.delays.borrow_mut().push(us);
        self.advance(us as u64);
        Ok(())
    }

    fn now_us(&self) -> u64 {
        self.now_us.get()
    }
}
