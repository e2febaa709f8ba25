//! Time abstraction traits for platform-agnostic timing operations.
//!
//! `TimeSource` abstracts over the monotonic clock so the platform timer
//! adapters can be assembled from any clock and tested without hardware.

use core::cell::Cell;

/// Platform-agnostic monotonic clock.
///
/// # Example
///
/// ```
/// use pico_trail_mag::core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// let start = time.now_us();
/// time.advance(8_000);
/// assert_eq!(time.elapsed_since(start), 8_000);
/// ```
pub trait TimeSource: Clone + Send + Sync {
    /// Returns current time in milliseconds since system start.
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }

    /// Returns current time in microseconds since system start.
    fn now_us(&self) -> u64;

    /// Returns elapsed time in microseconds since a reference point.
    ///
    /// Uses saturating subtraction to handle potential overflow.
    fn elapsed_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock time source for testing with controllable time advancement.
///
/// Clones take a snapshot: each clone has its own `Cell` after cloning.
#[derive(Clone, Default)]
pub struct MockTime {
    current_us: Cell<u64>,
}

// Safety: MockTime is only used in single-threaded test contexts
// where Cell is safe. The Send+Sync bounds on TimeSource trait
// are required for embedded contexts, but MockTime is not used there.
unsafe impl Send for MockTime {}
unsafe impl Sync for MockTime {}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub fn new() -> Self {
        Self {
            current_us: Cell::new(0),
        }
    }

    /// Creates a new `MockTime` starting at the specified time.
    pub fn with_initial(us: u64) -> Self {
        Self {
            current_us: Cell::new(us),
        }
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, us: u64) {
        self.current_us.set(us);
    }

    /// Advances the current time by the specified amount.
    pub fn advance(&self, us: u64) {
        self.current_us.set(self.current_us.get() + us);
    }
}

impl TimeSource for MockTime {
    fn now_us(&self) -> u64 {
        self.current_us.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_time_advance() {
        let time = MockTime::new();
        time.advance(4_000);
        time.advance(4_000);
        assert_eq!(time.now_us(), 8_000);
        assert_eq!(time.now_ms(), 8);
    }

    #[test]
    fn mock_time_elapsed_since_saturates() {
        let time = MockTime::with_initial(1_000);

        // Reference is in the "future" - should saturate to 0
        assert_eq!(time.elapsed_since(5_000), 0);
        assert_eq!(time.elapsed_since(250), 750);
    }

    #[test]
    fn mock_time_clone_is_a_snapshot() {
        let time = MockTime::with_initial(1_000);
        let cloned = time.clone();

        time.advance(500);
        assert_eq!(time.now_us(), 1_500);
        assert_eq!(cloned.now_us(), 1_000);
    }
}
