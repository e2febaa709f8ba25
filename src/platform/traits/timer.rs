//! Timer interface trait
//!
//! Monotonic microsecond clock plus blocking delays. The driver only blocks
//! for register settle time, the tail of a conversion budget, and one-time
//! bring-up.

use crate::platform::Result;

/// Timer interface trait
///
/// # Safety Invariants
///
/// - Monotonic time source (never goes backwards)
/// - Microsecond-level precision required
pub trait TimerInterface {
    /// Block for at least `us` microseconds
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer` if the delay cannot be performed.
    fn delay_us(&mut self, us: u32) -> Result<()>;

    /// Block for at least `ms` milliseconds
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer` if the delay cannot be performed.
    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        self.delay_us(ms.saturating_mul(1000))
    }

    /// Microseconds since platform initialization
    fn now_us(&self) -> u64;

    /// Microseconds elapsed since `reference_us`, saturating at zero
    fn elapsed_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }
}
