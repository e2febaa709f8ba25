//! Timer adapters
//!
//! `HalTimer` pairs an `embedded_hal::delay::DelayNs` with a [`TimeSource`]
//! clock. With the `embassy` feature, `EmbassyTimer` uses the embassy time
//! driver for both.

use crate::core::traits::TimeSource;
use crate::platform::{traits::TimerInterface, Result};
use embedded_hal::delay::DelayNs;

/// Blocking delay plus monotonic clock
pub struct HalTimer<D, C> {
    delay: D,
    clock: C,
}

impl<D: DelayNs, C: TimeSource> HalTimer<D, C> {
    /// Combine a HAL delay with a clock
    pub fn new(delay: D, clock: C) -> Self {
        Self { delay, clock }
    }
}

impl<D: DelayNs, C: TimeSource> TimerInterface for HalTimer<D, C> {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        self.delay.delay_us(us);
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        self.delay.delay_ms(ms);
        Ok(())
    }

    fn now_us(&self) -> u64 {
        self.clock.now_us()
    }
}

/// Timer backed by the embassy time driver
///
/// Delays busy-wait with `embassy_time::block_for`, which is what the
/// settle and conversion waits need: they must not yield to the executor.
#[cfg(feature = "embassy")]
#[derive(Clone, Copy, Default)]
pub struct EmbassyTimer;

#[cfg(feature = "embassy")]
impl TimerInterface for EmbassyTimer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        embassy_time::block_for(embassy_time::Duration::from_micros(us as u64));
        Ok(())
    }

    fn now_us(&self) -> u64 {
        embassy_time::Instant::now().as_micros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::MockTime;

    #[derive(Default)]
    struct CountingDelay {
        total_ns: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    #[test]
    fn delays_are_forwarded_and_clock_is_read() {
        let clock = MockTime::with_initial(42);
        let mut timer = HalTimer::new(CountingDelay::default(), clock);

        timer.delay_us(10).unwrap();
        timer.delay_ms(4).unwrap();

        assert_eq!(timer.delay.total_ns, 4_010_000);
        assert_eq!(timer.now_us(), 42);
    }
}
