//! Mock platform implementation for testing
//!
//! Mock implementations of the platform traits for host tests, without
//! hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```ignore
//! use pico_trail_mag::platform::mock::MockTimer;
//! use pico_trail_mag::platform::traits::TimerInterface;
//!
//! let mut timer = MockTimer::new();
//! let clock = timer.clone();
//! timer.delay_us(250).unwrap();
//! assert_eq!(clock.now_us(), 250);
//! ```

#![cfg(any(test, feature = "mock"))]

pub mod i2c;
pub mod register;
pub mod spi;
pub mod timer;

pub use i2c::MockI2c;
pub use register::MockRegisters;
pub use spi::MockSpi;
pub use timer::MockTimer;
