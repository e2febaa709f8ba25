//! Platform abstraction layer
//!
//! Bus, timer and register access traits, their embedded-hal adapters, and
//! mock implementations for host tests. Drivers only see the traits.

pub mod error;
pub mod hal;
pub mod register;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use register::{I2cRegisters, SpiRegisters};
pub use traits::{I2cInterface, RegisterInterface, SpiInterface, TimerInterface};
