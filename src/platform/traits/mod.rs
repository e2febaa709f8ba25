//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod i2c;
pub mod register;
pub mod spi;
pub mod timer;

// Re-export trait interfaces
pub use i2c::{I2cConfig, I2cInterface};
pub use register::RegisterInterface;
pub use spi::{SpiConfig, SpiInterface, SpiMode};
pub use timer::TimerInterface;
