//! embedded-hal platform adapters
//!
//! Bind any `embedded-hal` 1.0 bus or delay implementation to the platform
//! traits, so the driver runs on every HAL that implements them (rp-hal,
//! embassy-rp blocking mode, stm32 HALs, linux-embedded-hal).
//!
//! # Example
//!
//! ```ignore
//! use pico_trail_mag::platform::hal::{HalI2c, HalTimer};
//!
//! let i2c = HalI2c::new(hal_i2c);
//! let timer = HalTimer::new(hal_delay, clock);
//! ```

mod i2c;
mod spi;
mod timer;

pub use i2c::HalI2c;
pub use spi::HalSpi;
pub use timer::HalTimer;

#[cfg(feature = "embassy")]
pub use timer::EmbassyTimer;
