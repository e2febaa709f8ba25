//! Core infrastructure
//!
//! Logging macros and the clock abstraction shared by the platform adapters
//! and the device drivers.

pub mod logging;
pub mod traits;
