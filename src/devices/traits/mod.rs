//! Device traits
//!
//! Hardware-independent capability interfaces consumed by orientation and
//! fusion code. Drivers register into these by returning a handle that
//! implements them.

pub mod magnetometer;

pub use magnetometer::{MagError, MagSample, Magnetometer};
