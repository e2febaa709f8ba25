//! Device drivers
//!
//! Drivers written against the platform abstraction traits.
//!
//! ## Modules
//!
//! - `mag`: magnetometer drivers (AK8963, mock)
//! - `traits`: capability interfaces (Magnetometer)

pub mod mag;
pub mod traits;
