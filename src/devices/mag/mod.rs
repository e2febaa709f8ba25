//! Magnetometer drivers
//!
//! - `ak8963`: AK8963 3-axis magnetometer, direct or behind an MPU-9250
//! - `mock`: scripted magnetometer for tests

pub mod ak8963;
pub mod mock;

pub use ak8963::{detect, Ak8963, Ak8963Config, BridgeTransport, DirectTransport};
pub use mock::MockMagnetometer;
