//! Magnetometer capability interface
//!
//! Device-independent interface for magnetometers to be consumed by heading
//! and fusion code.
//!
//! ## Usage
//!
//! ```ignore
//! use pico_trail_mag::devices::traits::Magnetometer;
//!
//! fn control_tick<M: Magnetometer>(mag: &mut M) {
//!     if let Some(sample) = mag.poll() {
//!         // feed sample.to_vector() to the heading estimator
//!     }
//! }
//! ```

use crate::platform::PlatformError;
use nalgebra::Vector3;

/// Magnetometer error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagError {
    /// Transaction not acknowledged, or bus error
    Bus,

    /// Status register reports no new data yet
    NotReady,

    /// Status2 data error bit set
    SensorFault,

    /// Status2 reports magnetic sensor overflow
    Overflow,

    /// Identity register did not match
    NotDetected,

    /// Burst longer than the bridge's slave channel can carry
    InvalidLength,
}

impl From<PlatformError> for MagError {
    fn from(_: PlatformError) -> Self {
        MagError::Bus
    }
}

/// One magnetometer measurement
///
/// Raw register counts, negated and scaled by the per-axis sensitivity gain.
/// The driver keeps no history: a sample is handed out once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl MagSample {
    /// Create a sample from per-axis values
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Axes as an array in X, Y, Z order
    pub fn as_array(&self) -> [i16; 3] {
        [self.x, self.y, self.z]
    }

    /// Axes as a float vector for fusion code
    pub fn to_vector(&self) -> Vector3<f32> {
        Vector3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl From<[i16; 3]> for MagSample {
    fn from(axes: [i16; 3]) -> Self {
        Self::new(axes[0], axes[1], axes[2])
    }
}

/// Magnetometer trait
///
/// A handle implementing this trait exists only for a detected device:
/// detection is what produces it.
pub trait Magnetometer {
    /// One-time bring-up. May block for milliseconds; call before the
    /// control loop starts.
    fn init(&mut self) -> bool;

    /// Per-tick poll. Never blocks beyond register settle time and the tail
    /// of an already elapsed conversion budget.
    ///
    /// Returns `None` when no new sample is available this tick, including
    /// after a transport, not-ready or sensor fault.
    fn poll(&mut self) -> Option<MagSample>;

    /// Device name for logs and diagnostics
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::error::I2cError;

    #[test]
    fn platform_errors_map_to_bus() {
        assert_eq!(MagError::from(PlatformError::I2c(I2cError::Nack)), MagError::Bus);
        assert_eq!(MagError::from(PlatformError::InvalidConfig), MagError::Bus);
    }

    #[test]
    fn sample_conversions() {
        let sample = MagSample::from([-16, -32, -48]);
        assert_eq!(sample, MagSample::new(-16, -32, -48));
        assert_eq!(sample.as_array(), [-16, -32, -48]);
        assert_eq!(sample.to_vector(), Vector3::new(-16.0, -32.0, -48.0));
    }
}
