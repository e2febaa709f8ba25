//! Sensitivity adjustment
//!
//! The fuse ROM holds one trim byte per axis. The driver turns each into a
//! gain once at bring-up and applies it to every sample afterwards.

use super::registers::{DataFrame, Status2};
use crate::devices::traits::{MagError, MagSample};

/// Gain for a trim byte: `((trim - 128) / 256 + 1) * 30`
pub fn gain_from_trim(trim: u8) -> f32 {
    (((trim as f32 - 128.0) / 256.0) + 1.0) * 30.0
}

/// Per-axis gain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisGain {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AxisGain {
    /// Gain used before bring-up
    pub const UNITY: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    /// Gains from the ASAX, ASAY, ASAZ trim bytes
    pub fn from_trim(trim: [u8; 3]) -> Self {
        Self {
            x: gain_from_trim(trim[0]),
            y: gain_from_trim(trim[1]),
            z: gain_from_trim(trim[2]),
        }
    }

    /// Negate and scale raw counts.
    ///
    /// Float to int conversion truncates toward zero and saturates at the
    /// `i16` range.
    pub fn apply(&self, raw: [i16; 3]) -> MagSample {
        MagSample::new(
            (-(raw[0] as f32) * self.x) as i16,
            (-(raw[1] as f32) * self.y) as i16,
            (-(raw[2] as f32) * self.z) as i16,
        )
    }
}

impl Default for AxisGain {
    fn default() -> Self {
        Self::UNITY
    }
}

/// Validate a data frame and turn it into a sample.
///
/// Both transports end up here, so samples are bit-identical regardless of
/// how the frame was fetched.
///
/// # Errors
///
/// `MagError::SensorFault` or `MagError::Overflow` when ST2 flags the frame.
pub fn decode_frame(frame: &DataFrame, gain: &AxisGain) -> Result<MagSample, MagError> {
    Status2::from_bits_retain(frame[6]).check()?;

    let raw = [
        i16::from_le_bytes([frame[0], frame[1]]),
        i16::from_le_bytes([frame[2], frame[3]]),
        i16::from_le_bytes([frame[4], frame[5]]),
    ];
    Ok(gain.apply(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_reference_points() {
        assert_eq!(gain_from_trim(128), 30.0);
        assert_eq!(gain_from_trim(0), 15.0);
        assert!((gain_from_trim(127) - 29.88).abs() < 0.01);
        assert!((gain_from_trim(255) - 44.88).abs() < 0.01);
    }

    #[test]
    fn gain_is_monotonic_over_all_trims() {
        let mut last = gain_from_trim(0);
        for trim in 1..=255u8 {
            let gain = gain_from_trim(trim);
            assert!(gain > last);
            assert_eq!(gain, gain_from_trim(trim));
            last = gain;
        }
    }

    #[test]
    fn from_trim_is_per_axis() {
        let gain = AxisGain::from_trim([128, 0, 255]);
        assert_eq!(gain.x, 30.0);
        assert_eq!(gain.y, 15.0);
        assert_eq!(gain.z, gain_from_trim(255));
    }

    #[test]
    fn decode_reference_frame() {
        let frame = [0x10, 0x00, 0x20, 0x00, 0x30, 0x00, 0x00];
        let sample = decode_frame(&frame, &AxisGain::UNITY).unwrap();
        assert_eq!(sample, MagSample::new(-16, -32, -48));
    }

    #[test]
    fn decode_is_little_endian_and_scaled() {
        // x = 0x0102, y = -2, z = 100
        let frame = [0x02, 0x01, 0xFE, 0xFF, 0x64, 0x00, 0x10];
        let gain = AxisGain {
            x: 1.0,
            y: 15.0,
            z: 0.5,
        };
        let sample = decode_frame(&frame, &gain).unwrap();
        assert_eq!(sample, MagSample::new(-258, 30, -50));
    }

    #[test]
    fn decode_saturates() {
        let frame = [0x00, 0x80, 0xFF, 0x7F, 0x00, 0x40, 0x00];
        let gain = AxisGain::from_trim([128, 128, 128]);
        let sample = decode_frame(&frame, &gain).unwrap();
        assert_eq!(sample, MagSample::new(i16::MAX, i16::MIN, i16::MIN));
    }

    #[test]
    fn flagged_frames_never_decode() {
        for st2 in [0x01u8, 0x02, 0x03, 0x08, 0x0B] {
            for raw in [0x00u8, 0x7F, 0xFF] {
                let frame = [raw, raw, raw, raw, raw, raw, st2];
                assert!(decode_frame(&frame, &AxisGain::UNITY).is_err());
            }
        }
    }
}
