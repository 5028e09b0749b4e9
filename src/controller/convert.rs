//! # Demand Converter Module
//!
//! Turns raw joystick axis readings into normalized pilot demands.
//!
//! Some transmitters report an asymmetric raw range: the DX8 through a
//! PPM->USB cable tops out around -0.66 on one side and +0.67 on the other.
//! Each model therefore carries a [`ScaleProfile`] with separate divisors for
//! the negative and positive half of the axis. The divisor is chosen from the
//! sign of the raw reading, before the channel's direction is applied.
//!
//! ## Usage
//!
//! ```
//! use quadstick::controller::convert::ScaleProfile;
//!
//! let profile = ScaleProfile::DX8;
//!
//! // Full forward on a reversed DX8 pitch axis
//! assert_eq!(profile.convert(-0.66, -1.0), 1.0);
//! ```

use super::axis_map::TransmitterModel;

/// Divisors applied to the negative and positive halves of a raw axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleProfile {
    /// Divisor for raw readings >= 0.
    pub scale_pos: f32,
    /// Divisor for raw readings < 0.
    pub scale_neg: f32,
}

impl Default for ScaleProfile {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ScaleProfile {
    /// Pass-through profile for devices that already span [-1, 1].
    pub const IDENTITY: ScaleProfile = ScaleProfile {
        scale_pos: 1.0,
        scale_neg: 1.0,
    };

    /// Spektrum DX8 through a Wailly PPM->USB cable.
    pub const DX8: ScaleProfile = ScaleProfile {
        scale_pos: 0.67,
        scale_neg: 0.66,
    };

    /// Returns the profile for a transmitter model.
    #[must_use]
    pub fn for_model(model: TransmitterModel) -> Self {
        match model {
            TransmitterModel::Dx8 => Self::DX8,
            TransmitterModel::Gamepad => Self::IDENTITY,
        }
    }

    /// Converts a raw reading with this profile's divisors.
    ///
    /// See [`convert`].
    #[must_use]
    pub fn convert(&self, raw: f32, sign: f32) -> f32 {
        convert(raw, sign, self.scale_pos, self.scale_neg)
    }
}

/// Scales a raw axis reading, applies the channel direction and clamps to [-1, 1].
///
/// # Arguments
///
/// * `raw` - Axis reading from the input source
/// * `sign` - Channel direction, +1.0 or -1.0
/// * `scale_pos` - Divisor used when `raw >= 0`
/// * `scale_neg` - Divisor used when `raw < 0`
///
/// Non-finite readings are treated as centered.
///
/// # Examples
///
/// ```
/// use quadstick::controller::convert::convert;
///
/// assert_eq!(convert(0.335, 1.0, 0.67, 0.66), 0.5);
/// assert_eq!(convert(1.0, 1.0, 0.67, 0.66), 1.0); // clamped
/// ```
#[must_use]
pub fn convert(raw: f32, sign: f32, scale_pos: f32, scale_neg: f32) -> f32 {
    if !raw.is_finite() {
        return 0.0;
    }

    let scaled = raw / if raw < 0.0 { scale_neg } else { scale_pos };

    (sign * scaled).clamp(-1.0, 1.0)
}

/// Maps a [-1, 1] throttle demand to [0, 1], so that mid-stick reads 0.5.
#[inline]
#[must_use]
pub fn throttle_to_unit(value: f32) -> f32 {
    ((value + 1.0) / 2.0).clamp(0.0, 1.0)
}
