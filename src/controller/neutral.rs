//! # Neutral-Band Gate Module
//!
//! Hold modes may only engage while the aircraft is already being flown
//! near level: throttle around mid-stick and all three rotational sticks
//! around center. The band edges are exclusive.

use super::composer::DemandVector;

/// Default band half-width.
pub const DEFAULT_BAND: f32 = 0.2;

/// Throttle neutral on a [0, 1] throttle.
pub const THROTTLE_NEUTRAL: f32 = 0.5;

/// Rotational stick neutral.
pub const STICK_NEUTRAL: f32 = 0.0;

/// Tolerance window around each channel's neutral value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeutralBand {
    half_width: f32,
}

impl Default for NeutralBand {
    fn default() -> Self {
        Self {
            half_width: DEFAULT_BAND,
        }
    }
}

impl NeutralBand {
    /// Creates a band with the given half-width, clamped to [0, 0.5].
    #[must_use]
    pub fn new(half_width: f32) -> Self {
        Self {
            half_width: half_width.clamp(0.0, 0.5),
        }
    }

    #[must_use]
    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    /// True iff `value` lies strictly inside `middle ± half_width`.
    #[inline]
    #[must_use]
    pub fn within(&self, value: f32, middle: f32) -> bool {
        value > middle - self.half_width && value < middle + self.half_width
    }

    /// True iff every stick sits inside its neutral band.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadstick::controller::composer::DemandVector;
    /// use quadstick::controller::neutral::NeutralBand;
    ///
    /// let band = NeutralBand::default();
    /// let level = DemandVector { pitch: 0.0, roll: 0.0, yaw: 0.0, throttle: 0.5 };
    /// assert!(band.is_neutral(&level));
    ///
    /// let climbing = DemandVector { throttle: 0.8, ..level };
    /// assert!(!band.is_neutral(&climbing));
    /// ```
    #[must_use]
    pub fn is_neutral(&self, demands: &DemandVector) -> bool {
        self.within(demands.throttle, THROTTLE_NEUTRAL)
            && self.within(demands.pitch, STICK_NEUTRAL)
            && self.within(demands.roll, STICK_NEUTRAL)
            && self.within(demands.yaw, STICK_NEUTRAL)
    }
}
