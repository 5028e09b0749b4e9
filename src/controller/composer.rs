//! # Mode Composer Module
//!
//! Combines the raw mode requests of one poll into the final [`SwitchState`].
//!
//! ## Rules
//!
//! 1. A momentary autopilot button goes through a [`ToggleDebounce`]; a
//!    latching switch or dial is used as-is.
//! 2. Altitude hold and position hold engage only when requested AND the
//!    sticks are inside the [`NeutralBand`].
//! 3. Autopilot supersedes both hold modes: while it is on, both read false.
//!
//! ## Usage
//!
//! ```
//! use quadstick::controller::composer::{AutopilotRequest, DemandVector, ModeComposer, ModeRequest};
//! use quadstick::controller::neutral::NeutralBand;
//!
//! let mut composer = ModeComposer::new(NeutralBand::default());
//! let level = DemandVector { pitch: 0.0, roll: 0.0, yaw: 0.0, throttle: 0.5 };
//!
//! let request = ModeRequest {
//!     altitude_hold: true,
//!     position_hold: false,
//!     autopilot: AutopilotRequest::Latched(false),
//! };
//! let switches = composer.compose(&level, &request);
//! assert!(switches.altitude_hold);
//! assert!(!switches.autopilot);
//! ```

use tracing::info;

use super::debounce::ToggleDebounce;
use super::neutral::NeutralBand;

/// Normalized pilot demands for one poll.
///
/// Rotational channels are in [-1, 1]; throttle is in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DemandVector {
    pub pitch: f32,
    pub roll: f32,
    pub yaw: f32,
    pub throttle: f32,
}

impl DemandVector {
    /// Demands in display order: pitch, roll, yaw, throttle.
    #[must_use]
    pub fn as_array(&self) -> [f32; 4] {
        [self.pitch, self.roll, self.yaw, self.throttle]
    }
}

/// Composed mode switches for one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwitchState {
    pub altitude_hold: bool,
    pub position_hold: bool,
    pub autopilot: bool,
}

/// How the autopilot input reached us this poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutopilotRequest {
    /// Switch or dial position that already holds its state.
    Latched(bool),
    /// Momentary button; the composer toggles on each press.
    Momentary(bool),
}

/// Raw mode requests decoded from the input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeRequest {
    pub altitude_hold: bool,
    pub position_hold: bool,
    pub autopilot: AutopilotRequest,
}

/// Stateful composition of mode requests into switch states.
///
/// Owns the autopilot toggle for the lifetime of the session.
#[derive(Debug, Clone)]
pub struct ModeComposer {
    band: NeutralBand,
    autopilot_toggle: ToggleDebounce,
    last: SwitchState,
}

impl ModeComposer {
    #[must_use]
    pub fn new(band: NeutralBand) -> Self {
        Self {
            band,
            autopilot_toggle: ToggleDebounce::new(),
            last: SwitchState::default(),
        }
    }

    /// Band used to gate hold modes.
    #[must_use]
    pub fn band(&self) -> NeutralBand {
        self.band
    }

    /// Switch state produced by the most recent [`compose`](Self::compose).
    #[must_use]
    pub fn last(&self) -> SwitchState {
        self.last
    }

    /// Composes this poll's switch state.
    pub fn compose(&mut self, demands: &DemandVector, request: &ModeRequest) -> SwitchState {
        let autopilot = match request.autopilot {
            AutopilotRequest::Latched(on) => on,
            AutopilotRequest::Momentary(pressed) => self.autopilot_toggle.update(pressed),
        };

        let neutral = self.band.is_neutral(demands);

        let switches = SwitchState {
            altitude_hold: request.altitude_hold && neutral && !autopilot,
            position_hold: request.position_hold && neutral && !autopilot,
            autopilot,
        };

        if switches != self.last {
            info!(
                "Modes changed: altitude_hold={} position_hold={} autopilot={}",
                switches.altitude_hold, switches.position_hold, switches.autopilot
            );
        }
        self.last = switches;

        switches
    }
}
