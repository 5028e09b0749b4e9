//! # QuadStick Session
//!
//! One polling session over an [`InputSource`]: resolves the transmitter's
//! axes, runs the startup handshake and turns every poll into a
//! [`DemandVector`] and [`SwitchState`].
//!
//! ## Usage
//!
//! ```no_run
//! use quadstick::controller::axis_map::{Platform, TransmitterModel};
//! use quadstick::controller::joystick::EvdevJoystick;
//! use quadstick::stick::{Poll, QuadStick, SessionSettings};
//!
//! let joystick = EvdevJoystick::open()?;
//! let mut stick = QuadStick::new(
//!     joystick,
//!     TransmitterModel::Dx8,
//!     Platform::detect(),
//!     &SessionSettings::default(),
//! );
//!
//! while stick.running() {
//!     if let Poll::Ready { demands, switches } = stick.poll()? {
//!         println!("{:?} {:?}", demands, switches);
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use tracing::debug;

use crate::controller::axis_map::{AxisMap, Channel, Platform, TransmitterModel};
use crate::controller::composer::{DemandVector, ModeComposer, SwitchState};
use crate::controller::convert::{throttle_to_unit, ScaleProfile};
use crate::controller::model;
use crate::controller::neutral::{NeutralBand, DEFAULT_BAND};
use crate::controller::source::InputSource;
use crate::controller::startup::{
    StartupGesture, StartupPhase, DEFAULT_THROTTLE_DOWN, DEFAULT_THROTTLE_UP,
};
use crate::error::Result;

/// Policy knobs for a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    /// Neutral band half-width gating hold modes.
    pub neutral_band: f32,
    /// Skip the startup throttle gesture.
    pub skip_startup: bool,
    /// First-phase startup threshold.
    pub throttle_up: f32,
    /// Second-phase startup threshold.
    pub throttle_down: f32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            neutral_band: DEFAULT_BAND,
            skip_startup: false,
            throttle_up: DEFAULT_THROTTLE_UP,
            throttle_down: DEFAULT_THROTTLE_DOWN,
        }
    }
}

/// Result of one poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Poll {
    /// Startup gesture not complete; control input is not reported yet.
    Calibrating(StartupPhase),
    /// Normalized control input.
    Ready {
        demands: DemandVector,
        switches: SwitchState,
    },
}

/// Polling session over one input device.
#[derive(Debug)]
pub struct QuadStick<S: InputSource> {
    source: S,
    model: TransmitterModel,
    platform: Platform,
    map: AxisMap,
    profile: ScaleProfile,
    composer: ModeComposer,
    startup: StartupGesture,
}

impl<S: InputSource> QuadStick<S> {
    /// Creates a session. The axis map is fixed for the session's lifetime.
    pub fn new(
        source: S,
        model: TransmitterModel,
        platform: Platform,
        settings: &SessionSettings,
    ) -> Self {
        let startup = if settings.skip_startup {
            StartupGesture::skipped()
        } else {
            StartupGesture::new(settings.throttle_up, settings.throttle_down)
        };

        debug!(
            "Session for {} on {} (band {:.2})",
            model.display_name(),
            platform,
            settings.neutral_band
        );

        Self {
            source,
            model,
            platform,
            map: AxisMap::for_model(model, platform),
            profile: ScaleProfile::for_model(model),
            composer: ModeComposer::new(NeutralBand::new(settings.neutral_band)),
            startup,
        }
    }

    /// Transmitter display name.
    pub fn name(&self) -> &'static str {
        self.model.display_name()
    }

    /// Transmitter model whose tables and switch rules are in use.
    pub fn model(&self) -> TransmitterModel {
        self.model
    }

    /// Platform whose axis ordering is in use.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Channel table resolved for the model and platform.
    pub fn axis_map(&self) -> &AxisMap {
        &self.map
    }

    /// Current step of the startup throttle gesture.
    pub fn startup_phase(&self) -> StartupPhase {
        self.startup.phase()
    }

    /// False once the input source asked to stop.
    pub fn running(&self) -> bool {
        self.source.running()
    }

    /// Gives the input source back, ending the session.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Pumps the input source and reports this poll's control input.
    ///
    /// # Errors
    ///
    /// Propagates input source failures.
    pub fn poll(&mut self) -> Result<Poll> {
        self.source.pump()?;

        let demands = self.read_demands();

        if !self.startup.is_ready() {
            let alt_hold = model::altitude_hold_requested(self.model, &self.map, &self.source);
            let phase = self.startup.advance(demands.throttle, alt_hold);
            if phase != StartupPhase::Ready {
                return Ok(Poll::Calibrating(phase));
            }
        }

        let request = model::decode_request(self.model, &self.map, &self.source);
        let switches = self.composer.compose(&demands, &request);

        Ok(Poll::Ready { demands, switches })
    }

    fn read_demands(&self) -> DemandVector {
        DemandVector {
            pitch: self.read_channel(Channel::Pitch),
            roll: self.read_channel(Channel::Roll),
            yaw: self.read_channel(Channel::Yaw),
            throttle: throttle_to_unit(self.read_channel(Channel::Throttle)),
        }
    }

    fn read_channel(&self, channel: Channel) -> f32 {
        let binding = self.map.resolve(channel);
        self.profile.convert(self.source.axis(binding.index), binding.sign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::source::mocks::{Frame, ScriptedSource};
    use crate::controller::source::MockInputSource;
    use crate::error::QuadStickError;

    /// DX8 Linux axes: throttle 0, roll 1, pitch 2, switch 3, yaw 5.
    fn dx8(throttle: f32, roll: f32, pitch: f32, switch: f32, yaw: f32) -> Frame {
        Frame::new(&[throttle, roll, pitch, switch, 0.0, yaw])
    }

    const DOWN: f32 = 0.66;
    const MIDDLE: f32 = 0.0;
    const UP: f32 = -0.66;

    fn ready_session(frames: Vec<Frame>) -> QuadStick<ScriptedSource> {
        let settings = SessionSettings {
            skip_startup: true,
            ..SessionSettings::default()
        };
        QuadStick::new(
            ScriptedSource::new(frames),
            TransmitterModel::Dx8,
            Platform::Linux,
            &settings,
        )
    }

    fn expect_ready(poll: Poll) -> (DemandVector, SwitchState) {
        match poll {
            Poll::Ready { demands, switches } => (demands, switches),
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    // ==================== Demand Tests ====================

    #[test]
    fn test_dx8_linux_full_forward_pitch() {
        let mut stick = ready_session(vec![dx8(0.0, 0.0, -0.66, DOWN, 0.0)]);
        let (demands, _) = expect_ready(stick.poll().unwrap());
        assert_eq!(demands.pitch, 1.0);
        assert_eq!(demands.roll, 0.0);
    }

    #[test]
    fn test_dx8_linux_roll_and_yaw_signs() {
        let mut stick = ready_session(vec![dx8(0.0, 0.67, 0.0, DOWN, 0.67)]);
        let (demands, _) = expect_ready(stick.poll().unwrap());
        assert_eq!(demands.roll, 1.0);
        assert_eq!(demands.yaw, -1.0);
    }

    #[test]
    fn test_dx8_throttle_mapping() {
        let mut stick = ready_session(vec![
            dx8(-0.66, 0.0, 0.0, DOWN, 0.0),
            dx8(0.0, 0.0, 0.0, DOWN, 0.0),
            dx8(0.67, 0.0, 0.0, DOWN, 0.0),
        ]);
        let throttles: Vec<f32> = (0..3)
            .map(|_| expect_ready(stick.poll().unwrap()).0.throttle)
            .collect();
        assert_eq!(throttles, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_demands_stay_in_range() {
        let frames: Vec<Frame> = (-10..=10)
            .map(|step| {
                let v = step as f32 / 10.0;
                dx8(v, v, -v, DOWN, v)
            })
            .collect();
        let count = frames.len();
        let mut stick = ready_session(frames);
        for _ in 0..count {
            let (demands, _) = expect_ready(stick.poll().unwrap());
            for value in [demands.pitch, demands.roll, demands.yaw] {
                assert!((-1.0..=1.0).contains(&value));
            }
            assert!((0.0..=1.0).contains(&demands.throttle));
        }
    }

    // ==================== Switch Tests ====================

    #[test]
    fn test_hold_modes_follow_flap_switch_at_neutral() {
        let mut stick = ready_session(vec![
            dx8(0.0, 0.0, 0.0, DOWN, 0.0),
            dx8(0.0, 0.0, 0.0, MIDDLE, 0.0),
            dx8(0.0, 0.0, 0.0, UP, 0.0),
        ]);

        let (_, down) = expect_ready(stick.poll().unwrap());
        assert!(!down.altitude_hold && !down.position_hold);

        let (_, middle) = expect_ready(stick.poll().unwrap());
        assert!(middle.altitude_hold && !middle.position_hold);

        let (_, up) = expect_ready(stick.poll().unwrap());
        assert!(up.altitude_hold && up.position_hold);
    }

    #[test]
    fn test_hold_suppressed_mid_maneuver() {
        let mut stick = ready_session(vec![dx8(0.0, 0.5, 0.0, UP, 0.0)]);
        let (_, switches) = expect_ready(stick.poll().unwrap());
        assert!(!switches.altitude_hold);
        assert!(!switches.position_hold);
    }

    #[test]
    fn test_autopilot_dial_overrides_holds() {
        let frame = dx8(0.0, 0.0, 0.0, UP, 0.0).with_buttons(&[10]);
        let mut stick = ready_session(vec![frame]);
        let (_, switches) = expect_ready(stick.poll().unwrap());
        assert!(switches.autopilot);
        assert!(!switches.altitude_hold);
        assert!(!switches.position_hold);
    }

    #[test]
    fn test_gamepad_autopilot_button_toggles() {
        let settings = SessionSettings {
            skip_startup: true,
            ..SessionSettings::default()
        };
        // Gamepad throttle axis 1 is reversed: 0.0 raw is mid-stick
        let released = Frame::new(&[0.0, 0.0, 0.0, 0.0]);
        let pressed = Frame::new(&[0.0, 0.0, 0.0, 0.0]).with_buttons(&[0]);
        let source = ScriptedSource::new(vec![
            pressed.clone(),
            pressed.clone(),
            released.clone(),
            pressed,
            released,
        ]);
        let mut stick =
            QuadStick::new(source, TransmitterModel::Gamepad, Platform::Linux, &settings);

        let autopilot: Vec<bool> = (0..5)
            .map(|_| expect_ready(stick.poll().unwrap()).1.autopilot)
            .collect();
        assert_eq!(autopilot, vec![true, true, true, false, false]);
    }

    // ==================== Startup Tests ====================

    #[test]
    fn test_startup_gesture_gates_input() {
        let source = ScriptedSource::new(vec![
            dx8(-0.66, 0.0, 0.0, DOWN, 0.0), // idle throttle
            dx8(0.5, 0.0, 0.0, DOWN, 0.0),   // throttle up
            dx8(-0.66, 0.0, 0.0, MIDDLE, 0.0), // down, but alt hold requested
            dx8(-0.66, 0.0, 0.0, DOWN, 0.0), // down, switch off
        ]);
        let mut stick = QuadStick::new(
            source,
            TransmitterModel::Dx8,
            Platform::Linux,
            &SessionSettings::default(),
        );

        assert_eq!(stick.poll().unwrap(), Poll::Calibrating(StartupPhase::AwaitThrottleUp));
        assert_eq!(stick.poll().unwrap(), Poll::Calibrating(StartupPhase::AwaitThrottleDown));
        assert_eq!(stick.poll().unwrap(), Poll::Calibrating(StartupPhase::AwaitThrottleDown));
        assert!(matches!(stick.poll().unwrap(), Poll::Ready { .. }));
        assert_eq!(stick.startup_phase(), StartupPhase::Ready);
    }

    // ==================== Source Tests ====================

    #[test]
    fn test_pump_error_propagates() {
        let mut source = MockInputSource::new();
        source
            .expect_pump()
            .times(1)
            .returning(|| Err(QuadStickError::Controller("unplugged".to_string())));

        let mut stick = QuadStick::new(
            source,
            TransmitterModel::Dx8,
            Platform::Linux,
            &SessionSettings::default(),
        );
        assert!(matches!(stick.poll(), Err(QuadStickError::Controller(_))));
    }

    #[test]
    fn test_running_delegates_to_source() {
        let mut source = MockInputSource::new();
        source.expect_running().times(1).return_const(false);

        let stick = QuadStick::new(
            source,
            TransmitterModel::Gamepad,
            Platform::Darwin,
            &SessionSettings::default(),
        );
        assert!(!stick.running());
    }

    #[test]
    fn test_session_metadata() {
        let stick = ready_session(vec![]);
        assert_eq!(stick.name(), "Spektrum");
        assert_eq!(stick.model(), TransmitterModel::Dx8);
        assert_eq!(stick.platform(), Platform::Linux);
        assert_eq!(stick.axis_map().pitch.index, 2);
        assert_eq!(stick.into_source().pumps, 0);
    }
}
