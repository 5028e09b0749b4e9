//! # Startup Handshake Module
//!
//! Before accepting control input the operator must move the throttle stick
//! up past mid-stick and then all the way back down, with no altitude hold
//! requested. This confirms that a transmitter is connected and that its
//! sticks and switches start from a safe position.
//!
//! ```text
//!  AwaitThrottleUp ── throttle > up ──▶ AwaitThrottleDown ── throttle < down && !alt_hold ──▶ Ready
//! ```

use tracing::info;

/// Throttle that must be exceeded in the first phase.
pub const DEFAULT_THROTTLE_UP: f32 = 0.5;

/// Throttle that must be undercut in the second phase.
pub const DEFAULT_THROTTLE_DOWN: f32 = 0.05;

/// Handshake phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupPhase {
    AwaitThrottleUp,
    AwaitThrottleDown,
    Ready,
}

impl StartupPhase {
    /// Operator prompt for the phase.
    #[must_use]
    pub fn prompt(&self) -> &'static str {
        match self {
            StartupPhase::AwaitThrottleUp => "Push throttle stick above half",
            StartupPhase::AwaitThrottleDown => "Pull throttle stick fully down, hold switch off",
            StartupPhase::Ready => "Ready",
        }
    }
}

/// Two-phase throttle gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartupGesture {
    phase: StartupPhase,
    throttle_up: f32,
    throttle_down: f32,
}

impl Default for StartupGesture {
    fn default() -> Self {
        Self::new(DEFAULT_THROTTLE_UP, DEFAULT_THROTTLE_DOWN)
    }
}

impl StartupGesture {
    /// Creates a gesture with the given thresholds on a [0, 1] throttle.
    #[must_use]
    pub fn new(throttle_up: f32, throttle_down: f32) -> Self {
        Self {
            phase: StartupPhase::AwaitThrottleUp,
            throttle_up,
            throttle_down,
        }
    }

    /// A gesture that is already complete.
    #[must_use]
    pub fn skipped() -> Self {
        Self {
            phase: StartupPhase::Ready,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn phase(&self) -> StartupPhase {
        self.phase
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.phase == StartupPhase::Ready
    }

    /// Feeds one poll's throttle and altitude-hold request.
    ///
    /// At most one phase transition happens per call.
    pub fn advance(&mut self, throttle: f32, altitude_hold_requested: bool) -> StartupPhase {
        match self.phase {
            StartupPhase::AwaitThrottleUp if throttle > self.throttle_up => {
                info!("Startup: throttle up seen ({:.2})", throttle);
                self.phase = StartupPhase::AwaitThrottleDown;
            }
            StartupPhase::AwaitThrottleDown
                if throttle < self.throttle_down && !altitude_hold_requested =>
            {
                info!("Startup: throttle down seen, accepting control input");
                self.phase = StartupPhase::Ready;
            }
            _ => {}
        }
        self.phase
    }
}
