//! # Polling Loop
//!
//! Drives a [`QuadStick`] at a fixed rate until the input source stops or
//! the shutdown future resolves.

use std::future::Future;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info};

use crate::controller::composer::{DemandVector, SwitchState};
use crate::controller::source::InputSource;
use crate::controller::startup::StartupPhase;
use crate::error::Result;
use crate::readout;
use crate::stick::{Poll, QuadStick};

/// Number of ready polls between status log messages
pub const LOG_INTERVAL_POLLS: u64 = 500;

/// Why the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The input source reported it should stop.
    SourceStopped,
    /// The shutdown future resolved.
    Shutdown,
}

/// Loop statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub polls: u64,
    pub ready_polls: u64,
    pub reason: StopReason,
    pub last: Option<(DemandVector, SwitchState)>,
}

/// Polls `stick` at `rate_hz` until it stops running or `shutdown` resolves.
///
/// # Errors
///
/// Stops at the first poll error and returns it; there is no retry.
pub async fn run<S, F>(stick: &mut QuadStick<S>, rate_hz: u32, shutdown: F) -> Result<RunSummary>
where
    S: InputSource,
    F: Future<Output = ()>,
{
    let period = Duration::from_micros(1_000_000 / u64::from(rate_hz.max(1)));
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tokio::pin!(shutdown);

    let mut polls: u64 = 0;
    let mut ready_polls: u64 = 0;
    let mut last = None;
    let mut last_phase: Option<StartupPhase> = None;

    info!("Polling {} at {}Hz", stick.name(), rate_hz);

    let reason = loop {
        tokio::select! {
            _ = ticker.tick() => {
                if !stick.running() {
                    break StopReason::SourceStopped;
                }

                let poll = stick.poll()?;
                polls += 1;

                match poll {
                    Poll::Calibrating(phase) => {
                        if last_phase != Some(phase) {
                            info!("{}", phase.prompt());
                            last_phase = Some(phase);
                        }
                    }
                    Poll::Ready { demands, switches } => {
                        ready_polls += 1;
                        debug!("{}", readout::format_line(&demands, &switches));

                        if ready_polls % LOG_INTERVAL_POLLS == 0 {
                            info!(
                                "{} polls, volume {:.2}, {}",
                                ready_polls,
                                readout::volume(&demands),
                                readout::format_line(&demands, &switches)
                            );
                        }
                        last = Some((demands, switches));
                    }
                }
            }

            _ = &mut shutdown => {
                info!("Shutdown requested");
                break StopReason::Shutdown;
            }
        }
    };

    info!("Stopped after {} polls ({:?})", polls, reason);

    Ok(RunSummary {
        polls,
        ready_polls,
        reason,
        last,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::axis_map::{Platform, TransmitterModel};
    use crate::controller::source::mocks::{Frame, ScriptedSource};
    use crate::controller::source::MockInputSource;
    use crate::error::QuadStickError;
    use crate::stick::SessionSettings;

    fn settings(skip_startup: bool) -> SessionSettings {
        SessionSettings {
            skip_startup,
            ..SessionSettings::default()
        }
    }

    #[test]
    fn test_stops_when_source_stops() {
        let mut source = ScriptedSource::new(vec![Frame::new(&[0.0, 0.0, 0.0, 0.66, 0.0, 0.0])]);
        source.stop_after = Some(5);
        let mut stick =
            QuadStick::new(source, TransmitterModel::Dx8, Platform::Linux, &settings(true));

        let summary = tokio_test::block_on(run(&mut stick, 1000, std::future::pending())).unwrap();

        assert_eq!(summary.reason, StopReason::SourceStopped);
        assert_eq!(summary.polls, 5);
        assert_eq!(summary.ready_polls, 5);
        let (demands, switches) = summary.last.unwrap();
        assert_eq!(demands.throttle, 0.5);
        assert_eq!(switches, SwitchState::default());
    }

    #[test]
    fn test_calibrating_polls_are_not_ready() {
        let mut source = ScriptedSource::new(vec![Frame::new(&[-0.66])]);
        source.stop_after = Some(3);
        let mut stick =
            QuadStick::new(source, TransmitterModel::Dx8, Platform::Linux, &settings(false));

        let summary = tokio_test::block_on(run(&mut stick, 1000, std::future::pending())).unwrap();

        assert_eq!(summary.polls, 3);
        assert_eq!(summary.ready_polls, 0);
        assert!(summary.last.is_none());
    }

    #[test]
    fn test_shutdown_future_ends_loop() {
        let source = ScriptedSource::new(vec![]);
        let mut stick =
            QuadStick::new(source, TransmitterModel::Gamepad, Platform::Linux, &settings(true));

        let summary = tokio_test::block_on(run(&mut stick, 50, async {})).unwrap();

        assert_eq!(summary.reason, StopReason::Shutdown);
    }

    #[test]
    fn test_poll_error_ends_loop() {
        let mut source = MockInputSource::new();
        source.expect_running().return_const(true);
        source
            .expect_pump()
            .times(1)
            .returning(|| Err(QuadStickError::Controller("unplugged".to_string())));
        let mut stick =
            QuadStick::new(source, TransmitterModel::Dx8, Platform::Linux, &settings(true));

        let result = tokio_test::block_on(run(&mut stick, 1000, std::future::pending()));

        assert!(matches!(result, Err(QuadStickError::Controller(_))));
    }

    #[test]
    fn test_log_interval_constant() {
        assert_eq!(LOG_INTERVAL_POLLS, 500);
    }
}
