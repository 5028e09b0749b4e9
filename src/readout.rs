//! # Readout Module
//!
//! What the display and audio collaborators need from each poll: one bar per
//! demand, one lamp per switch, and a volume level that follows throttle.
//!
//! Bars are signed so that "stick forward/right" reads positive on screen:
//! pitch and roll are shown negated, yaw and throttle as-is.

use std::fmt::Write;

use crate::controller::composer::{DemandVector, SwitchState};

/// Half-width of a text bar, in characters.
const BAR_HALF_WIDTH: usize = 10;

/// Colour class of a demand bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

/// One demand bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    pub label: &'static str,
    /// Signed value as shown on screen.
    pub value: f32,
}

impl Indicator {
    #[must_use]
    pub fn polarity(&self) -> Polarity {
        if self.value > 0.0 {
            Polarity::Positive
        } else if self.value < 0.0 {
            Polarity::Negative
        } else {
            Polarity::Neutral
        }
    }
}

/// One switch lamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lamp {
    pub label: &'static str,
    pub lit: bool,
}

/// Demand bars in display order.
#[must_use]
pub fn indicators(demands: &DemandVector) -> [Indicator; 4] {
    [
        Indicator { label: "Pitch", value: -demands.pitch },
        Indicator { label: "Roll", value: -demands.roll },
        Indicator { label: "Yaw", value: demands.yaw },
        Indicator { label: "Throttle", value: demands.throttle },
    ]
}

/// Switch lamps in display order.
#[must_use]
pub fn lamps(switches: &SwitchState) -> [Lamp; 3] {
    [
        Lamp { label: "Altitude hold", lit: switches.altitude_hold },
        Lamp { label: "Position hold", lit: switches.position_hold },
        Lamp { label: "Autopilot", lit: switches.autopilot },
    ]
}

/// Audio volume in [0, 1], following throttle.
#[must_use]
pub fn volume(demands: &DemandVector) -> f32 {
    demands.throttle.clamp(0.0, 1.0)
}

fn bar(value: f32) -> String {
    let filled = (value.abs().min(1.0) * BAR_HALF_WIDTH as f32).round() as usize;
    let mut left = vec![' '; BAR_HALF_WIDTH];
    let mut right = vec![' '; BAR_HALF_WIDTH];
    if value < 0.0 {
        for cell in left.iter_mut().rev().take(filled) {
            *cell = '=';
        }
    } else {
        for cell in right.iter_mut().take(filled) {
            *cell = '=';
        }
    }
    let mut out: String = left.into_iter().collect();
    out.push('|');
    out.extend(right);
    out
}

/// Renders one poll as a single status line.
///
/// # Examples
///
/// ```
/// use quadstick::controller::composer::{DemandVector, SwitchState};
/// use quadstick::readout::format_line;
///
/// let line = format_line(&DemandVector::default(), &SwitchState::default());
/// assert!(line.starts_with("Pitch"));
/// assert!(line.contains("Autopilot[ ]"));
/// ```
#[must_use]
pub fn format_line(demands: &DemandVector, switches: &SwitchState) -> String {
    let mut line = String::new();
    for indicator in indicators(demands) {
        let _ = write!(line, "{} [{}] ", indicator.label, bar(indicator.value));
    }
    for lamp in lamps(switches) {
        let _ = write!(line, "{}[{}] ", lamp.label, if lamp.lit { '*' } else { ' ' });
    }
    line.trim_end().to_string()
}
