//! # Toggle Debounce Module
//!
//! Turns a momentary button into an on/off switch.
//!
//! The output flips only on the rising edge of the trigger, so a button held
//! across many polls toggles exactly once.
//!
//! ```text
//!            trigger && !was_triggered
//!   Idle  ─────────────────────────────▶  Armed   (active flipped)
//!    ▲                                      │
//!    └──────────────── !trigger ────────────┘
//! ```
//!
//! ## Usage
//!
//! ```
//! use quadstick::controller::debounce::ToggleDebounce;
//!
//! let mut toggle = ToggleDebounce::new();
//! assert!(toggle.update(true));  // pressed: on
//! assert!(toggle.update(true));  // still held: stays on
//! assert!(toggle.update(false)); // released
//! assert!(!toggle.update(true)); // pressed again: off
//! ```

/// Debounce phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebouncePhase {
    /// Trigger released, next press flips the output.
    Idle,
    /// Trigger held, further polls are ignored until release.
    Armed,
}

/// Rising-edge toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToggleDebounce {
    active: bool,
    was_triggered: bool,
}

impl ToggleDebounce {
    /// Creates a toggle that starts inactive.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one poll's trigger reading and returns the toggled output.
    pub fn update(&mut self, trigger: bool) -> bool {
        if trigger && !self.was_triggered {
            self.active = !self.active;
        }
        self.was_triggered = trigger;
        self.active
    }

    /// Current output.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// `Armed` while the button is held after a toggle, `Idle` otherwise.
    #[must_use]
    pub fn phase(&self) -> DebouncePhase {
        if self.was_triggered {
            DebouncePhase::Armed
        } else {
            DebouncePhase::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_flips(sequence: &[bool]) -> usize {
        let mut toggle = ToggleDebounce::new();
        let mut previous = toggle.is_active();
        let mut flips = 0;
        for &trigger in sequence {
            let current = toggle.update(trigger);
            if current != previous {
                flips += 1;
            }
            previous = current;
        }
        flips
    }

    #[test]
    fn test_initial_state() {
        let toggle = ToggleDebounce::new();
        assert!(!toggle.is_active());
        assert_eq!(toggle.phase(), DebouncePhase::Idle);
    }

    #[test]
    fn test_held_trigger_flips_once() {
        assert_eq!(count_flips(&[true, true, true]), 1);
    }

    #[test]
    fn test_press_release_press_flips_twice() {
        assert_eq!(count_flips(&[true, true, true, false, true]), 2);
    }

    #[test]
    fn test_released_trigger_never_flips() {
        assert_eq!(count_flips(&[false; 10]), 0);
    }

    #[test]
    fn test_output_after_sequence() {
        let mut toggle = ToggleDebounce::new();
        let outputs: Vec<bool> = [true, true, false, true, false, false, true]
            .iter()
            .map(|&t| toggle.update(t))
            .collect();
        assert_eq!(outputs, vec![true, true, true, false, false, false, true]);
    }

    #[test]
    fn test_phase_follows_trigger() {
        let mut toggle = ToggleDebounce::new();
        toggle.update(true);
        assert_eq!(toggle.phase(), DebouncePhase::Armed);
        toggle.update(true);
        assert_eq!(toggle.phase(), DebouncePhase::Armed);
        toggle.update(false);
        assert_eq!(toggle.phase(), DebouncePhase::Idle);
    }

    #[test]
    fn test_at_most_one_flip_per_held_interval() {
        // Alternating runs of held and released polls
        let mut sequence = Vec::new();
        for run in 1..=6 {
            sequence.extend(std::iter::repeat(true).take(run));
            sequence.extend(std::iter::repeat(false).take(run % 3));
        }
        // Runs separated by zero releases merge into one held interval
        let intervals = sequence
            .windows(2)
            .filter(|w| !w[0] && w[1])
            .count()
            + usize::from(sequence[0]);
        assert_eq!(count_flips(&sequence), intervals);
    }
}
