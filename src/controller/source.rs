//! Trait abstraction for joystick polling to enable testing

use crate::error::Result;

/// Polled joystick state.
///
/// Axis and button indices follow the device's own enumeration order; see
/// [`AxisMap`](super::axis_map::AxisMap) for what each index means per
/// transmitter model.
#[cfg_attr(test, mockall::automock)]
pub trait InputSource {
    /// Drains pending device events into the readable state.
    fn pump(&mut self) -> Result<()>;

    /// Axis reading in [-1, 1]. Unknown indices read 0.0.
    fn axis(&self, index: usize) -> f32;

    /// Button state. Unknown indices read `false`.
    fn button(&self, index: usize) -> bool;

    /// False once the device reported that polling should stop.
    fn running(&self) -> bool;
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::collections::VecDeque;

    /// One poll's worth of device state.
    #[derive(Debug, Clone, Default)]
    pub struct Frame {
        pub axes: Vec<f32>,
        pub buttons: Vec<bool>,
    }

    impl Frame {
        pub fn new(axes: &[f32]) -> Self {
            Self {
                axes: axes.to_vec(),
                buttons: Vec::new(),
            }
        }

        pub fn with_buttons(mut self, pressed: &[usize]) -> Self {
            let len = pressed.iter().max().map_or(0, |&max| max + 1);
            self.buttons = vec![false; len];
            for &index in pressed {
                self.buttons[index] = true;
            }
            self
        }
    }

    /// Replays a fixed sequence of frames, one per `pump()`.
    ///
    /// The last frame is held once the script runs out.
    #[derive(Debug, Default)]
    pub struct ScriptedSource {
        script: VecDeque<Frame>,
        current: Frame,
        pub pumps: usize,
        pub stop_after: Option<usize>,
    }

    impl ScriptedSource {
        pub fn new(frames: Vec<Frame>) -> Self {
            Self {
                script: frames.into(),
                ..Self::default()
            }
        }
    }

    impl InputSource for ScriptedSource {
        fn pump(&mut self) -> Result<()> {
            if let Some(frame) = self.script.pop_front() {
                self.current = frame;
            }
            self.pumps += 1;
            Ok(())
        }

        fn axis(&self, index: usize) -> f32 {
            self.current.axes.get(index).copied().unwrap_or(0.0)
        }

        fn button(&self, index: usize) -> bool {
            self.current.buttons.get(index).copied().unwrap_or(false)
        }

        fn running(&self) -> bool {
            self.stop_after.map_or(true, |limit| self.pumps < limit)
        }
    }
}
