//! # Joystick Device Module
//!
//! Reads an R/C transmitter USB adapter or a gamepad through the Linux
//! evdev interface.
//!
//! ## Indices
//!
//! Axis and button indices are assigned the way SDL-style joystick APIs do:
//! the device's supported absolute axes, sorted by evdev code, become axis
//! 0..n, and its supported keys, sorted by code, become button 0..m.
//!
//! ## Values
//!
//! Each axis is normalized from its `absinfo` minimum/maximum to [-1, 1].
//! The integer midpoint(s) of the range and the `absinfo.flat` zone around
//! them read exactly 0.0; each half is then scaled separately so the
//! endpoints read exactly -1.0 and 1.0.
//! [`InputSource::pump`] refreshes all values with the `EVIOCGABS`/`EVIOCGKEY`
//! state queries, so polling never blocks on the event queue.

use evdev::{AbsoluteAxisType, AttributeSet, Device, Key};
use std::path::Path;
use tracing::{debug, info, warn};

use super::source::InputSource;
use crate::error::{QuadStickError, Result};

/// `ENODEV`: the device was unplugged.
const ENODEV: i32 = 19;

/// Range of one absolute axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisRange {
    code: u16,
    minimum: i32,
    maximum: i32,
    /// Half-width of the dead zone around center.
    flat: i32,
}

impl AxisRange {
    fn normalize(&self, value: i32) -> f32 {
        let (minimum, maximum) = (self.minimum as i64, self.maximum as i64);
        if maximum <= minimum {
            return 0.0;
        }

        // Odd-length ranges have one midpoint, even-length ranges two
        let sum = minimum + maximum;
        let low_mid = sum.div_euclid(2);
        let high_mid = low_mid + sum.rem_euclid(2);
        let flat = (self.flat.max(0) as i64).min(maximum - minimum);

        let value = (value as i64).clamp(minimum, maximum);
        let upper_edge = (high_mid + flat).min(maximum);
        let lower_edge = (low_mid - flat).max(minimum);

        if value > upper_edge {
            (value - upper_edge) as f32 / (maximum - upper_edge) as f32
        } else if value < lower_edge {
            -((lower_edge - value) as f32 / (lower_edge - minimum) as f32)
        } else {
            0.0
        }
    }
}

/// evdev joystick handle
///
/// Owns the open device; it is released when the handle is dropped.
pub struct EvdevJoystick {
    device: Device,
    device_path: String,
    axes: Vec<AxisRange>,
    buttons: Vec<Key>,
    axis_values: Vec<f32>,
    pressed: AttributeSet<Key>,
    connected: bool,
}

impl std::fmt::Debug for EvdevJoystick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvdevJoystick")
            .field("device_path", &self.device_path)
            .field("axes", &self.axes.len())
            .field("buttons", &self.buttons.len())
            .field("connected", &self.connected)
            .finish_non_exhaustive()
    }
}

impl EvdevJoystick {
    /// Detect and open the first joystick-like device
    ///
    /// Scans `/dev/input/event*` in sorted order and picks the first device
    /// that exposes both `ABS_X` and `ABS_Y`.
    ///
    /// # Errors
    ///
    /// - `ControllerNotFound`: no joystick found
    /// - `Controller`: `/dev/input` missing or unreadable
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use quadstick::controller::joystick::EvdevJoystick;
    ///
    /// let joystick = EvdevJoystick::open()?;
    /// println!("Connected to joystick at: {}", joystick.device_path());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open() -> Result<Self> {
        let input_dir = Path::new("/dev/input");

        if !input_dir.exists() {
            return Err(QuadStickError::Controller(
                "/dev/input directory not found".to_string(),
            ));
        }

        let mut entries: Vec<_> = std::fs::read_dir(input_dir)
            .map_err(|e| QuadStickError::Controller(format!("Failed to read /dev/input: {}", e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| {
                QuadStickError::Controller(format!("Failed to read directory entry: {}", e))
            })?;

        // Sort entries for deterministic device selection when multiple joysticks are connected
        entries.sort_by_key(|entry| entry.path());

        for entry in entries {
            let path = entry.path();

            let is_event_node = path
                .file_name()
                .map_or(false, |name| name.to_string_lossy().starts_with("event"));
            if !is_event_node {
                continue;
            }

            match Device::open(&path) {
                Ok(device) => {
                    debug!(
                        "Found input device: {} ({})",
                        path.display(),
                        device.name().unwrap_or("unnamed")
                    );

                    if Self::is_joystick(&device) {
                        let device_path = path.to_string_lossy().to_string();
                        info!("Found joystick at: {}", device_path);
                        return Self::from_device(device, device_path);
                    }
                }
                Err(e) => {
                    // Permission denied or other errors - skip device
                    debug!("Could not open {}: {}", path.display(), e);
                }
            }
        }

        Err(QuadStickError::ControllerNotFound)
    }

    /// Open a specific event device
    ///
    /// # Errors
    ///
    /// Returns `Io` if the device cannot be opened, or `ControllerNotFound`
    /// if it has no stick axes.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let device = Device::open(path)?;

        if !Self::is_joystick(&device) {
            warn!("{} does not expose ABS_X/ABS_Y", path.display());
            return Err(QuadStickError::ControllerNotFound);
        }

        info!("Opened joystick at: {}", path.display());
        Self::from_device(device, path.to_string_lossy().to_string())
    }

    fn is_joystick(device: &Device) -> bool {
        device.supported_absolute_axes().map_or(false, |axes| {
            axes.contains(AbsoluteAxisType::ABS_X) && axes.contains(AbsoluteAxisType::ABS_Y)
        })
    }

    fn from_device(device: Device, device_path: String) -> Result<Self> {
        let abs_state = device.get_abs_state()?;

        let axes: Vec<AxisRange> = device
            .supported_absolute_axes()
            .map(|supported| {
                supported
                    .iter()
                    .map(|axis| {
                        let info = abs_state[axis.0 as usize];
                        AxisRange {
                            code: axis.0,
                            minimum: info.minimum,
                            maximum: info.maximum,
                            flat: info.flat,
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        let buttons: Vec<Key> = device
            .supported_keys()
            .map(|keys| keys.iter().collect())
            .unwrap_or_default();

        debug!(
            "{}: {} axes, {} buttons",
            device_path,
            axes.len(),
            buttons.len()
        );

        let mut joystick = Self {
            device,
            device_path,
            axis_values: vec![0.0; axes.len()],
            axes,
            buttons,
            pressed: AttributeSet::new(),
            connected: true,
        };
        joystick.pump()?;
        Ok(joystick)
    }

    /// Get the device path of this joystick
    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// Get the joystick name reported by the kernel
    pub fn name(&self) -> Option<&str> {
        self.device.name()
    }

    /// Number of axes
    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }

    /// Number of buttons
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    fn read_error(&mut self, what: &str, e: std::io::Error) -> QuadStickError {
        if e.raw_os_error() == Some(ENODEV) {
            warn!("Joystick {} disconnected", self.device_path);
            self.connected = false;
        }
        QuadStickError::Controller(format!("Failed to read {}: {}", what, e))
    }
}

impl InputSource for EvdevJoystick {
    fn pump(&mut self) -> Result<()> {
        let abs_state = match self.device.get_abs_state() {
            Ok(state) => state,
            Err(e) => return Err(self.read_error("axes", e)),
        };

        for (value, range) in self.axis_values.iter_mut().zip(&self.axes) {
            *value = range.normalize(abs_state[range.code as usize].value);
        }

        self.pressed = match self.device.get_key_state() {
            Ok(keys) => keys,
            Err(e) => return Err(self.read_error("buttons", e)),
        };

        Ok(())
    }

    fn axis(&self, index: usize) -> f32 {
        self.axis_values.get(index).copied().unwrap_or(0.0)
    }

    fn button(&self, index: usize) -> bool {
        self.buttons
            .get(index)
            .map_or(false, |&key| self.pressed.contains(key))
    }

    fn running(&self) -> bool {
        self.connected
    }
}
