//! # Axis Map Module
//!
//! Resolves logical control channels to physical joystick axis indices.
//!
//! The same transmitter enumerates its axes in a different order depending on
//! the host's joystick driver, so each supported transmitter model carries one
//! table per platform.
//!
//! ## Spektrum DX8 (Wailly PPM->USB cable)
//!
//! | Platform | Pitch | Roll | Yaw | Throttle | Switch |
//! |----------|-------|------|-----|----------|--------|
//! | Linux    | 2     | 1    | 5   | 0        | 3      |
//! | Windows  | 2     | 1    | 3   | 0        | 5      |
//! | Darwin   | 0     | 3    | 1   | 2        | 4      |
//!
//! Pitch and yaw are reversed on every platform.
//!
//! ## Usage
//!
//! ```
//! use quadstick::controller::axis_map::{AxisMap, Channel, Platform, TransmitterModel};
//!
//! let map = AxisMap::for_model(TransmitterModel::Dx8, Platform::Linux);
//! let pitch = map.resolve(Channel::Pitch);
//! assert_eq!(pitch.index, 2);
//! assert_eq!(pitch.sign, -1.0);
//! ```

use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::{QuadStickError, Result};

/// Logical input channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Pitch,
    Roll,
    Yaw,
    Throttle,
    /// Multi-position mode switch (hold modes on R/C transmitters).
    Switch,
}

impl Channel {
    /// All channels in table order.
    pub const ALL: [Channel; 5] = [
        Channel::Pitch,
        Channel::Roll,
        Channel::Yaw,
        Channel::Throttle,
        Channel::Switch,
    ];
}

/// Host platform, as far as joystick axis ordering is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Platform {
    #[default]
    Linux,
    Windows,
    Darwin,
}

impl Platform {
    /// Detects the platform this binary was built for.
    #[must_use]
    pub fn detect() -> Self {
        Self::parse_lenient(std::env::consts::OS)
    }

    /// Parses a platform name, falling back to [`Platform::Linux`] when the
    /// name is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadstick::controller::axis_map::Platform;
    ///
    /// assert_eq!(Platform::parse_lenient("Darwin"), Platform::Darwin);
    /// assert_eq!(Platform::parse_lenient("FreeBSD"), Platform::Linux);
    /// ```
    #[must_use]
    pub fn parse_lenient(name: &str) -> Self {
        match name.parse() {
            Ok(platform) => platform,
            Err(_) => {
                warn!("Unknown platform '{}', using Linux axis mapping", name);
                Platform::default()
            }
        }
    }
}

impl FromStr for Platform {
    type Err = QuadStickError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linux" => Ok(Platform::Linux),
            "windows" => Ok(Platform::Windows),
            "darwin" | "macos" => Ok(Platform::Darwin),
            _ => Err(QuadStickError::UnknownPlatform(s.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Linux => "Linux",
            Platform::Windows => "Windows",
            Platform::Darwin => "Darwin",
        };
        f.write_str(name)
    }
}

/// Supported input devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransmitterModel {
    /// Spektrum DX8 through a PPM->USB cable.
    #[default]
    Dx8,
    /// Generic two-stick gamepad.
    Gamepad,
}

impl TransmitterModel {
    /// Human-readable name shown to the operator.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            TransmitterModel::Dx8 => "Spektrum",
            TransmitterModel::Gamepad => "Gamepad",
        }
    }
}

impl FromStr for TransmitterModel {
    type Err = QuadStickError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dx8" | "spektrum" => Ok(TransmitterModel::Dx8),
            "gamepad" | "joystick" => Ok(TransmitterModel::Gamepad),
            _ => Err(QuadStickError::UnknownModel(s.to_string())),
        }
    }
}

impl fmt::Display for TransmitterModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransmitterModel::Dx8 => "dx8",
            TransmitterModel::Gamepad => "gamepad",
        };
        f.write_str(name)
    }
}

/// Physical axis index and direction for one logical channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBinding {
    /// Joystick axis index.
    pub index: usize,
    /// Direction multiplier, +1.0 or -1.0.
    pub sign: f32,
}

impl AxisBinding {
    const fn normal(index: usize) -> Self {
        Self { index, sign: 1.0 }
    }

    const fn reversed(index: usize) -> Self {
        Self { index, sign: -1.0 }
    }
}

/// Per-model, per-platform channel table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMap {
    pub pitch: AxisBinding,
    pub roll: AxisBinding,
    pub yaw: AxisBinding,
    pub throttle: AxisBinding,
    pub switch: AxisBinding,
}

const DX8_LINUX: AxisMap = AxisMap {
    pitch: AxisBinding::reversed(2),
    roll: AxisBinding::normal(1),
    yaw: AxisBinding::reversed(5),
    throttle: AxisBinding::normal(0),
    switch: AxisBinding::normal(3),
};

const DX8_WINDOWS: AxisMap = AxisMap {
    yaw: AxisBinding::reversed(3),
    switch: AxisBinding::normal(5),
    ..DX8_LINUX
};

const DX8_DARWIN: AxisMap = AxisMap {
    pitch: AxisBinding::reversed(0),
    roll: AxisBinding::normal(3),
    yaw: AxisBinding::reversed(1),
    throttle: AxisBinding::normal(2),
    switch: AxisBinding::normal(4),
};

// Gamepads report stick-up as negative on both Y axes.
const GAMEPAD: AxisMap = AxisMap {
    pitch: AxisBinding::reversed(3),
    roll: AxisBinding::normal(2),
    yaw: AxisBinding::normal(0),
    throttle: AxisBinding::reversed(1),
    switch: AxisBinding::normal(0),
};

impl AxisMap {
    /// Returns the static table for a transmitter model on a platform.
    #[must_use]
    pub fn for_model(model: TransmitterModel, platform: Platform) -> Self {
        match (model, platform) {
            (TransmitterModel::Dx8, Platform::Linux) => DX8_LINUX,
            (TransmitterModel::Dx8, Platform::Windows) => DX8_WINDOWS,
            (TransmitterModel::Dx8, Platform::Darwin) => DX8_DARWIN,
            (TransmitterModel::Gamepad, _) => GAMEPAD,
        }
    }

    /// Resolves a logical channel to its physical axis binding.
    #[must_use]
    pub fn resolve(&self, channel: Channel) -> AxisBinding {
        match channel {
            Channel::Pitch => self.pitch,
            Channel::Roll => self.roll,
            Channel::Yaw => self.yaw,
            Channel::Throttle => self.throttle,
            Channel::Switch => self.switch,
        }
    }
}
