//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Every section and every field is optional; missing values take the
//! defaults below.
//!
//! ```toml
//! [controller]
//! model = "dx8"
//! device_path = ""
//!
//! [platform]
//! name = ""
//! strict = false
//!
//! [gate]
//! neutral_band = 0.2
//!
//! [startup]
//! skip = false
//! throttle_up = 0.5
//! throttle_down = 0.05
//!
//! [poll]
//! rate_hz = 50
//!
//! [logging]
//! level = "info"
//! file = ""
//! ```

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::controller::axis_map::{Platform, TransmitterModel};
use crate::error::{QuadStickError, Result};
use crate::stick::SessionSettings;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub controller: ControllerConfig,
    #[serde(default)]
    pub platform: PlatformConfig,
    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub startup: StartupConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input device configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ControllerConfig {
    #[serde(default = "default_model")]
    pub model: String,

    /// Empty means auto-detect.
    #[serde(default)]
    pub device_path: String,
}

/// Platform selection for axis mapping
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PlatformConfig {
    /// Empty means detect from the host OS.
    #[serde(default)]
    pub name: String,

    /// Reject unknown platform names instead of using the Linux mapping.
    #[serde(default)]
    pub strict: bool,
}

/// Hold-mode gate configuration
#[derive(Debug, Deserialize, Clone)]
pub struct GateConfig {
    #[serde(default = "default_neutral_band")]
    pub neutral_band: f32,
}

/// Startup gesture configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StartupConfig {
    #[serde(default)]
    pub skip: bool,

    #[serde(default = "default_throttle_up")]
    pub throttle_up: f32,

    #[serde(default = "default_throttle_down")]
    pub throttle_down: f32,
}

/// Polling loop configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PollConfig {
    #[serde(default = "default_rate_hz")]
    pub rate_hz: u32,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Empty means stderr only.
    #[serde(default)]
    pub file: String,
}

// Default value functions
fn default_model() -> String { "dx8".to_string() }

fn default_neutral_band() -> f32 { 0.2 }

fn default_throttle_up() -> f32 { 0.5 }
fn default_throttle_down() -> f32 { 0.05 }

fn default_rate_hz() -> u32 { 50 }

fn default_log_level() -> String { "info".to_string() }

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            device_path: String::new(),
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            neutral_band: default_neutral_band(),
        }
    }
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            skip: false,
            throttle_up: default_throttle_up(),
            throttle_down: default_throttle_down(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            rate_hz: default_rate_hz(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use quadstick::config::Config;
    ///
    /// let config = Config::load("quadstick.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file without validating it
    ///
    /// Lets callers apply overrides before calling [`validate`](Self::validate).
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        self.model()?;

        if self.platform.strict {
            self.platform()?;
        }

        // NaN fails this check
        if !(self.gate.neutral_band > 0.0 && self.gate.neutral_band <= 0.5) {
            return Err(QuadStickError::Config(
                toml::de::Error::custom("neutral_band must be greater than 0.0 and at most 0.5")
            ));
        }

        for (name, value) in [
            ("throttle_up", self.startup.throttle_up),
            ("throttle_down", self.startup.throttle_down),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(QuadStickError::Config(
                    toml::de::Error::custom(format!("{} must be between 0.0 and 1.0", name))
                ));
            }
        }

        if self.startup.throttle_down >= self.startup.throttle_up {
            return Err(QuadStickError::Config(
                toml::de::Error::custom("throttle_down must be less than throttle_up")
            ));
        }

        if self.poll.rate_hz == 0 || self.poll.rate_hz > 1000 {
            return Err(QuadStickError::Config(
                toml::de::Error::custom("rate_hz must be between 1 and 1000")
            ));
        }

        if !["error", "warn", "info", "debug", "trace"].contains(&self.logging.level.as_str()) {
            return Err(QuadStickError::Config(
                toml::de::Error::custom("log level must be one of: error, warn, info, debug, trace")
            ));
        }

        Ok(())
    }

    /// Transmitter model named by the configuration
    pub fn model(&self) -> Result<TransmitterModel> {
        self.controller.model.parse()
    }

    /// Platform whose axis mapping the session should use
    ///
    /// An empty name detects the host OS. Unknown names, configured or
    /// detected, fall back to the Linux mapping unless `platform.strict` is
    /// set.
    pub fn platform(&self) -> Result<Platform> {
        self.platform_on_host(std::env::consts::OS)
    }

    fn platform_on_host(&self, host_os: &str) -> Result<Platform> {
        let name = if self.platform.name.is_empty() {
            host_os
        } else {
            self.platform.name.as_str()
        };

        if self.platform.strict {
            name.parse()
        } else {
            Ok(Platform::parse_lenient(name))
        }
    }

    /// Session policy derived from the configuration
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            neutral_band: self.gate.neutral_band,
            skip_startup: self.startup.skip,
            throttle_up: self.startup.throttle_up,
            throttle_down: self.startup.throttle_down,
        }
    }
}
