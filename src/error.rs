//! # Error Types
//!
//! Custom error types for QuadStick using `thiserror`.

use thiserror::Error;

/// Main error type for QuadStick
#[derive(Debug, Error)]
pub enum QuadStickError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Platform string with no axis mapping
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    /// Transmitter model with no axis mapping
    #[error("Unknown transmitter model: {0}")]
    UnknownModel(String),

    /// No usable joystick device was found
    #[error("No joystick device found")]
    ControllerNotFound,

    /// Controller I/O errors
    #[error("Controller error: {0}")]
    Controller(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for QuadStick
pub type Result<T> = std::result::Result<T, QuadStickError>;
