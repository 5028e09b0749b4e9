//! # Controller Module
//!
//! Joystick input normalization and mode gating.
//!
//! This module handles:
//! - Joystick detection and polling via evdev
//! - Per-model, per-platform axis mapping
//! - Scaling raw axes to normalized demands
//! - Decoding hold and autopilot requests
//! - Debouncing momentary autopilot buttons
//! - Gating hold modes on neutral sticks
//! - The startup throttle gesture

pub mod axis_map;
pub mod composer;
pub mod convert;
pub mod debounce;
pub mod joystick;
pub mod model;
pub mod neutral;
pub mod source;
pub mod startup;
