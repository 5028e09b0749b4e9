//! # QuadStick Library
//!
//! Read pilot control input from an R/C transmitter or joystick for a
//! flight simulator.
//!
//! This library turns raw joystick axes and buttons into normalized pitch,
//! roll, yaw and throttle demands plus altitude-hold, position-hold and
//! autopilot switches, gated so that hold modes only engage near neutral
//! sticks.

pub mod config;
pub mod error;
pub mod controller;
pub mod readout;
pub mod session;
pub mod stick;
