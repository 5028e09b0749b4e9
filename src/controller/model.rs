//! # Transmitter Model Module
//!
//! Decodes each model's switches, dials and buttons into a [`ModeRequest`].
//!
//! ## Spektrum DX8
//!
//! Mode 2 sticks (left: throttle/yaw, right: pitch/roll). The flap/gyro
//! switch on the switch axis selects the hold mode. Take off with it down:
//!
//! | Position | Raw switch axis | Request |
//! |----------|-----------------|---------|
//! | Down     | > 0             | No hold |
//! | Middle   | 0               | Altitude hold |
//! | Up       | < 0             | Altitude and position hold |
//!
//! The AUX3 dial is reported as buttons 10 and 11. Take off at extreme
//! clockwise, then turn to 12:00 (button 10 only) for autopilot.
//!
//! ## Gamepad
//!
//! | Button | Request |
//! |--------|---------|
//! | 0      | Autopilot toggle (momentary) |
//! | 4      | Altitude hold while held |
//! | 5      | Position hold while held |

use super::axis_map::{AxisMap, TransmitterModel};
use super::composer::{AutopilotRequest, ModeRequest};
use super::source::InputSource;

/// DX8 AUX3 dial: 12:00 position.
const DX8_AUX3_CENTER_BUTTON: usize = 10;
/// DX8 AUX3 dial: clockwise position.
const DX8_AUX3_CLOCKWISE_BUTTON: usize = 11;

const GAMEPAD_AUTOPILOT_BUTTON: usize = 0;
const GAMEPAD_ALT_HOLD_BUTTON: usize = 4;
const GAMEPAD_POS_HOLD_BUTTON: usize = 5;

/// Whether the device currently asks for altitude hold.
#[must_use]
pub fn altitude_hold_requested<S: InputSource + ?Sized>(
    model: TransmitterModel,
    map: &AxisMap,
    source: &S,
) -> bool {
    match model {
        TransmitterModel::Dx8 => source.axis(map.switch.index) <= 0.0,
        TransmitterModel::Gamepad => source.button(GAMEPAD_ALT_HOLD_BUTTON),
    }
}

/// Whether the device currently asks for position hold.
#[must_use]
pub fn position_hold_requested<S: InputSource + ?Sized>(
    model: TransmitterModel,
    map: &AxisMap,
    source: &S,
) -> bool {
    match model {
        TransmitterModel::Dx8 => source.axis(map.switch.index) < 0.0,
        TransmitterModel::Gamepad => source.button(GAMEPAD_POS_HOLD_BUTTON),
    }
}

/// Reads the autopilot input in the form the model provides it.
#[must_use]
pub fn autopilot_request<S: InputSource + ?Sized>(
    model: TransmitterModel,
    source: &S,
) -> AutopilotRequest {
    match model {
        TransmitterModel::Dx8 => AutopilotRequest::Latched(
            source.button(DX8_AUX3_CENTER_BUTTON) && !source.button(DX8_AUX3_CLOCKWISE_BUTTON),
        ),
        TransmitterModel::Gamepad => {
            AutopilotRequest::Momentary(source.button(GAMEPAD_AUTOPILOT_BUTTON))
        }
    }
}

/// Decodes the full mode request for one poll.
#[must_use]
pub fn decode_request<S: InputSource + ?Sized>(
    model: TransmitterModel,
    map: &AxisMap,
    source: &S,
) -> ModeRequest {
    ModeRequest {
        altitude_hold: altitude_hold_requested(model, map, source),
        position_hold: position_hold_requested(model, map, source),
        autopilot: autopilot_request(model, source),
    }
}
