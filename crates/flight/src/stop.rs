//! Motion blocked by collision detection.

use bitflags::bitflags;
use engine_core::Body;

use crate::maneuver::HeadingState;

bitflags! {
    /// Directions the aircraft may not move in this tick. Set externally by
    /// collision detection, relative to the snapped view.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StopFlags: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const NEAR = 1 << 2;
        const FAR = 1 << 3;
        const UP = 1 << 4;
        const DOWN = 1 << 5;
    }
}

/// Zero the motion components blocked by `flags`. Discrete maneuver states
/// are left untouched.
pub fn apply_stop_flags(body: &mut Body, flags: StopFlags, heading: HeadingState) {
    if flags.is_empty() {
        return;
    }

    if flags.contains(StopFlags::LEFT) && heading == HeadingState::Straight {
        body.speed_left = 0.0;
    }
    if flags.contains(StopFlags::RIGHT) && heading == HeadingState::Straight {
        body.speed_right = 0.0;
    }
    if flags.contains(StopFlags::NEAR) {
        match heading {
            HeadingState::Left => body.speed_left = 0.0,
            HeadingState::Right => body.speed_right = 0.0,
            HeadingState::Straight => {}
        }
    }
    if flags.contains(StopFlags::FAR) {
        match heading {
            HeadingState::Left => body.speed_right = 0.0,
            HeadingState::Right => body.speed_left = 0.0,
            HeadingState::Straight => {}
        }
    }

    let pitch = body.orientation.pitch;
    let nose_up_blocked = flags.contains(StopFlags::UP) && pitch < 0.0;
    let nose_down_blocked = flags.contains(StopFlags::DOWN) && pitch > 0.0;
    if nose_up_blocked || nose_down_blocked {
        body.orientation.pitch = 0.0;
        body.angular_velocity.pitch = 0.0;
    }
}
