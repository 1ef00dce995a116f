//! Maps raw device state to the frame's intents.
//!
//! The keyboard is always read. A connected gamepad is read after it, so its
//! intents land last and its triggers replace the keyboard bank input. The
//! joystick is only consulted when no gamepad is connected.

use input::{GamepadButton, InputState, KeyCode, STICK_RANGE, TRIGGER_MAX};

use crate::gesture::RollSide;
use crate::intent::{BankInput, Intent, IntentFrame, DEFAULT_ROLL_SCALE, FULL_TURN};

pub fn resolve(input: &InputState) -> IntentFrame {
    let mut frame = IntentFrame::default();
    frame.push(Intent::Straight);
    frame.push(Intent::Level);
    frame.push(Intent::Stop);

    read_keyboard(input, &mut frame);
    frame.push(Intent::Forward(1.0));

    if input.gamepad.is_connected() {
        read_gamepad(input, &mut frame);
    } else if input.joystick.is_enabled() {
        read_joystick(input, &mut frame);
    }
    frame
}

fn read_keyboard(input: &InputState, frame: &mut IntentFrame) {
    let held = |key| input.is_key_held(key);

    if held(KeyCode::KeyA) {
        frame.push(Intent::TurnLeft(FULL_TURN));
    }
    if held(KeyCode::KeyD) {
        frame.push(Intent::TurnRight(FULL_TURN));
    }
    if held(KeyCode::KeyS) {
        frame.push(Intent::Dive(1.0));
    }
    if held(KeyCode::KeyW) {
        frame.push(Intent::Climb(1.0));
    }

    frame.push(if held(KeyCode::ArrowUp) {
        Intent::SpeedUp
    } else if held(KeyCode::ArrowRight) {
        Intent::SpeedDown
    } else {
        Intent::Cruise
    });

    if held(KeyCode::ArrowDown) {
        frame.push(Intent::Fire);
    }
    if input.is_key_pressed(KeyCode::KeyF) {
        frame.push(Intent::CycleColor);
    }

    frame.bank = match (held(KeyCode::KeyQ), held(KeyCode::KeyE)) {
        (true, true) | (false, false) => BankInput::Straight,
        (false, true) => BankInput::Right,
        (true, false) => BankInput::Left,
    };

    if input.is_key_pressed(KeyCode::KeyE) {
        frame.roll_presses.push(RollSide::Right);
    }
    if input.is_key_pressed(KeyCode::KeyQ) {
        frame.roll_presses.push(RollSide::Left);
    }
}

fn read_gamepad(input: &InputState, frame: &mut IntentFrame) {
    let pad = &input.gamepad;
    let stick = pad.left_stick();

    if stick.x < 0.0 {
        frame.push(Intent::TurnLeft(-stick.x / STICK_RANGE * FULL_TURN));
    } else if stick.x > 0.0 {
        frame.push(Intent::TurnRight(stick.x / STICK_RANGE * FULL_TURN));
    }
    if stick.y < 0.0 {
        frame.push(Intent::Dive(-stick.y / STICK_RANGE));
    } else if stick.y > 0.0 {
        frame.push(Intent::Climb(stick.y / STICK_RANGE));
    }

    if pad.is_button_held(GamepadButton::A) {
        frame.push(Intent::Fire);
    }
    frame.push(if pad.is_button_held(GamepadButton::Y) {
        Intent::SpeedUp
    } else if pad.is_button_held(GamepadButton::B) {
        Intent::SpeedDown
    } else {
        Intent::Cruise
    });

    let (left, right) = (pad.left_trigger(), pad.right_trigger());
    let pull = if left > 0 { left } else { right };
    frame.roll_scale =
        (pull > 0).then(|| pull as f32 / TRIGGER_MAX as f32 * DEFAULT_ROLL_SCALE);
    frame.bank = match (left > 0, right > 0) {
        (true, false) => BankInput::Left,
        (false, true) => BankInput::Right,
        _ => BankInput::Straight,
    };

    if pad.left_trigger_slammed() {
        frame.roll_presses.push(RollSide::Left);
    }
    if pad.right_trigger_slammed() {
        frame.roll_presses.push(RollSide::Right);
    }
}

fn read_joystick(input: &InputState, frame: &mut IntentFrame) {
    let axes = input.joystick.axes();

    if axes.x < 0.0 {
        frame.push(Intent::TurnLeft(-axes.x));
    } else if axes.x > 0.0 {
        frame.push(Intent::TurnRight(axes.x));
    }
    if axes.y > 0.0 {
        frame.push(Intent::Dive(axes.y));
    } else if axes.y < 0.0 {
        frame.push(Intent::Climb(-axes.y));
    }

    if input.joystick.is_button_held(0) {
        frame.push(Intent::Fire);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use input::ElementState;

    #[test]
    fn idle_frame_resets_then_cruises() {
        let frame = resolve(&InputState::new());
        assert_eq!(
            frame.intents,
            vec![
                Intent::Straight,
                Intent::Level,
                Intent::Stop,
                Intent::Cruise,
                Intent::Forward(1.0),
            ]
        );
        assert_eq!(frame.bank, BankInput::Straight);
        assert_eq!(frame.roll_scale, None);
        assert!(frame.roll_presses.is_empty());
    }

    #[test]
    fn keyboard_turns_and_fires() {
        let mut input = InputState::new();
        input.press(KeyCode::KeyA);
        input.press(KeyCode::KeyW);
        input.press(KeyCode::ArrowUp);
        input.press(KeyCode::ArrowDown);
        input.press(KeyCode::KeyF);
        let frame = resolve(&input);
        assert!(frame.contains(Intent::TurnLeft(FULL_TURN)));
        assert!(frame.contains(Intent::Climb(1.0)));
        assert!(frame.contains(Intent::SpeedUp));
        assert!(frame.contains(Intent::Fire));
        assert!(frame.contains(Intent::CycleColor));
        assert!(!frame.contains(Intent::Cruise));
    }

    #[test]
    fn both_bank_keys_cancel() {
        let mut input = InputState::new();
        input.press(KeyCode::KeyE);
        input.press(KeyCode::KeyQ);
        let frame = resolve(&input);
        assert_eq!(frame.bank, BankInput::Straight);
        assert_eq!(frame.roll_presses, vec![RollSide::Right, RollSide::Left]);

        input.begin_frame();
        input.release(KeyCode::KeyQ);
        let frame = resolve(&input);
        assert_eq!(frame.bank, BankInput::Right);
        assert_eq!(frame.roll_scale, None);
        assert!(frame.roll_presses.is_empty());
    }

    #[test]
    fn gamepad_stick_scales_turn_and_pitch() {
        let mut input = InputState::new();
        input.gamepad.set_connected(true);
        input.gamepad.set_left_stick(-16384.0, 32768.0);
        let frame = resolve(&input);
        assert!(frame.contains(Intent::TurnLeft(2.0)));
        assert!(frame.contains(Intent::Climb(1.0)));
    }

    #[test]
    fn gamepad_buttons_override_throttle() {
        let mut input = InputState::new();
        input.gamepad.set_connected(true);
        input.gamepad.process_button(GamepadButton::B, ElementState::Pressed);
        input.gamepad.process_button(GamepadButton::A, ElementState::Pressed);
        let frame = resolve(&input);
        assert_eq!(frame.intents.last(), Some(&Intent::SpeedDown));
        assert!(frame.contains(Intent::Fire));
    }

    #[test]
    fn gamepad_triggers_replace_keyboard_bank() {
        let mut input = InputState::new();
        input.press(KeyCode::KeyE);
        input.gamepad.set_connected(true);
        input.gamepad.set_triggers(51, 0);
        let frame = resolve(&input);
        assert_eq!(frame.bank, BankInput::Left);
        let scale = frame.roll_scale.unwrap();
        assert!((scale - 0.8).abs() < 1e-6);

        input.gamepad.set_triggers(0, 0);
        let frame = resolve(&input);
        assert_eq!(frame.bank, BankInput::Straight);
        assert_eq!(frame.roll_scale, None);
    }

    #[test]
    fn both_triggers_keep_left_trigger_scale() {
        let mut input = InputState::new();
        input.gamepad.set_connected(true);
        input.gamepad.set_triggers(128, 200);
        let frame = resolve(&input);
        assert_eq!(frame.bank, BankInput::Straight);
        let scale = frame.roll_scale.unwrap();
        assert!((scale - 128.0 / 255.0 * DEFAULT_ROLL_SCALE).abs() < 1e-6);

        input.gamepad.set_triggers(0, 200);
        let scale = resolve(&input).roll_scale.unwrap();
        assert!((scale - 200.0 / 255.0 * DEFAULT_ROLL_SCALE).abs() < 1e-6);
    }

    #[test]
    fn trigger_slam_is_a_roll_press() {
        let mut input = InputState::new();
        input.gamepad.set_connected(true);
        input.begin_frame();
        input.gamepad.set_triggers(0, TRIGGER_MAX);
        assert_eq!(resolve(&input).roll_presses, vec![RollSide::Right]);

        input.begin_frame();
        assert!(resolve(&input).roll_presses.is_empty());
    }

    #[test]
    fn joystick_only_without_gamepad() {
        let mut input = InputState::new();
        input.joystick.set_enabled(true);
        input.joystick.set_axes(0.5, 0.25);
        input.joystick.set_button(0, true);
        let frame = resolve(&input);
        assert!(frame.contains(Intent::TurnRight(0.5)));
        assert!(frame.contains(Intent::Dive(0.25)));
        assert!(frame.contains(Intent::Fire));

        input.gamepad.set_connected(true);
        let frame = resolve(&input);
        assert!(!frame.contains(Intent::TurnRight(0.5)));
    }
}
