//! Input handling for keyboard, joystick, and gamepad.
//!
//! The window layer feeds raw events in; game code polls the state once per
//! frame. Call [`InputState::begin_frame`] before feeding a frame's events.

use glam::Vec2;
use std::collections::HashSet;

/// Full deflection reported by an analog trigger.
pub const TRIGGER_MAX: u8 = 255;
/// Magnitude of a fully deflected gamepad stick axis.
pub const STICK_RANGE: f32 = 32768.0;

/// Gamepad buttons the game reacts to (Xbox layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    A,
    B,
    X,
    Y,
    Start,
    Back,
}

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
    /// Keys released this frame.
    keys_released: HashSet<KeyCode>,

    pub gamepad: GamepadState,
    pub joystick: JoystickState,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.gamepad.begin_frame();
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
                self.keys_released.insert(key);
            }
        }
    }

    /// Shorthand for a key press event.
    pub fn press(&mut self, key: KeyCode) {
        self.process_keyboard(key, ElementState::Pressed);
    }

    /// Shorthand for a key release event.
    pub fn release(&mut self, key: KeyCode) {
        self.process_keyboard(key, ElementState::Released);
    }

    // Query methods

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key was released this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }
}

/// Xbox-style gamepad: left stick, two analog triggers and face buttons.
///
/// Stick axes use the raw `±32768` range with +Y up; triggers run `0..=255`.
#[derive(Debug, Default)]
pub struct GamepadState {
    connected: bool,
    left_stick: Vec2,
    left_trigger: u8,
    right_trigger: u8,
    prev_left_trigger: u8,
    prev_right_trigger: u8,
    buttons_held: HashSet<GamepadButton>,
}

impl GamepadState {
    fn begin_frame(&mut self) {
        self.prev_left_trigger = self.left_trigger;
        self.prev_right_trigger = self.right_trigger;
    }

    pub fn set_connected(&mut self, connected: bool) {
        if self.connected != connected {
            log::info!("Gamepad {}", if connected { "connected" } else { "disconnected" });
        }
        self.connected = connected;
        if !connected {
            self.left_stick = Vec2::ZERO;
            self.left_trigger = 0;
            self.right_trigger = 0;
            self.buttons_held.clear();
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Set the left stick in raw units; values are clamped to the stick range.
    pub fn set_left_stick(&mut self, x: f32, y: f32) {
        self.left_stick = Vec2::new(
            x.clamp(-STICK_RANGE, STICK_RANGE),
            y.clamp(-STICK_RANGE, STICK_RANGE),
        );
    }

    pub fn left_stick(&self) -> Vec2 {
        self.left_stick
    }

    pub fn set_triggers(&mut self, left: u8, right: u8) {
        self.left_trigger = left;
        self.right_trigger = right;
    }

    pub fn left_trigger(&self) -> u8 {
        self.left_trigger
    }

    pub fn right_trigger(&self) -> u8 {
        self.right_trigger
    }

    /// Left trigger reached full deflection this frame.
    pub fn left_trigger_slammed(&self) -> bool {
        self.left_trigger == TRIGGER_MAX && self.prev_left_trigger < TRIGGER_MAX
    }

    /// Right trigger reached full deflection this frame.
    pub fn right_trigger_slammed(&self) -> bool {
        self.right_trigger == TRIGGER_MAX && self.prev_right_trigger < TRIGGER_MAX
    }

    pub fn process_button(&mut self, button: GamepadButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.buttons_held.insert(button);
            }
            ElementState::Released => {
                self.buttons_held.remove(&button);
            }
        }
    }

    pub fn is_button_held(&self, button: GamepadButton) -> bool {
        self.buttons_held.contains(&button)
    }
}

/// Legacy joystick: two normalized axes in `[-1, 1]` (+Y pulled back) and
/// numbered buttons.
#[derive(Debug, Default)]
pub struct JoystickState {
    enabled: bool,
    axes: Vec2,
    buttons_held: HashSet<u8>,
}

impl JoystickState {
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.axes = Vec2::ZERO;
            self.buttons_held.clear();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_axes(&mut self, x: f32, y: f32) {
        self.axes = Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0));
    }

    pub fn axes(&self) -> Vec2 {
        self.axes
    }

    pub fn set_button(&mut self, button: u8, down: bool) {
        if down {
            self.buttons_held.insert(button);
        } else {
            self.buttons_held.remove(&button);
        }
    }

    pub fn is_button_held(&self, button: u8) -> bool {
        self.buttons_held.contains(&button)
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;
