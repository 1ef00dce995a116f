//! Abstract pilot intents produced once per frame by the input resolver.

use crate::gesture::RollSide;

/// Turn magnitude of a fully deflected control (digital key or full stick).
pub const FULL_TURN: f32 = 4.0;
/// Roll rate scale used by held bank keys and the turn-induced bank.
pub const DEFAULT_ROLL_SCALE: f32 = 4.0;
/// Roll rate scale magnitude during a barrel roll.
pub const BARREL_ROLL_SCALE: f32 = 8.0;

/// One discrete command, applied in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Reset the turn axis.
    Straight,
    /// Reset the pitch axis.
    Level,
    /// Throttle to minimum.
    Stop,
    TurnLeft(f32),
    TurnRight(f32),
    Climb(f32),
    Dive(f32),
    SpeedUp,
    SpeedDown,
    /// Throttle back to normal forward flight.
    Cruise,
    /// Throttle ratio applied to the object speed.
    Forward(f32),
    Fire,
    CycleColor,
}

/// Held bank direction for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankInput {
    Straight,
    Left,
    Right,
}

impl Default for BankInput {
    fn default() -> Self {
        BankInput::Straight
    }
}

/// Everything the resolver read from the devices this frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntentFrame {
    pub intents: Vec<Intent>,
    pub bank: BankInput,
    /// Bank rate scale from an analog trigger, set whenever either trigger
    /// is pulled regardless of the bank direction.
    pub roll_scale: Option<f32>,
    /// Barrel-roll presses in the order they happened.
    pub roll_presses: Vec<RollSide>,
}

impl IntentFrame {
    pub fn push(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    pub fn contains(&self, intent: Intent) -> bool {
        self.intents.contains(&intent)
    }
}
