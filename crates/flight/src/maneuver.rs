//! Per-axis maneuver states and the orientation integrator.
//!
//! Each axis is its own enum. Opposite intents on the turn and pitch axes
//! brake to the neutral state first; a second intent is needed to reverse.

use engine_core::{Body, EulerAngles};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8, TAU};

use crate::config::FlightConfig;
use crate::gesture::{RollGesture, RollSide};
use crate::intent::{BankInput, BARREL_ROLL_SCALE, DEFAULT_ROLL_SCALE, FULL_TURN};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TurnState {
    #[default]
    Straight,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PitchState {
    #[default]
    Level,
    Climb,
    Dive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BankState {
    #[default]
    Straight,
    Turning,
    BarrelRoll,
}

/// Throttle setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MoveState {
    Stop,
    #[default]
    Forward,
    Boost,
}

/// Heading the aircraft snaps back to in snapped steering mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeadingState {
    #[default]
    Straight,
    Left,
    Right,
}

impl HeadingState {
    pub fn target(self) -> f32 {
        match self {
            HeadingState::Straight => 0.0,
            HeadingState::Left => -FRAC_PI_2,
            HeadingState::Right => FRAC_PI_2,
        }
    }
}

/// How turn intents steer the aircraft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SteeringMode {
    /// Turns rotate the heading freely.
    AllRange,
    /// Turns strafe sideways and the heading snaps to its `HeadingState`.
    #[default]
    Snapped,
}

/// Move `value` toward `target` by at most `step`, landing exactly on it.
fn ease_toward(value: f32, target: f32, step: f32) -> f32 {
    if value - target > step {
        value - step
    } else if value - target < -step {
        value + step
    } else {
        target
    }
}

/// Discrete axis states plus the scalars the intents carried.
#[derive(Debug, Clone)]
pub struct Maneuver {
    pub turn: TurnState,
    pub pitch: PitchState,
    pub bank: BankState,
    pub throttle: MoveState,
    pub heading: HeadingState,
    turn_magnitude: f32,
    pitch_scale: f32,
    /// Multiplier on the bank rate; negative while rolling left.
    roll_scale: f32,
    bank_input: BankInput,
    throttle_ratio: f32,
    gesture: RollGesture,
}

impl Maneuver {
    pub fn new(roll_window: f32) -> Self {
        Self {
            turn: TurnState::Straight,
            pitch: PitchState::Level,
            bank: BankState::Straight,
            throttle: MoveState::Forward,
            heading: HeadingState::Straight,
            turn_magnitude: FULL_TURN,
            pitch_scale: 0.0,
            roll_scale: DEFAULT_ROLL_SCALE,
            bank_input: BankInput::Straight,
            throttle_ratio: 1.0,
            gesture: RollGesture::new(roll_window),
        }
    }

    /// Back to straight and level forward flight with nothing latched.
    /// The heading state is left alone.
    pub fn reset(&mut self) {
        self.turn = TurnState::Straight;
        self.pitch = PitchState::Level;
        self.throttle = MoveState::Forward;
        self.bank = BankState::Straight;
        self.turn_magnitude = FULL_TURN;
        self.pitch_scale = 0.0;
        self.roll_scale = DEFAULT_ROLL_SCALE;
        self.bank_input = BankInput::Straight;
        self.throttle_ratio = 1.0;
        self.gesture.reset();
    }

    pub fn turn_left(&mut self, magnitude: f32) {
        self.turn_magnitude = magnitude;
        self.turn = match self.turn {
            TurnState::Right => TurnState::Straight,
            _ => TurnState::Left,
        };
    }

    pub fn turn_right(&mut self, magnitude: f32) {
        self.turn_magnitude = magnitude;
        self.turn = match self.turn {
            TurnState::Left => TurnState::Straight,
            _ => TurnState::Right,
        };
    }

    pub fn straight(&mut self) {
        self.turn = TurnState::Straight;
    }

    pub fn climb(&mut self, scale: f32) {
        self.pitch_scale = scale;
        self.pitch = match self.pitch {
            PitchState::Dive => PitchState::Level,
            _ => PitchState::Climb,
        };
    }

    pub fn dive(&mut self, scale: f32) {
        self.pitch_scale = scale;
        self.pitch = match self.pitch {
            PitchState::Climb => PitchState::Level,
            _ => PitchState::Dive,
        };
    }

    pub fn level(&mut self) {
        self.pitch = PitchState::Level;
    }

    pub fn set_throttle(&mut self, state: MoveState) {
        self.throttle = state;
    }

    pub fn set_throttle_ratio(&mut self, ratio: f32) {
        self.throttle_ratio = ratio;
    }

    pub fn throttle_ratio(&self) -> f32 {
        self.throttle_ratio
    }

    pub fn roll_scale(&self) -> f32 {
        self.roll_scale
    }

    pub fn is_barrel_rolling(&self) -> bool {
        self.bank == BankState::BarrelRoll
    }

    /// Latch this frame's held bank direction and, if a trigger supplied
    /// one, the bank rate scale for this tick. Ignored mid-roll.
    pub fn set_bank_input(&mut self, input: BankInput, scale: Option<f32>) {
        if self.is_barrel_rolling() {
            return;
        }
        self.bank_input = input;
        if let Some(scale) = scale {
            self.roll_scale = scale;
        }
    }

    /// Age the roll gesture. Called once per `process`.
    pub fn tick_gesture(&mut self, dt: f32) {
        self.gesture.tick(dt);
    }

    /// Feed a barrel-roll press; returns true if a roll started.
    pub fn roll_press(&mut self, side: RollSide) -> bool {
        if !self.gesture.press(side) {
            return false;
        }
        self.bank = BankState::BarrelRoll;
        self.roll_scale = BARREL_ROLL_SCALE * side.rate_sign();
        true
    }

    pub fn gesture(&self) -> &RollGesture {
        &self.gesture
    }

    /// Advance heading, pitch and bank for one flying tick and set the
    /// forward and lateral speeds on `body`.
    pub fn integrate(&mut self, body: &mut Body, config: &FlightConfig, mode: SteeringMode, dt: f32) {
        let ground_speed = config.ground_speeds.for_state(self.throttle);
        let bank_step = config.max_bank_rate * self.roll_scale * dt;
        let o = &mut body.orientation;

        if !self.is_barrel_rolling() {
            match self.bank_input {
                BankInput::Left => {
                    self.bank = BankState::Turning;
                    if o.bank < FRAC_PI_2 {
                        o.bank += bank_step;
                    }
                }
                BankInput::Right => {
                    self.bank = BankState::Turning;
                    if o.bank > -FRAC_PI_2 {
                        o.bank -= bank_step;
                    }
                }
                BankInput::Straight => self.bank = BankState::Straight,
            }
        }

        let heading_step = config.max_turn_rate * (self.turn_magnitude / FULL_TURN) * dt;
        match self.turn {
            TurnState::Left => {
                match mode {
                    SteeringMode::AllRange => o.heading -= heading_step,
                    SteeringMode::Snapped => {
                        body.speed_left = ground_speed / 2.0;
                        body.speed_right = 0.0;
                    }
                }
                if o.bank < FRAC_PI_4 && self.bank == BankState::Straight {
                    o.bank += bank_step;
                }
            }
            TurnState::Right => {
                match mode {
                    SteeringMode::AllRange => o.heading += heading_step,
                    SteeringMode::Snapped => {
                        body.speed_right = ground_speed / 2.0;
                        body.speed_left = 0.0;
                    }
                }
                if o.bank > -FRAC_PI_4 && self.bank == BankState::Straight {
                    o.bank -= bank_step;
                }
            }
            TurnState::Straight => {
                body.speed_left = 0.0;
                body.speed_right = 0.0;
            }
        }
        if mode == SteeringMode::AllRange {
            body.speed_left = 0.0;
            body.speed_right = 0.0;
        }

        let pitch_step = self.pitch_scale * config.max_pitch_rate * dt;
        match self.pitch {
            PitchState::Climb => o.pitch -= pitch_step,
            PitchState::Dive => o.pitch += pitch_step,
            PitchState::Level => {}
        }
        o.pitch = o.pitch.clamp(-FRAC_PI_8, FRAC_PI_8);

        if self.is_barrel_rolling() {
            if o.bank > -TAU && o.bank < TAU {
                o.bank -= bank_step;
            } else {
                o.bank = 0.0;
                self.bank = BankState::Straight;
                self.roll_scale = DEFAULT_ROLL_SCALE;
                log::debug!("Barrel roll complete");
            }
        } else {
            self.roll_scale = DEFAULT_ROLL_SCALE;
            if self.turn == TurnState::Straight && self.bank == BankState::Straight {
                o.bank = ease_toward(o.bank, 0.0, 4.0 * config.max_bank_rate * dt);
            }
        }

        if self.pitch == PitchState::Level {
            o.pitch = ease_toward(o.pitch, 0.0, config.max_pitch_rate * dt);
        }

        if mode == SteeringMode::Snapped {
            snap_heading(o, self.heading, config);
        }

        body.speed = config.air_speeds.for_state(self.throttle);
    }
}

/// Creep the heading toward the snapped direction for `state`.
fn snap_heading(o: &mut EulerAngles, state: HeadingState, config: &FlightConfig) {
    let target = state.target();
    let offset = o.heading - target;
    if offset > config.heading_snap_tolerance {
        o.heading -= config.heading_creep;
    } else if offset < -config.heading_snap_tolerance {
        o.heading += config.heading_creep;
    } else {
        o.heading = target;
    }
}
