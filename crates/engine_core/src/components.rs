//! Common ECS components used across the engine.

use glam::Vec3;

/// Velocity component for moving entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct Velocity {
    pub linear: Vec3,
}

impl Velocity {
    pub fn new(linear: Vec3) -> Self {
        Self { linear }
    }
}

/// Integer hit points for damageable entities.
///
/// `current` stays within `0..=max` through every method here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    /// Full health. Non-positive maxima are raised to 1.
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.current = self.current.saturating_sub(amount).clamp(0, self.max);
    }

    pub fn heal(&mut self, amount: i32) {
        self.current = self.current.saturating_add(amount).clamp(0, self.max);
    }

    pub fn heal_full(&mut self) {
        self.current = self.max;
    }

    /// Change the maximum. Ignored for `max <= 0`; current is clamped to the new max.
    pub fn set_max(&mut self, max: i32) -> bool {
        if max <= 0 {
            return false;
        }
        self.max = max;
        self.current = self.current.min(max);
        true
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Lifetime component for temporary entities (projectiles, effects).
#[derive(Debug, Clone, Copy)]
pub struct Lifetime {
    pub remaining: f32,
}

impl Lifetime {
    pub fn new(seconds: f32) -> Self {
        Self { remaining: seconds }
    }

    /// Returns true once the lifetime has run out.
    pub fn update(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining <= 0.0
    }
}

/// Team paint carried by aircraft and their projectiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TeamColor {
    #[default]
    Red,
    Green,
    Blue,
}

impl TeamColor {
    /// Next color in the Red → Green → Blue → Red cycle.
    pub fn next(self) -> Self {
        match self {
            TeamColor::Red => TeamColor::Green,
            TeamColor::Green => TeamColor::Blue,
            TeamColor::Blue => TeamColor::Red,
        }
    }
}
