//! Double-press barrel roll detection.
//!
//! Each side is either idle or armed by a first press. A press on side S
//! triggers the roll when S is armed *and* the previous press (on either
//! side) was also S. Any other press arms S, keeping its timer if it was
//! already armed. An armed side returns to idle once the window elapses.

/// Which way a roll goes. Right rolls lower the bank angle, left rolls raise it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollSide {
    Left,
    Right,
}

impl RollSide {
    /// Sign of the roll rate scale for this side.
    pub fn rate_sign(self) -> f32 {
        match self {
            RollSide::Right => 1.0,
            RollSide::Left => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Arm {
    Idle,
    Armed { elapsed: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RollGesture {
    left: Arm,
    right: Arm,
    last_press: Option<RollSide>,
    window: f32,
}

impl RollGesture {
    pub fn new(window: f32) -> Self {
        Self {
            left: Arm::Idle,
            right: Arm::Idle,
            last_press: None,
            window,
        }
    }

    fn arm_mut(&mut self, side: RollSide) -> &mut Arm {
        match side {
            RollSide::Left => &mut self.left,
            RollSide::Right => &mut self.right,
        }
    }

    fn arm(&self, side: RollSide) -> Arm {
        match side {
            RollSide::Left => self.left,
            RollSide::Right => self.right,
        }
    }

    /// Age the armed sides; expired sides go back to idle.
    pub fn tick(&mut self, dt: f32) {
        let window = self.window;
        for arm in [&mut self.left, &mut self.right] {
            if let Arm::Armed { elapsed } = arm {
                *elapsed += dt;
                if *elapsed > window {
                    *arm = Arm::Idle;
                }
            }
        }
    }

    /// Register a press. Returns true when it completes a double press.
    pub fn press(&mut self, side: RollSide) -> bool {
        let repeated = self.last_press == Some(side);
        self.last_press = Some(side);

        let arm = self.arm_mut(side);
        match *arm {
            Arm::Armed { .. } if repeated => {
                *arm = Arm::Idle;
                true
            }
            Arm::Armed { .. } => false,
            Arm::Idle => {
                *arm = Arm::Armed { elapsed: 0.0 };
                false
            }
        }
    }

    pub fn is_armed(&self, side: RollSide) -> bool {
        matches!(self.arm(side), Arm::Armed { .. })
    }

    /// Seconds since `side` was armed, if it is.
    pub fn elapsed(&self, side: RollSide) -> Option<f32> {
        match self.arm(side) {
            Arm::Armed { elapsed } => Some(elapsed),
            Arm::Idle => None,
        }
    }

    pub fn reset(&mut self) {
        self.left = Arm::Idle;
        self.right = Arm::Idle;
        self.last_press = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_press_inside_window_triggers() {
        let mut g = RollGesture::new(0.6);
        assert!(!g.press(RollSide::Right));
        g.tick(0.3);
        assert!(g.press(RollSide::Right));
        assert!(!g.is_armed(RollSide::Right));
    }

    #[test]
    fn single_press_expires_silently() {
        let mut g = RollGesture::new(0.6);
        g.press(RollSide::Left);
        for _ in 0..7 {
            g.tick(0.1);
        }
        assert!(!g.is_armed(RollSide::Left));
        assert_eq!(g.elapsed(RollSide::Left), None);
        // The next press starts over instead of completing a roll.
        assert!(!g.press(RollSide::Left));
        assert!(g.is_armed(RollSide::Left));
    }

    #[test]
    fn press_exactly_at_window_edge_still_counts() {
        let mut g = RollGesture::new(0.5);
        g.press(RollSide::Left);
        g.tick(0.25);
        g.tick(0.25);
        assert!(g.press(RollSide::Left));
    }

    #[test]
    fn alternating_sides_do_not_roll() {
        let mut g = RollGesture::new(0.6);
        assert!(!g.press(RollSide::Right));
        assert!(!g.press(RollSide::Left));
        // Right is still armed, but the last press was Left.
        assert!(!g.press(RollSide::Right));
        assert!(g.is_armed(RollSide::Right));
        // Now the alternation is satisfied.
        assert!(g.press(RollSide::Right));
    }

    #[test]
    fn rearm_keeps_original_timer() {
        let mut g = RollGesture::new(0.6);
        g.press(RollSide::Right);
        g.tick(0.4);
        g.press(RollSide::Left);
        g.press(RollSide::Right);
        assert_eq!(g.elapsed(RollSide::Right), Some(0.4));
        g.tick(0.3);
        assert!(!g.is_armed(RollSide::Right));
    }

    #[test]
    fn rate_sign_matches_side() {
        assert!(RollSide::Right.rate_sign() > 0.0);
        assert!(RollSide::Left.rate_sign() < 0.0);
    }
}
