//! Orientation and transform types for spatial positioning.
//!
//! World frame: +X right, +Y up, +Z forward. Euler angles are applied
//! heading (about Y), then pitch (about X), then bank (about Z).

use glam::{EulerRot, Quat, Vec3};

/// Heading/pitch/bank orientation in radians.
///
/// Positive heading turns right, positive pitch puts the nose down and
/// positive bank lifts the right wing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EulerAngles {
    pub heading: f32,
    pub pitch: f32,
    pub bank: f32,
}

impl EulerAngles {
    pub const IDENTITY: Self = Self {
        heading: 0.0,
        pitch: 0.0,
        bank: 0.0,
    };

    pub fn new(heading: f32, pitch: f32, bank: f32) -> Self {
        Self {
            heading,
            pitch,
            bank,
        }
    }

    /// Rotation taking object-space vectors into world space.
    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.heading, self.pitch, self.bank)
    }

    /// Rotate an object-space vector into world space.
    pub fn object_to_world(&self, v: Vec3) -> Vec3 {
        self.to_quat() * v
    }

    /// Rotate a world-space vector into object space.
    pub fn world_to_object(&self, v: Vec3) -> Vec3 {
        self.to_quat().inverse() * v
    }

    /// Nose direction in world space.
    pub fn forward(&self) -> Vec3 {
        self.object_to_world(Vec3::Z)
    }

    pub fn right(&self) -> Vec3 {
        self.object_to_world(Vec3::X)
    }

    pub fn up(&self) -> Vec3 {
        self.object_to_world(Vec3::Y)
    }

    /// Component-wise `self + rate * dt`.
    pub fn integrate(&mut self, rate: &EulerAngles, dt: f32) {
        self.heading += rate.heading * dt;
        self.pitch += rate.pitch * dt;
        self.bank += rate.bank * dt;
    }
}

/// A 3D transform representing position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a transform from a position and an Euler orientation.
    pub fn from_position_orientation(position: Vec3, orientation: &EulerAngles) -> Self {
        Self {
            position,
            rotation: orientation.to_quat(),
            ..Default::default()
        }
    }

    /// Get the forward direction (positive Z).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Translate the transform by a delta.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }
}
