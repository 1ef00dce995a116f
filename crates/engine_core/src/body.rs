//! Generic movable game object: position, orientation and speed integration.

use glam::{Quat, Vec3};

use crate::EulerAngles;

/// Base movement state shared by flying and ground objects.
///
/// `speed` moves the object along its nose; `speed_left` / `speed_right`
/// slide it sideways along its right axis.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub position: Vec3,
    pub orientation: EulerAngles,
    /// Angular rates in radians per second.
    pub angular_velocity: EulerAngles,
    pub speed: f32,
    pub speed_left: f32,
    pub speed_right: f32,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: EulerAngles::IDENTITY,
            angular_velocity: EulerAngles::IDENTITY,
            speed: 0.0,
            speed_left: 0.0,
            speed_right: 0.0,
        }
    }
}

impl Body {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Advance orientation by the angular velocity, then position by the
    /// forward and lateral speeds. Lateral motion stays level regardless of
    /// pitch and bank.
    pub fn integrate(&mut self, dt: f32) {
        self.orientation.integrate(&self.angular_velocity, dt);

        let forward = self.orientation.forward();
        let right = Quat::from_rotation_y(self.orientation.heading) * Vec3::X;
        let lateral = self.speed_right - self.speed_left;

        self.position += (forward * self.speed + right * lateral) * dt;
    }

    /// Transform an object-space point into world space.
    pub fn object_to_world(&self, local: Vec3) -> Vec3 {
        self.orientation.object_to_world(local) + self.position
    }
}
