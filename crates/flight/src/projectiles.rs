//! Bullets as hecs entities: spawned by the aircraft, flown straight until
//! their lifetime runs out.

use engine_core::{EulerAngles, Lifetime, TeamColor, Transform, Velocity, Vec3};
use hecs::World;

use crate::services::{EntityHandle, ProjectileSpawner};

pub const BULLET_SPEED: f32 = 200.0;
pub const BULLET_LIFETIME: f32 = 2.0;

/// Marks a bullet and the team that fired it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bullet {
    pub team: TeamColor,
}

impl ProjectileSpawner for World {
    fn spawn_bullet(&mut self, position: Vec3, orientation: EulerAngles, team: TeamColor) -> EntityHandle {
        let transform = Transform::from_position_orientation(position, &orientation);
        let velocity = Velocity::new(transform.forward() * BULLET_SPEED);
        let entity = self.spawn((transform, velocity, Lifetime::new(BULLET_LIFETIME), Bullet { team }));
        EntityHandle(entity.to_bits().get())
    }
}

/// Move bullets and despawn the expired ones. Returns how many expired.
pub fn update_projectiles(world: &mut World, dt: f32) -> usize {
    let mut expired = Vec::new();
    for (entity, (transform, velocity, lifetime, _)) in
        world.query_mut::<(&mut Transform, &Velocity, &mut Lifetime, &Bullet)>()
    {
        transform.translate(velocity.linear * dt);
        if lifetime.update(dt) {
            expired.push(entity);
        }
    }

    for entity in &expired {
        world.despawn(*entity).ok();
    }
    expired.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullets_fly_along_the_nose() {
        let mut world = World::new();
        let heading_right = EulerAngles::new(std::f32::consts::FRAC_PI_2, 0.0, 0.0);
        world.spawn_bullet(Vec3::ZERO, heading_right, TeamColor::Blue);

        update_projectiles(&mut world, 0.5);
        let mut query = world.query::<(&Transform, &Bullet)>();
        let (_, (transform, bullet)) = query.iter().next().unwrap();
        assert_eq!(bullet.team, TeamColor::Blue);
        assert!((transform.position - Vec3::new(100.0, 0.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn expired_bullets_are_despawned() {
        let mut world = World::new();
        world.spawn_bullet(Vec3::ZERO, EulerAngles::IDENTITY, TeamColor::Red);
        assert_eq!(update_projectiles(&mut world, 1.0), 0);
        assert_eq!(update_projectiles(&mut world, 1.5), 1);
        assert_eq!(world.len(), 0);
    }
}
