//! Raycasting for bullet impacts and reticle lock-on.

use crate::{CollisionGroup, PhysicsWorld};
use engine_core::Vec3;
use rapier3d::prelude::*;

/// Result of a raycast query.
#[derive(Debug, Clone, Copy)]
pub struct RaycastHit {
    /// The collider that was hit.
    pub collider: ColliderHandle,
    /// Distance along the ray to the hit point.
    pub distance: f32,
    /// World position of the hit.
    pub point: Vec3,
    /// Surface normal at the hit point.
    pub normal: Vec3,
}

impl PhysicsWorld {
    /// Cast a ray against colliders accepted by `groups` and return the first hit.
    /// `direction` does not need to be normalized.
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        groups: InteractionGroups,
    ) -> Option<RaycastHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO || max_distance <= 0.0 {
            return None;
        }

        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        let filter = QueryFilter::default().groups(groups);

        self.query_pipeline
            .cast_ray_and_get_normal(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_distance,
                true,
                filter,
            )
            .map(|(collider, intersection)| {
                let point = ray.point_at(intersection.time_of_impact);
                RaycastHit {
                    collider,
                    distance: intersection.time_of_impact,
                    point: Vec3::new(point.x, point.y, point.z),
                    normal: Vec3::new(
                        intersection.normal.x,
                        intersection.normal.y,
                        intersection.normal.z,
                    ),
                }
            })
    }

    /// Cast the segment `origin .. origin + ray` against the terrain.
    pub fn raycast_terrain(&self, origin: Vec3, ray: Vec3) -> Option<RaycastHit> {
        self.raycast(
            origin,
            ray,
            ray.length(),
            CollisionGroup::bullet_against(CollisionGroup::Environment),
        )
    }

    /// True if the segment `origin .. origin + ray` touches any enemy.
    pub fn segment_hits_enemy(&self, origin: Vec3, ray: Vec3) -> bool {
        self.raycast(
            origin,
            ray,
            ray.length(),
            CollisionGroup::bullet_against(CollisionGroup::Enemy),
        )
        .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with_ground_and_enemy() -> PhysicsWorld {
        let mut world = PhysicsWorld::new();
        world.add_ground_plane(0.0);
        world.add_enemy_sphere(Vec3::new(0.0, 10.0, 50.0), 2.0);
        world.update_query_pipeline();
        world
    }

    #[test]
    fn terrain_ray_hits_ground_plane() {
        let world = world_with_ground_and_enemy();
        let hit = world
            .raycast_terrain(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -100.0, 0.0))
            .expect("ground should be hit");
        assert!(hit.point.y.abs() < 1e-3);
        assert!((hit.distance - 10.0).abs() < 1e-3);
    }

    #[test]
    fn terrain_ray_ignores_enemies() {
        let world = world_with_ground_and_enemy();
        // Level ray straight through the enemy, never reaching the ground.
        let hit = world.raycast_terrain(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, 0.0, 100.0));
        assert!(hit.is_none());
    }

    #[test]
    fn enemy_segment_respects_length() {
        let world = world_with_ground_and_enemy();
        let origin = Vec3::new(0.0, 10.0, 0.0);
        assert!(world.segment_hits_enemy(origin, Vec3::new(0.0, 0.0, 100.0)));
        assert!(!world.segment_hits_enemy(origin, Vec3::new(0.0, 0.0, 20.0)));
        assert!(!world.segment_hits_enemy(origin, Vec3::new(0.0, 0.0, -100.0)));
    }

    #[test]
    fn heightfield_is_hit_from_above() {
        let mut world = PhysicsWorld::new();
        let heights = vec![3.0; 9];
        assert!(world.add_terrain_heightfield(&heights, 3, 100.0).is_some());
        world.update_query_pipeline();
        let hit = world
            .raycast_terrain(Vec3::new(10.0, 50.0, -10.0), Vec3::new(0.0, -100.0, 0.0))
            .expect("heightfield should be hit");
        assert!((hit.point.y - 3.0).abs() < 1e-3);
    }

    #[test]
    fn short_heightfield_is_rejected() {
        let mut world = PhysicsWorld::new();
        assert!(world.add_terrain_heightfield(&[0.0; 3], 2, 10.0).is_none());
        assert!(world.add_terrain_heightfield(&[0.0; 4], 1, 10.0).is_none());
        assert!(!world.needs_query_update());
    }

    #[test]
    fn colliders_mark_pipeline_dirty() {
        let mut world = PhysicsWorld::new();
        assert!(!world.needs_query_update());
        let handle = world.add_enemy_sphere(Vec3::ZERO, 1.0);
        assert!(world.needs_query_update());
        world.update_query_pipeline();
        world.remove_collider(handle);
        assert!(world.needs_query_update());
    }
}
