//! Terrain, water and enemy queries backed by the physics world.

use engine_core::Vec3;
use physics::PhysicsWorld;

use crate::services::{EnemyQuery, TerrainQuery, WaterQuery};

impl TerrainQuery for PhysicsWorld {
    fn ray_intersect(&self, origin: Vec3, ray: Vec3) -> Option<Vec3> {
        self.raycast_terrain(origin, ray).map(|hit| hit.point)
    }
}

impl EnemyQuery for PhysicsWorld {
    fn ray_intersect_enemy(&self, origin: Vec3, ray: Vec3) -> bool {
        self.segment_hits_enemy(origin, ray)
    }
}

/// Water plane at a fixed height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatWater {
    pub height: f32,
}

impl WaterQuery for FlatWater {
    fn water_height(&self) -> f32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physics_world_answers_flight_queries() {
        let mut world = PhysicsWorld::new();
        world.add_ground_plane(-5.0);
        world.add_enemy_sphere(Vec3::new(0.0, 0.0, 30.0), 1.5);
        world.update_query_pipeline();

        let terrain: &dyn TerrainQuery = &world;
        let hit = terrain
            .ray_intersect(Vec3::ZERO, Vec3::new(0.0, -20.0, 0.0))
            .unwrap();
        assert!((hit.y + 5.0).abs() < 1e-3);

        let enemies: &dyn EnemyQuery = &world;
        assert!(enemies.ray_intersect_enemy(Vec3::ZERO, Vec3::Z * 100.0));
        assert!(!enemies.ray_intersect_enemy(Vec3::ZERO, Vec3::X * 100.0));
    }
}
