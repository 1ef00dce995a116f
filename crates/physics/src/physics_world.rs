//! Physics world management with Rapier3D.
//!
//! The flight core only issues ray queries, so the world holds static
//! terrain and target colliders and never steps a simulation.

use crate::collision::CollisionGroup;
use engine_core::Vec3;
use rapier3d::prelude::*;

/// Collider sets plus the query pipeline used for ray casts.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub island_manager: IslandManager,
    pub query_pipeline: QueryPipeline,
    /// Set whenever colliders change; cleared by `update_query_pipeline`.
    dirty: bool,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            island_manager: IslandManager::new(),
            query_pipeline: QueryPipeline::new(),
            dirty: false,
        }
    }

    /// Update query pipeline for raycasting. Call after adding or moving colliders.
    pub fn update_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.collider_set);
        self.dirty = false;
    }

    /// True when colliders changed since the last pipeline update.
    pub fn needs_query_update(&self) -> bool {
        self.dirty
    }

    /// Add a ground plane collider (flat half-space at the given height).
    pub fn add_ground_plane(&mut self, height: f32) -> ColliderHandle {
        let collider = ColliderBuilder::halfspace(Vector::y_axis())
            .translation(vector![0.0, height, 0.0])
            .collision_groups(CollisionGroup::environment())
            .build();
        self.dirty = true;
        self.collider_set.insert(collider)
    }

    /// Add a square heightfield of `samples` x `samples` heights centred on
    /// the origin and `size` units across. Rows run along Z, columns along X.
    /// Returns `None` if the grid is degenerate or `heights` is too short.
    pub fn add_terrain_heightfield(&mut self, heights: &[f32], samples: usize, size: f32) -> Option<ColliderHandle> {
        if samples < 2 || heights.len() < samples * samples {
            log::warn!(
                "Rejecting {}x{} heightfield with {} heights",
                samples,
                samples,
                heights.len()
            );
            return None;
        }

        let grid = DMatrix::from_fn(samples, samples, |row, col| heights[row * samples + col] as Real);
        let collider = ColliderBuilder::heightfield(grid, vector![size, 1.0, size])
            .collision_groups(CollisionGroup::environment())
            .build();
        self.dirty = true;
        log::debug!("Terrain heightfield {}x{} over {} units", samples, samples, size);
        Some(self.collider_set.insert(collider))
    }

    /// Add a spherical enemy target fixed in the world.
    pub fn add_enemy_sphere(&mut self, position: Vec3, radius: f32) -> ColliderHandle {
        let collider = ColliderBuilder::ball(radius)
            .translation(vector![position.x, position.y, position.z])
            .collision_groups(CollisionGroup::enemy())
            .build();
        self.dirty = true;
        self.collider_set.insert(collider)
    }

    /// Remove a collider by its handle.
    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.collider_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.rigid_body_set,
            true,
        );
        self.dirty = true;
    }
}
