//! Collaborators the aircraft talks to. Everything here is injected per call
//! through [`Services`]; the aircraft owns none of it.

use engine_core::{Clock, EulerAngles, TeamColor, Vec3};

use crate::config::GameRules;

/// Handle to a live particle system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectHandle(pub u32);

/// Handle to a spawned game object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle(pub u64);

pub trait ParticleService {
    fn create_system(&mut self, name: &str) -> EffectHandle;
    fn set_system_position(&mut self, handle: EffectHandle, position: Vec3);
    fn kill_system(&mut self, handle: EffectHandle);
}

pub trait SoundService {
    fn play_at(&mut self, sound: &str, position: Vec3, velocity: Vec3);
}

pub trait ProjectileSpawner {
    fn spawn_bullet(&mut self, position: Vec3, orientation: EulerAngles, team: TeamColor) -> EntityHandle;
}

pub trait TerrainQuery {
    /// First terrain point on the segment `origin .. origin + ray`.
    fn ray_intersect(&self, origin: Vec3, ray: Vec3) -> Option<Vec3>;
}

pub trait WaterQuery {
    fn water_height(&self) -> f32;
}

pub trait EnemyQuery {
    /// True if the segment `origin .. origin + ray` touches an enemy.
    fn ray_intersect_enemy(&self, origin: Vec3, ray: Vec3) -> bool;
}

/// The renderable model of one aircraft.
pub trait ModelSkin {
    fn part_count(&self) -> usize;
    fn set_part_texture(&mut self, part: usize, texture: &str);
    /// Upload the current textures.
    fn cache(&mut self);
}

/// Everything an aircraft update may touch, borrowed for one call.
pub struct Services<'a> {
    pub clock: &'a dyn Clock,
    pub rules: &'a GameRules,
    pub particles: &'a mut dyn ParticleService,
    pub sounds: &'a mut dyn SoundService,
    pub projectiles: &'a mut dyn ProjectileSpawner,
    pub terrain: &'a dyn TerrainQuery,
    pub water: &'a dyn WaterQuery,
    pub enemies: &'a dyn EnemyQuery,
    pub skin: &'a mut dyn ModelSkin,
}
