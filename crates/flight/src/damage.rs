//! Hit points and the visual damage tiers they select.

use engine_core::{Health, Vec3};

use crate::config::FlightConfig;
use crate::services::{EffectHandle, ModelSkin, ParticleService};

/// Tier index for `hp` in a table of `len` entries, clamped to the table.
pub fn select_tier(hp: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let last = (len - 1).min(i32::MAX as usize) as i32;
    hp.clamp(0, last) as usize
}

/// Health plus the texture and smoke it shows.
#[derive(Debug, Clone)]
pub struct Hull {
    health: Health,
    textures: Vec<String>,
    smoke_tiers: Vec<Option<String>>,
    smoke: Option<EffectHandle>,
    tier: Option<usize>,
    dirty: bool,
}

impl Hull {
    pub fn new(config: &FlightConfig) -> Self {
        Self {
            health: Health::new(config.max_hp),
            textures: config.textures.clone(),
            smoke_tiers: config.smoke_tiers.clone(),
            smoke: None,
            tier: None,
            dirty: true,
        }
    }

    pub fn hp(&self) -> i32 {
        self.health.current()
    }

    pub fn max_hp(&self) -> i32 {
        self.health.max()
    }

    pub fn is_depleted(&self) -> bool {
        self.health.is_dead()
    }

    /// Tier shown right now, if one has been applied.
    pub fn tier(&self) -> Option<usize> {
        self.tier
    }

    pub fn smoke(&self) -> Option<EffectHandle> {
        self.smoke
    }

    pub fn needs_refresh(&self) -> bool {
        self.dirty
    }

    /// Subtract HP, floored at zero. The caller applies the tier.
    pub fn take_damage(&mut self, amount: i32) {
        self.health.take_damage(amount);
        self.dirty = true;
    }

    pub fn recover(&mut self, amount: i32) {
        self.health.heal(amount);
        self.dirty = true;
    }

    pub fn recover_all(&mut self) {
        self.health.heal_full();
        self.dirty = true;
    }

    /// Returns false and changes nothing when `max <= 0`.
    pub fn set_max_hp(&mut self, max: i32, recover_all: bool) -> bool {
        if !self.health.set_max(max) {
            return false;
        }
        if recover_all {
            self.health.heal_full();
        }
        self.dirty = true;
        true
    }

    /// Apply the tier for the current HP: retexture every model part, swap
    /// the smoke effect and park it at `engine`.
    pub fn apply_tier(&mut self, particles: &mut dyn ParticleService, skin: &mut dyn ModelSkin, engine: Vec3) {
        let hp = self.hp();

        if let Some(texture) = self.textures.get(select_tier(hp, self.textures.len())) {
            for part in 0..skin.part_count() {
                skin.set_part_texture(part, texture);
            }
            skin.cache();
        }

        self.kill_smoke(particles);
        let index = select_tier(hp, self.smoke_tiers.len());
        if let Some(name) = self.smoke_tiers.get(index).and_then(Option::as_ref) {
            let handle = particles.create_system(name);
            particles.set_system_position(handle, engine);
            self.smoke = Some(handle);
        }

        if self.tier != Some(index) {
            log::debug!("Damage tier {} at {} hp", index, hp);
        }
        self.tier = Some(index);
        self.dirty = false;
    }

    /// Keep the smoke at the engine.
    pub fn follow_engine(&self, particles: &mut dyn ParticleService, engine: Vec3) {
        if let Some(handle) = self.smoke {
            particles.set_system_position(handle, engine);
        }
    }

    pub fn kill_smoke(&mut self, particles: &mut dyn ParticleService) {
        if let Some(handle) = self.smoke.take() {
            particles.kill_system(handle);
        }
    }
}
