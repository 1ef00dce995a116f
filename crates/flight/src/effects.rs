//! In-process particle system registry.
//!
//! Tracks which named effects are alive and where. Looping effects (smoke)
//! live until killed; everything else is a burst that expires on its own.

use std::collections::{HashMap, HashSet};

use engine_core::Vec3;

use crate::services::{EffectHandle, ParticleService};

pub const BURST_SECONDS: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub name: String,
    pub position: Vec3,
    pub age: f32,
}

#[derive(Debug, Default)]
pub struct EffectRegistry {
    next: u32,
    live: HashMap<EffectHandle, Effect>,
    looping: HashSet<String>,
}

impl EffectRegistry {
    pub fn new<I, S>(looping: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            looping: looping.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn get(&self, handle: EffectHandle) -> Option<&Effect> {
        self.live.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn count_named(&self, name: &str) -> usize {
        self.live.values().filter(|e| e.name == name).count()
    }

    /// Age every effect and drop finished bursts.
    pub fn update(&mut self, dt: f32) {
        let looping = &self.looping;
        self.live.retain(|_, effect| {
            effect.age += dt;
            looping.contains(&effect.name) || effect.age < BURST_SECONDS
        });
    }
}

impl ParticleService for EffectRegistry {
    fn create_system(&mut self, name: &str) -> EffectHandle {
        self.next += 1;
        let handle = EffectHandle(self.next);
        self.live.insert(
            handle,
            Effect {
                name: name.to_string(),
                position: Vec3::ZERO,
                age: 0.0,
            },
        );
        handle
    }

    fn set_system_position(&mut self, handle: EffectHandle, position: Vec3) {
        if let Some(effect) = self.live.get_mut(&handle) {
            effect.position = position;
        }
    }

    fn kill_system(&mut self, handle: EffectHandle) {
        if self.live.remove(&handle).is_none() {
            log::debug!("Effect {:?} already gone", handle);
        }
    }
}
