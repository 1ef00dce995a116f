//! Gun sight quad and lock-on color.

use bytemuck::{Pod, Zeroable};
use engine_core::{Body, Vec3};
use std::f32::consts::TAU;

use crate::config::FlightConfig;
use crate::services::EnemyQuery;

/// Length of one lock-on flash cycle.
pub const FLASH_PERIOD_MS: u64 = 600;
pub const UNLOCKED_COLOR: u32 = argb(255, 0, 180, 0);

pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Pre-lit vertex handed to the renderer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ReticleVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub argb: u32,
}

/// Red with an alpha that pulses between 55 and 255.
pub fn locked_color(now_ms: u64) -> u32 {
    let phase = (now_ms % FLASH_PERIOD_MS) as f32 / FLASH_PERIOD_MS as f32;
    let intensity = ((phase * TAU).sin() + 1.0) / 2.0;
    let alpha = (200.0 * intensity + 55.0) as u8;
    argb(alpha, 255, 0, 0)
}

/// Lock-on result, computed at most once per tick.
#[derive(Debug, Clone, Default)]
pub struct LockCache {
    locked: Option<bool>,
}

impl LockCache {
    pub fn get_or_query(&mut self, enemies: &dyn EnemyQuery, origin: Vec3, ray: Vec3) -> bool {
        *self
            .locked
            .get_or_insert_with(|| enemies.ray_intersect_enemy(origin, ray))
    }

    pub fn invalidate(&mut self) {
        self.locked = None;
    }

    pub fn cached(&self) -> Option<bool> {
        self.locked
    }
}

/// Build the sight quad `distance` ahead of the gun with half-extent `size`.
pub fn quad(body: &Body, config: &FlightConfig, distance: f32, size: f32, color: u32) -> [ReticleVertex; 4] {
    let o = &body.orientation;
    let center = body.object_to_world(config.gun_offset + Vec3::Z * distance);
    let right = o.object_to_world(Vec3::X * size);
    let up = o.object_to_world(Vec3::Y * size);

    let corners = [
        (center - right + up, [0.0, 0.0]),
        (center + right + up, [1.0, 0.0]),
        (center + right - up, [1.0, 1.0]),
        (center - right - up, [0.0, 1.0]),
    ];
    corners.map(|(p, uv)| ReticleVertex {
        position: p.to_array(),
        uv,
        argb: color,
    })
}

/// Gun position and the full-range lock-on ray.
pub fn gun_ray(body: &Body, config: &FlightConfig) -> (Vec3, Vec3) {
    let gun = body.object_to_world(config.gun_offset);
    (gun, body.orientation.forward() * config.bullet_range)
}
