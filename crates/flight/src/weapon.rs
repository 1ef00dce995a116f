//! Nose gun: fire-rate gating and the effects of a shot.

use engine_core::{Body, TeamColor, Vec3};

use crate::config::FlightConfig;
use crate::services::{EntityHandle, Services};

pub const MUZZLE_FLASH: &str = "muzzlefire";
pub const GUNSHOT: &str = "gunshot";
pub const GROUND_IMPACT: &str = "bulletdust";
pub const WATER_IMPACT: &str = "bulletspray";

/// Where and how a shot leaves the aircraft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Muzzle {
    pub position: Vec3,
    pub direction: Vec3,
}

impl Muzzle {
    /// Gun muzzle pushed forward to the projectile spawn point.
    pub fn for_body(body: &Body, config: &FlightConfig) -> Self {
        let local = config.gun_offset + Vec3::Z * config.muzzle_extension;
        Self {
            position: body.object_to_world(local),
            direction: body.orientation.forward(),
        }
    }
}

/// Where a fired bullet ended up, for the impact effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Impact {
    Ground(Vec3),
    Water(Vec3),
}

#[derive(Debug, Clone)]
pub struct Gun {
    last_fired_ms: Option<u64>,
    interval_ms: f32,
}

impl Gun {
    pub fn new(config: &FlightConfig) -> Self {
        Self {
            last_fired_ms: None,
            interval_ms: config.fire_interval_ms(),
        }
    }

    pub fn last_fired_ms(&self) -> Option<u64> {
        self.last_fired_ms
    }

    pub fn is_ready(&self, now_ms: u64) -> bool {
        match self.last_fired_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) as f32 >= self.interval_ms,
        }
    }

    /// Fire if the cooldown allows it. Early calls are dropped silently.
    pub fn fire(
        &mut self,
        body: &Body,
        velocity: Vec3,
        team: TeamColor,
        config: &FlightConfig,
        services: &mut Services<'_>,
    ) -> Option<EntityHandle> {
        let now = services.clock.now_ms();
        if !self.is_ready(now) {
            return None;
        }
        self.last_fired_ms = Some(now);

        let muzzle = Muzzle::for_body(body, config);
        let bullet = services
            .projectiles
            .spawn_bullet(muzzle.position, body.orientation, team);

        let flash = services.particles.create_system(MUZZLE_FLASH);
        services.particles.set_system_position(flash, muzzle.position);
        services.sounds.play_at(GUNSHOT, body.position, -velocity);

        match trace_impact(body.position, &muzzle, config, services) {
            Some(Impact::Ground(point)) => {
                let dust = services.particles.create_system(GROUND_IMPACT);
                services.particles.set_system_position(dust, point);
            }
            Some(Impact::Water(point)) => {
                let spray = services.particles.create_system(WATER_IMPACT);
                services.particles.set_system_position(spray, point);
            }
            None => {}
        }

        log::debug!("Shot fired at {:?}", muzzle.position);
        Some(bullet)
    }
}

/// Trace the shot against the terrain. Hits under the water line are moved up
/// onto the water plane along the line of fire from the aircraft.
pub fn trace_impact(
    origin: Vec3,
    muzzle: &Muzzle,
    config: &FlightConfig,
    services: &Services<'_>,
) -> Option<Impact> {
    let hit = services
        .terrain
        .ray_intersect(muzzle.position, muzzle.direction * config.bullet_range)?;
    let water = services.water.water_height();
    if hit.y > water {
        return Some(Impact::Ground(hit));
    }

    let dir = muzzle.direction;
    if dir.y.abs() <= f32::EPSILON {
        return Some(Impact::Water(Vec3::new(hit.x, water, hit.z)));
    }
    let t = (water - origin.y) / dir.y;
    Some(Impact::Water(origin + dir * t))
}
