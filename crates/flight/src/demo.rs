//! Scripted sortie: terrain, targets and a timeline of pilot input.

use anyhow::{ensure, Context, Result};
use engine_core::{Time, Vec3};
use flight::{
    update_projectiles, Aircraft, AircraftModel, BankState, EffectRegistry, FlatWater,
    FlightConfig, GameRules, Lifecycle, Services, SoundQueue, SteeringMode,
};
use hecs::World;
use input::{InputState, KeyCode};
use noise::{NoiseFn, Perlin};
use physics::PhysicsWorld;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Keys the script drives.
const SCRIPTED_KEYS: [KeyCode; 6] = [
    KeyCode::KeyA,
    KeyCode::KeyD,
    KeyCode::KeyW,
    KeyCode::KeyE,
    KeyCode::ArrowUp,
    KeyCode::ArrowDown,
];

/// Seconds at which the aircraft takes one point of damage.
const HITS: [f32; 4] = [12.0, 13.0, 14.0, 15.0];

/// Sortie settings file, looked up in the working directory.
pub const SETTINGS_FILE: &str = "sortie.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    pub seed: u64,
    pub terrain_size: f32,
    pub terrain_resolution: usize,
    pub height_scale: f32,
    pub water_level: f32,
    pub enemy_count: usize,
    pub start_height: f32,
    pub tick_rate: f32,
    pub duration: f32,
    /// Sortie time at which a destroyed aircraft respawns.
    pub respawn_at: f32,
    pub rules: GameRules,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            seed: 7,
            terrain_size: 1200.0,
            terrain_resolution: 65,
            height_scale: 40.0,
            water_level: 8.0,
            enemy_count: 12,
            start_height: 80.0,
            tick_rate: 60.0,
            duration: 24.0,
            respawn_at: 21.0,
            rules: GameRules::default(),
        }
    }
}

impl DemoSettings {
    /// Parse and validate a RON document. Missing fields keep their defaults.
    pub fn from_ron_str(data: &str) -> Result<Self> {
        let settings: DemoSettings = ron::from_str(data).context("invalid sortie RON")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load `sortie.ron`. If the file is missing or invalid, returns the defaults.
    pub fn load() -> Self {
        let path = Path::new(SETTINGS_FILE);
        if !path.exists() {
            return Self::default();
        }
        let loaded = std::fs::read_to_string(path)
            .with_context(|| format!("could not read {:?}", path))
            .and_then(|data| Self::from_ron_str(&data));
        match loaded {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Invalid sortie settings at {:?}: {:#}, using defaults", path, e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.terrain_resolution >= 2, "terrain needs at least 2x2 samples");
        ensure!(self.tick_rate > 0.0, "tick rate must be positive");
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub shots: usize,
    pub barrel_rolls: usize,
    pub locked_ticks: usize,
    pub final_state: Lifecycle,
}

pub struct Demo {
    settings: DemoSettings,
    heights: Vec<f32>,
    physics: PhysicsWorld,
    bullets: World,
    effects: EffectRegistry,
    sounds: SoundQueue,
    model: AircraftModel,
    water: FlatWater,
    time: Time,
    input: InputState,
    aircraft: Aircraft,
    hits_taken: usize,
}

impl Demo {
    pub fn new(config: FlightConfig, settings: DemoSettings) -> Result<Self> {
        settings.validate()?;

        let heights = generate_heights(&settings);
        let mut physics = PhysicsWorld::new();
        let n = settings.terrain_resolution;
        physics
            .add_terrain_heightfield(&heights, n, settings.terrain_size)
            .context("terrain heightfield rejected")?;

        let mut rng = StdRng::seed_from_u64(settings.seed);
        for _ in 0..settings.enemy_count {
            let pos = Vec3::new(
                rng.gen_range(-30.0..30.0),
                settings.start_height + rng.gen_range(-10.0..10.0),
                rng.gen_range(40.0..240.0),
            );
            physics.add_enemy_sphere(pos, rng.gen_range(2.0..5.0));
        }
        physics.update_query_pipeline();

        let looping = config.smoke_tiers.iter().flatten().cloned().collect::<Vec<_>>();
        let mut aircraft = Aircraft::new(config);
        aircraft.set_steering_mode(SteeringMode::AllRange);
        aircraft.set_position(Vec3::Y * settings.start_height);

        Ok(Self {
            heights,
            physics,
            bullets: World::new(),
            effects: EffectRegistry::new(looping),
            sounds: SoundQueue::new(),
            model: AircraftModel::plane(),
            water: FlatWater {
                height: settings.water_level,
            },
            time: Time::new(),
            input: InputState::new(),
            aircraft,
            hits_taken: 0,
            settings,
        })
    }

    pub fn aircraft(&self) -> &Aircraft {
        &self.aircraft
    }

    /// Nearest terrain sample below `(x, z)`.
    pub fn terrain_height(&self, x: f32, z: f32) -> f32 {
        let n = self.settings.terrain_resolution;
        let half = self.settings.terrain_size / 2.0;
        let step = self.settings.terrain_size / (n - 1) as f32;
        let col = (((x + half) / step).round().max(0.0) as usize).min(n - 1);
        let row = (((z + half) / step).round().max(0.0) as usize).min(n - 1);
        self.heights[row * n + col]
    }

    pub fn run(&mut self) -> Summary {
        let dt = 1.0 / self.settings.tick_rate;
        let ticks = (self.settings.duration * self.settings.tick_rate) as usize;
        let mut summary = Summary {
            shots: 0,
            barrel_rolls: 0,
            locked_ticks: 0,
            final_state: Lifecycle::Flying,
        };
        let mut was_rolling = false;
        let mut next_report = 1.0;

        for _ in 0..ticks {
            let t = self.time.elapsed_seconds();
            self.script(t);

            self.step(dt);
            if self.aircraft.is_alive() {
                let reticle_locked = self.aircraft.is_locked_on() == Some(true);
                summary.locked_ticks += reticle_locked as usize;
            }

            let rolling = self.aircraft.maneuver().bank == BankState::BarrelRoll;
            if rolling && !was_rolling {
                summary.barrel_rolls += 1;
            }
            was_rolling = rolling;

            summary.shots += self
                .sounds
                .drain()
                .iter()
                .filter(|s| s.sound == flight::weapon::GUNSHOT)
                .count();

            if t >= next_report {
                self.report(t);
                next_report += 1.0;
            }
        }

        summary.final_state = self.aircraft.lifecycle();
        summary
    }

    /// One fixed tick: input, motion, reticle, then world upkeep.
    fn step(&mut self, dt: f32) {
        self.time.advance_seconds(dt);
        let mut services = Services {
            clock: &self.time,
            rules: &self.settings.rules,
            particles: &mut self.effects,
            sounds: &mut self.sounds,
            projectiles: &mut self.bullets,
            terrain: &self.physics,
            water: &self.water,
            enemies: &self.physics,
            skin: &mut self.model,
        };

        self.aircraft.process(dt, &self.input, &mut services);
        self.aircraft.advance(dt, &mut services);
        if self.aircraft.is_alive() {
            self.aircraft.reticle(100.0, 2.0, &services);
        }

        let pos = self.aircraft.position();
        if self.aircraft.lifecycle() == Lifecycle::Crashing && pos.y <= self.terrain_height(pos.x, pos.z) {
            log::info!("Impact at {:.1?}", pos);
            self.aircraft.kill();
            self.aircraft.drop_effects(&mut self.effects);
        }

        update_projectiles(&mut self.bullets, dt);
        self.effects.update(dt);
    }

    /// Drive the keyboard from the sortie timeline.
    fn script(&mut self, t: f32) {
        self.input.begin_frame();

        let tap = |start: f32| (start..start + 0.05).contains(&t);
        for key in SCRIPTED_KEYS {
            let want = match key {
                KeyCode::KeyD => (2.0..4.0).contains(&t),
                KeyCode::KeyE => tap(5.0) || tap(5.2),
                KeyCode::KeyW | KeyCode::ArrowDown => (7.0..9.0).contains(&t),
                KeyCode::KeyA => (10.0..11.0).contains(&t),
                KeyCode::ArrowUp => (16.0..18.0).contains(&t),
                _ => false,
            };
            match (want, self.input.is_key_held(key)) {
                (true, false) => self.input.press(key),
                (false, true) => self.input.release(key),
                _ => {}
            }
        }

        if let Some(&hit) = HITS.get(self.hits_taken) {
            if t >= hit {
                self.hits_taken += 1;
                let mut services = Services {
                    clock: &self.time,
                    rules: &self.settings.rules,
                    particles: &mut self.effects,
                    sounds: &mut self.sounds,
                    projectiles: &mut self.bullets,
                    terrain: &self.physics,
                    water: &self.water,
                    enemies: &self.physics,
                    skin: &mut self.model,
                };
                self.aircraft.damage(1, &mut services);
            }
        }

        if !self.aircraft.is_alive() && t >= self.settings.respawn_at {
            self.aircraft.reset();
            self.aircraft.set_position(Vec3::Y * self.settings.start_height);
        }
    }

    fn report(&self, t: f32) {
        let a = &self.aircraft;
        let o = a.orientation();
        log::info!(
            "t={:>4.1}s {:?} pos={:.1?} hdg={:.2} pitch={:.2} bank={:.2} hp={}/{} effects={} bullets={}",
            t,
            a.lifecycle(),
            a.position(),
            o.heading,
            o.pitch,
            o.bank,
            a.hp(),
            a.max_hp(),
            self.effects.len(),
            self.bullets.len(),
        );
    }
}

/// Fractal Perlin heights, row-major with rows along Z.
fn generate_heights(settings: &DemoSettings) -> Vec<f32> {
    const OCTAVES: u32 = 4;
    let perlin = Perlin::new(settings.seed as u32);
    let n = settings.terrain_resolution;
    let step = settings.terrain_size / (n - 1) as f32;
    let half = settings.terrain_size / 2.0;

    let mut heights = Vec::with_capacity(n * n);
    for row in 0..n {
        for col in 0..n {
            let x = (col as f32 * step - half) as f64;
            let z = (row as f32 * step - half) as f64;
            let mut value = 0.0;
            let mut amplitude = 1.0;
            let mut frequency = 0.004;
            let mut max_value = 0.0;
            for _ in 0..OCTAVES {
                value += perlin.get([x * frequency, z * frequency]) * amplitude;
                max_value += amplitude;
                amplitude *= 0.5;
                frequency *= 2.0;
            }
            let normalized = (value / max_value + 1.0) * 0.5;
            heights.push(normalized as f32 * settings.height_scale);
        }
    }
    heights
}
