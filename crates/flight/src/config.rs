//! Aircraft tuning loaded from `flight.ron`.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_4, PI};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::maneuver::MoveState;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "flight.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid RON: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Target speed for each throttle state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedTable {
    pub stop: f32,
    pub forward: f32,
    pub boost: f32,
}

impl SpeedTable {
    pub fn for_state(&self, state: MoveState) -> f32 {
        match state {
            MoveState::Stop => self.stop,
            MoveState::Forward => self.forward,
            MoveState::Boost => self.boost,
        }
    }
}

/// Tuning for one aircraft type. Every field falls back to its default when
/// missing from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    /// Heading rate in radians per second at turn scale 1.
    pub max_turn_rate: f32,
    /// Pitch rate in radians per second at pitch scale 1.
    pub max_pitch_rate: f32,
    /// Bank rate in radians per second at roll scale 1.
    pub max_bank_rate: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Object speed limit used to size the crash velocity.
    pub base_max_speed: f32,
    /// Speed along the nose.
    pub air_speeds: SpeedTable,
    /// Speed of lateral strafing in snapped steering mode.
    pub ground_speeds: SpeedTable,
    pub max_hp: i32,
    pub bullets_per_second: f32,
    pub bullet_range: f32,
    /// Gun muzzle in object space.
    pub gun_offset: Vec3,
    /// Extra forward distance from the muzzle to the projectile spawn point.
    pub muzzle_extension: f32,
    /// Engine (smoke source) in object space.
    pub engine_offset: Vec3,
    /// Height of the spawn point above the origin.
    pub prop_offset: f32,
    /// Propeller spin in radians per second.
    pub propeller_spin: f32,
    /// Seconds allowed between the two presses of a barrel roll.
    pub roll_window: f32,
    pub gravity: f32,
    pub crash_speed_factor: f32,
    pub crash_pitch_degrees: f32,
    /// Heading change per tick while snapping, in radians.
    pub heading_creep: f32,
    pub heading_snap_tolerance: f32,
    /// Hull texture per HP tier, lowest HP first.
    pub textures: Vec<String>,
    /// Smoke effect per HP tier, lowest HP first. `None` means no smoke.
    pub smoke_tiers: Vec<Option<String>>,
}

impl Default for FlightConfig {
    fn default() -> Self {
        let min_speed = 1.0;
        let max_speed = 5.0;
        Self {
            max_turn_rate: FRAC_PI_4,
            max_pitch_rate: FRAC_PI_4,
            max_bank_rate: FRAC_PI_4,
            min_speed,
            max_speed,
            base_max_speed: 2.0,
            air_speeds: SpeedTable {
                stop: min_speed,
                forward: max_speed / 2.0,
                boost: max_speed * 2.0,
            },
            ground_speeds: SpeedTable {
                stop: min_speed * 1.5,
                forward: max_speed / 2.0,
                boost: max_speed,
            },
            max_hp: 4,
            bullets_per_second: 10.0,
            bullet_range: 400.0,
            gun_offset: Vec3::new(0.0, 2.2, 3.1),
            muzzle_extension: 5.0,
            engine_offset: Vec3::new(0.0, 0.0, 3.3),
            prop_offset: 0.4,
            propeller_spin: PI * 4.0,
            roll_window: 0.6,
            gravity: -10.0,
            crash_speed_factor: 20.0,
            crash_pitch_degrees: 20.0,
            heading_creep: 0.02,
            heading_snap_tolerance: 0.03,
            textures: vec!["plane2.tga".to_string(); 5],
            smoke_tiers: vec![
                Some("smokeveryheavy".to_string()),
                Some("smokeheavy".to_string()),
                Some("smokemedium".to_string()),
                Some("smokelight".to_string()),
                None,
            ],
        }
    }
}

impl FlightConfig {
    /// Parse and validate a RON document.
    pub fn from_ron_str(data: &str) -> Result<Self, ConfigError> {
        let config: FlightConfig = ron::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&data)
    }

    /// Load config from `flight.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::read(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Write the config as pretty RON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let s = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, s).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.textures.is_empty() || self.smoke_tiers.is_empty() {
            return Err(ConfigError::Invalid("tier tables must not be empty".into()));
        }
        if self.max_hp <= 0 {
            return Err(ConfigError::Invalid(format!("max_hp must be positive, got {}", self.max_hp)));
        }
        if self.bullets_per_second <= 0.0 {
            return Err(ConfigError::Invalid("bullets_per_second must be positive".into()));
        }
        if self.roll_window <= 0.0 {
            return Err(ConfigError::Invalid("roll_window must be positive".into()));
        }
        Ok(())
    }

    /// Minimum milliseconds between two shots.
    pub fn fire_interval_ms(&self) -> f32 {
        1000.0 / self.bullets_per_second
    }
}

/// Global rules injected into every aircraft update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    /// When false every aircraft is invulnerable.
    pub take_damage: bool,
}

impl Default for GameRules {
    fn default() -> Self {
        Self { take_damage: true }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(CONFIG_FILE)
}
