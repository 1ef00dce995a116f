//! Flight control and damage model for a player aircraft.
//!
//! Device input is resolved into [`Intent`]s, which drive a set of per-axis
//! maneuver states. Those states ease heading, pitch and bank each tick. Hit
//! points select damage visuals and, when depleted, start a ballistic crash.
//! Everything outside the aircraft (effects, sounds, projectiles, world
//! queries) is reached through the traits in [`services`].

pub mod aircraft;
pub mod config;
pub mod damage;
pub mod effects;
pub mod gesture;
pub mod intent;
pub mod maneuver;
pub mod model;
pub mod projectiles;
pub mod resolver;
pub mod reticle;
pub mod services;
pub mod sound;
pub mod stop;
pub mod weapon;
pub mod world_queries;

pub use aircraft::{Aircraft, Lifecycle};
pub use config::{ConfigError, FlightConfig, GameRules, SpeedTable};
pub use effects::EffectRegistry;
pub use gesture::{RollGesture, RollSide};
pub use intent::{BankInput, Intent, IntentFrame};
pub use maneuver::{BankState, HeadingState, MoveState, PitchState, SteeringMode, TurnState};
pub use model::AircraftModel;
pub use projectiles::{update_projectiles, Bullet};
pub use reticle::ReticleVertex;
pub use services::Services;
pub use sound::SoundQueue;
pub use stop::StopFlags;
pub use world_queries::FlatWater;
