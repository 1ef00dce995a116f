//! Core engine types and utilities for the flight sandbox.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Euler orientation and the generic movable `Body`
//! - Time management and millisecond clocks
//! - Common component types for ECS

pub mod body;
pub mod components;
pub mod time;
pub mod transform;

pub use body::*;
pub use components::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use hecs::{Entity, World};
