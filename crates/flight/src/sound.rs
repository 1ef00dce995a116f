//! Positional sound requests, queued for whatever plays them.

use engine_core::Vec3;

use crate::services::SoundService;

#[derive(Debug, Clone, PartialEq)]
pub struct SoundRequest {
    pub sound: String,
    pub position: Vec3,
    pub velocity: Vec3,
}

#[derive(Debug, Default)]
pub struct SoundQueue {
    pending: Vec<SoundRequest>,
}

impl SoundQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every queued request, oldest first.
    pub fn drain(&mut self) -> Vec<SoundRequest> {
        std::mem::take(&mut self.pending)
    }
}

impl SoundService for SoundQueue {
    fn play_at(&mut self, sound: &str, position: Vec3, velocity: Vec3) {
        self.pending.push(SoundRequest {
            sound: sound.to_string(),
            position,
            velocity,
        });
    }
}
