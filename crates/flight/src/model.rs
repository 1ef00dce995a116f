//! Texture state of the aircraft's renderable parts.

use crate::services::ModelSkin;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelPart {
    pub name: String,
    pub texture: String,
}

/// Part textures as set by the game, and the set last handed to the renderer.
#[derive(Debug, Clone, Default)]
pub struct AircraftModel {
    parts: Vec<ModelPart>,
    cached: Vec<String>,
    cache_count: u32,
}

impl AircraftModel {
    pub fn new<I, S>(part_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: part_names
                .into_iter()
                .map(|name| ModelPart {
                    name: name.into(),
                    texture: String::new(),
                })
                .collect(),
            ..Default::default()
        }
    }

    /// Airframe plus the separately spinning propeller.
    pub fn plane() -> Self {
        Self::new(["airframe", "propeller"])
    }

    pub fn parts(&self) -> &[ModelPart] {
        &self.parts
    }

    /// Textures as of the last `cache` call.
    pub fn cached_textures(&self) -> &[String] {
        &self.cached
    }

    pub fn cache_count(&self) -> u32 {
        self.cache_count
    }
}

impl ModelSkin for AircraftModel {
    fn part_count(&self) -> usize {
        self.parts.len()
    }

    fn set_part_texture(&mut self, part: usize, texture: &str) {
        match self.parts.get_mut(part) {
            Some(p) => p.texture = texture.to_string(),
            None => log::warn!("No model part {} for texture {}", part, texture),
        }
    }

    fn cache(&mut self) {
        self.cached = self.parts.iter().map(|p| p.texture.clone()).collect();
        self.cache_count += 1;
    }
}
