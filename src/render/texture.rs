//! Texture cache keyed by source id.

use std::collections::HashMap;

use super::RenderBackend;

/// Pixel dimensions of a loaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
}

impl TextureInfo {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Loaded textures, kept until explicitly unloaded.
///
/// Failed loads are remembered too, so a missing file is reported once rather
/// than on every frame.
#[derive(Debug, Default, Clone)]
pub struct TextureCache {
    entries: HashMap<String, Option<TextureInfo>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached texture for `source`, loading it through `backend` on first use.
    pub fn get_or_load(&mut self, source: &str, backend: &mut dyn RenderBackend) -> Option<TextureInfo> {
        if let Some(entry) = self.entries.get(source) {
            return *entry;
        }
        let loaded = backend.load_texture(source);
        match loaded {
            Some(info) => log::debug!("loaded texture {source:?} ({}x{})", info.width, info.height),
            None => log::warn!("texture {source:?} could not be loaded"),
        }
        self.entries.insert(source.to_string(), loaded);
        loaded
    }

    /// Cached entry for `source` without loading. The outer `None` means "never requested".
    pub fn get(&self, source: &str) -> Option<Option<TextureInfo>> {
        self.entries.get(source).copied()
    }

    /// Forget `source`, so the next request loads it again.
    pub fn unload(&mut self, source: &str) -> bool {
        self.entries.remove(source).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
