//! Texture transparency side-cache and its JSON persistence.
//!
//! The on-disk format maps each texture identifier to a two element array:
//!
//! ```json
//! { "/packs/vanilla/assets/minecraft/textures/block/glass.png": [0.5, true] }
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Transparency information for one texture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, bool)", into = "(f64, bool)")]
pub struct TextureTransparency {
    /// Alpha below which a pixel is discarded.
    pub alpha_cutoff: f64,
    /// Whether any pixel is not fully opaque.
    pub is_transparent: bool,
}

impl TextureTransparency {
    pub fn new(alpha_cutoff: f64, is_transparent: bool) -> Self {
        Self {
            alpha_cutoff,
            is_transparent,
        }
    }

    pub fn opaque() -> Self {
        Self::new(0.0, false)
    }
}

impl From<(f64, bool)> for TextureTransparency {
    fn from((alpha_cutoff, is_transparent): (f64, bool)) -> Self {
        Self::new(alpha_cutoff, is_transparent)
    }
}

impl From<TextureTransparency> for (f64, bool) {
    fn from(t: TextureTransparency) -> Self {
        (t.alpha_cutoff, t.is_transparent)
    }
}

/// Outcome of reading a persisted transparency cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransparencyLoad {
    /// The file was parsed; holds the number of entries now cached.
    Loaded(usize),
    /// No file exists at the path.
    Absent,
    /// The file exists but could not be read.
    Unreadable(String),
    /// The file was read but is not a valid transparency map.
    Malformed(String),
}

/// Mapping from texture identifier to its transparency.
#[derive(Debug, Clone, Default)]
pub struct TransparencyCache {
    entries: HashMap<String, TextureTransparency>,
}

impl TransparencyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, texture: &str) -> Option<TextureTransparency> {
        self.entries.get(texture).copied()
    }

    pub fn insert(&mut self, texture: impl Into<String>, transparency: TextureTransparency) {
        self.entries.insert(texture.into(), transparency);
    }

    pub fn contains(&self, texture: &str) -> bool {
        self.entries.contains_key(texture)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TextureTransparency)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Replace the cache with the contents of a persisted file.
    ///
    /// On any failure the cache is left exactly as it was.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> TransparencyLoad {
        let contents = match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return TransparencyLoad::Absent;
            }
            Err(e) => return TransparencyLoad::Unreadable(e.to_string()),
        };

        match serde_json::from_str::<HashMap<String, TextureTransparency>>(&contents) {
            Ok(entries) => {
                self.entries = entries;
                TransparencyLoad::Loaded(self.entries.len())
            }
            Err(e) => TransparencyLoad::Malformed(e.to_string()),
        }
    }

    /// Write the cache to disk, keys sorted.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let sorted: BTreeMap<_, _> = self.entries.iter().collect();
        let json = serde_json::to_string(&sorted)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transparency.json");
        std::fs::write(&path, r#"{"block/glass": [0.5, true], "block/stone": [0, false]}"#).unwrap();

        let mut cache = TransparencyCache::new();
        assert_eq!(cache.load(&path), TransparencyLoad::Loaded(2));
        assert_eq!(
            cache.get("block/glass"),
            Some(TextureTransparency::new(0.5, true))
        );
        assert_eq!(cache.get("block/stone"), Some(TextureTransparency::opaque()));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = TransparencyCache::new();
        assert_eq!(
            cache.load(dir.path().join("nope.json")),
            TransparencyLoad::Absent
        );
        assert!(cache.is_empty());
    }

    #[test]
    fn test_load_malformed_leaves_cache_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transparency.json");

        let mut cache = TransparencyCache::new();
        cache.insert("block/ice", TextureTransparency::new(0.0, true));

        for bad in [
            "not json",
            r#"{"block/glass": [0.5]}"#,
            r#"{"block/glass": ["x", true]}"#,
            r#"[1, 2, 3]"#,
        ] {
            std::fs::write(&path, bad).unwrap();
            assert!(matches!(cache.load(&path), TransparencyLoad::Malformed(_)));
            assert_eq!(cache.len(), 1);
            assert!(cache.contains("block/ice"));
        }
    }

    #[test]
    fn test_load_directory_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = TransparencyCache::new();
        assert!(matches!(
            cache.load(dir.path()),
            TransparencyLoad::Unreadable(_)
        ));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_load_replaces_existing_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transparency.json");
        std::fs::write(&path, r#"{"block/glass": [0.5, true]}"#).unwrap();

        let mut cache = TransparencyCache::new();
        cache.insert("block/ice", TextureTransparency::new(0.0, true));
        assert_eq!(cache.load(&path), TransparencyLoad::Loaded(1));
        assert!(!cache.contains("block/ice"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transparency.json");

        let mut cache = TransparencyCache::new();
        cache.insert("block/glass", TextureTransparency::new(0.5, true));
        cache.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, r#"{"block/glass":[0.5,true]}"#);

        let mut loaded = TransparencyCache::new();
        assert_eq!(loaded.load(&path), TransparencyLoad::Loaded(1));
        assert_eq!(loaded.get("block/glass"), cache.get("block/glass"));
    }
}
