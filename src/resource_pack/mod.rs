//! Resource packs stored as plain directories.
//!
//! A pack root contains `assets/<namespace>/textures/...`. Packs are indexed
//! by texture location only; file contents are read on demand.

pub mod directory;
pub mod loader;
pub mod texture;

pub use directory::DirectoryBackend;

use crate::manager::ResourcePack;
use crate::types::DEFAULT_NAMESPACE;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// An indexed resource pack directory.
#[derive(Debug, Default, Clone)]
pub struct DirectoryPack {
    /// The pack root.
    pub root_dir: PathBuf,

    /// Texture files by namespace and texture path.
    /// Key: namespace, Value: map of texture_path (no extension) to file path.
    pub textures: HashMap<String, HashMap<String, PathBuf>>,
}

impl DirectoryPack {
    pub fn new<P: Into<PathBuf>>(root_dir: P) -> Self {
        Self {
            root_dir: root_dir.into(),
            textures: HashMap::new(),
        }
    }

    /// Get a texture file by namespace and path (e.g., "minecraft", "block/stone").
    pub fn texture(&self, namespace: &str, texture_path: &str) -> Option<&Path> {
        self.textures
            .get(namespace)
            .and_then(|ns| ns.get(texture_path))
            .map(|p| p.as_path())
    }

    /// Get a texture file by full resource location (e.g., "minecraft:block/stone").
    pub fn get_texture(&self, resource_location: &str) -> Option<&Path> {
        let (namespace, path) = parse_resource_location(resource_location);
        self.texture(namespace, path)
    }

    /// Add a texture.
    pub fn add_texture(&mut self, namespace: &str, texture_path: &str, file: PathBuf) {
        self.textures
            .entry(namespace.to_string())
            .or_default()
            .insert(texture_path.to_string(), file);
    }

    /// Get the total number of textures.
    pub fn texture_count(&self) -> usize {
        self.textures.values().map(|m| m.len()).sum()
    }

    /// All texture files in the pack.
    pub fn texture_files(&self) -> impl Iterator<Item = &Path> {
        self.textures
            .values()
            .flat_map(|m| m.values())
            .map(|p| p.as_path())
    }

    /// Get all namespaces in the resource pack.
    pub fn namespaces(&self) -> Vec<&str> {
        let mut namespaces: Vec<_> = self.textures.keys().map(|s| s.as_str()).collect();
        namespaces.sort();
        namespaces
    }
}

impl ResourcePack for DirectoryPack {
    fn root_dir(&self) -> &Path {
        &self.root_dir
    }
}

/// Parse a resource location into namespace and path.
/// "minecraft:block/stone" -> ("minecraft", "block/stone")
/// "block/stone" -> ("minecraft", "block/stone")
pub fn parse_resource_location(resource_location: &str) -> (&str, &str) {
    if let Some((namespace, path)) = resource_location.split_once(':') {
        (namespace, path)
    } else {
        (DEFAULT_NAMESPACE, resource_location)
    }
}
