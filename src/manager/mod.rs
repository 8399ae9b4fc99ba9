//! Block model resolution cache over an ordered set of resource packs.
//!
//! [`ResourcePackManager`] owns the pack list, the resolved model cache, the
//! texture transparency cache and the missing-block fallback. Everything
//! format specific is delegated to a [`PackBackend`].
//!
//! Cache entries are valid for one load generation: [`reload`](ResourcePackManager::reload)
//! empties every cache before the backend loads again, and entries are filled
//! lazily by [`get_block_model`](ResourcePackManager::get_block_model).

pub mod backend;
pub mod progress;
pub mod transparency;

pub use backend::{ModelContext, PackBackend, ResourcePack};
pub use progress::{LogProgress, ProgressReporter, SubProgress, VoidProgress};
pub use transparency::{TextureTransparency, TransparencyCache, TransparencyLoad};

use crate::error::Result;
use crate::mesh::{merge_block_meshes, BlockMesh};
use crate::types::BlockStack;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Namespace of the missing texture.
pub const MISSING_NO_NAMESPACE: &str = "minecraft";
/// Relative path of the missing texture.
pub const MISSING_NO_NAME: &str = "missing_no";
/// Full identifier of the missing texture.
pub const MISSING_NO: &str = "minecraft:missing_no";

/// Manager configuration.
#[derive(Debug, Clone, Default)]
pub struct ManagerConfig {
    /// Persisted transparency cache read at the start of every reload.
    pub transparency_cache_path: Option<PathBuf>,
}

impl ManagerConfig {
    /// Warm-start the transparency cache from this file on reload.
    pub fn with_transparency_cache<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.transparency_cache_path = Some(path.into());
        self
    }
}

/// Resolves block stacks to meshes, caching one mesh per distinct stack.
///
/// Not thread safe: all mutating calls take `&mut self`, and callers sharing a
/// manager must serialize access themselves. Returned meshes are shared
/// read-only through [`Arc`].
pub struct ResourcePackManager<B: PackBackend> {
    backend: B,
    config: ManagerConfig,
    packs: Vec<B::Pack>,
    transparency: TransparencyCache,
    cached_models: HashMap<BlockStack, Arc<BlockMesh>>,
    missing_block: OnceCell<Arc<BlockMesh>>,
    generation: u64,
}

impl<B: PackBackend> ResourcePackManager<B> {
    /// Create a manager with default configuration. No packs are loaded
    /// until [`reload`](Self::reload) is called.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, ManagerConfig::default())
    }

    /// Create a manager with custom configuration.
    pub fn with_config(backend: B, config: ManagerConfig) -> Self {
        Self {
            backend,
            config,
            packs: Vec::new(),
            transparency: TransparencyCache::new(),
            cached_models: HashMap::new(),
            missing_block: OnceCell::new(),
            generation: 0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend. Changes only affect stacks resolved
    /// after the next [`reload`](Self::reload) or stacks not yet cached.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// The loaded packs, in load order.
    pub fn packs(&self) -> &[B::Pack] {
        &self.packs
    }

    /// Root directories of the loaded packs, in load order.
    pub fn pack_paths(&self) -> Vec<&Path> {
        self.packs.iter().map(|pack| pack.root_dir()).collect()
    }

    /// Number of successful reloads so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Unload and reload all resources without progress reporting.
    pub fn reload(&mut self) -> Result<()> {
        self.reload_with_progress(&mut VoidProgress)
    }

    /// Unload and reload all resources.
    ///
    /// Every cache is empty afterwards. A backend load error is returned
    /// unchanged; the previous pack list is then kept.
    pub fn reload_with_progress(&mut self, progress: &mut dyn ProgressReporter) -> Result<()> {
        self.unload();

        if let Some(path) = self.config.transparency_cache_path.clone() {
            self.load_transparency_cache(&path);
        }

        progress.update_progress_text("Loading resource packs");
        progress.update_progress(0.0);
        self.packs = self.backend.load(progress)?;
        progress.update_progress(1.0);

        self.generation += 1;
        log::info!(
            "Loaded {} resource pack(s) (generation {})",
            self.packs.len(),
            self.generation
        );
        Ok(())
    }

    /// Clear all derived data. The pack list is kept.
    fn unload(&mut self) {
        log::debug!(
            "Unloading {} cached model(s) and {} transparency entries",
            self.cached_models.len(),
            self.transparency.len()
        );
        self.transparency.clear();
        self.cached_models.clear();
        // The missing texture may resolve differently once packs change.
        self.missing_block = OnceCell::new();
    }

    /// Replace the transparency cache with the contents of `path`.
    ///
    /// Failures are logged and leave the cache unchanged.
    pub fn load_transparency_cache<P: AsRef<Path>>(&mut self, path: P) -> TransparencyLoad {
        let path = path.as_ref();
        let outcome = self.transparency.load(path);
        match &outcome {
            TransparencyLoad::Loaded(count) => {
                log::debug!("Loaded {} transparency entries from {:?}", count, path)
            }
            TransparencyLoad::Absent => log::debug!("No transparency cache at {:?}", path),
            TransparencyLoad::Unreadable(e) => {
                log::warn!("Could not read transparency cache {:?}: {}", path, e)
            }
            TransparencyLoad::Malformed(e) => {
                log::warn!("Ignoring malformed transparency cache {:?}: {}", path, e)
            }
        }
        outcome
    }

    /// Write the transparency cache to `path`.
    pub fn save_transparency_cache<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.transparency.save(path)
    }

    pub fn transparency(&self) -> &TransparencyCache {
        &self.transparency
    }

    pub fn transparency_mut(&mut self) -> &mut TransparencyCache {
        &mut self.transparency
    }

    /// Identifier of the texture used by [`missing_block`](Self::missing_block).
    pub fn missing_no(&self) -> &'static str {
        MISSING_NO
    }

    /// The fallback mesh for unresolvable blocks, built on first access and
    /// kept until the next reload.
    pub fn missing_block(&self) -> Arc<BlockMesh> {
        Arc::clone(
            self.missing_block
                .get_or_init(|| backend::build_missing_block(&self.backend, &self.packs)),
        )
    }

    /// Every texture known to the loaded packs.
    pub fn textures(&self) -> Vec<String> {
        self.backend.textures(&self.packs)
    }

    /// Resolve a namespace and relative path to an absolute texture path.
    pub fn get_texture_path(&self, namespace: Option<&str>, relative_path: &str) -> String {
        self.backend
            .texture_path(&self.packs, namespace, relative_path)
    }

    /// Number of cached block stacks.
    pub fn cached_model_count(&self) -> usize {
        self.cached_models.len()
    }

    /// Get the mesh for a block stack.
    ///
    /// Each block is resolved by the backend; stacks with extra blocks are
    /// merged base first, then extras in stack order. The result is cached
    /// until the next reload. If any block fails to resolve, or the backend
    /// returns a mesh with out-of-range indices, the error is returned and
    /// nothing is cached.
    pub fn get_block_model(&mut self, block_stack: &BlockStack) -> Result<Arc<BlockMesh>> {
        if let Some(mesh) = self.cached_models.get(block_stack) {
            return Ok(Arc::clone(mesh));
        }

        let mut ctx =
            ModelContext::new(&self.packs, &mut self.transparency, &self.missing_block);

        let base = self.backend.block_model(block_stack.base_block(), &mut ctx)?;
        base.validate()?;
        let mesh = if block_stack.extra_blocks().is_empty() {
            base
        } else {
            let mut meshes = Vec::with_capacity(block_stack.len());
            meshes.push(base);
            for block in block_stack.extra_blocks() {
                let mesh = self.backend.block_model(block, &mut ctx)?;
                mesh.validate()?;
                meshes.push(mesh);
            }
            Arc::new(merge_block_meshes(meshes.iter().map(|mesh| mesh.as_ref())))
        };

        log::trace!("Cached model for {}", block_stack);
        self.cached_models
            .insert(block_stack.clone(), Arc::clone(&mesh));
        Ok(mesh)
    }
}
