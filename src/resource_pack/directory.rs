//! A [`PackBackend`] over resource pack directories.
//!
//! Every block becomes a full cube textured with `block/<name>` from the
//! highest-priority pack that has it.

use super::texture::{analyze_texture, write_missing_texture};
use super::{loader, parse_resource_location, DirectoryPack};
use crate::error::Result;
use crate::manager::{
    ModelContext, PackBackend, ProgressReporter, SubProgress, MISSING_NO_NAME,
    MISSING_NO_NAMESPACE,
};
use crate::mesh::{get_unit_cube, BlockMesh, BlockMeshTransparency};
use crate::types::Block;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name of the generated missing texture.
const MISSING_TEXTURE_FILE: &str = "missing_no.png";

/// Loads packs from an ordered list of directories. Later packs override
/// earlier ones.
#[derive(Debug, Clone)]
pub struct DirectoryBackend {
    roots: Vec<PathBuf>,
    missing_texture_dir: PathBuf,
}

impl Default for DirectoryBackend {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            missing_texture_dir: std::env::temp_dir().join("resource-pack-manager"),
        }
    }
}

impl DirectoryBackend {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Directory the generated missing texture is written to on load.
    /// Defaults to a folder in the system temp directory.
    pub fn with_missing_texture_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.missing_texture_dir = dir.into();
        self
    }

    /// Path of the generated missing texture. Only guaranteed to exist after
    /// a successful load.
    pub fn missing_texture_path(&self) -> PathBuf {
        self.missing_texture_dir.join(MISSING_TEXTURE_FILE)
    }

    /// The configured pack roots. Takes effect on the next reload.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn set_roots(&mut self, roots: Vec<PathBuf>) {
        self.roots = roots;
    }

    pub fn push_root<P: Into<PathBuf>>(&mut self, root: P) {
        self.roots.push(root.into());
    }
}

/// Find a texture file, searching the highest-priority pack first.
fn find_texture<'p>(
    packs: &'p [DirectoryPack],
    namespace: &str,
    texture_path: &str,
) -> Option<&'p Path> {
    packs
        .iter()
        .rev()
        .find_map(|pack| pack.texture(namespace, texture_path))
}

impl PackBackend for DirectoryBackend {
    type Pack = DirectoryPack;

    fn load(&mut self, progress: &mut dyn ProgressReporter) -> Result<Vec<DirectoryPack>> {
        let total = self.roots.len().max(1) as f32;
        let mut packs = Vec::with_capacity(self.roots.len());

        for (i, root) in self.roots.iter().enumerate() {
            progress.update_progress_text(&format!("Loading {}", root.display()));
            let mut sub = SubProgress::new(progress, i as f32 / total, (i + 1) as f32 / total);
            packs.push(loader::load_from_directory(root, &mut sub)?);
        }

        if find_texture(&packs, MISSING_NO_NAMESPACE, MISSING_NO_NAME).is_none() {
            write_missing_texture(&self.missing_texture_path())?;
        }

        Ok(packs)
    }

    fn textures(&self, packs: &[DirectoryPack]) -> Vec<String> {
        packs
            .iter()
            .flat_map(|pack| pack.texture_files())
            .map(|path| path.to_string_lossy().into_owned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Unknown textures resolve to the packs' missing texture, or to the
    /// generated one when no pack provides it.
    fn texture_path(
        &self,
        packs: &[DirectoryPack],
        namespace: Option<&str>,
        relative_path: &str,
    ) -> String {
        let (namespace, relative_path) = match namespace {
            Some(namespace) => (namespace, relative_path),
            None => parse_resource_location(relative_path),
        };

        find_texture(packs, namespace, relative_path)
            .or_else(|| find_texture(packs, MISSING_NO_NAMESPACE, MISSING_NO_NAME))
            .map(|path| path.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.missing_texture_path().to_string_lossy().into_owned())
    }

    fn block_model(
        &mut self,
        block: &Block,
        ctx: &mut ModelContext<'_, DirectoryPack>,
    ) -> Result<Arc<BlockMesh>> {
        let texture_path = format!("block/{}", block.base_name());
        let Some(file) = find_texture(ctx.packs, block.namespace(), &texture_path) else {
            log::debug!("No texture for {}, using missing block", block);
            return Ok(ctx.missing_block(&*self));
        };
        let texture = file.to_string_lossy().into_owned();

        let transparency = match ctx.transparency.get(&texture) {
            Some(transparency) => transparency,
            None => match analyze_texture(file) {
                Ok(transparency) => {
                    ctx.transparency.insert(texture.clone(), transparency);
                    transparency
                }
                Err(e) => {
                    log::warn!("Failed to read texture {}: {}", texture, e);
                    return Ok(ctx.missing_block(&*self));
                }
            },
        };

        let mesh_transparency = if transparency.is_transparent {
            BlockMeshTransparency::FullTranslucent
        } else {
            BlockMeshTransparency::FullOpaque
        };

        Ok(Arc::new(get_unit_cube(
            &texture,
            &texture,
            &texture,
            &texture,
            &texture,
            &texture,
            mesh_transparency,
        )))
    }
}
