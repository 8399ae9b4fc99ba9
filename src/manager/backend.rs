//! The pluggable half of the manager: how packs are read and how a block
//! becomes a mesh.

use super::progress::ProgressReporter;
use super::transparency::TransparencyCache;
use super::{MISSING_NO_NAME, MISSING_NO_NAMESPACE};
use crate::error::Result;
use crate::mesh::{get_unit_cube, BlockMesh, BlockMeshTransparency};
use crate::types::Block;
use std::cell::OnceCell;
use std::path::Path;
use std::sync::Arc;

/// A loaded resource pack.
pub trait ResourcePack {
    /// The directory (or archive) the pack was loaded from.
    fn root_dir(&self) -> &Path;
}

/// Strategy supplying everything the manager does not decide itself.
///
/// The manager owns the pack list returned by [`load`](PackBackend::load) and
/// hands it back to the other hooks.
pub trait PackBackend {
    type Pack: ResourcePack;

    /// Read the packs, in override order (later packs win).
    fn load(&mut self, progress: &mut dyn ProgressReporter) -> Result<Vec<Self::Pack>>;

    /// Every texture known to the loaded packs.
    fn textures(&self, packs: &[Self::Pack]) -> Vec<String>;

    /// Resolve a namespace and relative texture path to an absolute path.
    /// A missing namespace means the default one.
    fn texture_path(
        &self,
        packs: &[Self::Pack],
        namespace: Option<&str>,
        relative_path: &str,
    ) -> String;

    /// Build the mesh for a single block.
    ///
    /// Implementations usually return [`ModelContext::missing_block`] for
    /// blocks they cannot resolve instead of failing.
    fn block_model(
        &mut self,
        block: &Block,
        ctx: &mut ModelContext<'_, Self::Pack>,
    ) -> Result<Arc<BlockMesh>>;
}

/// Manager state lent to [`PackBackend::block_model`].
pub struct ModelContext<'a, P> {
    /// The loaded packs, in override order.
    pub packs: &'a [P],
    /// Texture transparency, readable and writable by the backend.
    pub transparency: &'a mut TransparencyCache,
    missing_block: &'a OnceCell<Arc<BlockMesh>>,
}

impl<'a, P> ModelContext<'a, P> {
    pub(crate) fn new(
        packs: &'a [P],
        transparency: &'a mut TransparencyCache,
        missing_block: &'a OnceCell<Arc<BlockMesh>>,
    ) -> Self {
        Self {
            packs,
            transparency,
            missing_block,
        }
    }

    /// The manager's fallback mesh, built on first use.
    pub fn missing_block<B>(&self, backend: &B) -> Arc<BlockMesh>
    where
        B: PackBackend<Pack = P> + ?Sized,
    {
        Arc::clone(
            self.missing_block
                .get_or_init(|| build_missing_block(backend, self.packs)),
        )
    }
}

/// A unit cube with the missing texture on every face.
pub(crate) fn build_missing_block<B>(backend: &B, packs: &[B::Pack]) -> Arc<BlockMesh>
where
    B: PackBackend + ?Sized,
{
    let texture = backend.texture_path(packs, Some(MISSING_NO_NAMESPACE), MISSING_NO_NAME);
    log::debug!("Building missing block mesh from {}", texture);
    Arc::new(get_unit_cube(
        &texture,
        &texture,
        &texture,
        &texture,
        &texture,
        &texture,
        BlockMeshTransparency::FullOpaque,
    ))
}
