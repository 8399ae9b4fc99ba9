//! # Resource Pack Manager
//!
//! Resolves Minecraft blocks to renderable block meshes and caches the result.
//!
//! ## Overview
//!
//! A [`ResourcePackManager`] owns an ordered list of resource packs and a
//! [`PackBackend`] that knows how to read them. Asking for the model of a
//! [`BlockStack`] resolves each block through the backend, merges the meshes
//! in stack order, and memoizes the result until the next reload.
//!
//! ## Quick Start
//!
//! ```ignore
//! use resource_pack_manager::{load_directory_packs, Block, BlockStack};
//!
//! // Later packs override earlier ones
//! let mut manager = load_directory_packs(["packs/vanilla", "packs/overrides"])?;
//!
//! // A waterlogged block is a stack of two blocks
//! let stack = BlockStack::new("minecraft:oak_slab[type=bottom]".parse()?)
//!     .with_extra(Block::new("minecraft", "water"));
//!
//! let mesh = manager.get_block_model(&stack)?;
//! println!("{} triangles", mesh.triangle_count());
//! ```
//!
//! ## Custom pack formats
//!
//! Implement [`PackBackend`] to load packs from another layout. The manager
//! handles caching, stack merging and the transparency cache; the backend
//! only turns single blocks into meshes.

pub mod error;
pub mod manager;
pub mod mesh;
pub mod resource_pack;
pub mod types;

// Re-export main types for convenience
pub use error::{PackError, Result};
pub use manager::{
    LogProgress, ManagerConfig, ModelContext, PackBackend, ProgressReporter, ResourcePack,
    ResourcePackManager, TextureTransparency, TransparencyCache, VoidProgress,
};
pub use mesh::{
    get_unit_cube, merge_block_meshes, BlockMesh, BlockMeshCullDirection, BlockMeshPart,
    BlockMeshTransparency,
};
pub use resource_pack::{DirectoryBackend, DirectoryPack};
pub use types::{Block, BlockStack, Direction};

/// Create a manager over resource pack directories and load them.
///
/// Packs are given lowest priority first.
pub fn load_directory_packs<I, P>(roots: I) -> Result<ResourcePackManager<DirectoryBackend>>
where
    I: IntoIterator<Item = P>,
    P: Into<std::path::PathBuf>,
{
    let mut manager = ResourcePackManager::new(DirectoryBackend::new(roots));
    manager.reload()?;
    Ok(manager)
}
