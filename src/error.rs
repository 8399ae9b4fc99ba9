//! Error types for the resource pack manager.

use thiserror::Error;

/// Result type alias using PackError.
pub type Result<T> = std::result::Result<T, PackError>;

/// Main error type for pack loading and block model resolution.
#[derive(Error, Debug)]
pub enum PackError {
    /// Failed to parse JSON data.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read or decode an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid resource pack structure.
    #[error("Invalid resource pack: {0}")]
    InvalidResourcePack(String),

    /// Failed to resolve a block model.
    #[error("Model resolution error: {0}")]
    ModelResolution(String),

    /// A backend produced a mesh with out-of-range indices.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// A block string could not be parsed.
    #[error("Invalid block: {0}")]
    InvalidBlock(String),

    /// A block stack needs at least a base block.
    #[error("Block stack must contain at least one block")]
    EmptyBlockStack,
}
