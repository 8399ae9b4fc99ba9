//! Resource pack indexing from directories.

use super::DirectoryPack;
use crate::error::{PackError, Result};
use crate::manager::ProgressReporter;
use std::path::Path;

/// Index a resource pack directory.
///
/// Every `assets/<namespace>/textures/**/*.png` file is recorded under its
/// path relative to the `textures` directory, without extension. Progress is
/// reported once per namespace.
pub fn load_from_directory<P: AsRef<Path>>(
    path: P,
    progress: &mut dyn ProgressReporter,
) -> Result<DirectoryPack> {
    let path = path.as_ref();
    let mut pack = DirectoryPack::new(path);

    // Look for assets directory
    let assets_path = path.join("assets");
    if !assets_path.is_dir() {
        return Err(PackError::InvalidResourcePack(format!(
            "No assets directory found in {}",
            path.display()
        )));
    }

    let mut namespaces = Vec::new();
    for entry in std::fs::read_dir(&assets_path)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            namespaces.push(entry);
        }
    }

    let total = namespaces.len().max(1) as f32;
    for (i, namespace_entry) in namespaces.iter().enumerate() {
        let namespace = namespace_entry.file_name().to_string_lossy().to_string();

        let textures_path = namespace_entry.path().join("textures");
        if textures_path.is_dir() {
            index_texture_files_recursive(&textures_path, &textures_path, &mut |texture_path, file| {
                pack.add_texture(&namespace, texture_path, file.to_path_buf());
            })?;
        }
        progress.update_progress((i + 1) as f32 / total);
    }
    progress.update_progress(1.0);

    log::debug!(
        "Indexed {} textures in {}",
        pack.texture_count(),
        path.display()
    );
    Ok(pack)
}

/// Walk texture files recursively, passing each one's relative texture path
/// (forward slashes, no extension) and full file path. Symlinked
/// directories are not followed.
fn index_texture_files_recursive<F>(base: &Path, dir: &Path, handler: &mut F) -> Result<()>
where
    F: FnMut(&str, &Path),
{
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type()?.is_dir() {
            index_texture_files_recursive(base, &path, handler)?;
        } else if path.extension().map(|e| e == "png").unwrap_or(false) {
            let Ok(relative) = path.strip_prefix(base) else {
                continue;
            };
            let relative = relative
                .with_extension("")
                .to_string_lossy()
                .replace('\\', "/");

            handler(&relative, &path);
        }
    }
    Ok(())
}
