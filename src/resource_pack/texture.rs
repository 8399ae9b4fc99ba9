//! Texture transparency analysis.

use crate::error::Result;
use crate::manager::TextureTransparency;
use image::{ImageFormat, Rgba, RgbaImage};
use std::fs;
use std::path::Path;

/// Cutoff used for textures whose pixels are either fully opaque or fully clear.
pub const CUTOUT_ALPHA_CUTOFF: f64 = 0.5;

/// Side length of the generated missing texture, in pixels.
pub const MISSING_TEXTURE_SIZE: u32 = 16;

/// The magenta and black checkerboard used when no pack provides a texture.
pub fn missing_texture_image() -> RgbaImage {
    let half = MISSING_TEXTURE_SIZE / 2;
    RgbaImage::from_fn(MISSING_TEXTURE_SIZE, MISSING_TEXTURE_SIZE, |x, y| {
        if (x < half) == (y < half) {
            Rgba([248, 0, 248, 255])
        } else {
            Rgba([0, 0, 0, 255])
        }
    })
}

/// Write [`missing_texture_image`] to `path` unless a file is already there.
///
/// The image is written to a staging file and renamed into place so readers
/// never see a partial PNG.
pub fn write_missing_texture(path: &Path) -> Result<()> {
    if path.is_file() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let staging = path.with_extension(format!("{}.tmp", std::process::id()));
    missing_texture_image().save_with_format(&staging, ImageFormat::Png)?;
    fs::rename(&staging, path)?;
    log::debug!("Wrote missing texture to {}", path.display());
    Ok(())
}

/// Decode a PNG and classify its alpha channel.
pub fn analyze_texture<P: AsRef<Path>>(path: P) -> Result<TextureTransparency> {
    let img = image::open(path.as_ref())?;
    let rgba = img.to_rgba8();
    Ok(transparency_from_rgba(rgba.as_raw()))
}

/// Classify RGBA8 pixel data (4 bytes per pixel).
///
/// Textures with only fully opaque or fully clear pixels are cutout and get
/// [`CUTOUT_ALPHA_CUTOFF`]; any partially clear pixel makes the texture
/// blended with a cutoff of zero.
pub fn transparency_from_rgba(pixels: &[u8]) -> TextureTransparency {
    let mut is_transparent = false;
    let mut is_blended = false;

    for pixel in pixels.chunks_exact(4) {
        match pixel[3] {
            255 => {}
            0 => is_transparent = true,
            _ => {
                is_transparent = true;
                is_blended = true;
            }
        }
    }

    let alpha_cutoff = if is_transparent && !is_blended {
        CUTOUT_ALPHA_CUTOFF
    } else {
        0.0
    };
    TextureTransparency::new(alpha_cutoff, is_transparent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque() {
        let t = transparency_from_rgba(&[255, 0, 0, 255, 0, 255, 0, 255]);
        assert_eq!(t, TextureTransparency::opaque());
    }

    #[test]
    fn test_cutout() {
        let t = transparency_from_rgba(&[255, 0, 0, 255, 0, 0, 0, 0]);
        assert_eq!(t, TextureTransparency::new(CUTOUT_ALPHA_CUTOFF, true));
    }

    #[test]
    fn test_blended() {
        let t = transparency_from_rgba(&[255, 0, 0, 128, 0, 0, 0, 0]);
        assert_eq!(t, TextureTransparency::new(0.0, true));
    }

    #[test]
    fn test_analyze_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glass.png");
        let mut img = image::RgbaImage::from_pixel(2, 2, image::Rgba([200, 220, 255, 255]));
        img.put_pixel(1, 1, image::Rgba([0, 0, 0, 0]));
        img.save(&path).unwrap();

        let t = analyze_texture(&path).unwrap();
        assert!(t.is_transparent);
        assert_eq!(t.alpha_cutoff, CUTOUT_ALPHA_CUTOFF);
    }

    #[test]
    fn test_missing_texture_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generated/missing_no.png");

        write_missing_texture(&path).unwrap();
        assert_eq!(analyze_texture(&path).unwrap(), TextureTransparency::opaque());
        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded, missing_texture_image());

        // An existing file is left alone.
        std::fs::write(&path, b"custom").unwrap();
        write_missing_texture(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"custom");
        assert_eq!(std::fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }

    #[test]
    fn test_analyze_invalid_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(analyze_texture(&path).is_err());
    }
}
