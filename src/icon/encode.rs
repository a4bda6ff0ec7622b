// PNG encoding and output

use crate::error::IconError;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use std::fs;
use std::path::Path;

/// Encode `image` as an RGBA PNG in memory
pub fn encode_png(image: &RgbaImage, path: &Path) -> Result<Vec<u8>, IconError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|source| IconError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(bytes)
}

/// Encode and write `image` to `path`, replacing any existing file.
///
/// Encoding finishes before the file is touched, so an encoder failure
/// leaves whatever was on disk before.
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<(), IconError> {
    let bytes = encode_png(image, path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| IconError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, &bytes).map_err(|source| IconError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote png");
    Ok(())
}
