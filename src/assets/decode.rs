use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::{RevealError, RevealResult};

/// Decode an encoded image (PNG, JPEG, ...) into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> RevealResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> RevealResult<RgbaImage> {
    let bytes = std::fs::read(path).map_err(|e| {
        RevealError::decode(format!("failed to read image '{}': {e}", path.display()))
    })?;
    decode_image(&bytes)
        .map_err(|e| RevealError::decode(format!("'{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
