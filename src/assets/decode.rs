use std::io::Cursor;
use std::sync::Arc;

use crate::foundation::core::MAX_CANVAS_EDGE;
use crate::foundation::error::{ChromaError, ChromaResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Default ceiling on decoded pixels (64 MP).
pub const DEFAULT_MAX_DECODED_PIXELS: u64 = 64 * 1024 * 1024;

/// A decoded image ready to draw: premultiplied RGBA8, row-major, tightly packed.
///
/// Produced per load and consumed by a single render; nothing retains it across renders.
#[derive(Clone, Debug)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
    /// `false` when the pixels came from a cross-origin response without permission.
    pub origin_clean: bool,
}

impl LoadedImage {
    pub(crate) fn tainted(mut self) -> Self {
        self.origin_clean = false;
        self
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8], max_pixels: u64) -> ChromaResult<LoadedImage> {
    let mut reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ChromaError::decode(format!("sniff image format: {e}")))?;

    let mut limits = image::Limits::default();
    limits.max_image_width = Some(MAX_CANVAS_EDGE);
    limits.max_image_height = Some(MAX_CANVAS_EDGE);
    limits.max_alloc = Some(max_pixels.saturating_mul(8).max(1 << 24));
    reader.limits(limits);

    let dyn_img = reader
        .decode()
        .map_err(|e| ChromaError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ChromaError::decode("decoded image is empty"));
    }
    if u64::from(width) * u64::from(height) > max_pixels {
        return Err(ChromaError::decode(format!(
            "decoded image {width}x{height} exceeds {max_pixels} pixels"
        )));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(LoadedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
        origin_clean: true,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
