use std::io::Cursor;

use anyhow::Context;

use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::{ChromaError, ChromaResult};
use crate::foundation::math::{Fnv1a64, unpremultiply_rgba8_in_place};

/// The pixel buffer one render accumulates into: premultiplied RGBA8, row-major.
///
/// Owned by the [`crate::Compositor`] while a render runs; callers only get a shared borrow
/// once the render is complete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterSurface {
    canvas: Canvas,
    data: Vec<u8>,
    origin_clean: bool,
    generation: u64,
}

impl RasterSurface {
    /// A fully transparent surface.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            data: vec![0u8; canvas.pixel_count().saturating_mul(4)],
            origin_clean: true,
            generation: 0,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Render generation that produced the current pixels.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `false` once a cross-origin image without read permission has been drawn.
    pub fn is_origin_clean(&self) -> bool {
        self.origin_clean
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Premultiplied pixel at `(x, y)`; out-of-bounds reads are transparent.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.canvas.width || y >= self.canvas.height {
            return [0, 0, 0, 0];
        }
        let idx = ((y as usize) * (self.canvas.width as usize) + (x as usize)) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Clear to transparent and start a new generation with a clean origin.
    pub(crate) fn reset(&mut self, generation: u64) {
        self.data.fill(0);
        self.origin_clean = true;
        self.generation = generation;
    }

    pub(crate) fn fill(&mut self, color: Rgba8Premul) {
        let px = color.to_array();
        for d in self.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    pub(crate) fn mark_tainted(&mut self) {
        self.origin_clean = false;
    }

    /// Stable digest of the premultiplied pixels and dimensions.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u32(self.canvas.width);
        h.write_u32(self.canvas.height);
        h.write_bytes(&self.data);
        h.finish()
    }

    /// Straight-alpha RGBA8 copy of the pixels.
    pub fn to_rgba8(&self) -> ChromaResult<Vec<u8>> {
        self.ensure_exportable()?;
        let mut out = self.data.clone();
        unpremultiply_rgba8_in_place(&mut out);
        Ok(out)
    }

    /// Encode the surface as PNG bytes.
    pub fn encode_png(&self) -> ChromaResult<Vec<u8>> {
        let rgba = self.to_rgba8()?;
        let img = image::RgbaImage::from_raw(self.canvas.width, self.canvas.height, rgba)
            .ok_or_else(|| ChromaError::validation("surface buffer does not match canvas"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode surface as png")?;
        Ok(buf)
    }

    fn ensure_exportable(&self) -> ChromaResult<()> {
        if self.origin_clean {
            Ok(())
        } else {
            Err(ChromaError::export_taint(
                "surface drew a cross-origin image without permission",
            ))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
