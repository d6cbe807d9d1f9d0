//! Bitmap labels built from Spleen 12x24 glyphs.
//!
//! Text is turned into a path of 1px squares so it renders through the same vector pipeline as
//! every other shape and looks identical on every host.

use spleen_font::{FONT_12X24, PSF2Font};
use vello_cpu::kurbo::BezPath;

use crate::foundation::error::{ChromaError, ChromaResult};

pub(crate) const GLYPH_WIDTH: f64 = 12.0;
pub(crate) const GLYPH_HEIGHT: f64 = 24.0;
/// Row of the glyph cell the baseline sits on.
pub(crate) const BASELINE_ROW: f64 = 19.0;

/// Width of `text` when laid out in a single line.
pub(crate) fn label_width(text: &str) -> f64 {
    text.chars().count() as f64 * GLYPH_WIDTH
}

/// Path covering the lit pixels of `text`, horizontally centered on `center_x` with its
/// baseline at `baseline_y`. Characters missing from the font advance without drawing.
pub(crate) fn label_path(text: &str, center_x: f64, baseline_y: f64) -> ChromaResult<BezPath> {
    let mut font = PSF2Font::new(FONT_12X24)
        .map_err(|_| ChromaError::validation("bundled label font failed to load"))?;

    let left = (center_x - label_width(text) / 2.0).round();
    let top = (baseline_y - BASELINE_ROW).round();

    let mut path = BezPath::new();
    let mut buf = [0u8; 4];
    for (i, ch) in text.chars().enumerate() {
        let origin_x = left + i as f64 * GLYPH_WIDTH;
        let Some(glyph) = font.glyph_for_utf8(ch.encode_utf8(&mut buf).as_bytes()) else {
            continue;
        };
        for (row, bits) in glyph.enumerate() {
            let y = top + row as f64;
            for (col, on) in bits.enumerate() {
                if on {
                    let x = origin_x + col as f64;
                    path.move_to((x, y));
                    path.line_to((x + 1.0, y));
                    path.line_to((x + 1.0, y + 1.0));
                    path.line_to((x, y + 1.0));
                    path.close_path();
                }
            }
        }
    }
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/paint/label.rs"]
mod tests;
