use vello_cpu::kurbo::{BezPath, Circle, Shape, Stroke};

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::ChromaResult;
use crate::render::cpu::{CpuPainter, cpu_color, premul_over_in_place};
use crate::render::surface::RasterSurface;

/// Tile edge in pixels.
pub const TILE_SIZE: u32 = 40;

const STRIPE_WIDTH: f64 = 10.0;
const DOT_RADIUS: f64 = 3.0;
const MARK_SPACING: f64 = 10.0;
const GRID_LINE_WIDTH: f64 = 1.0;

/// Named pattern styles; anything unrecognized is a plain white tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternStyle {
    Stripes,
    Dots,
    Grid,
    Unknown,
}

impl PatternStyle {
    pub fn from_name(name: &str) -> Self {
        match name {
            "stripes" => Self::Stripes,
            "dots" => Self::Dots,
            "grid" => Self::Grid,
            _ => Self::Unknown,
        }
    }
}

/// A rasterized 40x40 tile; a pure function of `(style, color)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternTile {
    style: PatternStyle,
    surface: RasterSurface,
}

impl PatternTile {
    pub fn style(&self) -> PatternStyle {
        self.style
    }

    pub fn size(&self) -> u32 {
        TILE_SIZE
    }

    /// Premultiplied tile pixel at `(x, y)` taken modulo the tile size.
    pub fn sample(&self, x: u32, y: u32) -> [u8; 4] {
        self.surface.pixel(x % TILE_SIZE, y % TILE_SIZE)
    }

    pub fn data(&self) -> &[u8] {
        self.surface.data()
    }

    /// Fill all of `dst` with the tile repeated from the origin.
    pub fn fill_repeat(&self, dst: &mut RasterSurface) -> ChromaResult<()> {
        let width = dst.width() as usize;
        let mut layer = vec![0u8; dst.data().len()];
        for (y, row) in layer.chunks_exact_mut(width * 4).enumerate() {
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                px.copy_from_slice(&self.sample(x as u32, y as u32));
            }
        }
        premul_over_in_place(dst.data_mut(), &layer)
    }
}

/// Rasterize the tile for `style_name` marked in `color` over a white base.
pub fn generate_tile(style_name: &str, color: Rgba8) -> ChromaResult<PatternTile> {
    let style = PatternStyle::from_name(style_name);
    if style == PatternStyle::Unknown {
        tracing::debug!(style_name, "unknown pattern style, tile left blank");
    }

    let mut surface = RasterSurface::new(Canvas {
        width: TILE_SIZE,
        height: TILE_SIZE,
    });
    let size = f64::from(TILE_SIZE);
    let mut painter = CpuPainter::new();
    painter.paint_over(&mut surface, |ctx| {
        ctx.set_paint(cpu_color(Rgba8::WHITE));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, size, size));

        ctx.set_paint(cpu_color(color));
        match style {
            PatternStyle::Stripes => {
                for x0 in [0.0, 2.0 * STRIPE_WIDTH] {
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(x0, 0.0, x0 + STRIPE_WIDTH, size));
                }
            }
            PatternStyle::Dots => {
                let mut dots = BezPath::new();
                let mut y = MARK_SPACING / 2.0;
                while y < size {
                    let mut x = MARK_SPACING / 2.0;
                    while x < size {
                        dots.extend(Circle::new((x, y), DOT_RADIUS).path_elements(0.1));
                        x += MARK_SPACING;
                    }
                    y += MARK_SPACING;
                }
                ctx.fill_path(&dots);
            }
            PatternStyle::Grid => {
                let mut lines = BezPath::new();
                let mut i = 0.0;
                while i <= size {
                    lines.move_to((i, 0.0));
                    lines.line_to((i, size));
                    i += MARK_SPACING;
                }
                let mut j = 0.0;
                while j <= size {
                    lines.move_to((0.0, j));
                    lines.line_to((size, j));
                    j += MARK_SPACING;
                }
                ctx.set_stroke(Stroke::new(GRID_LINE_WIDTH));
                ctx.stroke_path(&lines);
            }
            PatternStyle::Unknown => {}
        }
        Ok(())
    })?;

    Ok(PatternTile { style, surface })
}

#[cfg(test)]
#[path = "../../tests/unit/paint/pattern.rs"]
mod tests;
