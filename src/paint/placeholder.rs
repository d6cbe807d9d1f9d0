//! Placeholder subject and the bundled sample subject.
//!
//! Both draw the same badge: a white disc with an accent ring and a two-line "Sample" /
//! "Subject" label. The placeholder is sized from the canvas; the sample subject is a fixed
//! 200x200 image used by the demo gallery.

use vello_cpu::kurbo::{Circle, Shape, Stroke};

use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::ChromaResult;
use crate::paint::label::label_path;
use crate::render::cpu::{CpuPainter, cpu_color};
use crate::render::surface::RasterSurface;

/// Placeholder diameter as a fraction of the smaller canvas edge.
pub const PLACEHOLDER_DIAMETER_FRACTION: f64 = 0.4;
/// Ring width of the badge outline.
pub const RING_WIDTH: f64 = 8.0;
/// Edge of the square sample subject image.
pub const SAMPLE_SUBJECT_SIZE: u32 = 200;

const SAMPLE_SUBJECT_RADIUS: f64 = 80.0;
const TOP_LABEL: &str = "Sample";
const BOTTOM_LABEL: &str = "Subject";

/// Where the placeholder disc lands for a given canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaceholderGeometry {
    pub center: Point,
    pub diameter: f64,
}

impl PlaceholderGeometry {
    pub fn radius(self) -> f64 {
        self.diameter / 2.0
    }

    /// Baselines of the two label lines.
    pub fn label_baselines(self) -> (f64, f64) {
        (self.center.y - 10.0, self.center.y + 30.0)
    }
}

pub fn placeholder_geometry(canvas: Canvas) -> PlaceholderGeometry {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    PlaceholderGeometry {
        center: Point::new(w / 2.0, h / 2.0),
        diameter: w.min(h) * PLACEHOLDER_DIAMETER_FRACTION,
    }
}

struct Badge {
    center: Point,
    radius: f64,
    baselines: (f64, f64),
}

fn draw_badge(
    painter: &mut CpuPainter,
    surface: &mut RasterSurface,
    badge: &Badge,
    accent: Rgba8,
) -> ChromaResult<()> {
    let top = label_path(TOP_LABEL, badge.center.x, badge.baselines.0)?;
    let bottom = label_path(BOTTOM_LABEL, badge.center.x, badge.baselines.1)?;
    let disc = Circle::new((badge.center.x, badge.center.y), badge.radius).to_path(0.1);

    painter.paint_over(surface, |ctx| {
        ctx.set_paint(cpu_color(Rgba8::WHITE));
        ctx.fill_path(&disc);

        ctx.set_paint(cpu_color(accent));
        ctx.set_stroke(Stroke::new(RING_WIDTH));
        ctx.stroke_path(&disc);

        ctx.fill_path(&top);
        ctx.fill_path(&bottom);
        Ok(())
    })
}

/// Draw the placeholder subject centered on `surface`.
pub(crate) fn draw_placeholder(
    painter: &mut CpuPainter,
    surface: &mut RasterSurface,
    accent: Rgba8,
) -> ChromaResult<PlaceholderGeometry> {
    let geometry = placeholder_geometry(surface.canvas());
    let badge = Badge {
        center: geometry.center,
        radius: geometry.radius(),
        baselines: geometry.label_baselines(),
    };
    draw_badge(painter, surface, &badge, accent)?;
    Ok(geometry)
}

/// Rasterize the placeholder alone on a transparent canvas.
pub fn render_placeholder(canvas: Canvas, accent: Rgba8) -> ChromaResult<RasterSurface> {
    canvas.validate()?;
    let mut surface = RasterSurface::new(canvas);
    draw_placeholder(&mut CpuPainter::new(), &mut surface, accent)?;
    Ok(surface)
}

/// The demo gallery's sample subject as PNG bytes.
pub fn sample_subject_png() -> ChromaResult<Vec<u8>> {
    let mut surface = RasterSurface::new(Canvas {
        width: SAMPLE_SUBJECT_SIZE,
        height: SAMPLE_SUBJECT_SIZE,
    });
    let c = f64::from(SAMPLE_SUBJECT_SIZE) / 2.0;
    let badge = Badge {
        center: Point::new(c, c),
        radius: SAMPLE_SUBJECT_RADIUS,
        baselines: (95.0, 125.0),
    };
    draw_badge(&mut CpuPainter::new(), &mut surface, &badge, Rgba8::ACCENT)?;
    surface.encode_png()
}

#[cfg(test)]
#[path = "../../tests/unit/paint/placeholder.rs"]
mod tests;
