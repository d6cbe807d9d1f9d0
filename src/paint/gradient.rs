//! Gradient rasterization onto premultiplied RGBA8 buffers.
//!
//! Geometry follows the 2D canvas conventions the product was built on:
//!
//! - **Linear**: the gradient vector runs from `(0, 0)` to `(cos θ · width, sin θ · height)`.
//!   Scaling the unit direction by the canvas size means the visible angle drifts on
//!   non-square canvases; the formula is kept bit-for-bit.
//! - **Radial**: centered on the canvas, inner radius 0, outer radius `max(width, height) / 2`.
//!
//! Stops are used in the order given with offset `position / 100`, unsorted and unclamped.
//! Before the first offset the first color is used, after the last offset the last color.

use crate::composition::model::{GradientKind, GradientSpec};
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{ChromaError, ChromaResult};
use crate::render::cpu::premul_over_in_place;

/// Stops resolved to premultiplied colors and normalized offsets.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientRamp {
    stops: Vec<(f64, Rgba8Premul)>,
}

impl GradientRamp {
    pub fn from_spec(spec: &GradientSpec) -> ChromaResult<Self> {
        spec.validate()?;
        Ok(Self {
            stops: spec
                .stops
                .iter()
                .map(|s| (s.offset(), s.color.to_premul()))
                .collect(),
        })
    }

    /// Color at normalized offset `t` with pad behavior at both ends.
    pub fn sample(&self, t: f64) -> Rgba8Premul {
        let (first_t, first_c) = self.stops[0];
        let (last_t, last_c) = self.stops[self.stops.len() - 1];
        if !t.is_finite() || t <= first_t {
            return first_c;
        }
        if t >= last_t {
            return last_c;
        }
        for pair in self.stops.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            if t >= t0 && t <= t1 {
                let span = t1 - t0;
                if span <= 0.0 {
                    return c1;
                }
                return c0.lerp(c1, (t - t0) / span);
            }
        }
        last_c
    }
}

/// Gradient parameterization over a `width x height` area.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Geometry {
    Linear { dx: f64, dy: f64, len2: f64 },
    Radial { cx: f64, cy: f64, r: f64 },
}

impl Geometry {
    fn new(spec: &GradientSpec, width: u32, height: u32) -> Self {
        let w = f64::from(width);
        let h = f64::from(height);
        match spec.kind {
            GradientKind::Linear => {
                let theta = spec.angle.to_radians();
                let dx = theta.cos() * w;
                let dy = theta.sin() * h;
                Self::Linear {
                    dx,
                    dy,
                    len2: dx * dx + dy * dy,
                }
            }
            GradientKind::Radial => Self::Radial {
                cx: w / 2.0,
                cy: h / 2.0,
                r: w.max(h) / 2.0,
            },
        }
    }

    fn is_degenerate(self) -> bool {
        match self {
            Self::Linear { len2, .. } => len2 <= f64::EPSILON,
            Self::Radial { r, .. } => r <= 0.0,
        }
    }

    /// Normalized offset at pixel center `(px, py)`.
    fn offset_at(self, px: f64, py: f64) -> f64 {
        match self {
            Self::Linear { dx, dy, len2 } => (px * dx + py * dy) / len2,
            Self::Radial { cx, cy, r } => (px - cx).hypot(py - cy) / r,
        }
    }
}

/// Fill a `width x height` premultiplied RGBA8 buffer with `spec`, composited source-over.
///
/// Fails fast with [`ChromaError::InvalidGradient`] before touching `dst`.
pub fn render_gradient(
    dst: &mut [u8],
    width: u32,
    height: u32,
    spec: &GradientSpec,
) -> ChromaResult<()> {
    let ramp = GradientRamp::from_spec(spec)?;
    let expected = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4);
    if dst.len() != expected {
        return Err(ChromaError::validation(format!(
            "gradient target is {} bytes, expected {expected}",
            dst.len()
        )));
    }

    let geometry = Geometry::new(spec, width, height);
    if geometry.is_degenerate() {
        tracing::debug!(?geometry, "degenerate gradient geometry, nothing painted");
        return Ok(());
    }

    let mut layer = vec![0u8; expected];
    if width > 0 {
        for (y, row) in layer.chunks_exact_mut(width as usize * 4).enumerate() {
            let py = y as f64 + 0.5;
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let t = geometry.offset_at(x as f64 + 0.5, py);
                px.copy_from_slice(&ramp.sample(t).to_array());
            }
        }
    }
    premul_over_in_place(dst, &layer)
}

#[cfg(test)]
#[path = "../../tests/unit/paint/gradient.rs"]
mod tests;
