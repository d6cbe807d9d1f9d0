use std::sync::Arc;

use crate::assets::decode::LoadedImage;
use crate::foundation::core::{Rect, Rgba8};
use crate::foundation::error::{ChromaError, ChromaResult};
use crate::foundation::math::mul_div255_u8;
use crate::render::surface::RasterSurface;

/// Reusable `vello_cpu` context for vector draws onto a [`RasterSurface`].
///
/// `vello_cpu` renders into a fresh buffer, so each draw renders into a scratch pixmap that is
/// then premul-over composited onto the destination surface.
#[derive(Default)]
pub(crate) struct CpuPainter {
    ctx: Option<vello_cpu::RenderContext>,
    scratch: Option<vello_cpu::Pixmap>,
}

impl CpuPainter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record vector commands with `f`, rasterize them, and composite over `dst`.
    pub(crate) fn paint_over(
        &mut self,
        dst: &mut RasterSurface,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> ChromaResult<()>,
    ) -> ChromaResult<()> {
        let (width, height) = surface_dims_u16(dst)?;
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        f(&mut ctx)?;
        ctx.flush();

        let mut scratch = match self.scratch.take() {
            Some(p) if p.width() == width && p.height() == height => p,
            _ => vello_cpu::Pixmap::new(width, height),
        };
        scratch.data_as_u8_slice_mut().fill(0);
        ctx.render_to_pixmap(&mut scratch);
        premul_over_in_place(dst.data_mut(), scratch.data_as_u8_slice())?;

        self.scratch = Some(scratch);
        self.ctx = Some(ctx);
        Ok(())
    }

    /// Draw `image` scaled into `dest` (aspect ratio is the caller's concern).
    pub(crate) fn draw_image(
        &mut self,
        dst: &mut RasterSurface,
        image: &LoadedImage,
        dest: Rect,
    ) -> ChromaResult<()> {
        let paint = image_paint(image)?;
        let iw = f64::from(image.width);
        let ih = f64::from(image.height);
        let tr = vello_cpu::kurbo::Affine::translate((dest.x0, dest.y0))
            * vello_cpu::kurbo::Affine::scale_non_uniform(dest.width() / iw, dest.height() / ih);
        self.paint_over(dst, |ctx| {
            ctx.set_transform(tr);
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
            Ok(())
        })?;
        if !image.origin_clean {
            dst.mark_tainted();
        }
        Ok(())
    }
}

fn surface_dims_u16(s: &RasterSurface) -> ChromaResult<(u16, u16)> {
    let w: u16 = s
        .width()
        .try_into()
        .map_err(|_| ChromaError::validation("surface width exceeds u16"))?;
    let h: u16 = s
        .height()
        .try_into()
        .map_err(|_| ChromaError::validation("surface height exceeds u16"))?;
    Ok((w, h))
}

pub(crate) fn cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> ChromaResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ChromaError::decode("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ChromaError::decode("image height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(ChromaError::decode("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    let may_have_opacities = bytes.chunks_exact(4).any(|px| px[3] != 255);
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn image_paint(image: &LoadedImage) -> ChromaResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(&image.rgba8_premul, image.width, image.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

pub(crate) fn premul_over_in_place(dst: &mut [u8], src: &[u8]) -> ChromaResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(ChromaError::validation(
            "premul_over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = premul_over_px([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

pub(crate) fn premul_over_px(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }
    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    out[3] = src[3].saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for c in 0..3 {
        let dc = mul_div255_u8(u16::from(dst[c]), inv);
        out[c] = src[c].saturating_add(dc);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
