use crate::assets::loader::ImageLoader;
use crate::assets::source::ImageSource;
use crate::composition::model::{Background, RenderRequest};
use crate::foundation::core::{Rgba8, Rgba8Premul};
use crate::foundation::error::ChromaResult;
use crate::layout::fit::{Placement, fit};
use crate::paint::gradient::render_gradient;
use crate::paint::pattern::generate_tile;
use crate::paint::placeholder::draw_placeholder;
use crate::render::cpu::{CpuPainter, premul_over_px};
use crate::render::surface::RasterSurface;

/// Compositor settings.
#[derive(Clone, Debug)]
pub struct CompositorOpts {
    /// Ring and label color of the placeholder subject.
    pub accent: Rgba8,
    /// Straight RGBA the surface is cleared to before each render; transparent when unset.
    pub clear_rgba: Option<[u8; 4]>,
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            accent: Rgba8::ACCENT,
            clear_rgba: None,
        }
    }
}

impl CompositorOpts {
    pub fn with_accent(mut self, accent: Rgba8) -> Self {
        self.accent = accent;
        self
    }

    pub fn with_clear_rgba(mut self, clear_rgba: Option<[u8; 4]>) -> Self {
        self.clear_rgba = clear_rgba;
        self
    }
}

/// Where the compositor is in its render protocol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderState {
    #[default]
    Idle,
    BackgroundPending,
    SubjectPending,
    PlaceholderSubject,
    Complete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundOutcome {
    Drawn,
    /// The background image could not be loaded; the surface was left as cleared.
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubjectOutcome {
    Drawn { placement: Placement },
    /// `decode_failed` is false when the request carried no subject at all.
    Placeholder { decode_failed: bool },
}

/// Summary of one completed render.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RenderReport {
    pub generation: u64,
    pub background: BackgroundOutcome,
    pub subject: SubjectOutcome,
}

/// Draws a background and a subject onto an owned [`RasterSurface`].
///
/// `render` takes `&mut self`, so one render finishes (or is dropped) before the next can start,
/// and each starts from a fully cleared surface. Image loads are the only suspension points.
pub struct Compositor<L> {
    loader: L,
    opts: CompositorOpts,
    painter: CpuPainter,
    surface: Option<RasterSurface>,
    state: RenderState,
    generation: u64,
}

impl<L: ImageLoader> Compositor<L> {
    pub fn new(loader: L) -> Self {
        Self::with_opts(loader, CompositorOpts::default())
    }

    pub fn with_opts(loader: L, opts: CompositorOpts) -> Self {
        Self {
            loader,
            opts,
            painter: CpuPainter::new(),
            surface: None,
            state: RenderState::Idle,
            generation: 0,
        }
    }

    pub fn opts(&self) -> &CompositorOpts {
        &self.opts
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Number of renders started so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The finished surface; `None` until a render has reached [`RenderState::Complete`].
    pub fn surface(&self) -> Option<&RasterSurface> {
        match self.state {
            RenderState::Complete => self.surface.as_ref(),
            _ => None,
        }
    }

    /// Run one full render pass for `request`.
    ///
    /// Invalid requests (canvas size, gradient stops) fail before any pixel is touched. Image
    /// load failures never surface here: a failed background leaves the cleared surface and a
    /// failed subject is replaced by the placeholder.
    #[tracing::instrument(
        skip(self, request),
        fields(background = request.background.kind_name(), canvas = ?request.canvas)
    )]
    pub async fn render(&mut self, request: &RenderRequest) -> ChromaResult<RenderReport> {
        request.validate()?;

        self.generation += 1;
        let generation = self.generation;

        let mut surface = match self.surface.take() {
            Some(s) if s.canvas() == request.canvas => s,
            _ => RasterSurface::new(request.canvas),
        };
        surface.reset(generation);
        if let Some([r, g, b, a]) = self.opts.clear_rgba {
            surface.fill(Rgba8Premul::from_straight_rgba(r, g, b, a));
        }

        let result = self.draw_pass(&mut surface, request).await;
        self.surface = Some(surface);
        match result {
            Ok((background, subject)) => {
                self.transition(RenderState::Complete);
                Ok(RenderReport {
                    generation,
                    background,
                    subject,
                })
            }
            Err(e) => {
                self.transition(RenderState::Idle);
                Err(e)
            }
        }
    }

    /// [`Compositor::render`] driven to completion on the current thread.
    pub fn render_blocking(&mut self, request: &RenderRequest) -> ChromaResult<RenderReport> {
        pollster::block_on(self.render(request))
    }

    async fn draw_pass(
        &mut self,
        surface: &mut RasterSurface,
        request: &RenderRequest,
    ) -> ChromaResult<(BackgroundOutcome, SubjectOutcome)> {
        self.transition(RenderState::BackgroundPending);
        let background = self.draw_background(surface, &request.background).await?;

        let subject = match &request.subject {
            Some(source) => {
                self.transition(RenderState::SubjectPending);
                match self.draw_subject(surface, source).await {
                    Ok(placement) => SubjectOutcome::Drawn { placement },
                    Err(e) => {
                        tracing::warn!(source = %source.describe(), error = %e, "subject failed to load, drawing placeholder");
                        self.draw_placeholder(surface)?;
                        SubjectOutcome::Placeholder {
                            decode_failed: true,
                        }
                    }
                }
            }
            None => {
                self.draw_placeholder(surface)?;
                SubjectOutcome::Placeholder {
                    decode_failed: false,
                }
            }
        };
        Ok((background, subject))
    }

    async fn draw_background(
        &mut self,
        surface: &mut RasterSurface,
        background: &Background,
    ) -> ChromaResult<BackgroundOutcome> {
        match background {
            Background::Color { color, opacity } => {
                let src = color.with_opacity(*opacity).to_premul().to_array();
                for px in surface.data_mut().chunks_exact_mut(4) {
                    let out = premul_over_px([px[0], px[1], px[2], px[3]], src);
                    px.copy_from_slice(&out);
                }
            }
            Background::Gradient(spec) => {
                let (w, h) = (surface.width(), surface.height());
                render_gradient(surface.data_mut(), w, h, spec)?;
            }
            Background::Pattern { style, color } => {
                generate_tile(style, *color)?.fill_repeat(surface)?;
            }
            Background::Image { source } => {
                let dest = surface.canvas().to_rect();
                let drawn = match self.loader.load(source).await {
                    Ok(image) => self.painter.draw_image(surface, &image, dest),
                    Err(e) => Err(e),
                };
                if let Err(e) = drawn {
                    tracing::warn!(source = %source.describe(), error = %e, "background image failed to load, leaving surface blank");
                    return Ok(BackgroundOutcome::Failed);
                }
            }
        }
        Ok(BackgroundOutcome::Drawn)
    }

    async fn draw_subject(
        &mut self,
        surface: &mut RasterSurface,
        source: &ImageSource,
    ) -> ChromaResult<Placement> {
        let image = self.loader.load(source).await?;
        let placement = fit(
            f64::from(image.width),
            f64::from(image.height),
            f64::from(surface.width()),
            f64::from(surface.height()),
        );
        self.painter
            .draw_image(surface, &image, placement.to_rect())?;
        Ok(placement)
    }

    fn draw_placeholder(&mut self, surface: &mut RasterSurface) -> ChromaResult<()> {
        self.transition(RenderState::PlaceholderSubject);
        draw_placeholder(&mut self.painter, surface, self.opts.accent)?;
        Ok(())
    }

    fn transition(&mut self, next: RenderState) {
        tracing::debug!(from = ?self.state, to = ?next, generation = self.generation, "render state");
        self.state = next;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
