use crate::{
    assets::source::ImageSource,
    foundation::core::{Canvas, Rgba8},
    foundation::error::{ChromaError, ChromaResult},
};

/// Fewest stops a gradient can render with.
pub const MIN_GRADIENT_STOPS: usize = 2;
/// Most stops the gradient editor produces; more are still rendered.
pub const MAX_EDITOR_GRADIENT_STOPS: usize = 5;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One render pass: a background, an optional subject and the canvas to draw them into.
///
/// Requests are built fresh for every draw and are never mutated by the compositor.
pub struct RenderRequest {
    /// Foreground image; `None` renders the placeholder subject.
    #[serde(default)]
    pub subject: Option<ImageSource>,
    /// The single active background variant.
    pub background: Background,
    /// Output canvas dimensions.
    #[serde(default)]
    pub canvas: Canvas,
}

impl RenderRequest {
    /// A request with the given background, no subject, on the default 600x400 canvas.
    pub fn new(background: Background) -> Self {
        Self {
            subject: None,
            background,
            canvas: Canvas::DEFAULT,
        }
    }

    /// Replace the subject source.
    pub fn with_subject(mut self, subject: impl Into<ImageSource>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Replace the canvas dimensions.
    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.canvas = Canvas { width, height };
        self
    }

    /// Parse a request from JSON text.
    pub fn from_json_str(s: &str) -> ChromaResult<Self> {
        serde_json::from_str(s).map_err(|e| ChromaError::serde(e.to_string()))
    }

    /// Check canvas bounds and gradient well-formedness before any pixel is drawn.
    pub fn validate(&self) -> ChromaResult<()> {
        self.canvas.validate()?;
        match &self.background {
            Background::Color { opacity, .. } => {
                if !opacity.is_finite() {
                    return Err(ChromaError::validation("color opacity must be finite"));
                }
                Ok(())
            }
            Background::Gradient(g) => g.validate(),
            Background::Pattern { .. } | Background::Image { .. } => Ok(()),
        }
    }
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self::new(Background::default())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Background variants; exactly one is active per request.
pub enum Background {
    /// Solid fill at `opacity` in `[0, 1]`.
    Color {
        color: Rgba8,
        #[serde(default = "full_opacity")]
        opacity: f64,
    },
    /// Linear or radial color ramp.
    Gradient(GradientSpec),
    /// Repeating tile of a named style.
    Pattern {
        style: String,
        color: Rgba8,
    },
    /// Image stretched to the full canvas.
    Image {
        source: ImageSource,
    },
}

fn full_opacity() -> f64 {
    1.0
}

impl Background {
    /// Short variant name for logs and reports.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Color { .. } => "color",
            Self::Gradient(_) => "gradient",
            Self::Pattern { .. } => "pattern",
            Self::Image { .. } => "image",
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::Color {
            color: Rgba8::ACCENT,
            opacity: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Gradient geometry.
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One `(color, position)` point along a ramp; `position` is a percentage.
pub struct GradientStop {
    pub color: Rgba8,
    pub position: f64,
}

impl GradientStop {
    pub fn new(color: Rgba8, position: f64) -> Self {
        Self { color, position }
    }

    /// Normalized gradient offset (`position / 100`), passed through without clamping.
    pub fn offset(self) -> f64 {
        self.position / 100.0
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Ordered stop list plus geometry. `angle` is ignored for radial gradients.
pub struct GradientSpec {
    #[serde(default)]
    pub kind: GradientKind,
    #[serde(default)]
    pub angle: f64,
    pub stops: Vec<GradientStop>,
}

impl GradientSpec {
    pub fn linear(angle: f64, stops: Vec<GradientStop>) -> Self {
        Self {
            kind: GradientKind::Linear,
            angle,
            stops,
        }
    }

    pub fn radial(stops: Vec<GradientStop>) -> Self {
        Self {
            kind: GradientKind::Radial,
            angle: 0.0,
            stops,
        }
    }

    pub fn validate(&self) -> ChromaResult<()> {
        if self.stops.len() < MIN_GRADIENT_STOPS {
            return Err(ChromaError::invalid_gradient(format!(
                "gradient needs at least {MIN_GRADIENT_STOPS} stops, got {}",
                self.stops.len()
            )));
        }
        if let Some((i, s)) = self
            .stops
            .iter()
            .enumerate()
            .find(|(_, s)| !s.position.is_finite())
        {
            return Err(ChromaError::invalid_gradient(format!(
                "stop {i} has non-finite position {}",
                s.position
            )));
        }
        if self.kind == GradientKind::Linear && !self.angle.is_finite() {
            return Err(ChromaError::invalid_gradient("linear angle must be finite"));
        }
        Ok(())
    }
}

impl Default for GradientSpec {
    fn default() -> Self {
        Self::linear(
            90.0,
            vec![
                GradientStop::new(Rgba8::ACCENT, 0.0),
                GradientStop::new(Rgba8::rgb(0x8b, 0x5c, 0xf6), 100.0),
            ],
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
