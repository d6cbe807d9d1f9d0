//! chromafill composites a subject image over a generated background.
//!
//! A [`RenderRequest`] names one background (solid color, gradient, repeating pattern or
//! image) and an optional subject. A [`Compositor`] turns it into pixels:
//!
//! - Clear the [`RasterSurface`]
//! - Draw the background, waiting on an image load if needed
//! - Fit and draw the subject, or a deterministic placeholder when there is none
//!
//! Image loading goes through the [`ImageLoader`] seam; [`SourceLoader`] handles bytes,
//! `data:` URIs and files, and reaches the network only through an injected [`Fetcher`].
//! Finished surfaces export as PNG unless a cross-origin image tainted them.
#![forbid(unsafe_code)]

mod foundation;

/// Image sources, decoding and loading.
pub mod assets;
/// Request data model.
pub mod composition;
/// Subject placement.
pub mod layout;
/// Background and placeholder painters.
pub mod paint;
/// Surfaces and the compositor.
pub mod render;

pub use crate::foundation::core::{Canvas, MAX_CANVAS_EDGE, Point, Rect, Rgba8, Rgba8Premul};
pub use crate::foundation::error::{ChromaError, ChromaResult};

pub use crate::assets::decode::{DEFAULT_MAX_DECODED_PIXELS, LoadedImage, decode_image};
pub use crate::assets::loader::{
    BoxFuture, Fetched, Fetcher, ImageLoader, LoaderOpts, SourceLoader,
};
pub use crate::assets::source::ImageSource;
pub use crate::composition::model::{
    Background, GradientKind, GradientSpec, GradientStop, MAX_EDITOR_GRADIENT_STOPS,
    MIN_GRADIENT_STOPS, RenderRequest,
};
pub use crate::layout::fit::{Placement, SUBJECT_MAX_FRACTION, fit};
pub use crate::paint::gradient::{GradientRamp, render_gradient};
pub use crate::paint::pattern::{PatternStyle, PatternTile, TILE_SIZE, generate_tile};
pub use crate::paint::placeholder::{
    PlaceholderGeometry, SAMPLE_SUBJECT_SIZE, placeholder_geometry, render_placeholder,
    sample_subject_png,
};
pub use crate::render::compositor::{
    BackgroundOutcome, Compositor, CompositorOpts, RenderReport, RenderState, SubjectOutcome,
};
pub use crate::render::surface::RasterSurface;
