/// Linear and radial gradient rasterization.
pub mod gradient;
pub(crate) mod label;
/// Repeating pattern tiles.
pub mod pattern;
/// Placeholder and sample subject graphics.
pub mod placeholder;
