/// Aspect-preserving subject placement.
pub mod fit;
