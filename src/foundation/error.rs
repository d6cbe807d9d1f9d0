/// Convenience result type used across chromafill.
pub type ChromaResult<T> = Result<T, ChromaError>;

/// Top-level error taxonomy used by compositing APIs.
///
/// Decode failures are absorbed by the [`crate::Compositor`] and turned into a visual fallback;
/// only gradient validation and export taint reach callers of a render.
#[derive(thiserror::Error, Debug)]
pub enum ChromaError {
    /// An image source could not be read or decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A gradient has fewer than two stops or non-finite parameters.
    #[error("invalid gradient: {0}")]
    InvalidGradient(String),

    /// Pixels were read back from a surface that drew a cross-origin image without permission.
    #[error("export taint error: {0}")]
    ExportTaint(String),

    /// Invalid user-provided request data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChromaError {
    /// Build a [`ChromaError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`ChromaError::InvalidGradient`] value.
    pub fn invalid_gradient(msg: impl Into<String>) -> Self {
        Self::InvalidGradient(msg.into())
    }

    /// Build a [`ChromaError::ExportTaint`] value.
    pub fn export_taint(msg: impl Into<String>) -> Self {
        Self::ExportTaint(msg.into())
    }

    /// Build a [`ChromaError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ChromaError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
