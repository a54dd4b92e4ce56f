/// Convenience result type used across the crate.
pub type RevealResult<T> = Result<T, RevealError>;

/// Top-level error taxonomy for the boundary APIs (config, assets, manifests).
///
/// Extraction, rendering and controller callbacks never return these; they degrade to no-ops.
#[derive(thiserror::Error, Debug)]
pub enum RevealError {
    /// Invalid user-provided configuration or manifest data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while reading or decoding image sources.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RevealError {
    /// Build a [`RevealError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RevealError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`RevealError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
