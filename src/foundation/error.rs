pub type OverlayResult<T> = Result<T, OverlayError>;

/// Failures from raster construction, job loading and thread-pool setup.
///
/// Blending never produces one of these.
#[derive(thiserror::Error, Debug)]
pub enum OverlayError {
    /// Zero-sized raster, buffer length not `width * height * 4`, empty job path,
    /// non-finite job opacity, or `threads == Some(0)`.
    #[error("validation error: {0}")]
    Validation(String),

    /// Job JSON that does not parse or has unknown fields.
    #[error("serialization error: {0}")]
    Serde(String),

    /// The rayon pool could not be built.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OverlayError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
