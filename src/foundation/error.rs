/// Convenience result type used throughout polysketch.
pub type SketchResult<T> = Result<T, SketchError>;

/// Top-level error type for polysketch.
///
/// The frame loop itself never fails: parameter mutations clamp instead of rejecting.
/// Errors only come from the edges (configuration, key scripts, rasterisation, encoding).
#[derive(thiserror::Error, Debug)]
pub enum SketchError {
    /// Invalid user-supplied values (canvas sizes, fps, key tokens).
    #[error("validation error: {0}")]
    Validation(String),

    /// Canvas or rasterisation failure.
    #[error("render error: {0}")]
    Render(String),

    /// Frame sink failure (PNG writes, ffmpeg pipe).
    #[error("encode error: {0}")]
    Encode(String),

    /// Configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped error from an underlying library.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SketchError {
    /// Build a [`SketchError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SketchError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SketchError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SketchError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
