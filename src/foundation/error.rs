/// Convenience result type used across scrollstage.
pub type StageResult<T> = Result<T, StageError>;

/// Top-level error taxonomy used by construction and configuration APIs.
///
/// Per-frame animation paths never fail; they clamp and guard structurally instead.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    /// Invalid geometry, thresholds or timings.
    #[error("validation error: {0}")]
    Validation(String),

    /// A configuration file could not be read or is inconsistent.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StageError {
    /// Build a [`StageError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StageError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`StageError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
