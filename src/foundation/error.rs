/// Convenience result type used across blossom APIs.
pub type BlossomResult<T> = Result<T, BlossomError>;

/// Top-level error type for blossom.
#[derive(thiserror::Error, Debug)]
pub enum BlossomError {
    /// Invalid user input or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Drawing surface or compositing failure.
    #[error("render error: {0}")]
    Render(String),

    /// Config (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BlossomError {
    /// Construct a [`BlossomError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Construct a [`BlossomError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Construct a [`BlossomError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
