/// Convenience result type used across foldmark.
pub type FoldmarkResult<T> = Result<T, FoldmarkError>;

/// Top-level error taxonomy used by foldmark APIs.
#[derive(thiserror::Error, Debug)]
pub enum FoldmarkError {
    /// Invalid caller-provided input (sizes, handles, geometry).
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures inside a drawing surface (font loading, sizing, readback).
    #[error("surface error: {0}")]
    Surface(String),

    /// Invalid scheduler setup (frame interval, start time).
    #[error("schedule error: {0}")]
    Schedule(String),

    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FoldmarkError {
    /// Build a [`FoldmarkError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FoldmarkError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`FoldmarkError::Schedule`] value.
    pub fn schedule(msg: impl Into<String>) -> Self {
        Self::Schedule(msg.into())
    }

    /// Build a [`FoldmarkError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
