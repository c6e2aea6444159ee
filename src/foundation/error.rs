/// Convenience result type used across ternplot.
pub type TernResult<T> = Result<T, TernError>;

/// Top-level error taxonomy used by chart APIs.
#[derive(thiserror::Error, Debug)]
pub enum TernError {
    /// Invalid user-provided configuration or view parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Structurally invalid dataset input (bad year keys, wrong shapes).
    #[error("dataset error: {0}")]
    Dataset(String),

    /// Errors while building or rasterizing a chart scene.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TernError {
    /// Build a [`TernError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TernError::Dataset`] value.
    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset(msg.into())
    }

    /// Build a [`TernError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TernError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
