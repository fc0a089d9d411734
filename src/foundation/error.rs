/// Convenience result type used across titlestroke.
pub type TitleResult<T> = Result<T, TitleError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum TitleError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// The font could not be fetched, read or parsed.
    #[error("font load error: {0}")]
    FontLoad(String),

    /// Outline data contained an unknown command or missing coordinates.
    #[error("outline error: {0}")]
    Outline(String),

    /// The drawing surface rejected an operation.
    #[error("render error: {0}")]
    Render(String),

    /// A frame sink failed while writing output.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TitleError {
    /// Build a [`TitleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TitleError::FontLoad`] value.
    pub fn font_load(msg: impl Into<String>) -> Self {
        Self::FontLoad(msg.into())
    }

    /// Build a [`TitleError::Outline`] value.
    pub fn outline(msg: impl Into<String>) -> Self {
        Self::Outline(msg.into())
    }

    /// Build a [`TitleError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TitleError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
