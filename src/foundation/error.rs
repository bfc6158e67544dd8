/// Convenience result type used across photocard.
pub type PhotocardResult<T> = Result<T, PhotocardError>;

/// Top-level error type returned by photocard APIs.
#[derive(thiserror::Error, Debug)]
pub enum PhotocardError {
    /// Input failed a validation check (bad handoff, bad control value, bad path).
    #[error("validation error: {0}")]
    Validation(String),

    /// An image, SVG or font could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The compositor could not produce a frame.
    #[error("render error: {0}")]
    Render(String),

    /// The composited surface could not be encoded.
    #[error("export error: {0}")]
    Export(String),

    /// Wrapped lower-level error (IO, codecs) with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PhotocardError {
    /// Build a [`PhotocardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PhotocardError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PhotocardError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PhotocardError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
