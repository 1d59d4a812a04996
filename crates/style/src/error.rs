//! Style engine error types

use thiserror::Error;

use jotstyle_css::CssError;

/// Style engine result type
pub type StyleResult<T> = Result<T, StyleError>;

/// Style engine errors
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("Invalid style request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported {kind} value for '{name}'")]
    UnsupportedValue {
        name: String,
        kind: &'static str,
    },

    #[error(transparent)]
    Css(#[from] CssError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StyleError {
    /// Whether the error means the input was not a usable request
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}
