//! CSS generation error types

use thiserror::Error;

/// CSS generation result type
pub type CssResult<T> = Result<T, CssError>;

/// Errors raised while turning prop values into CSS text
#[derive(Debug, Error)]
pub enum CssError {
    #[error("Unsafe value '{value}' for property '{property}'")]
    UnsafeValue {
        property: String,
        value: String,
    },

    #[error("Invalid number {value} for property '{property}'")]
    InvalidNumber {
        property: String,
        value: f64,
    },

    #[error("Failed to inject rule for '{class_name}': {message}")]
    InjectionFailed {
        class_name: String,
        message: String,
    },
}

impl CssError {
    pub fn unsafe_value(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnsafeValue { property: property.into(), value: value.into() }
    }

    pub fn injection_failed(class_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InjectionFailed { class_name: class_name.into(), message: message.into() }
    }
}
