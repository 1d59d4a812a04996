//! Formatting collaborators
//!
//! The value, naming and hashing functions the class-name engine calls into.

use crate::error::CssResult;
use crate::hash::string_hash;
use crate::hyphenate::hyphenate_style_name;
use crate::value::{format_value, StyleValue};

/// Turns prop names and values into CSS text
pub trait StyleFormatter {
    /// Render a value for the given camelCase property
    fn format_value(&self, property: &str, value: &StyleValue) -> CssResult<String>;

    /// Convert a camelCase property name to its CSS form
    fn hyphenate(&self, property: &str) -> String;

    /// Hash fingerprint content into a number
    fn hash(&self, content: &str) -> u32;
}

/// The stock formatter
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFormatter;

impl DefaultFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl StyleFormatter for DefaultFormatter {
    fn format_value(&self, property: &str, value: &StyleValue) -> CssResult<String> {
        format_value(property, value)
    }

    fn hyphenate(&self, property: &str) -> String {
        hyphenate_style_name(property)
    }

    fn hash(&self, content: &str) -> u32 {
        string_hash(content)
    }
}
