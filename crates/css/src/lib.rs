//! Jotstyle CSS
//!
//! Value formatting, property naming, hashing and rule injection used by
//! the class-name engine.

pub mod error;
pub mod format;
pub mod hash;
pub mod hyphenate;
pub mod selector;
pub mod sheet;
pub mod value;

pub use error::{CssError, CssResult};
pub use format::{DefaultFormatter, StyleFormatter};
pub use hash::{string_hash, to_base36};
pub use hyphenate::hyphenate_style_name;
pub use selector::{selector_key, SelectorGroup};
pub use sheet::{rule_text, StyleInjector, StyleSheet};
pub use value::{format_number, format_value, is_unitless_property, StyleValue};
