//! Style Requests
//!
//! The flat prop mapping a caller hands to the registry.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde_json::Value;

use jotstyle_css::StyleValue;

use crate::error::{StyleError, StyleResult};

/// Prop names that are never treated as style properties
pub const RESERVED_KEYS: [&str; 7] = [
    "children",
    "class",
    "className",
    "component",
    "mediaQueries",
    "props",
    "style",
];

/// Check if a prop name is reserved
pub fn is_reserved(name: &str) -> bool {
    RESERVED_KEYS.contains(&name)
}

/// A set of style props plus the reserved entries the engine reads
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleRequest {
    /// Props keyed by original name; iteration is lexicographic
    props: BTreeMap<String, StyleValue>,
    /// Explicit class name passed through to the result
    class_name: Option<String>,
    /// Media query prefix -> media query condition
    media_queries: FxHashMap<String, String>,
}

impl StyleRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a prop
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set the explicit class name
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        let class_name = class_name.into();
        self.class_name = if class_name.is_empty() { None } else { Some(class_name) };
        self
    }

    /// Register a media query under a prop prefix
    pub fn media_query(mut self, prefix: impl Into<String>, query: impl Into<String>) -> Self {
        self.media_queries.insert(prefix.into(), query.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<StyleValue>) {
        self.props.insert(name.into(), value.into());
    }

    /// Build a request from a JSON object.
    ///
    /// Anything but an object is an invalid request. `className` is kept only
    /// when it is a non-empty string and `mediaQueries` only when it is an
    /// object; other reserved keys are dropped.
    pub fn from_value(value: &Value) -> StyleResult<Self> {
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(StyleError::InvalidRequest(format!(
                    "expected an object, found {}",
                    value_kind(other)
                )))
            }
        };

        let mut request = StyleRequest::new();

        for (name, value) in object {
            match name.as_str() {
                "className" => {
                    if let Value::String(class_name) = value {
                        request = request.class_name(class_name.as_str());
                    }
                }
                "mediaQueries" => {
                    if let Value::Object(queries) = value {
                        for (prefix, query) in queries {
                            match query {
                                Value::String(query) => {
                                    request.media_queries.insert(prefix.clone(), query.clone());
                                }
                                other => {
                                    return Err(StyleError::UnsupportedValue {
                                        name: format!("mediaQueries.{}", prefix),
                                        kind: value_kind(other),
                                    })
                                }
                            }
                        }
                    }
                }
                name if is_reserved(name) => {}
                name => {
                    let style_value = match value {
                        Value::String(s) => StyleValue::String(s.clone()),
                        Value::Number(n) => match n.as_f64() {
                            Some(n) => StyleValue::Number(n),
                            None => {
                                return Err(StyleError::UnsupportedValue {
                                    name: name.to_string(),
                                    kind: "number",
                                })
                            }
                        },
                        Value::Null | Value::Bool(_) => StyleValue::Empty,
                        other => {
                            return Err(StyleError::UnsupportedValue {
                                name: name.to_string(),
                                kind: value_kind(other),
                            })
                        }
                    };
                    request.props.insert(name.to_string(), style_value);
                }
            }
        }

        Ok(request)
    }

    /// Parse a request from JSON text
    pub fn from_json(json: &str) -> StyleResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Style props in lexicographic order, reserved names excluded
    pub fn style_props(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.props
            .iter()
            .filter(|(name, _)| !is_reserved(name))
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn has_style_props(&self) -> bool {
        self.style_props().next().is_some()
    }

    pub fn get_class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn media_queries(&self) -> &FxHashMap<String, String> {
        &self.media_queries
    }

    /// Resolve a media query prefix against this request
    pub fn resolve_media_query(&self, prefix: &str) -> Option<&str> {
        self.media_queries.get(prefix).map(String::as_str)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
