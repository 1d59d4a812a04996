//! Style Values
//!
//! Prop values and their rendering into CSS declaration text.

use crate::error::{CssError, CssResult};

/// A prop value as supplied by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// String value, used verbatim unless it looks numeric
    String(String),
    /// Numeric value
    Number(f64),
    /// Null or boolean; renders as an empty value
    Empty,
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::String(s.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::String(s)
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Number(n)
    }
}

impl From<f32> for StyleValue {
    fn from(n: f32) -> Self {
        StyleValue::Number(n as f64)
    }
}

impl From<i32> for StyleValue {
    fn from(n: i32) -> Self {
        StyleValue::Number(n as f64)
    }
}

impl From<u32> for StyleValue {
    fn from(n: u32) -> Self {
        StyleValue::Number(n as f64)
    }
}

impl From<bool> for StyleValue {
    fn from(_: bool) -> Self {
        StyleValue::Empty
    }
}

/// Render a number the way a browser runtime stringifies it.
///
/// Uses the shortest round-trip digits. Integral values drop the fractional
/// part, `-0` prints as `0`, and magnitudes of `1e21` and up or below `1e-6`
/// switch to exponent form (`1e+21`, `1.5e-7`).
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n < 0.0 {
        return format!("-{}", format_number(-n));
    }

    // `{:e}` yields the shortest digits as `d.ddde<exp>`
    let scientific = format!("{:e}", n);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = match exponent.parse() {
        Ok(exponent) => exponent,
        Err(_) => return scientific,
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let point = exponent + 1;

    if k <= point && point <= 21 {
        format!("{}{}", digits, "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{}.{}", int, frac)
    } else if -6 < point && point <= 0 {
        format!("0.{}{}", "0".repeat((-point) as usize), digits)
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, sign, exponent.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, sign, exponent.abs())
        }
    }
}

/// Render a prop value as CSS text for the given camelCase property.
///
/// Numbers get a `px` unit unless they are zero or the property is unitless.
/// Strings that parse as numbers follow the same rule after trimming.
pub fn format_value(property: &str, value: &StyleValue) -> CssResult<String> {
    match value {
        StyleValue::Empty => Ok(String::new()),
        StyleValue::Number(n) => {
            if !n.is_finite() {
                return Err(CssError::InvalidNumber {
                    property: property.to_string(),
                    value: *n,
                });
            }
            if *n == 0.0 || is_unitless_property(property) {
                Ok(format_number(*n))
            } else {
                Ok(format!("{}px", format_number(*n)))
            }
        }
        StyleValue::String(s) => {
            if s.contains('{') || s.contains('}') {
                return Err(CssError::unsafe_value(property, s.as_str()));
            }
            if s.is_empty() {
                return Ok(String::new());
            }
            let trimmed = s.trim();
            match trimmed.parse::<f64>() {
                Ok(n) if n.is_finite() && !trimmed.is_empty() => {
                    if is_unitless_property(property) {
                        Ok(s.clone())
                    } else {
                        Ok(format!("{}px", trimmed))
                    }
                }
                _ => Ok(s.clone()),
            }
        }
    }
}

/// Check whether a camelCase property takes bare numbers.
///
/// Vendor-prefixed forms (`WebkitFlex`, `msFlexGrow`, `MozOpacity`,
/// `OOrder`) are unitless when their base property is.
pub fn is_unitless_property(property: &str) -> bool {
    if is_unitless_base(property) {
        return true;
    }
    for vendor in ["Webkit", "ms", "Moz", "O"] {
        if let Some(rest) = property.strip_prefix(vendor) {
            let mut chars = rest.chars();
            if let Some(first) = chars.next() {
                if first.is_ascii_uppercase() {
                    let base = format!("{}{}", first.to_ascii_lowercase(), chars.as_str());
                    return is_unitless_base(&base);
                }
            }
        }
    }
    false
}

fn is_unitless_base(property: &str) -> bool {
    matches!(
        property,
        "animationIterationCount"
            | "borderImageOutset"
            | "borderImageSlice"
            | "borderImageWidth"
            | "boxFlex"
            | "boxFlexGroup"
            | "boxOrdinalGroup"
            | "columnCount"
            | "flex"
            | "flexGrow"
            | "flexPositive"
            | "flexShrink"
            | "flexNegative"
            | "flexOrder"
            | "gridRow"
            | "gridColumn"
            | "fontWeight"
            | "lineClamp"
            | "lineHeight"
            | "opacity"
            | "order"
            | "orphans"
            | "tabSize"
            | "widows"
            | "zIndex"
            | "zoom"
            | "fillOpacity"
            | "floodOpacity"
            | "stopOpacity"
            | "strokeDasharray"
            | "strokeDashoffset"
            | "strokeMiterlimit"
            | "strokeOpacity"
            | "strokeWidth"
    )
}
