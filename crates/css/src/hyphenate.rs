//! Property name hyphenation
//!
//! Converts camelCase prop names into hyphenated CSS property names.

/// Convert a camelCase property name into its CSS form.
///
/// `backgroundColor` becomes `background-color`. Vendor prefixes written with
/// a leading capital (`WebkitTransition`) come out as `-webkit-transition`;
/// the lower-case `ms` prefix is given its leading hyphen explicitly.
pub fn hyphenate_style_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    if out.starts_with("ms-") {
        out.insert(0, '-');
    }
    out
}
