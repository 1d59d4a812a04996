//! Selector Groups
//!
//! A selector group collects the declarations that share one combination of
//! media query, pseudo-class and pseudo-element.

/// Build the composite key for a selector combination.
///
/// The key is `.` followed by `@<media>`, `:<pseudo-class>` and
/// `::<pseudo-element>`, each present only when set, always in that order.
pub fn selector_key(
    media_query: Option<&str>,
    pseudoclass: Option<&str>,
    pseudoelement: Option<&str>,
) -> String {
    let mut key = String::from(".");
    if let Some(mq) = media_query {
        key.push('@');
        key.push_str(mq);
    }
    if let Some(pc) = pseudoclass {
        key.push(':');
        key.push_str(pc);
    }
    if let Some(pe) = pseudoelement {
        key.push_str("::");
        key.push_str(pe);
    }
    key
}

/// Declarations sharing one selector combination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorGroup {
    /// Declaration text, e.g. `color:red;margin:10px;`
    pub css: String,
    /// Media query condition (without `@media`)
    pub media_query: Option<String>,
    /// Pseudo-class name (e.g., hover)
    pub pseudoclass: Option<String>,
    /// Pseudo-element name (e.g., before)
    pub pseudoelement: Option<String>,
}

impl SelectorGroup {
    pub fn new(
        media_query: Option<&str>,
        pseudoclass: Option<&str>,
        pseudoelement: Option<&str>,
    ) -> Self {
        Self {
            css: String::new(),
            media_query: media_query.map(str::to_string),
            pseudoclass: pseudoclass.map(str::to_string),
            pseudoelement: pseudoelement.map(str::to_string),
        }
    }

    /// Composite key of this group
    pub fn key(&self) -> String {
        selector_key(
            self.media_query.as_deref(),
            self.pseudoclass.as_deref(),
            self.pseudoelement.as_deref(),
        )
    }

    /// Selector for the group under a class name, e.g. `._j1:hover::after`
    pub fn selector(&self, class_name: &str) -> String {
        let mut selector = format!(".{}", class_name);
        if let Some(pc) = &self.pseudoclass {
            selector.push(':');
            selector.push_str(pc);
        }
        if let Some(pe) = &self.pseudoelement {
            selector.push_str("::");
            selector.push_str(pe);
        }
        selector
    }
}
