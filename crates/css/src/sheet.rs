//! Style Sheet
//!
//! Rule injection. The registry hands every new selector group to a
//! [`StyleInjector`]; [`StyleSheet`] is the in-memory implementation that
//! collects the resulting rules in insertion order.
//!
//! When a later group of the same class fails to inject, the registry
//! retracts the groups it already injected for that class, so a failed class
//! leaves no rules behind.

use rustc_hash::FxHashSet;

use crate::error::CssResult;
use crate::selector::SelectorGroup;

/// Receives the CSS for newly generated class names
pub trait StyleInjector {
    /// Make the group's declarations take effect for `class_name`
    fn inject(&mut self, class_name: &str, group: &SelectorGroup) -> CssResult<()>;

    /// Undo a successful `inject` of the same class name and group
    fn retract(&mut self, class_name: &str, group: &SelectorGroup);
}

/// Build the rule text for a group under a class name.
///
/// Groups with a media query are wrapped in an `@media` block.
pub fn rule_text(class_name: &str, group: &SelectorGroup) -> String {
    let rule = format!("{} {{{}}}", group.selector(class_name), group.css);
    match &group.media_query {
        Some(mq) => format!("@media {} {{ {} }}", mq, rule),
        None => rule,
    }
}

/// An ordered, deduplicated collection of generated rules
#[derive(Debug, Default, Clone)]
pub struct StyleSheet {
    rules: Vec<String>,
    seen: FxHashSet<String>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule; returns false if an identical rule is already present
    pub fn insert_rule(&mut self, rule: String) -> bool {
        if self.seen.contains(&rule) {
            log::trace!("Skipping duplicate rule: {}", rule);
            return false;
        }
        self.seen.insert(rule.clone());
        self.rules.push(rule);
        true
    }

    /// Remove a rule; returns false if it was not present
    pub fn remove_rule(&mut self, rule: &str) -> bool {
        if !self.seen.remove(rule) {
            return false;
        }
        self.rules.retain(|r| r != rule);
        true
    }

    /// Rules in insertion order
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Render the sheet as CSS text, one rule per line
    pub fn to_css(&self) -> String {
        let mut css = self.rules.join("\n");
        if !css.is_empty() {
            css.push('\n');
        }
        css
    }

    pub fn clear(&mut self) {
        self.rules.clear();
        self.seen.clear();
    }
}

impl StyleInjector for StyleSheet {
    fn inject(&mut self, class_name: &str, group: &SelectorGroup) -> CssResult<()> {
        let rule = rule_text(class_name, group);
        if self.insert_rule(rule) {
            log::debug!("Injected {} for {}", group.key(), class_name);
        }
        Ok(())
    }

    fn retract(&mut self, class_name: &str, group: &SelectorGroup) {
        if self.remove_rule(&rule_text(class_name, group)) {
            log::debug!("Retracted {} for {}", group.key(), class_name);
        }
    }
}
