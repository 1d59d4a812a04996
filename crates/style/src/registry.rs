//! Class Name Registry
//!
//! Memoizes the class name generated for each distinct style fingerprint and
//! injects a class's CSS the first time its fingerprint is seen.
//!
//! Both the prop classification cache and the fingerprint cache grow for the
//! life of the registry and are never evicted; their size is bounded by the
//! number of distinct prop names and distinct style contents observed.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use jotstyle_css::{
    to_base36, DefaultFormatter, SelectorGroup, StyleFormatter, StyleInjector, StyleSheet,
};

use crate::aggregate::aggregate;
use crate::classify::{PrefixClassification, PropClassifier};
use crate::config::RegistryConfig;
use crate::error::StyleResult;
use crate::request::StyleRequest;

/// Saved registry state, handed across a live reload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheSnapshot {
    /// Prop name classifications (`null` for unprefixed names)
    #[serde(default)]
    pub prefixes: FxHashMap<String, Option<PrefixClassification>>,
    /// Fingerprint -> class name
    #[serde(default)]
    pub class_names: FxHashMap<String, String>,
}

impl CacheSnapshot {
    pub fn to_json(&self) -> StyleResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> StyleResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Generates and memoizes class names for style requests
pub struct ClassNameRegistry<F = DefaultFormatter, I = StyleSheet> {
    config: RegistryConfig,
    classifier: PropClassifier,
    /// Fingerprint -> class name
    class_names: FxHashMap<String, String>,
    /// Class name -> fingerprint that owns it
    owners: FxHashMap<String, String>,
    formatter: F,
    injector: I,
}

impl ClassNameRegistry {
    /// Registry with the stock formatter and an in-memory style sheet
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_parts(config, DefaultFormatter, StyleSheet::new())
    }
}

impl Default for ClassNameRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl<F: StyleFormatter, I: StyleInjector> ClassNameRegistry<F, I> {
    pub fn with_parts(config: RegistryConfig, formatter: F, injector: I) -> Self {
        Self {
            config,
            classifier: PropClassifier::new(),
            class_names: FxHashMap::default(),
            owners: FxHashMap::default(),
            formatter,
            injector,
        }
    }

    /// Get the class name for a request.
    ///
    /// Returns the request's explicit class name (or `None`) when it has no
    /// style props. Otherwise returns the generated class name, preceded by
    /// the explicit class name and a space when one was given. CSS is
    /// injected only the first time a fingerprint is seen. If the formatter
    /// or any injection fails, groups already injected for the new class are
    /// retracted and nothing is cached for that fingerprint.
    pub fn class_name(&mut self, request: &StyleRequest) -> StyleResult<Option<String>> {
        let keys = match aggregate(
            &mut self.classifier,
            &self.formatter,
            request,
            self.config.mode.is_pretty(),
        )? {
            Some(keys) => keys,
            None => return Ok(request.get_class_name().map(str::to_string)),
        };

        let generated = match self.class_names.get(&keys.fingerprint) {
            Some(class_name) => class_name.clone(),
            None => {
                let class_name = self.generate_class_name(&keys.fingerprint);
                log::debug!("New class {} for '{}'", class_name, keys.fingerprint);
                self.inject_all(&class_name, keys.groups.values())?;
                self.owners.insert(class_name.clone(), keys.fingerprint.clone());
                self.class_names.insert(keys.fingerprint, class_name.clone());
                class_name
            }
        };

        Ok(Some(match request.get_class_name() {
            Some(explicit) => format!("{} {}", explicit, generated),
            None => generated,
        }))
    }

    /// Get the class name for a JSON request.
    ///
    /// Input that is not an object yields `None`.
    pub fn class_name_for_value(&mut self, value: &Value) -> StyleResult<Option<String>> {
        match StyleRequest::from_value(value) {
            Ok(request) => self.class_name(&request),
            Err(err) if err.is_invalid_request() => {
                log::debug!("Ignoring request: {}", err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Inject every group, retracting the ones already injected if one fails
    fn inject_all<'a>(
        &mut self,
        class_name: &str,
        groups: impl Iterator<Item = &'a SelectorGroup>,
    ) -> StyleResult<()> {
        let mut injected: Vec<&SelectorGroup> = Vec::new();
        for group in groups {
            if let Err(err) = self.injector.inject(class_name, group) {
                log::warn!(
                    "Injection of {} failed after {} group(s); retracting",
                    class_name,
                    injected.len()
                );
                for done in injected.iter().rev() {
                    self.injector.retract(class_name, done);
                }
                return Err(err.into());
            }
            injected.push(group);
        }
        Ok(())
    }

    /// Prefix plus base-36 hash, with a numbered suffix if another
    /// fingerprint already owns that name
    fn generate_class_name(&self, fingerprint: &str) -> String {
        let base = format!(
            "{}{}",
            self.config.class_prefix,
            to_base36(self.formatter.hash(fingerprint))
        );

        let mut candidate = base.clone();
        let mut n = 0u32;
        while let Some(owner) = self.owners.get(&candidate) {
            if owner == fingerprint {
                break;
            }
            n += 1;
            candidate = format!("{}_{}", base, to_base36(n));
        }
        if n > 0 {
            log::warn!(
                "Class name {} already in use by other styles; using {}",
                base,
                candidate
            );
        }
        candidate
    }

    /// Cached class name for a fingerprint
    pub fn cached(&self, fingerprint: &str) -> Option<&str> {
        self.class_names.get(fingerprint).map(String::as_str)
    }

    /// Number of memoized class names
    pub fn len(&self) -> usize {
        self.class_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.class_names.is_empty()
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn classifier(&self) -> &PropClassifier {
        &self.classifier
    }

    pub fn injector(&self) -> &I {
        &self.injector
    }

    pub fn injector_mut(&mut self) -> &mut I {
        &mut self.injector
    }

    /// Copy both caches out
    pub fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot {
            prefixes: self.classifier.entries().clone(),
            class_names: self.class_names.clone(),
        }
    }

    /// Merge saved caches in; entries already present are kept.
    ///
    /// Restored class names are treated as already injected. A saved entry
    /// whose class name is already owned by a different fingerprint here is
    /// dropped, so that fingerprint gets a fresh suffixed name when it is
    /// next requested.
    pub fn restore(&mut self, snapshot: CacheSnapshot) {
        log::debug!(
            "Restoring {} classifications and {} class names",
            snapshot.prefixes.len(),
            snapshot.class_names.len()
        );
        self.classifier.extend(snapshot.prefixes);
        for (fingerprint, class_name) in snapshot.class_names {
            if self.class_names.contains_key(&fingerprint) {
                continue;
            }
            if let Some(owner) = self.owners.get(&class_name) {
                if *owner != fingerprint {
                    log::warn!(
                        "Not restoring {} for '{}': already used for '{}'",
                        class_name,
                        fingerprint,
                        owner
                    );
                    continue;
                }
            }
            self.owners.insert(class_name.clone(), fingerprint.clone());
            self.class_names.insert(fingerprint, class_name);
        }
    }

    /// Forget every classification and class name.
    ///
    /// CSS already handed to the injector is left alone.
    pub fn reset(&mut self) {
        self.classifier.clear();
        self.class_names.clear();
        self.owners.clear();
    }

    /// Take the injector back
    pub fn into_injector(self) -> I {
        self.injector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jotstyle_css::{CssError, CssResult, StyleValue};
    use serde_json::json;

    use crate::config::Mode;
    use crate::error::StyleError;

    /// Injector that records every call
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(String, SelectorGroup)>,
    }

    impl StyleInjector for Recorder {
        fn inject(&mut self, class_name: &str, group: &SelectorGroup) -> CssResult<()> {
            self.calls.push((class_name.to_string(), group.clone()));
            Ok(())
        }

        fn retract(&mut self, class_name: &str, group: &SelectorGroup) {
            self.calls.retain(|(c, g)| !(c == class_name && g == group));
        }
    }

    /// Injector that fails once `remaining` successful injections are used up
    #[derive(Default)]
    struct FailOn<I = StyleSheet> {
        remaining: usize,
        calls: usize,
        injected: Vec<String>,
        retracted: Vec<String>,
        inner: I,
    }

    impl<I: StyleInjector> StyleInjector for FailOn<I> {
        fn inject(&mut self, class_name: &str, group: &SelectorGroup) -> CssResult<()> {
            self.calls += 1;
            if self.remaining == 0 {
                return Err(CssError::injection_failed(class_name, "sheet unavailable"));
            }
            self.remaining -= 1;
            self.injected.push(group.key());
            self.inner.inject(class_name, group)
        }

        fn retract(&mut self, class_name: &str, group: &SelectorGroup) {
            self.retracted.push(group.key());
            self.inner.retract(class_name, group);
        }
    }

    /// Formatter whose hash sends everything to the same bucket
    struct ConstantHash;

    impl StyleFormatter for ConstantHash {
        fn format_value(&self, property: &str, value: &StyleValue) -> CssResult<String> {
            DefaultFormatter.format_value(property, value)
        }

        fn hyphenate(&self, property: &str) -> String {
            DefaultFormatter.hyphenate(property)
        }

        fn hash(&self, _content: &str) -> u32 {
            42
        }
    }

    fn recording_registry() -> ClassNameRegistry<DefaultFormatter, Recorder> {
        let config = RegistryConfig::new().with_mode(Mode::Production);
        ClassNameRegistry::with_parts(config, DefaultFormatter, Recorder::default())
    }

    fn production() -> ClassNameRegistry {
        ClassNameRegistry::new(RegistryConfig::new().with_mode(Mode::Production))
    }

    #[test]
    fn test_generated_name() {
        let mut registry = production();
        let request = StyleRequest::new().prop("color", "red");
        assert_eq!(registry.class_name(&request).unwrap().as_deref(), Some("_jg0zrt6"));
        assert_eq!(registry.cached("color:red;"), Some("_jg0zrt6"));
    }

    #[test]
    fn test_explicit_class_name_passthrough() {
        let mut registry = production();
        let plain = registry
            .class_name(&StyleRequest::new().prop("color", "red"))
            .unwrap()
            .unwrap();
        let with_explicit = registry
            .class_name(&StyleRequest::new().prop("color", "red").class_name("foo"))
            .unwrap()
            .unwrap();
        assert_eq!(with_explicit, format!("foo {}", plain));
    }

    #[test]
    fn test_empty_request_returns_none() {
        let mut registry = production();
        assert_eq!(registry.class_name(&StyleRequest::new()).unwrap(), None);
        assert_eq!(
            registry.class_name(&StyleRequest::new().class_name("foo")).unwrap().as_deref(),
            Some("foo")
        );
        assert!(registry.injector().is_empty());
    }

    #[test]
    fn test_invalid_json_request() {
        let mut registry = production();
        assert_eq!(registry.class_name_for_value(&json!("not-an-object")).unwrap(), None);
        assert_eq!(registry.class_name_for_value(&json!({})).unwrap(), None);
        assert_eq!(
            registry
                .class_name_for_value(&json!({ "className": "foo", "children": [] }))
                .unwrap()
                .as_deref(),
            Some("foo")
        );
    }

    #[test]
    fn test_unsupported_json_value_is_an_error() {
        let mut registry = production();
        let err = registry.class_name_for_value(&json!({ "color": ["red"] })).unwrap_err();
        assert!(matches!(err, StyleError::UnsupportedValue { .. }));
    }

    #[test]
    fn test_order_independence() {
        let mut registry = production();
        let a = registry
            .class_name_for_value(&json!({ "color": "red", "margin": 4, "hoverColor": "blue" }))
            .unwrap();
        let b = registry
            .class_name_for_value(&json!({ "hoverColor": "blue", "margin": 4, "color": "red" }))
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_injects_once_per_group() {
        let mut registry = recording_registry();
        let request = StyleRequest::new()
            .prop("color", "red")
            .prop("hoverColor", "blue")
            .prop("smallColor", "green")
            .media_query("small", "(max-width:600px)");

        let first = registry.class_name(&request).unwrap().unwrap();
        let second = registry.class_name(&request).unwrap().unwrap();
        assert_eq!(first, second);

        let calls = &registry.injector().calls;
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|(class_name, _)| *class_name == first));

        let keys: Vec<String> = calls.iter().map(|(_, group)| group.key()).collect();
        assert_eq!(keys, vec![".", ".:hover", ".@(max-width:600px)"]);
    }

    #[test]
    fn test_different_content_injects_again() {
        let mut registry = recording_registry();
        registry.class_name(&StyleRequest::new().prop("color", "red")).unwrap();
        registry.class_name(&StyleRequest::new().prop("color", "blue")).unwrap();
        assert_eq!(registry.injector().calls.len(), 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_pretty_mode_css() {
        let mut registry = ClassNameRegistry::new(RegistryConfig::new());
        let class_name = registry
            .class_name(&StyleRequest::new().prop("color", "red"))
            .unwrap()
            .unwrap();
        assert_eq!(
            registry.injector().to_css(),
            format!(".{} {{\n  color:red;\n}}\n", class_name)
        );
    }

    #[test]
    fn test_mode_does_not_change_class_name() {
        let request = StyleRequest::new().prop("color", "red").prop("width", 10);
        let mut pretty = ClassNameRegistry::new(RegistryConfig::new());
        let mut compact = production();
        assert_eq!(
            pretty.class_name(&request).unwrap(),
            compact.class_name(&request).unwrap()
        );
    }

    #[test]
    fn test_injection_failure_caches_nothing() {
        let config = RegistryConfig::new().with_mode(Mode::Production);
        let injector: FailOn<StyleSheet> = FailOn { remaining: 1, ..FailOn::default() };
        let mut registry = ClassNameRegistry::with_parts(config, DefaultFormatter, injector);

        let request = StyleRequest::new().prop("color", "red").prop("hoverColor", "blue");
        let err = registry.class_name(&request).unwrap_err();
        assert!(matches!(err, StyleError::Css(CssError::InjectionFailed { .. })));
        assert!(registry.is_empty());

        // The plain group went in before the hover group failed, and was
        // taken back out
        assert_eq!(registry.injector().injected, vec!["."]);
        assert_eq!(registry.injector().retracted, vec!["."]);
        assert!(registry.injector().inner.is_empty());

        registry.injector_mut().remaining = 2;
        let class_name = registry.class_name(&request).unwrap().unwrap();
        assert_eq!(registry.injector().calls, 4);
        assert_eq!(registry.injector().retracted.len(), 1);
        assert_eq!(
            registry.injector().inner.to_css(),
            format!(".{0} {{color:red;}}\n.{0}:hover {{color:blue;}}\n", class_name)
        );
    }

    #[test]
    fn test_injection_failure_keeps_earlier_classes() {
        let config = RegistryConfig::new().with_mode(Mode::Production);
        let injector: FailOn<StyleSheet> = FailOn { remaining: 2, ..FailOn::default() };
        let mut registry = ClassNameRegistry::with_parts(config, DefaultFormatter, injector);

        let first = registry
            .class_name(&StyleRequest::new().prop("color", "red"))
            .unwrap()
            .unwrap();
        let request = StyleRequest::new()
            .prop("color", "blue")
            .prop("hoverColor", "blue")
            .prop("activeColor", "blue");
        assert!(registry.class_name(&request).is_err());

        assert_eq!(registry.injector().retracted, vec!["."]);
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.injector().inner.rules(),
            [format!(".{} {{color:red;}}", first)]
        );
    }

    #[test]
    fn test_format_failure_caches_nothing() {
        let mut registry = recording_registry();
        let request = StyleRequest::new().prop("color", "red").prop("width", f64::NAN);
        assert!(registry.class_name(&request).is_err());
        assert!(registry.is_empty());
        assert!(registry.injector().calls.is_empty());
    }

    #[test]
    fn test_hash_collision_gets_suffix() {
        let config = RegistryConfig::new().with_mode(Mode::Production);
        let mut registry = ClassNameRegistry::with_parts(config, ConstantHash, StyleSheet::new());

        let a = registry.class_name(&StyleRequest::new().prop("color", "red")).unwrap();
        let b = registry.class_name(&StyleRequest::new().prop("color", "blue")).unwrap();
        let c = registry.class_name(&StyleRequest::new().prop("color", "green")).unwrap();
        let a_again = registry.class_name(&StyleRequest::new().prop("color", "red")).unwrap();

        assert_eq!(a.as_deref(), Some("_j16"));
        assert_eq!(b.as_deref(), Some("_j16_1"));
        assert_eq!(c.as_deref(), Some("_j16_2"));
        assert_eq!(a, a_again);
    }

    #[test]
    fn test_custom_prefix() {
        let config = RegistryConfig::new().with_class_prefix("x-");
        let mut registry = ClassNameRegistry::new(config);
        let name = registry.class_name(&StyleRequest::new().prop("color", "red")).unwrap();
        assert_eq!(name.as_deref(), Some("x-g0zrt6"));
    }

    #[test]
    fn test_snapshot_restore_skips_injection() {
        let mut saved = recording_registry();
        let request = StyleRequest::new().prop("hoverColor", "blue");
        let name = saved.class_name(&request).unwrap();

        let json = saved.snapshot().to_json().unwrap();
        let snapshot = CacheSnapshot::from_json(&json).unwrap();
        assert_eq!(snapshot, saved.snapshot());

        let mut reloaded = recording_registry();
        reloaded.restore(snapshot);
        assert_eq!(reloaded.class_name(&request).unwrap(), name);
        assert!(reloaded.injector().calls.is_empty());
        assert_eq!(reloaded.classifier().scans(), 0);
    }

    #[test]
    fn test_restore_keeps_collision_owners() {
        let config = RegistryConfig::new().with_mode(Mode::Production);
        let mut first = ClassNameRegistry::with_parts(config.clone(), ConstantHash, StyleSheet::new());
        first.class_name(&StyleRequest::new().prop("color", "red")).unwrap();

        let mut second = ClassNameRegistry::with_parts(config, ConstantHash, StyleSheet::new());
        second.restore(first.snapshot());
        let other = second.class_name(&StyleRequest::new().prop("color", "blue")).unwrap();
        assert_eq!(other.as_deref(), Some("_j16_1"));
    }

    #[test]
    fn test_restore_skips_names_owned_by_other_styles() {
        let config = RegistryConfig::new().with_mode(Mode::Production);
        let red = StyleRequest::new().prop("color", "red");
        let blue = StyleRequest::new().prop("color", "blue");

        let mut first = ClassNameRegistry::with_parts(config.clone(), ConstantHash, StyleSheet::new());
        assert_eq!(first.class_name(&red).unwrap().as_deref(), Some("_j16"));

        let mut second = ClassNameRegistry::with_parts(config, ConstantHash, StyleSheet::new());
        assert_eq!(second.class_name(&blue).unwrap().as_deref(), Some("_j16"));

        second.restore(first.snapshot());
        assert_eq!(second.cached("color:red;"), None);
        assert_eq!(second.len(), 1);

        let blue_again = second.class_name(&blue).unwrap();
        let red_here = second.class_name(&red).unwrap();
        assert_eq!(blue_again.as_deref(), Some("_j16"));
        assert_eq!(red_here.as_deref(), Some("_j16_1"));
        assert_ne!(blue_again, red_here);
        assert_eq!(
            second.injector().to_css(),
            "._j16 {color:blue;}\n._j16_1 {color:red;}\n"
        );
    }

    #[test]
    fn test_reset() {
        let mut registry = recording_registry();
        let request = StyleRequest::new().prop("color", "red");
        registry.class_name(&request).unwrap();
        registry.reset();
        assert!(registry.is_empty());
        assert!(registry.classifier().is_empty());

        registry.class_name(&request).unwrap();
        assert_eq!(registry.injector().calls.len(), 2);
    }
}
