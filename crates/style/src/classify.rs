//! Prop Classification
//!
//! Splits prop names like `smallHoverColor` into a media query prefix,
//! pseudo-element, pseudo-class and the underlying CSS property.
//!
//! Prefixes are read left to right across the camelCase humps of the name,
//! in the fixed order media query, pseudo-element, pseudo-class. A stage that
//! does not match leaves the current segment for the next stage; the last
//! segment is always part of the property name.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Pseudo-elements recognised as prop prefixes
pub const PSEUDOELEMENTS: [&str; 3] = ["after", "before", "placeholder"];

/// Pseudo-classes recognised as prop prefixes
pub const PSEUDOCLASSES: [&str; 11] = [
    "active", "checked", "disabled", "empty", "enabled", "focus", "hover", "invalid", "required",
    "target", "valid",
];

/// Prefixes found on a prop name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefixClassification {
    /// Media query prefix, resolved per request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_query_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pseudoelement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pseudoclass: Option<String>,
    /// Property name with all prefixes removed
    pub property_name: String,
}

/// CamelCase segmentation of a prop name
struct Humps<'a> {
    name: &'a str,
    /// Byte offsets of every ASCII capital
    caps: SmallVec<[usize; 4]>,
}

impl<'a> Humps<'a> {
    fn new(name: &'a str) -> Self {
        let caps = name
            .bytes()
            .enumerate()
            .filter(|(_, b)| b.is_ascii_uppercase())
            .map(|(i, _)| i)
            .collect();
        Self { name, caps }
    }

    /// Candidate prefix after `consumed` prefixes have been taken.
    ///
    /// A candidate must be followed by another hump; the leading segment must
    /// also be non-empty.
    fn candidate(&self, consumed: usize) -> Option<String> {
        if consumed == 0 {
            match self.caps.first() {
                Some(&end) if end > 0 => Some(self.name[..end].to_string()),
                _ => None,
            }
        } else if self.caps.len() > consumed {
            let segment = &self.name[self.caps[consumed - 1]..self.caps[consumed]];
            Some(lower_first(segment))
        } else {
            None
        }
    }

    /// Name left over once `consumed` (at least one) prefixes are removed
    fn remainder(&self, consumed: usize) -> String {
        lower_first(&self.name[self.caps[consumed - 1]..])
    }
}

fn lower_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(segment.len());
            out.push(first.to_ascii_lowercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Memoizing prop name classifier
#[derive(Debug, Default, Clone)]
pub struct PropClassifier {
    /// Original prop name -> classification (`None` for unprefixed names)
    cache: FxHashMap<String, Option<PrefixClassification>>,
    /// Number of times a name was actually scanned
    scans: usize,
}

impl PropClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a prop name.
    ///
    /// `is_media_prefix` reports whether a candidate is a media query prefix
    /// in the current request. The result is cached under the prop name and
    /// reused for every later call, whatever media queries are in scope then.
    /// Returns `None` when the name carries no prefix.
    pub fn classify(
        &mut self,
        name: &str,
        is_media_prefix: impl Fn(&str) -> bool,
    ) -> Option<&PrefixClassification> {
        if !self.cache.contains_key(name) {
            let classification = self.scan(name, is_media_prefix);
            self.cache.insert(name.to_string(), classification);
        }
        self.cache.get(name).and_then(Option::as_ref)
    }

    fn scan(
        &mut self,
        name: &str,
        is_media_prefix: impl Fn(&str) -> bool,
    ) -> Option<PrefixClassification> {
        self.scans += 1;

        let humps = Humps::new(name);
        let mut consumed = 0;
        let mut candidate = humps.candidate(consumed);

        let mut media_query_prefix = None;
        if candidate.as_deref().is_some_and(&is_media_prefix) {
            media_query_prefix = candidate.take();
            consumed += 1;
            candidate = humps.candidate(consumed);
        }

        let mut pseudoelement = None;
        if candidate.as_deref().is_some_and(|p| PSEUDOELEMENTS.contains(&p)) {
            pseudoelement = candidate.take();
            consumed += 1;
            candidate = humps.candidate(consumed);
        }

        let mut pseudoclass = None;
        if candidate.as_deref().is_some_and(|p| PSEUDOCLASSES.contains(&p)) {
            pseudoclass = candidate.take();
            consumed += 1;
        }

        if consumed == 0 {
            log::trace!("No prefix on '{}'", name);
            return None;
        }

        let classification = PrefixClassification {
            media_query_prefix,
            pseudoelement,
            pseudoclass,
            property_name: humps.remainder(consumed),
        };
        log::trace!("Classified '{}' as {:?}", name, classification);
        Some(classification)
    }

    /// How many names have been scanned rather than served from cache
    pub fn scans(&self) -> usize {
        self.scans
    }

    /// Number of cached prop names
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Cached classifications
    pub fn entries(&self) -> &FxHashMap<String, Option<PrefixClassification>> {
        &self.cache
    }

    /// Merge previously saved classifications; existing entries win
    pub fn extend(
        &mut self,
        entries: impl IntoIterator<Item = (String, Option<PrefixClassification>)>,
    ) {
        for (name, classification) in entries {
            self.cache.entry(name).or_insert(classification);
        }
    }

    pub fn clear(&mut self) {
        self.cache.clear();
        self.scans = 0;
    }
}
