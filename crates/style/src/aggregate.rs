//! Style Key Aggregation
//!
//! Groups the props of a request by selector key and builds the content
//! fingerprint that identifies the request.

use std::collections::BTreeMap;

use jotstyle_css::{selector_key, SelectorGroup, StyleFormatter};

use crate::classify::PropClassifier;
use crate::request::StyleRequest;
use crate::error::StyleResult;

/// Selector groups and fingerprint for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleKeys {
    /// Groups keyed by composite selector key, in ascending key order
    pub groups: BTreeMap<String, SelectorGroup>,
    /// `name:value;` for every style prop, in prop name order
    pub fingerprint: String,
}

/// Aggregate a request's props into selector groups.
///
/// Returns `None` when the request has no style props. Media query prefixes
/// are resolved against this request only, so a prop classified with a
/// prefix the request does not define lands in the group without a media
/// query. With `pretty` set each declaration goes on its own indented line.
pub fn aggregate<F: StyleFormatter>(
    classifier: &mut PropClassifier,
    formatter: &F,
    request: &StyleRequest,
    pretty: bool,
) -> StyleResult<Option<StyleKeys>> {
    if !request.has_style_props() {
        return Ok(None);
    }

    let media_queries = request.media_queries();
    let mut keys = StyleKeys::default();

    for (original_name, value) in request.style_props() {
        let classification =
            classifier.classify(original_name, |prefix| media_queries.contains_key(prefix));

        let (property, media_query, pseudoclass, pseudoelement) = match classification {
            Some(c) => (
                c.property_name.as_str(),
                c.media_query_prefix
                    .as_deref()
                    .and_then(|prefix| request.resolve_media_query(prefix)),
                c.pseudoclass.as_deref(),
                c.pseudoelement.as_deref(),
            ),
            None => (original_name, None, None, None),
        };

        let formatted = formatter.format_value(property, value)?;

        let key = selector_key(media_query, pseudoclass, pseudoelement);
        let group = keys.groups.entry(key).or_insert_with(|| {
            let mut group = SelectorGroup::new(media_query, pseudoclass, pseudoelement);
            if pretty {
                group.css.push('\n');
            }
            group
        });

        if pretty {
            group.css.push_str("  ");
        }
        group.css.push_str(&formatter.hyphenate(property));
        group.css.push(':');
        group.css.push_str(&formatted);
        group.css.push(';');
        if pretty {
            group.css.push('\n');
        }

        keys.fingerprint.push_str(original_name);
        keys.fingerprint.push(':');
        keys.fingerprint.push_str(&formatted);
        keys.fingerprint.push(';');
    }

    Ok(Some(keys))
}
