use std::collections::{HashMap, HashSet};

/// Allow-list applied to extended-metadata values. Immutable after
/// construction; the handful of tags Commons descriptions actually use.
#[derive(Debug, Clone, Copy)]
pub struct SanitizeRules {
    pub tags: &'static [&'static str],
    pub attributes: &'static [(&'static str, &'static [&'static str])],
}

impl Default for SanitizeRules {
    fn default() -> Self {
        Self {
            tags: &["a", "b", "br", "i", "img", "p", "span"],
            attributes: &[("a", &["href"]), ("img", &["src", "alt"])],
        }
    }
}

/// Restricts rich-text metadata to an allow-listed markup subset.
///
/// Disallowed tags are stripped (their text content kept, except for
/// script/style whose content is dropped), disallowed attributes removed,
/// and the output is always well-formed. Sanitization is idempotent.
pub struct Sanitizer {
    builder: ammonia::Builder<'static>,
}

impl Sanitizer {
    pub fn new(rules: SanitizeRules) -> Self {
        let mut builder = ammonia::Builder::default();
        builder
            .tags(HashSet::from_iter(rules.tags.iter().copied()))
            .tag_attributes(
                rules
                    .attributes
                    .iter()
                    .map(|&(tag, attrs)| (tag, HashSet::from_iter(attrs.iter().copied())))
                    .collect::<HashMap<_, _>>(),
            )
            .generic_attributes(HashSet::new())
            // Links come back exactly as allowed; no injected rel attribute.
            .link_rel(None);
        Self { builder }
    }

    pub fn sanitize(&self, raw: &str) -> String {
        self.builder.clean(raw).to_string()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(SanitizeRules::default())
    }
}
