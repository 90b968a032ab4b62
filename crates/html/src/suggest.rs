//! "Did you mean" lookups against the element and property lexicons.

use crate::tags::HTML_ELEMENT_NAMES;
use css::CSS_PROPERTY_NAMES;

/// Lexicon entries containing `name` (trimmed, ASCII case-insensitive), in lexicon order.
pub fn suggestions(name: &str, lexicon: &'static [&'static str]) -> Vec<&'static str> {
    let needle = name.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    lexicon
        .iter()
        .copied()
        .filter(|entry| entry.contains(needle.as_str()))
        .collect()
}

pub fn element_suggestions(name: &str) -> Vec<&'static str> {
    suggestions(name, HTML_ELEMENT_NAMES)
}

pub fn property_suggestions(name: &str) -> Vec<&'static str> {
    suggestions(name, CSS_PROPERTY_NAMES)
}
