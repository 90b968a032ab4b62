//! Maps source offsets to the construct under an editor cursor.

use crate::types::{Document, Node};
use tools::Span;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum HelpEntry {
    /// An element's open tag and, when present, its close tag.
    Tag { name: String, highlights: Vec<Span> },
    CssSelector { highlight: Span },
    /// Lowercased property name.
    CssProperty { name: String, highlight: Span },
}

impl HelpEntry {
    pub fn highlights(&self) -> &[Span] {
        match self {
            HelpEntry::Tag { highlights, .. } => highlights,
            HelpEntry::CssSelector { highlight } | HelpEntry::CssProperty { highlight, .. } => {
                std::slice::from_ref(highlight)
            }
        }
    }
}

/// Help entries in document order; inner constructs come after outer ones.
#[derive(Clone, Debug, Default)]
pub struct HelpIndex {
    entries: Vec<HelpEntry>,
}

impl HelpIndex {
    pub fn build(document: &Document, source: &str) -> Self {
        let mut entries = Vec::new();
        for (_, _, node) in document.descendants() {
            match node {
                Node::Element(element) => {
                    let mut highlights = vec![element.open_tag];
                    highlights.extend(element.close_tag);
                    entries.push(HelpEntry::Tag {
                        name: element.name.clone(),
                        highlights,
                    });
                }
                Node::Text(text) => {
                    for rule in text.css_rules.iter().flatten() {
                        entries.push(HelpEntry::CssSelector {
                            highlight: rule.selector,
                        });
                        for decl in &rule.declarations.properties {
                            let name = decl.name.slice(source).unwrap_or("");
                            entries.push(HelpEntry::CssProperty {
                                name: name.to_ascii_lowercase(),
                                highlight: decl.name,
                            });
                        }
                    }
                }
                Node::Comment(_) => {}
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[HelpEntry] {
        &self.entries
    }

    /// Innermost entry with a highlight covering `offset`.
    pub fn lookup(&self, offset: usize) -> Option<&HelpEntry> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.highlights().iter().any(|span| span.contains(offset)))
    }
}
