//! Line-per-node text rendering of parse results.
//!
//! Format `slowparse-tree-v1`, one node per line, two spaces of indent per level:
//!
//! ```text
//! doctype [0..15]
//! <p> [15..30] close [41..45]
//!   @class="foo" [18..23] [24..29]
//!   "hello there" [30..41]
//! comment " note " [45..58]
//! error: NONE
//! ```
//!
//! `<style>` text is followed by its rules (`rule`) and declarations (`decl`).
//! The trailing `error:` line is only emitted by [`snapshot`].

use crate::types::{Document, Node, ParseResult};
use std::fmt::Write;
use tools::Span;

pub const SNAPSHOT_FORMAT: &str = "slowparse-tree-v1";

const INDENT_STEP: &str = "  ";

/// Renders `document`. With `spans` off the output only depends on tree shape and
/// values, which makes it usable for comparing trees parsed from different sources.
pub fn outline(document: &Document, source: &str, spans: bool) -> Vec<String> {
    let mut out = Vec::with_capacity(document.len() + 1);
    if let Some(doctype) = document.doctype() {
        let mut line = String::from("doctype");
        push_span(&mut line, spans, doctype);
        out.push(line);
    }

    for (_, depth, node) in document.descendants() {
        let indent = INDENT_STEP.repeat(depth);
        match node {
            Node::Element(element) => {
                let mut line = format!("{indent}<{}>", element.name);
                push_span(&mut line, spans, element.open_tag);
                if spans {
                    match element.close_tag {
                        Some(close) => {
                            let _ = write!(line, " close [{close}]");
                        }
                        None => line.push_str(" close -"),
                    }
                }
                out.push(line);

                for attr in &element.attributes {
                    let mut line = format!("{indent}{INDENT_STEP}@{}", attr.name);
                    if attr.value_span.is_some() {
                        line.push('=');
                        push_quoted(&mut line, &attr.value);
                    }
                    push_span(&mut line, spans, attr.name_span);
                    if let Some(value_span) = attr.value_span {
                        push_span(&mut line, spans, value_span);
                    }
                    out.push(line);
                }
            }
            Node::Text(text) => {
                let mut line = indent.clone();
                push_quoted(&mut line, &text.value);
                push_span(&mut line, spans, text.span);
                out.push(line);

                for rule in text.css_rules.iter().flatten() {
                    let mut line = format!("{indent}{INDENT_STEP}rule ");
                    push_quoted(&mut line, slice(source, rule.selector));
                    push_span(&mut line, spans, rule.selector);
                    push_span(&mut line, spans, rule.declarations.span());
                    out.push(line);

                    for decl in &rule.declarations.properties {
                        let mut line = format!(
                            "{indent}{INDENT_STEP}{INDENT_STEP}decl {}: ",
                            slice(source, decl.name)
                        );
                        push_quoted(&mut line, slice(source, decl.value));
                        push_span(&mut line, spans, decl.name);
                        push_span(&mut line, spans, decl.value);
                        out.push(line);
                    }
                }
            }
            Node::Comment(comment) => {
                let mut line = format!("{indent}comment ");
                push_quoted(&mut line, &comment.data);
                push_span(&mut line, spans, comment.span);
                out.push(line);
            }
        }
    }
    out
}

/// [`outline`] with spans plus a final `error:` line naming the error kind and
/// its highlights, or `NONE`.
pub fn snapshot(result: &ParseResult, source: &str) -> Vec<String> {
    let mut out = outline(&result.document, source, true);
    let mut line = String::from("error: ");
    match &result.error {
        Some(error) => {
            line.push_str(error.kind().as_str());
            for span in error.highlights() {
                push_span(&mut line, true, span);
            }
        }
        None => line.push_str("NONE"),
    }
    out.push(line);
    out
}

fn push_span(line: &mut String, enabled: bool, span: Span) {
    if enabled {
        let _ = write!(line, " [{span}]");
    }
}

fn slice(source: &str, span: Span) -> &str {
    span.slice(source).unwrap_or("")
}

/// Appends `text` in double quotes, escaped the way `{:?}` escapes a char
/// except that single quotes are left alone.
fn push_quoted(line: &mut String, text: &str) {
    line.push('"');
    for ch in text.chars() {
        match ch {
            '\'' => line.push(ch),
            _ => line.extend(ch.escape_debug()),
        }
    }
    line.push('"');
}
