//! Turns a parsed [`Document`] back into HTML.
//!
//! Output re-parses to an isomorphic tree: text escapes `& < >`, attribute values
//! escape `& "`, and `<style>` text and comment data are written verbatim. Source
//! formatting inside tags (attribute whitespace, name casing) is not preserved.

use crate::tags::is_void_element;
use crate::types::{Document, Element, Node, NodeId};

enum Step {
    Enter(NodeId),
    Leave(NodeId),
}

pub fn to_html(document: &Document) -> String {
    let mut out = String::new();
    if document.doctype().is_some() {
        out.push_str("<!DOCTYPE html>");
    }

    // Explicit stack; documents may nest deeper than the call stack allows.
    let mut stack: Vec<Step> = document
        .children()
        .iter()
        .rev()
        .map(|&id| Step::Enter(id))
        .collect();
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(id) => match document.node(id) {
                Node::Element(element) => {
                    write_open_tag(element, &mut out);
                    if is_void_element(&element.name) {
                        continue;
                    }
                    stack.push(Step::Leave(id));
                    stack.extend(element.children.iter().rev().map(|&child| Step::Enter(child)));
                }
                Node::Text(text) => {
                    if text.css_rules.is_some() {
                        out.push_str(&text.value);
                    } else {
                        escape_into(&text.value, false, &mut out);
                    }
                }
                Node::Comment(comment) => {
                    out.push_str("<!--");
                    out.push_str(&comment.data);
                    out.push_str("-->");
                }
            },
            Step::Leave(id) => {
                if let Node::Element(element) = document.node(id) {
                    out.push_str("</");
                    out.push_str(&element.name);
                    out.push('>');
                }
            }
        }
    }
    out
}

fn write_open_tag(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.name);
    for attr in &element.attributes {
        out.push(' ');
        out.push_str(&attr.name);
        if attr.value_span.is_some() {
            out.push_str("=\"");
            escape_into(&attr.value, true, out);
            out.push('"');
        }
    }
    out.push('>');
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}
