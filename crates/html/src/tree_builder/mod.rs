//! Arena tree construction driven by the parser.
//!
//! The builder owns the node arena and the stack of open elements. New nodes are
//! always appended to the current open element, or to the top-level fragment when
//! the stack is empty; nothing here reorders or repairs the tree.

mod stack;

use crate::types::{Attribute, Comment, Document, Element, Node, NodeId, Text};
use css::Rule;
use stack::OpenElementsStack;
use tools::Span;

#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
    children: Vec<NodeId>,
    doctype: Option<Span>,
    open: OpenElementsStack,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn append_child(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        match self.open.current() {
            Some(parent) => self.element_mut(parent).children.push(id),
            None => self.children.push(id),
        }
        id
    }

    fn element_mut(&mut self, id: NodeId) -> &mut Element {
        match &mut self.nodes[id.index()] {
            Node::Element(element) => element,
            _ => unreachable!("open element stack only holds elements"),
        }
    }

    /// Appends an element whose open tag starts at `open_tag_start` and makes it current.
    ///
    /// The open tag span stays empty until [`TreeBuilder::close_open_tag`].
    pub fn push_element(&mut self, name: &str, open_tag_start: usize) -> NodeId {
        let id = self.append_child(Node::Element(Element {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
            open_tag: Span::empty_at(open_tag_start),
            close_tag: None,
        }));
        self.open.push(id);
        log::trace!(target: "html.parser", "open <{name}> at {open_tag_start}");
        id
    }

    /// Records the `>` of the current element's open tag.
    pub fn close_open_tag(&mut self, end: usize) {
        let Some(current) = self.open.current() else {
            debug_assert!(false, "close_open_tag without an open element");
            return;
        };
        let element = self.element_mut(current);
        element.open_tag = Span::new(element.open_tag.start, end);
    }

    /// Records the close tag of the current element. Does not pop it.
    pub fn close_element(&mut self, close_tag: Span) {
        let Some(current) = self.open.current() else {
            debug_assert!(false, "close_element without an open element");
            return;
        };
        self.element_mut(current).close_tag = Some(close_tag);
    }

    pub fn pop_element(&mut self) -> Option<NodeId> {
        let id = self.open.pop()?;
        log::trace!(target: "html.parser", "pop {id:?}, depth {}", self.open.len());
        Some(id)
    }

    /// Sets an attribute on the current element.
    ///
    /// The name is lowercased. A repeated name overwrites the earlier value and spans
    /// in place, keeping its original position in the attribute list.
    pub fn append_attribute(
        &mut self,
        name: &str,
        value: String,
        name_span: Span,
        value_span: Option<Span>,
    ) {
        let Some(current) = self.open.current() else {
            debug_assert!(false, "append_attribute without an open element");
            return;
        };
        let attribute = Attribute {
            name: name.to_ascii_lowercase(),
            value,
            name_span,
            value_span,
        };
        let attributes = &mut self.element_mut(current).attributes;
        match attributes.iter_mut().find(|a| a.name == attribute.name) {
            Some(existing) => *existing = attribute,
            None => attributes.push(attribute),
        }
    }

    pub fn append_text(&mut self, value: String, span: Span) -> NodeId {
        self.append_child(Node::Text(Text {
            value,
            span,
            css_rules: None,
        }))
    }

    /// Appends the text of a `<style>` element together with its parsed rules.
    pub fn append_style_text(&mut self, value: String, span: Span, rules: Vec<Rule>) -> NodeId {
        self.append_child(Node::Text(Text {
            value,
            span,
            css_rules: Some(rules),
        }))
    }

    pub fn append_comment(&mut self, data: String, span: Span) -> NodeId {
        self.append_child(Node::Comment(Comment { data, span }))
    }

    pub fn set_doctype(&mut self, span: Span) {
        self.doctype = Some(span);
    }

    pub fn current_element(&self) -> Option<&Element> {
        let id = self.open.current()?;
        self.nodes[id.index()].as_element()
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn finish(self) -> Document {
        log::debug!(
            target: "html.parser",
            "built {} nodes, max depth {}, {} left open",
            self.nodes.len(),
            self.open.max_depth(),
            self.open.len()
        );
        Document {
            nodes: self.nodes,
            children: self.children,
            doctype: self.doctype,
        }
    }
}
