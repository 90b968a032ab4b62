use crate::error::ParseError;
use css::Rule;
use tools::Span;

/// Index of a node in its document's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attribute {
    /// Lowercased name; `name_span` keeps the source casing.
    pub name: String,
    /// Entity-decoded value; empty for boolean attributes.
    pub value: String,
    pub name_span: Span,
    /// Quoted value including both quotes; `None` for boolean attributes.
    pub value_span: Option<Span>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Element {
    /// Lowercased tag name.
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<NodeId>,
    /// `<` through `>` of the open tag.
    pub open_tag: Span,
    /// `</` through `>` of the matching close tag, once seen.
    pub close_tag: Option<Span>,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Text {
    /// Entity-decoded text (raw for `<style>` content).
    pub value: String,
    /// Source span before decoding.
    pub span: Span,
    /// Rules parsed from the content when this is the text of a `<style>` element.
    pub css_rules: Option<Vec<Rule>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Comment {
    /// Raw text between `<!--` and `-->`.
    pub data: String,
    /// Whole comment including delimiters.
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Node {
    Element(Element),
    Text(Text),
    Comment(Comment),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Node::Comment(comment) => Some(comment),
            _ => None,
        }
    }

    pub fn children(&self) -> &[NodeId] {
        match self {
            Node::Element(element) => &element.children,
            Node::Text(_) | Node::Comment(_) => &[],
        }
    }
}

/// Arena-backed parse tree: the implicit top-level fragment plus every node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) doctype: Option<Span>,
}

impl Document {
    /// Top-level nodes in source order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn doctype(&self) -> Option<Span> {
        self.doctype
    }

    /// # Panics
    /// If `id` belongs to another document.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in document (pre-)order with their depth below the fragment.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            document: self,
            stack: self.children.iter().rev().map(|&id| (id, 0)).collect(),
        }
    }

    /// Source extent of a node: an element spans from its open tag to its close tag,
    /// or to the end of its last descendant when it was never closed.
    pub fn extent(&self, id: NodeId) -> Span {
        match self.node(id) {
            Node::Text(text) => text.span,
            Node::Comment(comment) => comment.span,
            Node::Element(element) => {
                let end = match element.close_tag {
                    Some(close) => close.end,
                    None => {
                        let mut end = element.open_tag.end;
                        let mut last = element.children.last().copied();
                        while let Some(child) = last {
                            match self.node(child) {
                                Node::Element(inner) => {
                                    end = inner
                                        .close_tag
                                        .map_or(inner.open_tag.end, |close| close.end);
                                    if inner.close_tag.is_some() {
                                        break;
                                    }
                                    last = inner.children.last().copied();
                                }
                                Node::Text(text) => {
                                    end = text.span.end;
                                    break;
                                }
                                Node::Comment(comment) => {
                                    end = comment.span.end;
                                    break;
                                }
                            }
                        }
                        end
                    }
                };
                Span::new(element.open_tag.start, end)
            }
        }
    }

    /// Innermost node whose extent contains `offset`.
    pub fn node_at(&self, offset: usize) -> Option<NodeId> {
        let mut found = None;
        let mut candidates = self.children.as_slice();
        'descend: loop {
            for &id in candidates {
                if self.extent(id).contains(offset) {
                    found = Some(id);
                    candidates = self.node(id).children();
                    continue 'descend;
                }
            }
            return found;
        }
    }
}

/// Pre-order iterator returned by [`Document::descendants`].
pub struct Descendants<'a> {
    document: &'a Document,
    stack: Vec<(NodeId, usize)>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (NodeId, usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        let node = self.document.node(id);
        self.stack
            .extend(node.children().iter().rev().map(|&child| (child, depth + 1)));
        Some((id, depth, node))
    }
}

/// Outcome of one parse: the (possibly partial) tree plus the first error, if any.
///
/// When `error` is set, the document holds everything consumed before the failure.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParseResult {
    pub document: Document,
    pub error: Option<ParseError>,
}

impl ParseResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
