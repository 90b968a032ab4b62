//! Fail-fast, position-annotated HTML parsing with embedded `<style>` support.
//!
//! [`parse`] returns a [`ParseResult`]: the tree built so far plus at most one
//! [`ParseError`]. Every node, attribute, and CSS construct carries byte-offset
//! [`Span`]s into the source so an editor can highlight what went wrong.

pub mod debug;
pub mod entities;
pub mod error;
pub mod help;
pub mod perf_fixtures;
pub mod serialize;
pub mod suggest;
pub mod tags;

mod parser;
mod tree_builder;
mod types;

pub use crate::error::{ErrorKind, ParseError};
pub use crate::help::{HelpEntry, HelpIndex};
pub use crate::parser::parse;
pub use crate::tags::HTML_ELEMENT_NAMES;
pub use crate::tree_builder::TreeBuilder;
pub use crate::types::{
    Attribute, Comment, Descendants, Document, Element, Node, NodeId, ParseResult, Text,
};
pub use css::{CSS_PROPERTY_NAMES, Declaration, DeclarationBlock, Rule};
pub use tools::{Span, line_col};
