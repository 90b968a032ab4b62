//! Declaration-block parser for `<style>` element content.
//!
//! Grammar (single pass, no selector or value validation):
//!
//! ```text
//! sheet        -> (ws? selector "{" declarations)* ws?
//! declarations -> ws? ( "}" | name ":" value (";" declarations | "}") )
//! ```
//!
//! Scanning stops at the first `<`, which belongs to the html parser (the
//! `</style>` close tag); it is never consumed here.

use crate::error::CssError;
use crate::properties::is_property_name;
use tools::{Cursor, Span, trim_span};

/// A single CSS property: `color: red`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Declaration {
    /// Trimmed property name.
    pub name: Span,
    /// Trimmed property value.
    pub value: Span,
}

/// The `{ ... }` part of a rule.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeclarationBlock {
    /// Offset of `{`.
    pub start: usize,
    /// Offset just past `}`.
    pub end: usize,
    pub properties: Vec<Declaration>,
}

impl DeclarationBlock {
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

/// Selector and its declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rule {
    pub selector: Span,
    pub declarations: DeclarationBlock,
}

/// Rules parsed from one `<style>` element.
///
/// On error, `rules` holds every rule completed before the failure and the cursor
/// is left where scanning stopped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleSheet {
    pub rules: Vec<Rule>,
    pub error: Option<CssError>,
}

impl StyleSheet {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Parses rules from the cursor position up to the next `<` or end of input.
pub fn parse_style_content(cursor: &mut Cursor<'_>) -> StyleSheet {
    let mut parser = StyleParser {
        cursor,
        rules: Vec::new(),
    };
    let error = parser.parse_rules().err();
    StyleSheet {
        rules: parser.rules,
        error,
    }
}

struct StyleParser<'c, 'a> {
    cursor: &'c mut Cursor<'a>,
    rules: Vec<Rule>,
}

impl StyleParser<'_, '_> {
    /// Scans until one of `stops` or end of input; returns the scanned span and the
    /// stop char (not consumed).
    fn scan_until(&mut self, stops: &[char]) -> (Span, Option<char>) {
        let start = self.cursor.pos();
        self.cursor.eat_while(|c| !stops.contains(&c));
        (Span::new(start, self.cursor.pos()), self.cursor.peek())
    }

    fn trimmed(&self, raw: Span) -> Span {
        trim_span(self.cursor.slice(raw), raw)
    }

    fn parse_rules(&mut self) -> Result<(), CssError> {
        loop {
            self.cursor.eat_space();
            let (raw, stop) = self.scan_until(&['{', '}', '<']);
            let selector = self.trimmed(raw);
            match stop {
                Some('{') => {
                    if selector.is_empty() {
                        return Err(CssError::InvalidSelectorName { span: selector });
                    }
                    let block_start = self.cursor.pos();
                    self.cursor.bump();
                    let declarations = self.parse_declarations(selector, block_start)?;
                    log::trace!(
                        target: "css.syntax",
                        "rule {selector} with {} declarations",
                        declarations.properties.len()
                    );
                    self.rules.push(Rule {
                        selector,
                        declarations,
                    });
                }
                // Stray `}` between rules: skipped.
                Some('}') if selector.is_empty() => {
                    self.cursor.bump();
                }
                None | Some('<') if selector.is_empty() => return Ok(()),
                _ => return Err(CssError::MissingBlockOpener { selector }),
            }
        }
    }

    fn parse_declarations(
        &mut self,
        selector: Span,
        block_start: usize,
    ) -> Result<DeclarationBlock, CssError> {
        let mut properties = Vec::new();
        loop {
            self.cursor.eat_space();
            if self.cursor.peek() == Some('}') {
                self.cursor.bump();
                return Ok(DeclarationBlock {
                    start: block_start,
                    end: self.cursor.pos(),
                    properties,
                });
            }

            let (raw, stop) = self.scan_until(&['}', '<', ';', ':']);
            if stop != Some(':') {
                return Err(CssError::InvalidDeclaration {
                    selector_start: selector.start,
                    end: self.cursor.pos(),
                });
            }

            let name = self.trimmed(raw);
            let name_text = self.cursor.slice(name);
            if !is_property_name(name_text) {
                return Err(CssError::InvalidPropertyName {
                    name: name_text.to_string(),
                    span: name,
                });
            }
            self.cursor.bump();

            let (raw_value, stop) = self.scan_until(&['}', '<', ';']);
            let value = self.trimmed(raw_value);
            properties.push(Declaration { name, value });

            match stop {
                Some(';') => {
                    self.cursor.bump();
                }
                Some('}') => {
                    self.cursor.bump();
                    return Ok(DeclarationBlock {
                        start: block_start,
                        end: self.cursor.pos(),
                        properties,
                    });
                }
                _ => {
                    return Err(CssError::InvalidRule {
                        property_start: name.start,
                        end: self.cursor.pos(),
                    });
                }
            }
        }
    }
}
