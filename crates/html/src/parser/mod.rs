//! Fail-fast HTML parser.
//!
//! Single forward pass over the source with one shared [`Cursor`]. Text is
//! accumulated between tags and flushed (entity-decoded) when a `<` is seen. The
//! first syntax error aborts the parse; the tree built so far is still returned.
//!
//! Recognized constructs:
//! - `<!DOCTYPE html>` at offset 0 (any case)
//! - `<!-- ... -->` comments
//! - open tags with whitelisted names, boolean and double-quoted attributes
//! - close tags, which must match the innermost open element
//! - void elements, which never take children
//! - `<style>` content, handed to the `css` crate

use crate::entities::decode_entities;
use crate::error::ParseError;
use crate::tags::{is_known_element, is_void_element};
use crate::tree_builder::TreeBuilder;
use crate::types::ParseResult;
use tools::{Cursor, Span, Token};

#[cfg(test)]
mod tests;

const DOCTYPE: &str = "<!DOCTYPE html>";
const COMMENT_OPEN: &str = "!--";
const COMMENT_CLOSE: &str = "-->";

type ParseStep<T = ()> = Result<T, ParseError>;

/// Parses `source` into a tree, stopping at the first error.
pub fn parse(source: &str) -> ParseResult {
    let mut parser = HtmlParser::new(source);
    let error = parser.run().err();
    if let Some(error) = &error {
        log::debug!(
            target: "html.parser",
            "parse aborted at {}: {}: {error}",
            error.position(),
            error.kind()
        );
    }
    ParseResult {
        document: parser.builder.finish(),
        error,
    }
}

fn is_tag_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '/'
}

struct HtmlParser<'a> {
    cursor: Cursor<'a>,
    builder: TreeBuilder,
}

impl<'a> HtmlParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            builder: TreeBuilder::new(),
        }
    }

    fn run(&mut self) -> ParseStep {
        self.parse_doctype();
        while !self.cursor.at_end() {
            if self.cursor.peek() == Some('<') {
                self.flush_text();
                self.parse_tag()?;
            } else {
                self.cursor.bump();
            }
        }
        self.flush_text();

        match self.builder.current_element() {
            Some(open) => Err(ParseError::UnclosedTag {
                name: open.name.clone(),
                open_tag: open.open_tag,
            }),
            None => Ok(()),
        }
    }

    fn parse_doctype(&mut self) {
        if self.cursor.match_literal(DOCTYPE, true, true) {
            self.builder.set_doctype(Span::new(0, self.cursor.pos()));
            self.cursor.mark_token_start();
        }
    }

    fn flush_text(&mut self) {
        if let Some(token) = self.cursor.take_token() {
            self.builder
                .append_text(decode_entities(token.value).into_owned(), token.span);
        }
    }

    /// Takes the pending token, empty when nothing was scanned since the last mark.
    fn take_raw(&mut self) -> Token<'a> {
        let pos = self.cursor.pos();
        self.cursor.take_token().unwrap_or(Token {
            value: "",
            span: Span::empty_at(pos),
        })
    }

    fn parse_tag(&mut self) -> ParseStep {
        let start = self.cursor.pos();
        self.cursor.bump();
        if self.cursor.match_literal(COMMENT_OPEN, true, false) {
            return self.parse_comment(start);
        }

        self.cursor.mark_token_start();
        self.cursor.eat_space();
        self.cursor.eat_while(is_tag_name_char);
        // `</ p>`: a lone slash may be followed by whitespace and the name.
        if self.cursor.slice(Span::new(self.cursor.token_start(), self.cursor.pos())) == "/" {
            self.cursor.eat_space();
            self.cursor.eat_while(is_tag_name_char);
        }
        let raw = self.take_raw();
        log::trace!(target: "html.parser", "tag {:?} at {start}", raw.value);

        match raw.value.strip_prefix('/') {
            Some(name) => self.parse_close_tag(start, name.trim_start(), raw.span),
            None => self.parse_open_tag(start, raw),
        }
    }

    fn parse_comment(&mut self, start: usize) -> ParseStep {
        let data_start = self.cursor.pos();
        if !self.cursor.eat_through(COMMENT_CLOSE) {
            return Err(ParseError::UnterminatedComment { start });
        }
        let end = self.cursor.pos();
        let data = self
            .cursor
            .slice(Span::new(data_start, end - COMMENT_CLOSE.len()));
        self.builder
            .append_comment(data.to_string(), Span::new(start, end));
        self.cursor.mark_token_start();
        Ok(())
    }

    fn parse_close_tag(&mut self, start: usize, raw_name: &str, raw_span: Span) -> ParseStep {
        let name = raw_name.to_ascii_lowercase();
        let close_tag = Span::new(start, raw_span.end);

        let Some(open) = self.builder.current_element() else {
            return Err(ParseError::UnexpectedCloseTag { name, close_tag });
        };
        if open.name != name {
            return Err(ParseError::MismatchedCloseTag {
                open_name: open.name.clone(),
                open_tag: open.open_tag,
                close_name: name,
                close_tag,
            });
        }

        self.cursor.eat_space();
        if !self.cursor.eat(|c| c == '>') {
            return Err(ParseError::UnterminatedCloseTag {
                name,
                close_tag: Span::new(start, self.cursor.pos()),
            });
        }
        self.builder
            .close_element(Span::new(start, self.cursor.pos()));
        self.builder.pop_element();
        self.cursor.mark_token_start();
        Ok(())
    }

    fn parse_open_tag(&mut self, start: usize, raw: Token<'a>) -> ParseStep {
        if !is_known_element(raw.value) {
            return Err(ParseError::InvalidTagName {
                name: raw.value.to_string(),
                span: raw.span,
            });
        }
        let name = raw.value.to_ascii_lowercase();
        self.builder.push_element(&name, start);

        loop {
            let name_start = self.cursor.pos();
            if self.cursor.eat_while(|c| c.is_ascii_alphabetic()) {
                let span = Span::new(name_start, self.cursor.pos());
                let attr = Token {
                    value: self.cursor.slice(span),
                    span,
                };
                self.parse_attribute(&name, start, attr)?;
            } else if self.cursor.eat_space() {
                continue;
            } else if self.cursor.eat(|c| c == '>') {
                break;
            } else {
                return Err(ParseError::UnterminatedOpenTag {
                    name,
                    open_tag: Span::new(start, self.cursor.pos()),
                });
            }
        }

        self.builder.close_open_tag(self.cursor.pos());
        self.cursor.mark_token_start();
        if is_void_element(&name) {
            self.builder.pop_element();
        } else if name == "style" && !self.cursor.at_end() {
            self.parse_style_content(&name, start)?;
        }
        Ok(())
    }

    fn parse_attribute(&mut self, element: &str, tag_start: usize, attr: Token<'a>) -> ParseStep {
        self.cursor.eat_space();
        if !self.cursor.eat(|c| c == '=') {
            self.builder
                .append_attribute(attr.value, String::new(), attr.span, None);
            return Ok(());
        }

        self.cursor.eat_space();
        let value_start = self.cursor.pos();
        if !self.cursor.eat(|c| c == '"') {
            return Err(ParseError::UnquotedAttrValue {
                position: value_start,
            });
        }
        self.cursor.eat_while(|c| c != '"');
        if !self.cursor.eat(|c| c == '"') {
            return Err(ParseError::UnterminatedAttrValue {
                element: element.to_string(),
                open_tag: Span::new(tag_start, self.cursor.pos()),
                attribute: attr.value.to_string(),
                attribute_span: attr.span,
                value_start,
            });
        }

        let value_span = Span::new(value_start, self.cursor.pos());
        let interior = self
            .cursor
            .slice(Span::new(value_start + 1, value_span.end - 1));
        self.builder.append_attribute(
            attr.value,
            decode_entities(interior).into_owned(),
            attr.span,
            Some(value_span),
        );
        Ok(())
    }

    /// Appends the consumed sheet before raising its error, so a failed parse
    /// still carries the rules completed up to that point.
    fn parse_style_content(&mut self, element: &str, tag_start: usize) -> ParseStep {
        let start = self.cursor.pos();
        let sheet = css::parse_style_content(&mut self.cursor);

        let span = Span::new(start, self.cursor.pos());
        if !span.is_empty() {
            let text = self.cursor.slice(span).to_string();
            self.builder.append_style_text(text, span, sheet.rules);
        }
        self.cursor.mark_token_start();

        match sheet.error {
            Some(err) => Err(ParseError::from_css(err, element, Span::new(tag_start, start))),
            None => Ok(()),
        }
    }
}
