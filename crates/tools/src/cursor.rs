//! Character cursor over an immutable source string.
//!
//! Both the HTML parser and the CSS sub-parser drive the same `Cursor`, so every
//! span they produce is relative to the one shared source.

use crate::span::Span;
use memchr::memmem;

/// A slice of the source taken between `token_start` and the scan position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub value: &'a str,
    pub span: Span,
}

/// Scan position plus a pending token start marker.
///
/// Invariant: `token_start <= pos <= source.len()` and both positions are UTF-8
/// char boundaries. The position never moves backwards.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: usize,
    token_start: usize,
}

/// Whitespace accepted between tokens: space, tab, and newline (with CR and form
/// feed counted as parts of a line break).
pub fn is_space(c: char) -> bool {
    c.is_ascii_whitespace()
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            token_start: 0,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn token_start(&self) -> usize {
        self.token_start
    }

    pub fn at_end(&self) -> bool {
        self.pos == self.source.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    /// Returns the current char and advances past it.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub fn eat(&mut self, pred: impl Fn(char) -> bool) -> bool {
        match self.peek() {
            Some(c) if pred(c) => {
                self.pos += c.len_utf8();
                true
            }
            _ => false,
        }
    }

    /// Consumes chars while `pred` holds; true if at least one was consumed.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> bool {
        let start = self.pos;
        while self.eat(&pred) {}
        self.pos > start
    }

    pub fn eat_space(&mut self) -> bool {
        self.eat_while(is_space)
    }

    pub fn mark_token_start(&mut self) {
        self.token_start = self.pos;
    }

    /// Takes the text between the token start and the scan position.
    ///
    /// Returns `None` for an empty token. Either way the token start moves to the
    /// scan position.
    pub fn take_token(&mut self) -> Option<Token<'a>> {
        if self.pos == self.token_start {
            return None;
        }
        let span = Span::new(self.token_start, self.pos);
        self.token_start = self.pos;
        Some(Token {
            value: &self.source[span.start..span.end],
            span,
        })
    }

    /// Tests whether `literal` occurs at the scan position, consuming it on a match
    /// when `consume` is set.
    pub fn match_literal(&mut self, literal: &str, consume: bool, case_fold: bool) -> bool {
        let Some(candidate) = self.source.get(self.pos..self.pos + literal.len()) else {
            return false;
        };
        let matched = if case_fold {
            candidate.eq_ignore_ascii_case(literal)
        } else {
            candidate == literal
        };
        if matched && consume {
            self.pos += literal.len();
        }
        matched
    }

    /// Consumes up to and including the next occurrence of `literal`.
    ///
    /// When `literal` does not occur, consumes the rest of the input and returns false.
    pub fn eat_through(&mut self, literal: &str) -> bool {
        let rest = &self.source.as_bytes()[self.pos..];
        match memmem::find(rest, literal.as_bytes()) {
            Some(offset) => {
                self.pos += offset + literal.len();
                true
            }
            None => {
                self.pos = self.source.len();
                false
            }
        }
    }

    pub fn slice(&self, span: Span) -> &'a str {
        &self.source[span.start..span.end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_walks_chars_and_stops_at_end() {
        let mut cursor = Cursor::new("aé");
        assert_eq!(cursor.bump(), Some('a'));
        assert_eq!(cursor.bump(), Some('é'));
        assert_eq!(cursor.pos(), 3);
        assert!(cursor.at_end());
        assert_eq!(cursor.bump(), None);
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn eat_while_reports_progress() {
        let mut cursor = Cursor::new("abc123");
        assert!(cursor.eat_while(|c| c.is_ascii_alphabetic()));
        assert!(!cursor.eat_while(|c| c.is_ascii_alphabetic()));
        assert_eq!(cursor.pos(), 3);
    }

    #[test]
    fn eat_space_covers_tabs_and_newlines() {
        let mut cursor = Cursor::new(" \t\r\n x");
        assert!(cursor.eat_space());
        assert_eq!(cursor.peek(), Some('x'));
    }

    #[test]
    fn take_token_returns_span_and_resets() {
        let mut cursor = Cursor::new("hello world");
        cursor.eat_while(|c| c != ' ');
        let token = cursor.take_token().expect("token");
        assert_eq!(token.value, "hello");
        assert_eq!(token.span, Span::new(0, 5));
        assert_eq!(cursor.take_token(), None);
        cursor.eat_space();
        let token = cursor.take_token().expect("token");
        assert_eq!(token.span, Span::new(5, 6));
    }

    #[test]
    fn match_literal_folds_case_only_when_asked() {
        let mut cursor = Cursor::new("<!doctype html>");
        assert!(!cursor.match_literal("<!DOCTYPE html>", false, false));
        assert!(cursor.match_literal("<!DOCTYPE html>", false, true));
        assert_eq!(cursor.pos(), 0);
        assert!(cursor.match_literal("<!DOCTYPE html>", true, true));
        assert!(cursor.at_end());
    }

    #[test]
    fn match_literal_past_end_is_false() {
        let mut cursor = Cursor::new("<!-");
        assert!(!cursor.match_literal("<!--", true, false));
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn eat_through_consumes_terminator() {
        let mut cursor = Cursor::new("abc-->rest");
        assert!(cursor.eat_through("-->"));
        assert_eq!(cursor.pos(), 6);
        assert!(!cursor.eat_through("-->"));
        assert!(cursor.at_end());
    }
}
