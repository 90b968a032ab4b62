//! The closed set of parse failures.
//!
//! Every error carries enough source positions to highlight the offending
//! construct; [`ParseError::highlights`] flattens them into spans in the order an
//! editor should draw them.

use css::CssError;
use tools::Span;

/// Stable identifier of an error variant, as shown to users and in fixtures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ErrorKind {
    UnclosedTag,
    UnexpectedCloseTag,
    MismatchedCloseTag,
    InvalidTagName,
    UnterminatedOpenTag,
    UnterminatedCloseTag,
    UnquotedAttrValue,
    UnterminatedAttrValue,
    UnterminatedComment,
    InvalidCssSelectorName,
    MissingCssBlockOpener,
    InvalidCssDeclaration,
    InvalidCssPropertyName,
    InvalidCssRule,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UnclosedTag => "UNCLOSED_TAG",
            ErrorKind::UnexpectedCloseTag => "UNEXPECTED_CLOSE_TAG",
            ErrorKind::MismatchedCloseTag => "MISMATCHED_CLOSE_TAG",
            ErrorKind::InvalidTagName => "INVALID_TAG_NAME",
            ErrorKind::UnterminatedOpenTag => "UNTERMINATED_OPEN_TAG",
            ErrorKind::UnterminatedCloseTag => "UNTERMINATED_CLOSE_TAG",
            ErrorKind::UnquotedAttrValue => "UNQUOTED_ATTR_VALUE",
            ErrorKind::UnterminatedAttrValue => "UNTERMINATED_ATTR_VALUE",
            ErrorKind::UnterminatedComment => "UNTERMINATED_COMMENT",
            ErrorKind::InvalidCssSelectorName => "INVALID_CSS_SELECTOR_NAME",
            ErrorKind::MissingCssBlockOpener => "MISSING_CSS_BLOCK_OPENER",
            ErrorKind::InvalidCssDeclaration => "INVALID_CSS_DECLARATION",
            ErrorKind::InvalidCssPropertyName => "INVALID_CSS_PROPERTY_NAME",
            ErrorKind::InvalidCssRule => "INVALID_CSS_RULE",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ParseError {
    #[error("the <{name}> tag at {open_tag} is never closed")]
    UnclosedTag { name: String, open_tag: Span },

    #[error("the closing </{name}> tag at {close_tag} doesn't pair with any opening tag")]
    UnexpectedCloseTag { name: String, close_tag: Span },

    #[error(
        "the closing </{close_name}> tag at {close_tag} doesn't pair with the opening <{open_name}> tag at {open_tag}"
    )]
    MismatchedCloseTag {
        open_name: String,
        open_tag: Span,
        close_name: String,
        close_tag: Span,
    },

    #[error("`{name}` at {span} isn't a valid HTML element name")]
    InvalidTagName { name: String, span: Span },

    #[error("the opening <{name}> tag at {open_tag} doesn't end with `>`")]
    UnterminatedOpenTag { name: String, open_tag: Span },

    #[error("the closing </{name}> tag at {close_tag} doesn't end with `>`")]
    UnterminatedCloseTag { name: String, close_tag: Span },

    #[error("the attribute value at {position} must start with a double quote")]
    UnquotedAttrValue { position: usize },

    #[error(
        "the value of `{attribute}` in the <{element}> tag at {open_tag} starts at {value_start} but has no closing double quote"
    )]
    UnterminatedAttrValue {
        element: String,
        open_tag: Span,
        attribute: String,
        attribute_span: Span,
        value_start: usize,
    },

    #[error("the comment starting at {start} is never closed with `-->`")]
    UnterminatedComment { start: usize },

    #[error("a CSS rule in the <{element}> element has no selector before `{{` at {span}")]
    InvalidCssSelectorName {
        element: String,
        open_tag: Span,
        span: Span,
    },

    #[error("the CSS selector at {selector} isn't followed by `{{`")]
    MissingCssBlockOpener { selector: Span },

    #[error("the CSS rule starting at {selector_start} has a malformed declaration (scan ended at {end})")]
    InvalidCssDeclaration { selector_start: usize, end: usize },

    #[error("`{name}` at {span} isn't a CSS property")]
    InvalidCssPropertyName { name: String, span: Span },

    #[error("the CSS declaration at {property_start} isn't followed by `;` or `}}` (scan ended at {end})")]
    InvalidCssRule { property_start: usize, end: usize },
}

impl ParseError {
    /// Lifts a style sheet error, naming the element whose content failed.
    pub fn from_css(error: CssError, element: &str, open_tag: Span) -> Self {
        match error {
            CssError::InvalidSelectorName { span } => ParseError::InvalidCssSelectorName {
                element: element.to_string(),
                open_tag,
                span,
            },
            CssError::MissingBlockOpener { selector } => {
                ParseError::MissingCssBlockOpener { selector }
            }
            CssError::InvalidDeclaration {
                selector_start,
                end,
            } => ParseError::InvalidCssDeclaration {
                selector_start,
                end,
            },
            CssError::InvalidPropertyName { name, span } => {
                ParseError::InvalidCssPropertyName { name, span }
            }
            CssError::InvalidRule {
                property_start,
                end,
            } => ParseError::InvalidCssRule {
                property_start,
                end,
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::UnclosedTag { .. } => ErrorKind::UnclosedTag,
            ParseError::UnexpectedCloseTag { .. } => ErrorKind::UnexpectedCloseTag,
            ParseError::MismatchedCloseTag { .. } => ErrorKind::MismatchedCloseTag,
            ParseError::InvalidTagName { .. } => ErrorKind::InvalidTagName,
            ParseError::UnterminatedOpenTag { .. } => ErrorKind::UnterminatedOpenTag,
            ParseError::UnterminatedCloseTag { .. } => ErrorKind::UnterminatedCloseTag,
            ParseError::UnquotedAttrValue { .. } => ErrorKind::UnquotedAttrValue,
            ParseError::UnterminatedAttrValue { .. } => ErrorKind::UnterminatedAttrValue,
            ParseError::UnterminatedComment { .. } => ErrorKind::UnterminatedComment,
            ParseError::InvalidCssSelectorName { .. } => ErrorKind::InvalidCssSelectorName,
            ParseError::MissingCssBlockOpener { .. } => ErrorKind::MissingCssBlockOpener,
            ParseError::InvalidCssDeclaration { .. } => ErrorKind::InvalidCssDeclaration,
            ParseError::InvalidCssPropertyName { .. } => ErrorKind::InvalidCssPropertyName,
            ParseError::InvalidCssRule { .. } => ErrorKind::InvalidCssRule,
        }
    }

    /// Source intervals to highlight, most relevant first.
    pub fn highlights(&self) -> Vec<Span> {
        match self {
            ParseError::UnclosedTag { open_tag, .. }
            | ParseError::UnterminatedOpenTag { open_tag, .. } => vec![*open_tag],
            ParseError::UnexpectedCloseTag { close_tag, .. }
            | ParseError::UnterminatedCloseTag { close_tag, .. } => vec![*close_tag],
            ParseError::MismatchedCloseTag {
                open_tag,
                close_tag,
                ..
            } => vec![*open_tag, *close_tag],
            ParseError::InvalidTagName { span, .. }
            | ParseError::InvalidCssPropertyName { span, .. } => vec![*span],
            ParseError::UnquotedAttrValue { position } => vec![Span::empty_at(*position)],
            ParseError::UnterminatedAttrValue {
                open_tag,
                attribute_span,
                value_start,
                ..
            } => vec![
                *open_tag,
                *attribute_span,
                Span::new(*value_start, open_tag.end.max(*value_start)),
            ],
            ParseError::UnterminatedComment { start } => {
                vec![Span::new(*start, start + "<!--".len())]
            }
            ParseError::InvalidCssSelectorName { open_tag, span, .. } => vec![*open_tag, *span],
            ParseError::MissingCssBlockOpener { selector } => vec![*selector],
            ParseError::InvalidCssDeclaration {
                selector_start,
                end,
            } => vec![Span::new(*selector_start, *end)],
            ParseError::InvalidCssRule {
                property_start,
                end,
            } => vec![Span::new(*property_start, *end)],
        }
    }

    /// Offset an editor should move the caret to.
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnterminatedAttrValue { value_start, .. } => *value_start,
            ParseError::InvalidCssSelectorName { span, .. } => span.start,
            ParseError::MismatchedCloseTag { close_tag, .. } => close_tag.start,
            _ => self.highlights().first().map_or(0, |span| span.start),
        }
    }

    /// Known names close to a rejected element or property name.
    pub fn suggestions(&self) -> Vec<&'static str> {
        match self {
            ParseError::InvalidTagName { name, .. } => crate::suggest::element_suggestions(name),
            ParseError::InvalidCssPropertyName { name, .. } => {
                crate::suggest::property_suggestions(name)
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_are_screaming_snake_case() {
        let error = ParseError::UnquotedAttrValue { position: 3 };
        assert_eq!(error.kind(), ErrorKind::UnquotedAttrValue);
        assert_eq!(error.kind().to_string(), "UNQUOTED_ATTR_VALUE");
        assert_eq!(ErrorKind::InvalidCssRule.as_str(), "INVALID_CSS_RULE");
    }

    #[test]
    fn css_selector_error_gains_owning_element() {
        let error = ParseError::from_css(
            CssError::InvalidSelectorName {
                span: Span::empty_at(7),
            },
            "style",
            Span::new(0, 7),
        );
        assert_eq!(error.kind(), ErrorKind::InvalidCssSelectorName);
        assert_eq!(error.highlights(), vec![Span::new(0, 7), Span::empty_at(7)]);
        assert_eq!(error.position(), 7);
    }

    #[test]
    fn css_property_error_keeps_payload() {
        let error = ParseError::from_css(
            CssError::InvalidPropertyName {
                name: "z-ind".into(),
                span: Span::new(9, 14),
            },
            "style",
            Span::new(0, 7),
        );
        assert_eq!(
            error,
            ParseError::InvalidCssPropertyName {
                name: "z-ind".into(),
                span: Span::new(9, 14)
            }
        );
        assert_eq!(error.suggestions(), vec!["z-index"]);
    }

    #[test]
    fn mismatched_close_tag_highlights_both_tags() {
        let error = ParseError::MismatchedCloseTag {
            open_name: "p".into(),
            open_tag: Span::new(0, 3),
            close_name: "b".into(),
            close_tag: Span::new(5, 9),
        };
        assert_eq!(error.highlights(), vec![Span::new(0, 3), Span::new(5, 9)]);
        assert_eq!(error.position(), 5);
        assert!(error.to_string().contains("</b>"));
    }
}
