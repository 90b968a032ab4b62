//! Errors raised while parsing `<style>` content.

use tools::Span;

/// First syntax violation found in a style sheet.
///
/// The html parser wraps these into its own diagnostics, adding the owning
/// `<style>` element where the message needs it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CssError {
    #[error("a rule is missing its selector before `{{` at {span}")]
    InvalidSelectorName { span: Span },

    #[error("selector at {selector} is not followed by `{{`")]
    MissingBlockOpener { selector: Span },

    #[error("declaration starting in the rule at {selector_start} is malformed (scan ended at {end})")]
    InvalidDeclaration { selector_start: usize, end: usize },

    #[error("`{name}` at {span} is not a recognized CSS property")]
    InvalidPropertyName { name: String, span: Span },

    #[error("declaration at {property_start} is not terminated by `;` or `}}` (scan ended at {end})")]
    InvalidRule { property_start: usize, end: usize },
}
