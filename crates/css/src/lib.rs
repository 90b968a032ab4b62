pub mod error;
pub mod properties;
pub mod syntax;

// Re-exports so other crates can just use `css::...` nicely.
pub use error::CssError;
pub use properties::{CSS_PROPERTY_NAMES, is_property_name};
pub use syntax::{Declaration, DeclarationBlock, Rule, StyleSheet, parse_style_content};
