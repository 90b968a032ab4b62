pub mod cursor;
pub mod span;

pub use cursor::{Cursor, Token, is_space};
pub use span::{Span, line_col, trim_span};
