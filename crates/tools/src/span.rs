//! Span types shared by every node, attribute, and diagnostic.

/// Half-open byte span into the parsed source text.
///
/// Invariant: `start <= end`, and both ends sit on UTF-8 char boundaries of the
/// source the span was produced from, so `&source[span.start..span.end]` is always
/// the exact covered text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start must be <= end");
        Self { start, end }
    }

    /// Zero-width span at `offset`.
    pub fn empty_at(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    pub fn len(self) -> usize {
        self.end - self.start
    }

    pub fn contains(self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Returns the covered text, or `None` if the span does not fit `source`.
    pub fn slice(self, source: &str) -> Option<&str> {
        source.get(self.start..self.end)
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Narrows `span` (covering `text`) to exclude leading and trailing whitespace.
///
/// `text` must be the slice `span` covers. A whitespace-only text collapses to an
/// empty span positioned after the whitespace.
pub fn trim_span(text: &str, span: Span) -> Span {
    debug_assert_eq!(text.len(), span.len());
    let leading = text.len() - text.trim_start().len();
    let trimmed = text.trim();
    let start = span.start + leading;
    Span::new(start, start + trimmed.len())
}

/// Converts a byte offset into a 1-based `(line, column)` pair.
///
/// Columns count chars, not bytes. Offsets past the end clamp to the end.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &source[..offset];
    let line = memchr::memchr_iter(b'\n', before.as_bytes()).count() + 1;
    let line_start = memchr::memrchr(b'\n', before.as_bytes()).map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
