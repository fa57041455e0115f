//! Source position tracking for component lowering.
//!
//! This crate provides the span type attached to tree nodes and diagnostics,
//! and the mapping that turns a position inside a nested document (such as an
//! attribute value that was parsed on its own) into an absolute span in the
//! enclosing file.

use std::fmt;
pub use text_size::{TextRange, TextSize};

/// Value used by every numeric field of an undefined span.
pub const UNDEFINED_INDEX: u32 = u32::MAX;

/// A located region of a source file.
///
/// `line` and `column` are 0-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// Path of the file the span points into, if known.
    pub file_path: Option<String>,
    /// Byte offset from the start of the file.
    pub absolute_index: u32,
    /// 0-indexed line number.
    pub line: u32,
    /// 0-indexed column within the line.
    pub column: u32,
    /// Length of the span.
    pub length: u32,
}

impl Span {
    /// Create a new span.
    pub fn new(
        file_path: Option<String>,
        absolute_index: u32,
        line: u32,
        column: u32,
        length: u32,
    ) -> Self {
        Self {
            file_path,
            absolute_index,
            line,
            column,
            length,
        }
    }

    /// The sentinel used for diagnostics that cannot be located.
    pub const fn undefined() -> Self {
        Self {
            file_path: None,
            absolute_index: UNDEFINED_INDEX,
            line: UNDEFINED_INDEX,
            column: UNDEFINED_INDEX,
            length: UNDEFINED_INDEX,
        }
    }

    /// Check if this is the undefined sentinel.
    #[inline]
    pub fn is_undefined(&self) -> bool {
        self.file_path.is_none()
            && self.absolute_index == UNDEFINED_INDEX
            && self.line == UNDEFINED_INDEX
            && self.column == UNDEFINED_INDEX
    }

    /// Map a position inside a nested document that starts at this span.
    ///
    /// The result is a point location (length 1). Composing onto the
    /// undefined sentinel yields the sentinel.
    pub fn compose(&self, inner: TextPosition) -> Span {
        if self.is_undefined() {
            return Span::undefined();
        }

        let column = if inner.line == 1 {
            self.column.saturating_add(inner.column).saturating_sub(1)
        } else {
            inner.column.saturating_sub(1)
        };

        Span {
            file_path: self.file_path.clone(),
            absolute_index: self.absolute_index.saturating_add(inner.offset),
            line: self.line.saturating_add(inner.line).saturating_sub(1),
            column,
            length: 1,
        }
    }

    /// Byte range covered by the span, or `None` for the sentinel.
    pub fn to_text_range(&self) -> Option<TextRange> {
        if self.is_undefined() {
            return None;
        }
        Some(TextRange::at(
            TextSize::new(self.absolute_index),
            TextSize::new(self.length),
        ))
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::undefined()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undefined() {
            return write!(f, "(unknown)");
        }
        write!(
            f,
            "{}({},{})",
            self.file_path.as_deref().unwrap_or(""),
            self.line + 1,
            self.column + 1
        )
    }
}

/// A position inside a nested document.
///
/// `line` and `column` are 1-indexed, `offset` is a 0-indexed byte offset
/// from the start of the nested document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextPosition {
    /// Byte offset from the start of the nested document.
    pub offset: u32,
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column.
    pub column: u32,
}

impl TextPosition {
    /// Create a new position.
    #[inline]
    pub const fn new(offset: u32, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl Default for TextPosition {
    fn default() -> Self {
        Self::new(0, 1, 1)
    }
}

/// Compose an outer span with a position inside the nested document it
/// encloses.
///
/// Returns `None` when there is no outer span; callers substitute
/// [`Span::undefined`].
pub fn compose(outer: Option<&Span>, inner: TextPosition) -> Option<Span> {
    outer.map(|span| span.compose(inner))
}

/// A line index for converting offsets inside a nested document into
/// [`TextPosition`]s.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offsets of the start of each line.
    line_starts: Vec<TextSize>,
    /// Total length of the source.
    len: TextSize,
}

impl LineIndex {
    /// Create a new line index from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (i, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(TextSize::new((i + 1) as u32));
            }
        }
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Get the position of a byte offset. Offsets past the end clamp to the
    /// end of the text.
    pub fn text_position(&self, offset: TextSize) -> TextPosition {
        let offset = offset.min(self.len);
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let column = offset - self.line_starts[line];
        TextPosition::new(offset.into(), line as u32 + 1, u32::from(column) + 1)
    }

    /// Get the byte offset of a position.
    /// Returns None if the position is out of bounds.
    pub fn offset(&self, line: u32, column: u32) -> Option<TextSize> {
        let line_start = *self.line_starts.get(line.checked_sub(1)? as usize)?;
        let offset = line_start + TextSize::new(column.checked_sub(1)?);
        (offset <= self.len).then_some(offset)
    }

    /// Get the number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn outer() -> Span {
        Span::new(Some("Index.cshtml".to_string()), 100, 5, 10, 20)
    }

    #[test]
    fn test_compose_first_line() {
        let span = outer().compose(TextPosition::new(2, 1, 3));
        assert_eq!(
            span,
            Span::new(Some("Index.cshtml".to_string()), 102, 5, 12, 1)
        );
    }

    #[test]
    fn test_compose_later_line() {
        let span = outer().compose(TextPosition::new(7, 2, 1));
        assert_eq!(span.line, 6);
        assert_eq!(span.column, 0);
        assert_eq!(span.absolute_index, 107);
        assert_eq!(span.length, 1);
    }

    #[test]
    fn test_compose_without_outer() {
        assert_eq!(compose(None, TextPosition::new(2, 1, 3)), None);
        assert_eq!(
            compose(Some(&outer()), TextPosition::new(0, 1, 1)).map(|s| s.column),
            Some(10)
        );
    }

    #[test]
    fn test_undefined() {
        let span = Span::undefined();
        assert!(span.is_undefined());
        assert!(!outer().is_undefined());
        assert_eq!(span.to_text_range(), None);
        assert_eq!(span.to_string(), "(unknown)");
    }

    #[test]
    fn test_compose_onto_undefined() {
        let span = Span::undefined().compose(TextPosition::new(7, 2, 1));
        assert!(span.is_undefined());
        assert_eq!(span, Span::undefined());
        assert_eq!(
            compose(Some(&Span::undefined()), TextPosition::default()),
            Some(Span::undefined())
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(outer().to_string(), "Index.cshtml(6,11)");
    }

    #[test]
    fn test_line_index() {
        let text = "hello\nworld\nfoo";
        let index = LineIndex::new(text);

        assert_eq!(index.line_count(), 3);
        assert_eq!(index.text_position(0.into()), TextPosition::new(0, 1, 1));
        assert_eq!(index.text_position(5.into()), TextPosition::new(5, 1, 6));
        assert_eq!(index.text_position(6.into()), TextPosition::new(6, 2, 1));
        assert_eq!(index.text_position(13.into()), TextPosition::new(13, 3, 2));

        assert_eq!(index.offset(1, 1), Some(0.into()));
        assert_eq!(index.offset(2, 1), Some(6.into()));
        assert_eq!(index.offset(4, 1), None);
        assert_eq!(index.offset(0, 1), None);
    }

    #[test]
    fn test_line_index_feeds_compose() {
        let value = "a\n  @bad";
        let index = LineIndex::new(value);
        let position = index.text_position(4.into());
        let span = outer().compose(position);
        assert_eq!((span.line, span.column, span.absolute_index), (6, 2, 104));
    }
}
