//! Source span and position types for locating code regions.

use serde::{Deserialize, Serialize};

/// A line and column position within a source document.
///
/// Lines are one-based and columns are zero-based character offsets within
/// the line, matching the coordinates editors expect for inline markers.
///
/// # Example
///
/// ```
/// use ssjs_core::LineCol;
///
/// let pos = LineCol::new(10, 4);
/// assert_eq!(pos.line(), 10);
/// assert_eq!(pos.column(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineCol {
    /// One-based line number.
    pub line: u32,
    /// Zero-based character column within the line.
    pub column: u32,
}

impl LineCol {
    /// Creates a new line/column position.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Returns the one-based line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Returns the zero-based character column.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

impl Default for LineCol {
    fn default() -> Self {
        Self { line: 1, column: 0 }
    }
}

/// A half-open byte range `[start, end)` within a UTF-8 document.
///
/// # Example
///
/// ```
/// use ssjs_core::ByteSpan;
///
/// let span = ByteSpan::new(4, 10);
/// assert_eq!(span.len(), 6);
/// assert!(span.contains(4));
/// assert!(!span.contains(10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ByteSpan {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl ByteSpan {
    /// Creates a new span. An `end` before `start` collapses to an empty span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: if end < start { start } else { end },
        }
    }

    /// Returns the inclusive start offset.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Returns the exclusive end offset.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Returns the number of bytes covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` when the span covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` when `offset` falls inside the span.
    #[must_use]
    pub const fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Returns the slice of `text` covered by this span, if it lies on
    /// character boundaries.
    #[must_use]
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

/// Converts byte offsets into [`LineCol`] positions for one document.
///
/// The index records the byte offset at which every line starts, so lookups
/// are a binary search followed by a character count within the line.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    /// Builds an index over `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, byte)| *byte == b'\n')
                .map(|(offset, _)| offset + 1),
        );
        Self { text, line_starts }
    }

    /// Returns the number of lines in the document.
    ///
    /// A document ending in a newline has a final empty line.
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset into a one-based line and zero-based character
    /// column. Offsets past the end clamp to the end of the document.
    #[must_use]
    pub fn line_col(&self, offset: usize) -> LineCol {
        let clamped = offset.min(self.text.len());
        let line_index = self
            .line_starts
            .binary_search(&clamped)
            .unwrap_or_else(|index| index.saturating_sub(1));
        let line_start = self.line_starts.get(line_index).copied().unwrap_or(0);
        let column = self
            .text
            .get(line_start..clamped)
            .map_or(clamped - line_start, |prefix| prefix.chars().count());
        LineCol::new(to_u32(line_index + 1), to_u32(column))
    }

    /// Converts a zero-based byte column on a one-based line into a
    /// character column.
    ///
    /// Tree-sitter and other byte-oriented tools report byte columns; editors
    /// expect character columns.
    #[must_use]
    pub fn char_column(&self, line: u32, byte_column: usize) -> u32 {
        let Some(line_start) = usize::try_from(line)
            .ok()
            .and_then(|one_based| one_based.checked_sub(1))
            .and_then(|index| self.line_starts.get(index).copied())
        else {
            return to_u32(byte_column);
        };
        self.line_col(line_start + byte_column).column()
    }

    /// Returns the text of a one-based line without its line terminator.
    #[must_use]
    pub fn line_text(&self, line: u32) -> Option<&'a str> {
        let index = usize::try_from(line).ok()?.checked_sub(1)?;
        let start = *self.line_starts.get(index)?;
        let end = self
            .line_starts
            .get(index + 1)
            .map_or(self.text.len(), |next| next - 1);
        self.text
            .get(start..end)
            .map(|text| text.strip_suffix('\r').unwrap_or(text))
    }
}

fn to_u32(value: usize) -> u32 {
    // Documents are small; line and column values never approach u32::MAX.
    u32::try_from(value).unwrap_or(u32::MAX)
}
