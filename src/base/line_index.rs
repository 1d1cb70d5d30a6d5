//! Byte offset to line/column conversion.

use text_size::{TextRange, TextSize};

use super::position::{Position, Span};

/// Maps byte offsets of one text to zero-based line/column positions.
///
/// Lines are split on `\n` only; a `\r` preceding it stays part of the line,
/// the same way the document's content lines are produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the first character of every line.
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::new(offset as u32 + 1));
            }
        }
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Number of lines, counting a trailing empty line after a final `\n`.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Zero-based line containing `offset`.
    pub fn line_of(&self, offset: TextSize) -> usize {
        let offset = offset.min(self.len);
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        }
    }

    /// Convert a byte offset to a position; `text` must be the indexed text.
    pub fn position(&self, text: &str, offset: TextSize) -> Position {
        let offset = offset.min(self.len);
        let line = self.line_of(offset);
        let line_start: usize = self.line_starts[line].into();
        let end: usize = offset.into();
        let column = text
            .get(line_start..end)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(end - line_start);
        Position::new(line, column)
    }

    /// Convert a byte range to a span; `text` must be the indexed text.
    pub fn span(&self, text: &str, range: TextRange) -> Span {
        Span::new(
            self.position(text, range.start()),
            self.position(text, range.end()),
        )
    }
}
