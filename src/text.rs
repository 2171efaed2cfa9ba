//! Line-addressed text content
//!
//! Positions follow the LSP convention: zero-based lines, and columns counted
//! in UTF-16 code units.

use thiserror::Error;
use tower_lsp::lsp_types::Position;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextError {
    #[error("line {line} is out of range (content has {line_count} lines)")]
    LineOutOfRange { line: u32, line_count: usize },

    #[error("column {column} is out of range on line {line}")]
    ColumnOutOfRange { line: u32, column: u32 },

    #[error("range end {end:?} precedes start {start:?}")]
    ReversedRange { start: Position, end: Position },
}

/// Immutable snapshot of a text buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    text: String,
    /// Byte offset of the first character of every line
    line_starts: Vec<usize>,
}

impl Content {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, line_starts }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the text of `line` without its line terminator
    pub fn line_string(&self, line: u32) -> Result<&str, TextError> {
        let (start, end) = self.line_bounds(line)?;
        Ok(&self.text[start..end])
    }

    /// Returns the text between two positions
    pub fn sub_content(&self, start: Position, end: Position) -> Result<&str, TextError> {
        if (end.line, end.character) < (start.line, start.character) {
            return Err(TextError::ReversedRange { start, end });
        }

        let from = self.offset_of(start)?;
        let to = self.offset_of(end)?;
        Ok(&self.text[from..to])
    }

    /// Converts a position into a byte offset into the text
    pub fn offset_of(&self, position: Position) -> Result<usize, TextError> {
        let (start, end) = self.line_bounds(position.line)?;
        let line = &self.text[start..end];

        utf16_to_byte_offset(line, position.character)
            .map(|offset| start + offset)
            .ok_or(TextError::ColumnOutOfRange {
                line: position.line,
                column: position.character,
            })
    }

    fn line_bounds(&self, line: u32) -> Result<(usize, usize), TextError> {
        let index = line as usize;
        let start = *self
            .line_starts
            .get(index)
            .ok_or(TextError::LineOutOfRange {
                line,
                line_count: self.line_count(),
            })?;

        let end = match self.line_starts.get(index + 1) {
            Some(next) => next - 1,
            None => self.text.len(),
        };

        // Treat CRLF as a single terminator
        let end = if self.text[start..end].ends_with('\r') {
            end - 1
        } else {
            end
        };

        Ok((start, end))
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Maps a UTF-16 column onto a byte offset within `text`.
///
/// Returns `None` when the column lies past the end of `text` or inside a
/// surrogate pair.
pub fn utf16_to_byte_offset(text: &str, column: u32) -> Option<usize> {
    let mut units = 0u32;
    for (offset, ch) in text.char_indices() {
        if units == column {
            return Some(offset);
        }
        if units > column {
            return None;
        }
        units += ch.len_utf16() as u32;
    }

    (units == column).then_some(text.len())
}
