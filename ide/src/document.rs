//! Read-only line access to the style document being edited.
//! Columns are UTF-8 byte offsets within a line.

use serde::{Deserialize, Serialize};

/// Zero-based cursor position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Snapshot of a text buffer, owned by the caller.
pub trait DocumentView {
    fn line_count(&self) -> usize;

    /// Text of line `line` without its terminator, or `None` past the last line.
    fn line_text(&self, line: usize) -> Option<&str>;
}

impl DocumentView for [String] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        self.get(line).map(String::as_str)
    }
}

impl DocumentView for Vec<String> {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        self.as_slice().line_text(line)
    }
}

/// Owned document text with a line index.
///
/// Both `\n` and `\r\n` terminate lines; a trailing newline opens an empty last line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    text: String,
    line_starts: Vec<usize>,
}

impl TextDocument {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { text, line_starts }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Position of a byte offset. Offsets past the end clamp to the end of the text.
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let column = offset - self.line_starts[line];
        Position {
            line: u32::try_from(line).unwrap_or(u32::MAX),
            column: u32::try_from(column).unwrap_or(u32::MAX),
        }
    }

    /// Byte offset of a position, or `None` if the line does not exist.
    ///
    /// The column clamps to the end of the line.
    pub fn offset_at(&self, position: Position) -> Option<usize> {
        let line = usize::try_from(position.line).ok()?;
        let start = *self.line_starts.get(line)?;
        let len = self.line_text(line)?.len();
        let column = usize::try_from(position.column).unwrap_or(usize::MAX);
        Some(start + column.min(len))
    }
}

impl DocumentView for TextDocument {
    fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        let start = *self.line_starts.get(line)?;
        let end = match self.line_starts.get(line + 1) {
            Some(next) => next - 1,
            None => self.text.len(),
        };
        let raw = &self.text[start..end];
        Some(raw.strip_suffix('\r').unwrap_or(raw))
    }
}

/// Text of `line` up to `column`, clamped to the line end and to a char boundary.
pub(crate) fn line_prefix(line: &str, column: u32) -> &str {
    let mut end = usize::try_from(column).unwrap_or(usize::MAX).min(line.len());
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// The word touching the cursor on either side, as editors report it.
///
/// `prefix_len` is the byte length of the line prefix (the cursor column after clamping).
pub(crate) fn word_at(line: &str, prefix_len: usize) -> Option<&str> {
    let before = &line[..prefix_len];
    let after = &line[prefix_len..];
    let start = before
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_word_char(*c))
        .last()
        .map_or(prefix_len, |(i, _)| i);
    let end = prefix_len
        + after
            .char_indices()
            .find(|(_, c)| !is_word_char(*c))
            .map_or(after.len(), |(i, _)| i);
    if start == end {
        return None;
    }
    Some(&line[start..end])
}
