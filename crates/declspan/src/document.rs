//! Immutable document snapshots with position mapping.
//!
//! [`Document`] is the narrow slice of an editor document model the span
//! finder needs: the full text, offset/position conversion backed by a
//! precomputed line-start table (O(n) build, O(log L) lookup), and word
//! lookup under a position. Lines and columns are 0-based; columns are
//! byte offsets within the line.

use declspan_core::Span;
use std::fmt;

/// A 0-based line/column position within a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// 0-based line number.
    pub line: u32,
    /// 0-based byte column within the line.
    pub column: u32,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Returns `true` for bytes that continue an identifier word.
///
/// ASCII letters, digits, `_`, and `$` -- the identifier alphabet of the
/// scanned language family.
#[inline]
pub(crate) fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}

/// Immutable text snapshot with a precomputed line-start table.
///
/// Owns its text; spans and offsets produced against a `Document` are only
/// meaningful for that snapshot.
#[derive(Clone, Debug)]
pub struct Document {
    text: String,
    /// Byte offset of each line start. `line_starts[0] == 0`; a trailing
    /// newline opens one final (possibly empty) line.
    line_starts: Vec<u32>,
}

impl Document {
    /// Create a document snapshot from text.
    ///
    /// Scans the text once to build the line-start table.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0u32];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                // Next line starts at the byte after the newline.
                line_starts.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        Document { text, line_starts }
    }

    /// The full document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the document in bytes.
    pub fn len(&self) -> u32 {
        u32::try_from(self.text.len()).unwrap_or(u32::MAX)
    }

    /// Returns `true` if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of lines (a trailing newline opens one final empty line).
    pub fn line_count(&self) -> u32 {
        u32::try_from(self.line_starts.len()).unwrap_or(u32::MAX)
    }

    /// Byte offset of the start of `line`, or `None` if out of range.
    pub fn line_start(&self, line: u32) -> Option<u32> {
        self.line_starts.get(line as usize).copied()
    }

    /// The text of `line` without its trailing `\n` (and `\r`, for CRLF
    /// documents), or `None` if the line is out of range.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        let start = self.line_start(line)? as usize;
        let end = self
            .line_start(line + 1)
            .map_or(self.text.len(), |next| next as usize);
        let raw = &self.text[start..end];
        Some(raw.trim_end_matches('\n').trim_end_matches('\r'))
    }

    /// Convert a position to a byte offset.
    ///
    /// Returns `None` when the line is out of range or the column lies
    /// beyond the end of the line (the position one past the last byte of
    /// a line is valid, matching editor cursor semantics).
    pub fn offset_at(&self, position: Position) -> Option<u32> {
        let line_start = self.line_start(position.line)?;
        let line_len = u32::try_from(self.line_text(position.line)?.len()).unwrap_or(u32::MAX);
        if position.column > line_len {
            return None;
        }
        Some(line_start + position.column)
    }

    /// Convert a byte offset to a position.
    ///
    /// Offsets past the end of the document are clamped to its length.
    pub fn position_at(&self, offset: u32) -> Position {
        let offset = offset.min(self.len());
        // Largest line start <= offset.
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line_idx).copied().unwrap_or(0);
        Position {
            line: u32::try_from(line_idx).unwrap_or(u32::MAX),
            column: offset - line_start,
        }
    }

    /// The identifier word surrounding `offset`, as a span.
    ///
    /// Expands left and right over word bytes ([`is_word_byte`]). Returns
    /// `None` when the byte at `offset` is not a word byte, or the offset
    /// is at or past the end of the document.
    pub fn word_range_at(&self, offset: u32) -> Option<Span> {
        let bytes = self.text.as_bytes();
        let at = offset as usize;
        if at >= bytes.len() || !is_word_byte(bytes[at]) {
            return None;
        }
        let mut start = at;
        while start > 0 && is_word_byte(bytes[start - 1]) {
            start -= 1;
        }
        let mut end = at + 1;
        while end < bytes.len() && is_word_byte(bytes[end]) {
            end += 1;
        }
        // start/end fit in u32 because the offset itself did.
        Some(Span::new(
            u32::try_from(start).unwrap_or(u32::MAX),
            u32::try_from(end).unwrap_or(u32::MAX),
        ))
    }

    /// Slice the document by a span.
    ///
    /// Returns `None` when the span is out of bounds or does not fall on
    /// UTF-8 character boundaries.
    pub fn slice(&self, span: Span) -> Option<&str> {
        self.text.get(span.to_range())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // === Lines ===

    #[test]
    fn single_line_document() {
        let doc = Document::new("hello");
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.line_text(0), Some("hello"));
        assert_eq!(doc.line_text(1), None);
    }

    #[test]
    fn line_starts_after_newlines() {
        let doc = Document::new("ab\ncd\nef");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line_start(0), Some(0));
        assert_eq!(doc.line_start(1), Some(3));
        assert_eq!(doc.line_start(2), Some(6));
        assert_eq!(doc.line_text(1), Some("cd"));
    }

    #[test]
    fn trailing_newline_opens_empty_line() {
        let doc = Document::new("ab\n");
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.line_text(1), Some(""));
    }

    #[test]
    fn crlf_line_text_strips_cr() {
        let doc = Document::new("ab\r\ncd");
        assert_eq!(doc.line_text(0), Some("ab"));
        assert_eq!(doc.line_text(1), Some("cd"));
    }

    #[test]
    fn empty_document() {
        let doc = Document::new("");
        assert!(doc.is_empty());
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.line_text(0), Some(""));
    }

    // === Offset / Position Conversion ===

    #[test]
    fn offset_at_start_of_lines() {
        let doc = Document::new("ab\ncd");
        assert_eq!(doc.offset_at(Position::new(0, 0)), Some(0));
        assert_eq!(doc.offset_at(Position::new(1, 0)), Some(3));
    }

    #[test]
    fn offset_at_line_end_is_valid() {
        // The cursor position one past the last byte of a line.
        let doc = Document::new("ab\ncd");
        assert_eq!(doc.offset_at(Position::new(0, 2)), Some(2));
    }

    #[test]
    fn offset_at_rejects_out_of_range() {
        let doc = Document::new("ab\ncd");
        assert_eq!(doc.offset_at(Position::new(0, 3)), None); // past line end
        assert_eq!(doc.offset_at(Position::new(2, 0)), None); // no such line
    }

    #[test]
    fn position_at_round_trips() {
        let doc = Document::new("function f() {\n  return 1;\n}\n");
        for offset in 0..doc.len() {
            let pos = doc.position_at(offset);
            assert_eq!(
                doc.offset_at(pos),
                Some(offset),
                "round trip failed at offset {offset}"
            );
        }
    }

    #[test]
    fn position_at_clamps_past_end() {
        let doc = Document::new("ab");
        assert_eq!(doc.position_at(99), Position::new(0, 2));
    }

    // === Word Ranges ===

    #[test]
    fn word_range_covers_whole_word() {
        let doc = Document::new("function foo() {}");
        // Anywhere inside "function" resolves to the same range.
        for offset in 0..8 {
            assert_eq!(doc.word_range_at(offset), Some(Span::new(0, 8)));
        }
        assert_eq!(doc.word_range_at(9), Some(Span::new(9, 12))); // "foo"
    }

    #[test]
    fn word_range_none_on_non_word_bytes() {
        let doc = Document::new("a (b)");
        assert_eq!(doc.word_range_at(1), None); // space
        assert_eq!(doc.word_range_at(2), None); // '('
    }

    #[test]
    fn word_range_none_at_eof() {
        let doc = Document::new("ab");
        assert_eq!(doc.word_range_at(2), None);
        assert_eq!(doc.word_range_at(99), None);
    }

    #[test]
    fn word_range_includes_dollar_and_underscore() {
        let doc = Document::new("$my_var2 = 1");
        assert_eq!(doc.word_range_at(0), Some(Span::new(0, 8)));
    }

    #[test]
    fn word_range_round_trips_with_positions() {
        let doc = Document::new("let alpha = beta;\nclass Gamma {}\n");
        for offset in 0..doc.len() {
            if let Some(span) = doc.word_range_at(offset) {
                assert!(span.contains(offset));
                let word = doc.slice(span).expect("word span slices cleanly");
                assert!(word.bytes().all(is_word_byte), "non-word byte in {word:?}");
            }
        }
    }

    // === Slicing ===

    #[test]
    fn slice_in_bounds() {
        let doc = Document::new("hello world");
        assert_eq!(doc.slice(Span::new(6, 11)), Some("world"));
    }

    #[test]
    fn slice_out_of_bounds_is_none() {
        let doc = Document::new("hi");
        assert_eq!(doc.slice(Span::new(0, 3)), None);
    }

    #[test]
    fn slice_off_char_boundary_is_none() {
        let doc = Document::new("caf\u{E9}!"); // 'é' is 2 bytes (3..5)
        assert_eq!(doc.slice(Span::new(0, 4)), None);
        assert_eq!(doc.slice(Span::new(0, 5)), Some("caf\u{E9}"));
    }
}
