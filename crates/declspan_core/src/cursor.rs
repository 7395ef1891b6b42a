//! Zero-cost cursor over a sentinel-terminated buffer.
//!
//! The cursor advances through the buffer byte-by-byte. EOF is detected
//! when the current byte equals the sentinel (`0x00`) and the position
//! has reached or exceeded the source length. No explicit bounds checking
//! is performed in the common case -- the sentinel guarantees safe
//! termination.
//!
//! # Interior Null Bytes
//!
//! If the source contains interior null bytes (U+0000), the cursor
//! distinguishes them from EOF by comparing `pos` against `source_len`.
//! The delimiter-skip methods never stop on an interior null; it is
//! ordinary (inert) content to the block scanner.

/// Returns the earliest (minimum) of two optional positions.
///
/// Used by the memchr-based scanning methods to combine results from
/// separate memchr calls when we need to search for more bytes than
/// `memchr3` supports (which handles at most 3 needles).
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Zero-cost cursor over a sentinel-terminated byte buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor) or
/// [`SourceBuffer::cursor_at()`](crate::SourceBuffer::cursor_at). The
/// cursor is [`Copy`], enabling cheap state snapshots.
///
/// # Invariant
///
/// `buf` must be sentinel-terminated: `buf[source_len] == 0x00`, and all
/// bytes after `source_len` are `0x00` (padding). This is guaranteed by
/// [`SourceBuffer`](crate::SourceBuffer) construction.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of actual source content (excludes sentinel and padding).
    source_len: u32,
}

/// Size assertion: Cursor should be <= 24 bytes on 64-bit platforms.
/// &[u8] = 16 (fat pointer), u32 = 4, u32 = 4 => 24 bytes.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// Create a new cursor over a sentinel-terminated buffer.
    ///
    /// # Contract
    ///
    /// `buf[source_len]` must be `0x00` (sentinel), all bytes after it must
    /// also be `0x00` (padding), and `pos <= source_len`. This is guaranteed
    /// by `SourceBuffer` construction.
    pub(crate) fn new(buf: &'a [u8], source_len: u32, pos: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        debug_assert!(pos <= source_len, "cursor position past the sentinel");
        Self {
            buf,
            pos,
            source_len,
        }
    }

    /// Returns the byte at the current position.
    ///
    /// Returns `0x00` when at EOF (the sentinel byte). Interior null bytes
    /// also return `0x00`; use [`is_eof()`](Self::is_eof) to distinguish.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Returns the byte one position ahead of current.
    ///
    /// Safe to call at any position: the sentinel and padding guarantee
    /// valid reads beyond the source content.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    /// Advance the cursor by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance the cursor by `n` bytes.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Returns `true` if the cursor has reached EOF.
    ///
    /// EOF is when the current byte is the sentinel (`0x00`) and the
    /// position is at or past the source length. This distinguishes
    /// EOF from interior null bytes.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current() == 0 && self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Advance to the next `\n` byte or EOF using SIMD-accelerated search.
    ///
    /// Used by the block scanner to skip line-comment bodies. Scans only
    /// within source content (not into sentinel/padding). If no newline is
    /// found, positions the cursor at the EOF sentinel.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(offset) = memchr::memchr(b'\n', remaining) {
            self.pos += offset as u32;
        } else {
            self.pos = self.source_len;
        }
    }

    /// Advance just past the next `*/` sequence, or to EOF if none found.
    ///
    /// Used by the block scanner to skip block-comment bodies. The caller
    /// has already consumed the opening `/*`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_past_block_comment_end(&mut self) {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(offset) = memchr::memmem::find(remaining, b"*/") {
            self.pos += offset as u32 + 2;
        } else {
            self.pos = self.source_len;
        }
    }

    /// Advance past inert content to the next byte interesting at code
    /// depth. Returns the byte found, or 0 for EOF.
    ///
    /// "Interesting" bytes for code: `{`, `}`, `"`, `'`, `` ` ``, `/`.
    /// Uses two `memchr3` searches combined with [`earliest_of`], since a
    /// single call handles at most 3 needles.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_code_delim(&mut self) -> u8 {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        // Primary: braces and double quote (the common delimiters)
        let primary = memchr::memchr3(b'{', b'}', b'"', remaining);
        // Secondary: single quote, backtick, slash
        let secondary = memchr::memchr3(b'\'', b'`', b'/', remaining);

        // Take the earliest match
        let offset = earliest_of(primary, secondary);

        if let Some(off) = offset {
            self.pos += off as u32;
            self.buf[self.pos as usize]
        } else {
            self.pos = self.source_len;
            0 // EOF sentinel
        }
    }

    /// Advance past ordinary literal content to the next byte interesting
    /// inside a string or template literal delimited by `quote`. Returns
    /// the byte found, or 0 for EOF.
    ///
    /// Interesting bytes: the closing `quote` and `\` (escape lead-in).
    /// Everything else -- including braces, slashes, newlines, and the
    /// other quote characters -- is literal data.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_literal_delim(&mut self, quote: u8) -> u8 {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(off) = memchr::memchr2(quote, b'\\', remaining) {
            self.pos += off as u32;
            self.buf[self.pos as usize]
        } else {
            self.pos = self.source_len;
            0
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use crate::SourceBuffer;
    use pretty_assertions::assert_eq;

    // === Basic Navigation ===

    #[test]
    fn current_returns_first_byte() {
        let buf = SourceBuffer::new("abc");
        let cursor = buf.cursor();
        assert_eq!(cursor.current(), b'a');
    }

    #[test]
    fn advance_moves_forward() {
        let buf = SourceBuffer::new("abc");
        let mut cursor = buf.cursor();
        cursor.advance();
        assert_eq!(cursor.current(), b'b');
        assert_eq!(cursor.pos(), 1);
    }

    #[test]
    fn advance_n_moves_multiple() {
        let buf = SourceBuffer::new("abcdef");
        let mut cursor = buf.cursor();
        cursor.advance_n(3);
        assert_eq!(cursor.current(), b'd');
        assert_eq!(cursor.pos(), 3);
    }

    #[test]
    fn peek_returns_next_byte() {
        let buf = SourceBuffer::new("abc");
        let cursor = buf.cursor();
        assert_eq!(cursor.peek(), b'b');
    }

    #[test]
    fn peek_near_end_returns_sentinel() {
        let buf = SourceBuffer::new("ab");
        let mut cursor = buf.cursor();
        cursor.advance(); // at 'b'
        assert_eq!(cursor.peek(), 0); // sentinel
    }

    // === EOF Detection ===

    #[test]
    fn is_eof_at_sentinel() {
        let buf = SourceBuffer::new("x");
        let mut cursor = buf.cursor();
        assert!(!cursor.is_eof());
        cursor.advance(); // past 'x', at sentinel
        assert!(cursor.is_eof());
    }

    #[test]
    fn is_eof_on_empty_source() {
        let buf = SourceBuffer::new("");
        let cursor = buf.cursor();
        assert!(cursor.is_eof());
    }

    #[test]
    fn interior_null_is_not_eof() {
        let buf = SourceBuffer::new("a\0b");
        let mut cursor = buf.cursor();
        cursor.advance(); // at '\0' (interior null)
        assert_eq!(cursor.current(), 0);
        assert!(!cursor.is_eof()); // pos=1 < source_len=3
        cursor.advance(); // at 'b'
        assert_eq!(cursor.current(), b'b');
    }

    // === Copy Semantics ===

    #[test]
    fn cursor_is_copy_for_checkpointing() {
        let buf = SourceBuffer::new("abcdef");
        let mut cursor = buf.cursor();
        cursor.advance_n(2);

        // Snapshot via Copy
        let saved = cursor;

        // Advance original
        cursor.advance_n(3);
        assert_eq!(cursor.pos(), 5);

        // Saved is still at old position
        assert_eq!(saved.pos(), 2);
        assert_eq!(saved.current(), b'c');
    }

    // === eat_until_newline_or_eof ===

    #[test]
    fn eat_until_newline_finds_lf() {
        let buf = SourceBuffer::new("hello\nworld");
        let mut cursor = buf.cursor();
        cursor.eat_until_newline_or_eof();
        assert_eq!(cursor.pos(), 5);
        assert_eq!(cursor.current(), b'\n');
    }

    #[test]
    fn eat_until_newline_stops_at_eof() {
        let buf = SourceBuffer::new("no newline here");
        let mut cursor = buf.cursor();
        cursor.eat_until_newline_or_eof();
        assert_eq!(cursor.pos(), 15);
        assert!(cursor.is_eof());
    }

    #[test]
    fn eat_until_newline_from_middle() {
        let buf = SourceBuffer::new("// comment\nnext");
        let mut cursor = buf.cursor();
        cursor.advance_n(3); // skip "// "
        cursor.eat_until_newline_or_eof();
        assert_eq!(cursor.pos(), 10);
        assert_eq!(cursor.current(), b'\n');
    }

    // === skip_past_block_comment_end ===

    #[test]
    fn block_comment_end_found() {
        let buf = SourceBuffer::new("body */ after");
        let mut cursor = buf.cursor();
        cursor.skip_past_block_comment_end();
        assert_eq!(cursor.pos(), 7);
        assert_eq!(cursor.current(), b' ');
    }

    #[test]
    fn block_comment_end_at_start() {
        let buf = SourceBuffer::new("*/x");
        let mut cursor = buf.cursor();
        cursor.skip_past_block_comment_end();
        assert_eq!(cursor.pos(), 2);
        assert_eq!(cursor.current(), b'x');
    }

    #[test]
    fn block_comment_unterminated_goes_to_eof() {
        let buf = SourceBuffer::new("never closed * /");
        let mut cursor = buf.cursor();
        cursor.skip_past_block_comment_end();
        assert!(cursor.is_eof());
        assert_eq!(cursor.pos(), 16);
    }

    #[test]
    fn block_comment_end_spans_lines() {
        let buf = SourceBuffer::new("line one\nline two */!");
        let mut cursor = buf.cursor();
        cursor.skip_past_block_comment_end();
        assert_eq!(cursor.current(), b'!');
    }

    // === skip_to_code_delim ===

    #[test]
    fn code_delim_finds_open_brace() {
        let buf = SourceBuffer::new("let x = {");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_code_delim();
        assert_eq!(b, b'{');
        assert_eq!(cursor.pos(), 8);
    }

    #[test]
    fn code_delim_finds_close_brace() {
        let buf = SourceBuffer::new("x }");
        let mut cursor = buf.cursor();
        assert_eq!(cursor.skip_to_code_delim(), b'}');
    }

    #[test]
    fn code_delim_finds_quotes_and_slash() {
        for (source, expected) in [
            ("a \" b", b'"'),
            ("a ' b", b'\''),
            ("a ` b", b'`'),
            ("a / b", b'/'),
        ] {
            let buf = SourceBuffer::new(source);
            let mut cursor = buf.cursor();
            assert_eq!(cursor.skip_to_code_delim(), expected, "in {source:?}");
            assert_eq!(cursor.pos(), 2, "in {source:?}");
        }
    }

    #[test]
    fn code_delim_returns_earliest() {
        // slash (secondary set) appears before brace (primary set)
        let buf = SourceBuffer::new("ab/cd{");
        let mut cursor = buf.cursor();
        assert_eq!(cursor.skip_to_code_delim(), b'/');
        assert_eq!(cursor.pos(), 2);
    }

    #[test]
    fn code_delim_eof_when_only_inert_bytes() {
        let buf = SourceBuffer::new("let x = 42;\nreturn x");
        let mut cursor = buf.cursor();
        assert_eq!(cursor.skip_to_code_delim(), 0);
        assert!(cursor.is_eof());
    }

    #[test]
    fn code_delim_skips_interior_null() {
        let buf = SourceBuffer::new("a\0b{");
        let mut cursor = buf.cursor();
        assert_eq!(cursor.skip_to_code_delim(), b'{');
        assert_eq!(cursor.pos(), 3);
    }

    // === skip_to_literal_delim ===

    #[test]
    fn literal_delim_finds_closing_quote() {
        let buf = SourceBuffer::new("hello\"rest");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_literal_delim(b'"');
        assert_eq!(b, b'"');
        assert_eq!(cursor.pos(), 5);
    }

    #[test]
    fn literal_delim_finds_backslash_first() {
        let buf = SourceBuffer::new("abc\\\"rest");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_literal_delim(b'"');
        assert_eq!(b, b'\\');
        assert_eq!(cursor.pos(), 3);
    }

    #[test]
    fn literal_delim_ignores_other_quotes() {
        // Inside a double-quoted string, ' and ` are ordinary data
        let buf = SourceBuffer::new("it's a `thing`\"");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_literal_delim(b'"');
        assert_eq!(b, b'"');
        assert_eq!(cursor.pos(), 14);
    }

    #[test]
    fn literal_delim_ignores_braces_and_newlines() {
        let buf = SourceBuffer::new("{ }\n}'x");
        let mut cursor = buf.cursor();
        let b = cursor.skip_to_literal_delim(b'\'');
        assert_eq!(b, b'\'');
        assert_eq!(cursor.pos(), 5);
    }

    #[test]
    fn literal_delim_unterminated_goes_to_eof() {
        let buf = SourceBuffer::new("never closed");
        let mut cursor = buf.cursor();
        assert_eq!(cursor.skip_to_literal_delim(b'`'), 0);
        assert!(cursor.is_eof());
    }
}
