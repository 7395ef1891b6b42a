//! Brace-matching scanner for declaration bodies.
//!
//! Given a starting offset known to sit at (or before) a declaration
//! keyword, [`find_block_end`] locates the offset one past the closing
//! brace that matches the first top-level `{` found at or after the start.
//! Nested braces, string/template literals (with escapes), and line/block
//! comments are skipped without a full tokenizer.
//!
//! # Design
//!
//! A small explicit state machine: at code depth the scanner jumps between
//! "interesting" bytes (`{` `}` `"` `'` `` ` `` `/`) with SIMD-accelerated
//! search and dispatches on the byte found. String and template literals
//! are consumed by a dedicated skip loop in which only the identical
//! unescaped delimiter ends the literal; comment bodies are consumed as
//! single cursor jumps. There is no error path: unbalanced input degrades
//! to "consume everything" and the scan returns the full source length.

use crate::cursor::Cursor;
use crate::source_buffer::SourceBuffer;
use crate::span::Span;

/// Find the end of the first top-level brace block at or after `start`.
///
/// Scans forward from `start`. The first `{` encountered at code depth
/// (outside any literal or comment) opens the block; the return value is
/// the offset one past the `}` that closes it. If the text ends before the
/// block closes -- or no block ever opens -- the full source length is
/// returned instead.
///
/// Pure function of its inputs: no allocation, no shared state, identical
/// inputs always yield the identical offset. A single left-to-right pass,
/// O(n) time.
pub fn find_block_end(buf: &SourceBuffer, start: u32) -> u32 {
    let mut cursor = buf.cursor_at(start);
    let mut depth: u32 = 0;

    loop {
        match cursor.skip_to_code_delim() {
            b'{' => {
                cursor.advance();
                depth += 1;
            }
            b'}' => {
                cursor.advance();
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        return cursor.pos();
                    }
                }
                // Stray `}` before the block opens is inert; keep scanning.
            }
            quote @ (b'"' | b'\'' | b'`') => {
                cursor.advance(); // consume the opening delimiter
                skip_literal(&mut cursor, quote);
            }
            b'/' => match cursor.peek() {
                b'/' => {
                    cursor.advance_n(2);
                    cursor.eat_until_newline_or_eof();
                }
                b'*' => {
                    cursor.advance_n(2);
                    cursor.skip_past_block_comment_end();
                }
                // Plain slash (division etc.) is inert.
                _ => cursor.advance(),
            },
            0 => return buf.len(), // text ended before the block closed
            _ => unreachable!("skip_to_code_delim returned unexpected byte"),
        }
    }
}

/// [`find_block_end`] wrapped as a half-open [`Span`] from `start`.
///
/// The start is clamped to the source length so the span is always
/// well-formed, even for an out-of-range start offset.
pub fn find_block_span(buf: &SourceBuffer, start: u32) -> Span {
    Span::new(start.min(buf.len()), find_block_end(buf, start))
}

/// Skip the body of a string or template literal. The opening delimiter
/// has been consumed; on return the cursor sits just past the closing
/// delimiter, or at EOF for an unterminated literal.
///
/// Only the identical unescaped `quote` byte ends the literal. A `\`
/// consumes the following byte as escaped data, so `\"` stays inside a
/// double-quoted string and `\\` leaves the character after it unescaped
/// -- each backslash escapes exactly its immediate successor, which keeps
/// runs of backslashes correct without lookback.
fn skip_literal(cursor: &mut Cursor<'_>, quote: u8) {
    loop {
        match cursor.skip_to_literal_delim(quote) {
            b'\\' => {
                cursor.advance(); // consume '\'
                if !cursor.is_eof() {
                    cursor.advance(); // the escaped byte is literal data
                }
            }
            0 => return, // unterminated: degrade at EOF
            _ => {
                cursor.advance(); // consume the closing delimiter
                return;
            }
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
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: scan `source` from offset 0.
    fn end(source: &str) -> u32 {
        find_block_end(&SourceBuffer::new(source), 0)
    }

    /// Helper: the source length as `u32`.
    fn len(source: &str) -> u32 {
        u32::try_from(source.len()).expect("test source fits in u32")
    }

    // === Plain Blocks ===

    #[test]
    fn simple_block() {
        let source = "{ return 1; }";
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn block_after_keyword_prefix() {
        // The start offset points at the keyword, not at the brace.
        let source = "function add(a, b) { return a + b; }";
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn nested_braces() {
        let source = "{ if (x) { y(); } else { z(); } }";
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn trailing_text_not_consumed() {
        let source = "function f() { x(); } function g() {}";
        let block = "function f() { x(); }";
        assert_eq!(end(source), len(block));
    }

    #[test]
    fn stray_close_before_open_is_inert() {
        let source = "} { }";
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn scan_from_nonzero_start() {
        let source = "{a} {b}";
        let buf = SourceBuffer::new(source);
        assert_eq!(find_block_end(&buf, 0), 3);
        assert_eq!(find_block_end(&buf, 3), 7);
    }

    // === Strings ===

    #[test]
    fn brace_inside_double_quoted_string() {
        let source = r#"{ let s = "}"; }"#;
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn brace_inside_single_quoted_string() {
        let source = "{ let s = '}'; }";
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn open_brace_inside_string_not_counted() {
        // If the `{` inside the string were counted, the block would not
        // close at the real `}`.
        let source = r#"{ let s = "{"; }"#;
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn single_quote_inside_double_quoted_string_is_data() {
        let source = r#"{ let s = "don't"; }"#;
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn double_quote_inside_single_quoted_string_is_data() {
        let source = r#"{ let s = 'say "hi"'; }"#;
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn string_before_first_brace() {
        // Quotes ahead of the block enter the same literal state; the `{`
        // inside the string must not open the block early.
        let source = r#"let s = "{"; { x(); }"#;
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn comment_markers_inside_string_are_data() {
        let source = r#"{ let url = "http://example.com"; }"#;
        assert_eq!(end(source), len(source));
    }

    // === Escapes ===

    #[test]
    fn escaped_quote_does_not_end_string() {
        let source = r#"{ let s = "a\"b"; }"#;
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn escaped_backslash_then_quote_ends_string() {
        // `\\` is a complete escape; the following `"` closes the literal.
        let source = r#"{ let s = "a\\"; }"#;
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn odd_backslash_run_keeps_string_open() {
        // `\\\"` = escaped backslash + escaped quote: still inside the
        // string, so the block never closes and the scan degrades.
        let source = r#"{ "ab\\\" }"#;
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn escape_at_end_of_text_degrades() {
        let source = r#"{ "abc\"#;
        assert_eq!(end(source), len(source));
    }

    // === Comments ===

    #[test]
    fn brace_inside_line_comment() {
        let source = "{ // }\n }";
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn brace_inside_block_comment() {
        let source = "{ /* } */ }";
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn block_comment_spanning_lines() {
        let source = "{\n  /* first }\n     second } */\n}";
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn line_comment_before_first_brace() {
        let source = "// not this {\nfunction f() { x(); }";
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn line_comment_at_end_without_newline() {
        let source = "{ x(); } // trailing {";
        assert_eq!(end(source), 8);
    }

    #[test]
    fn plain_slash_is_division() {
        let source = "{ let y = a / b; }";
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn division_after_block_comment() {
        let source = "{ a /* } */ / 2 }";
        assert_eq!(end(source), len(source));
    }

    // === Template Literals ===

    #[test]
    fn brace_inside_template_literal() {
        let source = "{ let t = `a } b`; }";
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn template_interpolation_braces_are_data() {
        // `${ ... }` is not tracked; the whole template is opaque until
        // the closing backtick.
        let source = "{ let t = `${ x } and { y }`; }";
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn template_spans_lines() {
        let source = "{ let t = `line one\nline } two`; }";
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn escaped_backtick_stays_in_template() {
        let source = r"{ let t = `a \` b`; }";
        assert_eq!(end(source), len(source));
    }

    // === Degradation ===

    #[test]
    fn unbalanced_input_returns_full_length() {
        let source = "{ foo(";
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn no_brace_at_all_returns_full_length() {
        let source = "let x = 42;";
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn unterminated_string_returns_full_length() {
        let source = r#"{ let s = "never closed; }"#;
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn unterminated_block_comment_returns_full_length() {
        let source = "{ /* never closed }";
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn unterminated_template_returns_full_length() {
        let source = "{ let t = `never closed; }";
        assert_eq!(end(source), len(source));
    }

    #[test]
    fn empty_source() {
        assert_eq!(end(""), 0);
    }

    #[test]
    fn start_at_eof() {
        let buf = SourceBuffer::new("{}");
        assert_eq!(find_block_end(&buf, 2), 2);
    }

    #[test]
    fn start_past_eof_is_clamped() {
        let buf = SourceBuffer::new("{}");
        assert_eq!(find_block_end(&buf, 99), 2);
    }

    // === Realistic Input ===

    #[test]
    fn realistic_function() {
        let block = concat!(
            "function Parser(input) {\n",
            "  // state: \"{\" tracking\n",
            "  this.input = input;\n",
            "  this.depth = { value: 0 };\n",
            "  /* braces } in here { are free */\n",
            "  this.describe = () => `at {${this.depth.value}}`;\n",
            "}",
        );
        let source = format!("{block}\n\nParser.prototype.run = function () {{}};\n");
        let buf = SourceBuffer::new(&source);
        assert_eq!(find_block_end(&buf, 0), len(block));
    }

    #[test]
    fn utf8_content_is_inert() {
        let source = "{ let s = \"\u{1F600} caf\u{E9}\"; }";
        assert_eq!(end(source), len(source));
    }

    // === Purity ===

    #[test]
    fn idempotent_for_identical_inputs() {
        let source = "function f() { g({ a: '}' }); }";
        let buf = SourceBuffer::new(source);
        let first = find_block_end(&buf, 0);
        let second = find_block_end(&buf, 0);
        assert_eq!(first, second);
    }

    // === Span Wrapper ===

    #[test]
    fn span_covers_start_to_end() {
        let source = "xx {a}";
        let buf = SourceBuffer::new(source);
        assert_eq!(find_block_span(&buf, 0), Span::new(0, 6));
        assert_eq!(find_block_span(&buf, 3), Span::new(3, 6));
    }

    #[test]
    fn span_with_clamped_start() {
        let buf = SourceBuffer::new("{}");
        let span = find_block_span(&buf, 99);
        assert_eq!(span, Span::new(2, 2));
        assert!(span.is_empty());
    }

    // === Property Tests ===

    #[allow(
        clippy::disallowed_types,
        reason = "proptest macros internally use Arc"
    )]
    mod proptest_scanner {
        use super::super::{find_block_end, SourceBuffer};
        use proptest::prelude::*;

        /// Fragments that may appear inside a block without affecting the
        /// outer brace balance: inert code, balanced nesting, and literals
        /// or comments hiding stray braces.
        fn body_fragment() -> impl Strategy<Value = &'static str> {
            prop_oneof![
                Just("x"),
                Just(" "),
                Just("\n"),
                Just("f(a, b);"),
                Just("a / b"),
                Just("{ nested(); }"),
                Just(r#""}""#),
                Just("'{'"),
                Just("`} ${ x }`"),
                Just(r#""esc \" brace }""#),
                Just("// } line\n"),
                Just("/* } block */"),
            ]
        }

        proptest! {
            #[test]
            fn balanced_wrapped_bodies_scan_to_full_length(
                fragments in proptest::collection::vec(body_fragment(), 0..24)
            ) {
                let source = format!("{{{}}}", fragments.concat());
                let buf = SourceBuffer::new(&source);
                let expected = u32::try_from(source.len()).expect("source fits in u32");
                prop_assert_eq!(find_block_end(&buf, 0), expected);
            }

            #[test]
            fn never_panics_and_stays_in_bounds(
                source in ".*",
                start in 0u32..512,
            ) {
                let buf = SourceBuffer::new(&source);
                let result = find_block_end(&buf, start);
                prop_assert!(result <= buf.len());
            }

            #[test]
            fn deterministic_for_identical_inputs(
                source in ".*",
                start in 0u32..512,
            ) {
                let buf = SourceBuffer::new(&source);
                prop_assert_eq!(
                    find_block_end(&buf, start),
                    find_block_end(&buf, start)
                );
            }
        }
    }
}
