//! The span-provider capability: document + position -> optional span.
//!
//! This is the whole host-facing surface for span lookup. A host hands
//! over a [`Document`] snapshot and a cursor [`Position`]; it gets back
//! the span from the declaration keyword through the matching closing
//! brace of its body, or `None` when the position is not on a
//! declaration keyword.

use crate::declaration::{declaration_at, Declaration};
use crate::document::{Document, Position};
use declspan_core::{find_block_end, SourceBuffer, Span};

/// Scan from the declaration keyword to the end of its body block.
fn body_span(doc: &Document, decl: &Declaration) -> Span {
    let buf = SourceBuffer::new(doc.text());
    let end = find_block_end(&buf, decl.keyword_span.start);
    Span::new(decl.keyword_span.start, end)
}

/// The span of the declaration under `position`, from its keyword through
/// the closing brace of its body.
///
/// Returns `None` when the position is not on a declaration keyword. For
/// a declaration whose body never closes, the span runs to the end of the
/// document (best-effort, mirroring the scanner's degradation rule).
pub fn block_span_at(doc: &Document, position: Position) -> Option<Span> {
    let decl = declaration_at(doc, position)?;
    let span = body_span(doc, &decl);
    tracing::debug!(keyword = decl.kind.keyword(), %span, "resolved declaration block span");
    Some(span)
}

/// Like [`block_span_at`], additionally gated on the capitalized-name
/// heuristic: only declarations whose name starts with an uppercase
/// letter are offered for conversion.
pub fn refactor_span_at(doc: &Document, position: Position) -> Option<Span> {
    let decl = declaration_at(doc, position)?;
    if !decl.has_capitalized_name(doc) {
        tracing::debug!(
            keyword = decl.kind.keyword(),
            "declaration name not capitalized, not offering refactor"
        );
        return None;
    }
    let span = body_span(doc, &decl);
    tracing::debug!(keyword = decl.kind.keyword(), %span, "resolved refactor span");
    Some(span)
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

    #[test]
    fn span_covers_keyword_through_body() {
        let doc = Document::new("function Foo() { return 1; }\nFoo();\n");
        let span = block_span_at(&doc, Position::new(0, 0)).expect("span on keyword");
        assert_eq!(doc.slice(span), Some("function Foo() { return 1; }"));
    }

    #[test]
    fn same_span_from_any_position_in_keyword() {
        let doc = Document::new("function Foo() { return 1; }");
        let from_start = block_span_at(&doc, Position::new(0, 0));
        let from_middle = block_span_at(&doc, Position::new(0, 4));
        assert_eq!(from_start, from_middle);
    }

    #[test]
    fn body_with_tricky_contents() {
        let source = concat!(
            "function Foo() {\n",
            "  let s = \"}\"; // } in a string and a comment\n",
            "  /* } */\n",
            "  return `}`;\n",
            "}\n",
            "after();\n",
        );
        let doc = Document::new(source);
        let span = block_span_at(&doc, Position::new(0, 0)).expect("span on keyword");
        let text = doc.slice(span).expect("span slices cleanly");
        assert!(text.starts_with("function Foo() {"));
        assert!(text.ends_with('}'));
        assert!(!text.contains("after"));
    }

    #[test]
    fn none_when_not_on_keyword() {
        let doc = Document::new("function Foo() {}");
        assert_eq!(block_span_at(&doc, Position::new(0, 9)), None); // "Foo"
        assert_eq!(block_span_at(&doc, Position::new(0, 15)), None); // '{'
    }

    #[test]
    fn class_declarations_are_supported() {
        let doc = Document::new("class Foo { bar() {} }\nnew Foo();\n");
        let span = block_span_at(&doc, Position::new(0, 0)).expect("span on keyword");
        assert_eq!(doc.slice(span), Some("class Foo { bar() {} }"));
    }

    #[test]
    fn unclosed_body_spans_to_document_end() {
        let doc = Document::new("function Foo() { oops(");
        let span = block_span_at(&doc, Position::new(0, 0)).expect("span on keyword");
        assert_eq!(span, Span::new(0, doc.len()));
    }

    #[test]
    fn keyword_mid_document() {
        let doc = Document::new("let a = 1;\n\nfunction Foo() { a += 1; }\n");
        let span = block_span_at(&doc, Position::new(2, 3)).expect("span on keyword");
        assert_eq!(doc.slice(span), Some("function Foo() { a += 1; }"));
    }

    // === Capitalized-Name Gate ===

    #[test]
    fn refactor_offered_for_capitalized_name() {
        let doc = Document::new("function Foo() {}");
        assert!(refactor_span_at(&doc, Position::new(0, 0)).is_some());
    }

    #[test]
    fn refactor_not_offered_for_lowercase_name() {
        let doc = Document::new("function foo() {}");
        assert_eq!(refactor_span_at(&doc, Position::new(0, 0)), None);
        // The plain capability still resolves the span.
        assert!(block_span_at(&doc, Position::new(0, 0)).is_some());
    }

    #[test]
    fn refactor_not_offered_for_anonymous_function() {
        let doc = Document::new("function () {}");
        assert_eq!(refactor_span_at(&doc, Position::new(0, 0)), None);
    }

    #[test]
    fn refactor_and_block_spans_agree_when_offered() {
        let doc = Document::new("class Widget { render() {} }");
        assert_eq!(
            refactor_span_at(&doc, Position::new(0, 0)),
            block_span_at(&doc, Position::new(0, 0))
        );
    }
}
