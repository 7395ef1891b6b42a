//! Seam for the black-box span rewrite.
//!
//! The actual source-to-source transformation lives outside this
//! repository. [`SpanRewriter`] is the boundary it is consumed through:
//! given the text of a matched span and a type-richness flag, produce a
//! replacement string or fail. [`apply_rewrite`] splices the replacement
//! into a new document text.

use crate::document::Document;
use crate::error::Error;
use declspan_core::Span;

/// A black-box transformation of a matched span.
pub trait SpanRewriter {
    /// Produce a replacement for `source`, the text of a matched span.
    ///
    /// `typed` requests a rendition that uses the target language's richer
    /// type syntax; rewriters targeting an untyped dialect may ignore it.
    fn rewrite(&self, source: &str, typed: bool) -> Result<String, RewriteError>;
}

/// Failure reported by a [`SpanRewriter`].
#[derive(Debug, thiserror::Error)]
#[error("rewrite failed: {message}")]
pub struct RewriteError {
    message: String,
}

impl RewriteError {
    /// Create a rewrite error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        RewriteError {
            message: message.into(),
        }
    }
}

/// Replace `span` in the document with the rewriter's output.
///
/// Validates the span against the document (bounds and UTF-8 character
/// boundaries), invokes the rewriter on the covered text, and returns a
/// new text with the replacement spliced in. The document itself is an
/// immutable snapshot and is not modified.
pub fn apply_rewrite(
    doc: &Document,
    span: Span,
    rewriter: &dyn SpanRewriter,
    typed: bool,
) -> Result<String, Error> {
    let source = doc.slice(span).ok_or(Error::SpanOutOfBounds {
        span,
        len: doc.len(),
    })?;
    let replacement = rewriter.rewrite(source, typed)?;

    let text = doc.text();
    let mut out = String::with_capacity(text.len() - source.len() + replacement.len());
    out.push_str(&text[..span.start as usize]);
    out.push_str(&replacement);
    out.push_str(&text[span.end as usize..]);
    Ok(out)
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

    /// Test double: replaces the span with a marker that records the flag.
    struct Stub;

    impl SpanRewriter for Stub {
        fn rewrite(&self, source: &str, typed: bool) -> Result<String, RewriteError> {
            Ok(format!("<{}:{}>", source.len(), typed))
        }
    }

    /// Test double: always fails.
    struct Failing;

    impl SpanRewriter for Failing {
        fn rewrite(&self, _source: &str, _typed: bool) -> Result<String, RewriteError> {
            Err(RewriteError::new("unsupported construct"))
        }
    }

    #[test]
    fn splices_replacement_into_text() {
        let doc = Document::new("before MIDDLE after");
        let out = apply_rewrite(&doc, Span::new(7, 13), &Stub, false).expect("rewrite applies");
        assert_eq!(out, "before <6:false> after");
    }

    #[test]
    fn passes_type_richness_flag_through() {
        let doc = Document::new("xy");
        let out = apply_rewrite(&doc, Span::new(0, 2), &Stub, true).expect("rewrite applies");
        assert_eq!(out, "<2:true>");
    }

    #[test]
    fn whole_document_span() {
        let doc = Document::new("abc");
        let out = apply_rewrite(&doc, Span::new(0, 3), &Stub, false).expect("rewrite applies");
        assert_eq!(out, "<3:false>");
    }

    #[test]
    fn out_of_bounds_span_is_rejected() {
        let doc = Document::new("abc");
        let err = apply_rewrite(&doc, Span::new(1, 9), &Stub, false).unwrap_err();
        assert!(matches!(err, Error::SpanOutOfBounds { len: 3, .. }));
    }

    #[test]
    fn non_char_boundary_span_is_rejected() {
        let doc = Document::new("caf\u{E9}!");
        let err = apply_rewrite(&doc, Span::new(0, 4), &Stub, false).unwrap_err();
        assert!(matches!(err, Error::SpanOutOfBounds { .. }));
    }

    #[test]
    fn rewriter_failure_propagates() {
        let doc = Document::new("abc");
        let err = apply_rewrite(&doc, Span::new(0, 3), &Failing, false).unwrap_err();
        assert!(matches!(err, Error::Rewrite(_)));
        assert_eq!(
            err.to_string(),
            "rewrite failed: unsupported construct"
        );
    }

    #[test]
    fn document_snapshot_is_untouched() {
        let doc = Document::new("before MIDDLE after");
        let _ = apply_rewrite(&doc, Span::new(7, 13), &Stub, false);
        assert_eq!(doc.text(), "before MIDDLE after");
    }
}
