//! Error type for span application.
//!
//! Span *lookup* is infallible by design (absence is `None`, unbalanced
//! input degrades); errors only arise when applying a rewrite to a span.

use crate::rewrite::RewriteError;
use declspan_core::Span;

/// Failure while applying a rewrite to a document span.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The span does not address valid text in the document: out of
    /// bounds, or not on UTF-8 character boundaries.
    #[error("span {span} is out of bounds for a document of {len} bytes")]
    SpanOutOfBounds {
        /// The offending span.
        span: Span,
        /// The document length in bytes.
        len: u32,
    },

    /// The black-box rewriter rejected the span's text.
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
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
    fn out_of_bounds_message_names_span_and_length() {
        let err = Error::SpanOutOfBounds {
            span: Span::new(4, 10),
            len: 7,
        };
        assert_eq!(
            err.to_string(),
            "span 4..10 is out of bounds for a document of 7 bytes"
        );
    }

    #[test]
    fn rewrite_error_converts_via_from() {
        let err: Error = RewriteError::new("nope").into();
        assert_eq!(err.to_string(), "rewrite failed: nope");
    }
}
