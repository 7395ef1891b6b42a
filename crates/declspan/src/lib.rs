//! Declaration block spans over document snapshots.
//!
//! Sits atop [`declspan_core`] and re-expresses the editor-side concerns
//! as host-independent interfaces: an immutable [`Document`] snapshot
//! with position mapping and word lookup, declaration keyword detection,
//! the span-provider capability ([`block_span_at`] /
//! [`refactor_span_at`]), and the [`SpanRewriter`] seam through which the
//! black-box transformation is consumed.
//!
//! # Example
//!
//! ```
//! use declspan::{block_span_at, Document, Position};
//!
//! let doc = Document::new("function Foo() { return 1; }\nFoo();\n");
//! let span = block_span_at(&doc, Position::new(0, 0)).unwrap();
//! assert_eq!(doc.slice(span), Some("function Foo() { return 1; }"));
//! ```

mod declaration;
mod document;
mod error;
mod provider;
mod rewrite;

pub use declaration::{declaration_at, DeclKind, Declaration};
pub use document::{Document, Position};
pub use error::Error;
pub use provider::{block_span_at, refactor_span_at};
pub use rewrite::{apply_rewrite, RewriteError, SpanRewriter};

// Spans are part of this crate's public signatures; re-export the core
// type so hosts need only one dependency.
pub use declspan_core::Span;
