//! Standalone block-span scanner for declaration bodies.
//!
//! Given a text buffer and a start offset, [`find_block_end`] returns the
//! offset one past the closing brace matching the first top-level `{` at
//! or after the start -- skipping nested braces, string and template
//! literals (with escapes), and line/block comments. It is deliberately
//! not a parser: it tracks just enough lexical state to know whether a
//! brace is real, and degrades gracefully on unbalanced input.
//!
//! This crate has no internal dependencies, so hosts (editor adapters,
//! CLIs, batch tools) can depend on it without pulling in the rest of the
//! stack.
//!
//! # Example
//!
//! ```
//! use declspan_core::{find_block_end, SourceBuffer};
//!
//! let buf = SourceBuffer::new(r#"function f() { return "}"; } f();"#);
//! let end = find_block_end(&buf, 0);
//! assert_eq!(end, 28); // one past the real closing brace
//! ```

mod block_scanner;
mod cursor;
mod source_buffer;
mod span;

pub use block_scanner::{find_block_end, find_block_span};
pub use cursor::Cursor;
pub use source_buffer::SourceBuffer;
pub use span::{Span, SpanError};
