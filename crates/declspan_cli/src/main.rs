//! declspan CLI
//!
//! Span lookup over source files: scan from a raw byte offset, or resolve
//! the declaration under a line:column position.
//!
//! Exit codes: 1 usage error, 2 I/O error, 3 nothing found.

use declspan::{block_span_at, Document, Position};
use declspan_core::{find_block_span, SourceBuffer};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "find" => {
            if args.len() < 4 {
                eprintln!("Usage: declspan find <file> <offset>");
                std::process::exit(1);
            }
            let Ok(offset) = args[3].parse::<u32>() else {
                eprintln!("error: `{}` is not a byte offset", args[3]);
                std::process::exit(1);
            };
            run_find(&args[2], offset);
        }
        "at" => {
            if args.len() < 4 {
                eprintln!("Usage: declspan at <file> <line>:<column>");
                std::process::exit(1);
            }
            let Some((line, column)) = parse_position(&args[3]) else {
                eprintln!(
                    "error: `{}` is not a <line>:<column> position",
                    args[3]
                );
                std::process::exit(1);
            };
            run_at(&args[2], Position::new(line, column));
        }
        _ => {
            eprintln!("error: unknown command `{command}`");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

/// Scan from a raw byte offset and print the block span.
fn run_find(path: &str, offset: u32) {
    let source = read_source(path);
    let buf = SourceBuffer::new(&source);
    let span = find_block_span(&buf, offset);

    if span.is_empty() {
        eprintln!("no block found from offset {offset}");
        std::process::exit(3);
    }

    println!("{span}");
    // The start offset is caller-supplied and may not sit on a character
    // boundary; print the covered text only when it slices cleanly.
    if let Some(text) = source.get(span.to_range()) {
        println!("{text}");
    }
}

/// Resolve the declaration under a position and print its span.
fn run_at(path: &str, position: Position) {
    let source = read_source(path);
    let doc = Document::new(source);

    let Some(span) = block_span_at(&doc, position) else {
        eprintln!("position {position} is not on a declaration keyword");
        std::process::exit(3);
    };

    println!("{span}");
    if let Some(text) = doc.slice(span) {
        println!("{text}");
    }
}

/// Parse a `<line>:<column>` pair (both 0-based).
fn parse_position(arg: &str) -> Option<(u32, u32)> {
    let (line, column) = arg.split_once(':')?;
    Some((line.parse().ok()?, column.parse().ok()?))
}

fn read_source(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            tracing::debug!(bytes = text.len(), path, "read source file");
            text
        }
        Err(e) => {
            eprintln!("error: cannot read `{path}`: {e}");
            std::process::exit(2);
        }
    }
}

/// Initialize tracing output when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        let filter = EnvFilter::from_default_env();
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(filter)
            .init();
    }
}

fn print_usage() {
    eprintln!("declspan - declaration block span finder");
    eprintln!();
    eprintln!("Usage: declspan <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  find <file> <offset>      Scan from a byte offset; print the block span");
    eprintln!("  at <file> <line>:<col>    Span of the declaration under a position (0-based)");
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests {
    use super::parse_position;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_line_and_column() {
        assert_eq!(parse_position("3:14"), Some((3, 14)));
        assert_eq!(parse_position("0:0"), Some((0, 0)));
    }

    #[test]
    fn rejects_malformed_positions() {
        for arg in ["", "3", "3:", ":4", "a:b", "3:4:5", "-1:0"] {
            assert_eq!(parse_position(arg), None, "{arg:?}");
        }
    }
}
