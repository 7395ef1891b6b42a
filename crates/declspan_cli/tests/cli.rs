//! End-to-end tests driving the `declspan` binary.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]

use std::io::Write;
use std::process::Command;

const SOURCE: &str = "// sample\nfunction Foo() {\n  return \"}\";\n}\nFoo();\n";

/// Write the sample source to a temp file and return the file handle.
fn sample_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(SOURCE.as_bytes()).expect("write temp file");
    file
}

fn declspan(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_declspan"))
        .args(args)
        .output()
        .expect("run declspan binary")
}

#[test]
fn find_prints_span_and_text() {
    let file = sample_file();
    let path = file.path().to_str().expect("utf-8 temp path");

    // Offset 10 is the start of "function".
    let output = declspan(&["find", path, "10"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("10..42"));
    // The covered text runs through the real closing brace, not the one
    // inside the string literal.
    assert!(stdout.trim_end().ends_with('}'));
    assert!(!stdout.contains("Foo();"));
}

#[test]
fn at_resolves_declaration_under_position() {
    let file = sample_file();
    let path = file.path().to_str().expect("utf-8 temp path");

    let output = declspan(&["at", path, "1:0"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    assert!(stdout.starts_with("10..42"));
}

#[test]
fn at_off_keyword_exits_with_not_found() {
    let file = sample_file();
    let path = file.path().to_str().expect("utf-8 temp path");

    // Position 0:0 is inside the leading comment, not on a keyword.
    let output = declspan(&["at", path, "0:0"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn missing_file_exits_with_io_error() {
    let output = declspan(&["find", "/no/such/file.js", "0"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn no_arguments_prints_usage() {
    let output = declspan(&[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).expect("utf-8 stderr");
    assert!(stderr.contains("Usage: declspan"));
}
