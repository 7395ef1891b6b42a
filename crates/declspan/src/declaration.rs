//! Declaration keyword detection under a document position.
//!
//! Answers "is the word under the cursor a declaration keyword, and what
//! follows it?" -- the gate the span provider applies before scanning.

use crate::document::{is_word_byte, Document, Position};
use declspan_core::Span;

/// The declaration keywords the finder recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// A `function` declaration.
    Function,
    /// A `class` declaration.
    Class,
}

impl DeclKind {
    /// The source keyword for this declaration kind.
    pub const fn keyword(self) -> &'static str {
        match self {
            DeclKind::Function => "function",
            DeclKind::Class => "class",
        }
    }

    /// Map a source word to a declaration kind, if it is a keyword.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "function" => Some(DeclKind::Function),
            "class" => Some(DeclKind::Class),
            _ => None,
        }
    }
}

/// A declaration keyword found under a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration {
    /// Which keyword was found.
    pub kind: DeclKind,
    /// The span of the keyword itself.
    pub keyword_span: Span,
}

impl Declaration {
    /// The identifier following the keyword on the same line, if any.
    ///
    /// Skips horizontal whitespace after the keyword and takes the leading
    /// identifier word. Returns `None` for anonymous declarations
    /// (`function () { ... }`) or when the line ends first.
    pub fn name<'d>(&self, doc: &'d Document) -> Option<&'d str> {
        let line = doc.position_at(self.keyword_span.end).line;
        let line_start = doc.line_start(line)?;
        let line_text = doc.line_text(line)?;
        let after = line_text.get((self.keyword_span.end - line_start) as usize..)?;
        let trimmed = after.trim_start();
        let word_len = trimmed.bytes().take_while(|b| is_word_byte(*b)).count();
        if word_len == 0 {
            None
        } else {
            trimmed.get(..word_len)
        }
    }

    /// Returns `true` when the declaration's name starts with an uppercase
    /// letter -- the constructor-name heuristic for offering a conversion.
    ///
    /// Anonymous declarations have no name and return `false`.
    pub fn has_capitalized_name(&self, doc: &Document) -> bool {
        self.name(doc)
            .and_then(|name| name.chars().next())
            .is_some_and(char::is_uppercase)
    }
}

/// Find a declaration keyword under `position`.
///
/// Resolves the word range at the position and checks it against the
/// known keywords. Returns `None` when the position is out of range, not
/// on a word, or on a word that is not a declaration keyword.
pub fn declaration_at(doc: &Document, position: Position) -> Option<Declaration> {
    let offset = doc.offset_at(position)?;
    let keyword_span = doc.word_range_at(offset)?;
    let word = doc.slice(keyword_span)?;
    let kind = DeclKind::from_keyword(word)?;
    Some(Declaration { kind, keyword_span })
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

    // === Keyword Mapping ===

    #[test]
    fn keyword_round_trips() {
        for kind in [DeclKind::Function, DeclKind::Class] {
            assert_eq!(DeclKind::from_keyword(kind.keyword()), Some(kind));
        }
    }

    #[test]
    fn non_keywords_map_to_none() {
        for word in ["Function", "functions", "klass", "let", ""] {
            assert_eq!(DeclKind::from_keyword(word), None, "{word:?}");
        }
    }

    // === declaration_at ===

    #[test]
    fn finds_function_keyword_under_cursor() {
        let doc = Document::new("function Foo() {}");
        // Anywhere within the keyword.
        for column in 0..8 {
            let decl = declaration_at(&doc, Position::new(0, column))
                .expect("keyword under cursor");
            assert_eq!(decl.kind, DeclKind::Function);
            assert_eq!(decl.keyword_span, Span::new(0, 8));
        }
    }

    #[test]
    fn finds_class_keyword() {
        let doc = Document::new("class Foo {}");
        let decl = declaration_at(&doc, Position::new(0, 2)).expect("keyword under cursor");
        assert_eq!(decl.kind, DeclKind::Class);
        assert_eq!(decl.keyword_span, Span::new(0, 5));
    }

    #[test]
    fn keyword_on_later_line() {
        let doc = Document::new("let x = 1;\nfunction Bar() {}\n");
        let decl = declaration_at(&doc, Position::new(1, 4)).expect("keyword under cursor");
        assert_eq!(decl.kind, DeclKind::Function);
        assert_eq!(decl.keyword_span, Span::new(11, 19));
    }

    #[test]
    fn none_on_identifier() {
        let doc = Document::new("function Foo() {}");
        assert_eq!(declaration_at(&doc, Position::new(0, 10)), None); // "Foo"
    }

    #[test]
    fn none_on_whitespace_or_punctuation() {
        let doc = Document::new("function Foo() {}");
        assert_eq!(declaration_at(&doc, Position::new(0, 8)), None); // space
        assert_eq!(declaration_at(&doc, Position::new(0, 13)), None); // ')'
    }

    #[test]
    fn none_outside_document() {
        let doc = Document::new("function Foo() {}");
        assert_eq!(declaration_at(&doc, Position::new(5, 0)), None);
    }

    #[test]
    fn keyword_must_be_whole_word() {
        // "functionX" is one word and not a keyword.
        let doc = Document::new("functionX() {}");
        assert_eq!(declaration_at(&doc, Position::new(0, 3)), None);
    }

    // === Names ===

    fn decl_at_origin(doc: &Document) -> Declaration {
        declaration_at(doc, Position::new(0, 0)).expect("keyword at origin")
    }

    #[test]
    fn name_after_keyword() {
        let doc = Document::new("function Foo() {}");
        assert_eq!(decl_at_origin(&doc).name(&doc), Some("Foo"));
    }

    #[test]
    fn name_skips_extra_whitespace() {
        let doc = Document::new("function \t Widget2() {}");
        assert_eq!(decl_at_origin(&doc).name(&doc), Some("Widget2"));
    }

    #[test]
    fn anonymous_declaration_has_no_name() {
        let doc = Document::new("function () {}");
        assert_eq!(decl_at_origin(&doc).name(&doc), None);
    }

    #[test]
    fn name_does_not_cross_lines() {
        let doc = Document::new("function\nFoo() {}");
        assert_eq!(decl_at_origin(&doc).name(&doc), None);
    }

    // === Capitalized-Name Heuristic ===

    #[test]
    fn capitalized_name_detected() {
        let doc = Document::new("function Foo() {}");
        assert!(decl_at_origin(&doc).has_capitalized_name(&doc));
    }

    #[test]
    fn lowercase_name_rejected() {
        let doc = Document::new("function foo() {}");
        assert!(!decl_at_origin(&doc).has_capitalized_name(&doc));
    }

    #[test]
    fn underscore_and_digit_names_rejected() {
        for source in ["function _Foo() {}", "function 9lives() {}"] {
            let doc = Document::new(source);
            assert!(
                !decl_at_origin(&doc).has_capitalized_name(&doc),
                "{source:?}"
            );
        }
    }

    #[test]
    fn anonymous_declaration_rejected() {
        let doc = Document::new("function (x) { return x; }");
        assert!(!decl_at_origin(&doc).has_capitalized_name(&doc));
    }
}
