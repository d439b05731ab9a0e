use super::*;
use pretty_assertions::assert_eq;

#[test]
fn keyword_table_round_trips() {
    for (spelling, kw) in KEYWORDS {
        assert_eq!(Keyword::from_text(spelling), Some(*kw));
        assert_eq!(kw.text(), *spelling);
    }
    assert_eq!(Keyword::from_text("self"), None);
}

#[test]
fn classification_queries() {
    let num = TokenKind::Number {
        value: 42,
        raw: "42".into(),
    };
    assert!(num.is_literal());
    assert!(TokenKind::Char(b'a').is_literal());
    assert!(!TokenKind::StringLiteral("x".into()).is_literal());
    assert!(TokenKind::StringLiteral("x".into()).is_string());
    assert!(TokenKind::Punctuation(Punctuation::Semicolon).is_line_separator());
    assert!(TokenKind::Punctuation(Punctuation::Newline).is_line_separator());
    assert!(!TokenKind::Punctuation(Punctuation::Comma).is_line_separator());
    assert!(TokenKind::Eof.is_eof());
}

#[test]
fn attribute_names_and_self_highlight_as_keywords() {
    assert!(TokenKind::Identifier("foreign".into()).is_keyword());
    assert!(TokenKind::Identifier("mutating".into()).is_keyword());
    assert!(TokenKind::Identifier("self".into()).is_keyword());
    assert!(TokenKind::Operator(BuiltinOperator::As).is_keyword());
    assert!(!TokenKind::Identifier("count".into()).is_keyword());
    assert!(!TokenKind::Operator(BuiltinOperator::Plus).is_keyword());
}

#[test]
fn display_for_messages() {
    assert_eq!(TokenKind::Keyword(Keyword::Fn).to_string(), "fn");
    assert_eq!(
        TokenKind::Punctuation(Punctuation::Newline).to_string(),
        "newline"
    );
    assert_eq!(TokenKind::Char(b'\n').to_string(), "'\\n'");
    assert_eq!(TokenKind::Operator(BuiltinOperator::Equal).to_string(), "===");
}
