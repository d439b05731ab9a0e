#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    let output = lex(source);
    assert!(output.errors.is_empty(), "unexpected errors: {:?}", output.errors);
    output.tokens.into_iter().map(|t| t.kind).collect()
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Identifier(name.to_owned())
}

fn num(value: i64, raw: &str) -> TokenKind {
    TokenKind::Number {
        value,
        raw: raw.to_owned(),
    }
}

fn op(op: BuiltinOperator) -> TokenKind {
    TokenKind::Operator(op)
}

fn punct(p: Punctuation) -> TokenKind {
    TokenKind::Punctuation(p)
}

#[test]
fn function_header() {
    assert_eq!(
        kinds("fn main() -> Int {"),
        vec![
            TokenKind::Keyword(Keyword::Fn),
            ident("main"),
            punct(Punctuation::LeftParen),
            punct(Punctuation::RightParen),
            punct(Punctuation::Arrow),
            ident("Int"),
            punct(Punctuation::LeftBrace),
        ]
    );
}

#[test]
fn separators_are_not_coalesced() {
    assert_eq!(
        kinds("a\n\n;b"),
        vec![
            ident("a"),
            punct(Punctuation::Newline),
            punct(Punctuation::Newline),
            punct(Punctuation::Semicolon),
            ident("b"),
        ]
    );
}

#[test]
fn numbers_in_every_radix() {
    assert_eq!(
        kinds("10 0x1F 0b101 0o17 1_000"),
        vec![
            num(10, "10"),
            num(31, "0x1F"),
            num(5, "0b101"),
            num(15, "0o17"),
            num(1000, "1_000"),
        ]
    );
}

#[test]
fn invalid_number_is_an_error_without_token() {
    let output = lex("let x = 12ab\nlet y = 99999999999999999999");
    assert_eq!(output.errors.len(), 2);
    assert_eq!(
        output.errors[0].kind,
        LexErrorKind::InvalidNumber("12ab".to_owned())
    );
    assert!(output
        .tokens
        .iter()
        .all(|t| !matches!(t.kind, TokenKind::Number { .. })));
    // Lexing resumed after each bad literal.
    assert!(output.tokens.iter().any(|t| t.kind == ident("y")));
}

#[test]
fn operator_runs_use_longest_match() {
    assert_eq!(
        kinds("a===b"),
        vec![ident("a"), op(BuiltinOperator::Equal), ident("b")]
    );
    assert_eq!(
        kinds("x=-1"),
        vec![ident("x"), op(BuiltinOperator::Assign), op(BuiltinOperator::Minus), num(1, "1")]
    );
    assert_eq!(
        kinds("**T"),
        vec![op(BuiltinOperator::Star), op(BuiltinOperator::Star), ident("T")]
    );
    assert_eq!(
        kinds("a <<= 2"),
        vec![ident("a"), op(BuiltinOperator::LeftShiftAssign), num(2, "2")]
    );
}

#[test]
fn keywords_and_pound_keywords() {
    assert_eq!(
        kinds("_ as #function #line #nope"),
        vec![
            TokenKind::Keyword(Keyword::Underscore),
            op(BuiltinOperator::As),
            TokenKind::Keyword(Keyword::PoundFunction),
            TokenKind::Keyword(Keyword::PoundLine),
            TokenKind::Unknown("#nope".to_owned()),
        ]
    );
}

#[test]
fn string_and_char_escapes() {
    assert_eq!(
        kinds(r#""a\n\"b\"" '\t' 'x'"#),
        vec![
            TokenKind::StringLiteral("a\n\"b\"".to_owned()),
            TokenKind::Char(b'\t'),
            TokenKind::Char(b'x'),
        ]
    );
}

#[test]
fn bad_escape_skips_the_literal() {
    let output = lex(r#"f("\q") + 1"#);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].kind, LexErrorKind::InvalidEscape('q'));
    let kinds: Vec<_> = output.tokens.into_iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ident("f"),
            punct(Punctuation::LeftParen),
            punct(Punctuation::RightParen),
            op(BuiltinOperator::Plus),
            num(1, "1"),
        ]
    );
}

#[test]
fn unterminated_string_stops_at_newline() {
    let output = lex("\"abc\nx");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].kind, LexErrorKind::UnterminatedString);
    let kinds: Vec<_> = output.tokens.into_iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![punct(Punctuation::Newline), ident("x")]);
}

#[test]
fn multi_char_literal_is_rejected() {
    let output = lex("'ab'");
    assert_eq!(output.errors[0].kind, LexErrorKind::InvalidCharLiteral);
    assert!(output.tokens.is_empty());
}

#[test]
fn comments_are_skipped() {
    assert_eq!(
        kinds("a // line\n/* block\n */ b"),
        vec![ident("a"), punct(Punctuation::Newline), ident("b")]
    );
    let output = lex("a /* never closed");
    assert_eq!(output.errors[0].kind, LexErrorKind::UnterminatedComment);
}

#[test]
fn ellipsis_and_period() {
    assert_eq!(
        kinds("x.0 ..."),
        vec![
            ident("x"),
            punct(Punctuation::Period),
            num(0, "0"),
            punct(Punctuation::Ellipsis),
        ]
    );
}

#[test]
fn ranges_cover_token_text() {
    let source = "let  count = 12\n";
    let output = lex(source);
    let chars: Vec<char> = source.chars().collect();
    let texts: Vec<String> = output
        .tokens
        .iter()
        .map(|t| chars[t.range.to_range()].iter().collect())
        .collect();
    assert_eq!(texts, vec!["let", "count", "=", "12", "\n"]);
    let count = &output.tokens[1];
    assert_eq!(count.range.start, SourceLocation::new(1, 6, 5));
    let newline = &output.tokens[4];
    assert!(newline.is_line_separator());
}

#[test]
fn unknown_scalar() {
    assert_eq!(
        kinds("a @ b"),
        vec![ident("a"), TokenKind::Unknown("@".to_owned()), ident("b")]
    );
}
