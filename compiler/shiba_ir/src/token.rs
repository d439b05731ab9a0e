//! Token types for the Shiba lexer.
//!
//! The classification queries at the bottom (`is_keyword`, `is_literal`,
//! `is_string`, `is_line_separator`, `is_eof`) are what external
//! highlighters rely on, so they stay cheap and purely syntactic.

use std::fmt;

use crate::attr::DeclAttribute;
use crate::{BuiltinOperator, SourceRange};

/// A token with its range in the source.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub range: SourceRange,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, range: SourceRange) -> Self {
        Token { kind, range }
    }

    /// Create a token with an empty range, for tests and synthesized input.
    pub fn dummy(kind: TokenKind) -> Self {
        Token {
            kind,
            range: SourceRange::default(),
        }
    }

    #[inline]
    pub fn is_keyword(&self) -> bool {
        self.kind.is_keyword()
    }

    #[inline]
    pub fn is_literal(&self) -> bool {
        self.kind.is_literal()
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        self.kind.is_string()
    }

    #[inline]
    pub fn is_line_separator(&self) -> bool {
        self.kind.is_line_separator()
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind.is_eof()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.range)
    }
}

/// Token kinds for Shiba.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// Integer literal. `raw` keeps the spelling for overflow messages.
    Number { value: i64, raw: String },
    /// Character literal, always a single ASCII scalar.
    Char(u8),
    /// String literal with escapes already applied.
    StringLiteral(String),
    Identifier(String),
    Operator(BuiltinOperator),
    Punctuation(Punctuation),
    Keyword(Keyword),
    /// A scalar or `#` word that matched nothing.
    Unknown(String),
    Eof,
}

/// Fixed punctuation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Punctuation {
    Newline,
    Semicolon,
    Comma,
    Colon,
    Question,
    Period,
    Ellipsis,
    Arrow,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
}

impl Punctuation {
    pub fn text(self) -> &'static str {
        match self {
            Punctuation::Newline => "\n",
            Punctuation::Semicolon => ";",
            Punctuation::Comma => ",",
            Punctuation::Colon => ":",
            Punctuation::Question => "?",
            Punctuation::Period => ".",
            Punctuation::Ellipsis => "...",
            Punctuation::Arrow => "->",
            Punctuation::LeftParen => "(",
            Punctuation::RightParen => ")",
            Punctuation::LeftBrace => "{",
            Punctuation::RightBrace => "}",
            Punctuation::LeftBracket => "[",
            Punctuation::RightBracket => "]",
        }
    }

    /// Single-scalar punctuation.
    pub fn from_char(c: char) -> Option<Punctuation> {
        Some(match c {
            '\n' => Punctuation::Newline,
            ';' => Punctuation::Semicolon,
            ',' => Punctuation::Comma,
            ':' => Punctuation::Colon,
            '?' => Punctuation::Question,
            '.' => Punctuation::Period,
            '(' => Punctuation::LeftParen,
            ')' => Punctuation::RightParen,
            '{' => Punctuation::LeftBrace,
            '}' => Punctuation::RightBrace,
            '[' => Punctuation::LeftBracket,
            ']' => Punctuation::RightBracket,
            _ => return None,
        })
    }
}

/// Reserved words, including the `#`-prefixed ones.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Keyword {
    Fn,
    Init,
    Deinit,
    Extension,
    Sizeof,
    Typedef,
    Nil,
    While,
    For,
    In,
    Continue,
    If,
    Else,
    Mut,
    Let,
    Return,
    Enum,
    Switch,
    Case,
    Break,
    Default,
    True,
    False,
    Underscore,
    PoundFunction,
    PoundFile,
    PoundLine,
    PoundWarning,
    PoundError,
}

const KEYWORDS: &[(&str, Keyword)] = &[
    ("fn", Keyword::Fn),
    ("init", Keyword::Init),
    ("deinit", Keyword::Deinit),
    ("extension", Keyword::Extension),
    ("sizeof", Keyword::Sizeof),
    ("typedef", Keyword::Typedef),
    ("nil", Keyword::Nil),
    ("while", Keyword::While),
    ("for", Keyword::For),
    ("in", Keyword::In),
    ("continue", Keyword::Continue),
    ("if", Keyword::If),
    ("else", Keyword::Else),
    ("mut", Keyword::Mut),
    ("let", Keyword::Let),
    ("return", Keyword::Return),
    ("enum", Keyword::Enum),
    ("switch", Keyword::Switch),
    ("case", Keyword::Case),
    ("break", Keyword::Break),
    ("default", Keyword::Default),
    ("true", Keyword::True),
    ("false", Keyword::False),
    ("_", Keyword::Underscore),
    ("#function", Keyword::PoundFunction),
    ("#file", Keyword::PoundFile),
    ("#line", Keyword::PoundLine),
    ("#warning", Keyword::PoundWarning),
    ("#error", Keyword::PoundError),
];

impl Keyword {
    pub fn from_text(text: &str) -> Option<Keyword> {
        KEYWORDS
            .iter()
            .find(|(spelling, _)| *spelling == text)
            .map(|(_, kw)| *kw)
    }

    pub fn text(self) -> &'static str {
        KEYWORDS
            .iter()
            .find(|(_, kw)| *kw == self)
            .map_or("", |(spelling, _)| *spelling)
    }

    /// Keywords that can start a top-level declaration.
    pub fn starts_item(self) -> bool {
        matches!(
            self,
            Keyword::Fn
                | Keyword::Typedef
                | Keyword::Extension
                | Keyword::Let
                | Keyword::Mut
                | Keyword::PoundWarning
                | Keyword::PoundError
        )
    }
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        match self {
            TokenKind::Keyword(_) | TokenKind::Operator(BuiltinOperator::As) => true,
            TokenKind::Identifier(name) => {
                name == "self" || DeclAttribute::from_name(name).is_some()
            }
            _ => false,
        }
    }

    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(self, TokenKind::Number { .. } | TokenKind::Char(_))
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, TokenKind::StringLiteral(_))
    }

    #[inline]
    pub fn is_line_separator(&self) -> bool {
        matches!(
            self,
            TokenKind::Punctuation(Punctuation::Newline | Punctuation::Semicolon)
        )
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self, TokenKind::Eof)
    }

    #[inline]
    pub fn is_punct(&self, punct: Punctuation) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == punct)
    }

    #[inline]
    pub fn is_kw(&self, keyword: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == keyword)
    }

    #[inline]
    pub fn is_op(&self, op: BuiltinOperator) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == op)
    }

    /// Short label used by `shibac lex`.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Number { .. } => "number",
            TokenKind::Char(_) => "char",
            TokenKind::StringLiteral(_) => "string",
            TokenKind::Identifier(_) => "identifier",
            TokenKind::Operator(_) => "operator",
            TokenKind::Punctuation(_) => "punctuation",
            TokenKind::Keyword(_) => "keyword",
            TokenKind::Unknown(_) => "unknown",
            TokenKind::Eof => "eof",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number { raw, .. } => f.write_str(raw),
            TokenKind::Char(c) => write!(f, "'{}'", char::from(*c).escape_default()),
            TokenKind::StringLiteral(s) => write!(f, "\"{}\"", s.escape_default()),
            TokenKind::Identifier(name) | TokenKind::Unknown(name) => f.write_str(name),
            TokenKind::Operator(op) => f.write_str(op.text()),
            TokenKind::Punctuation(Punctuation::Newline) => f.write_str("newline"),
            TokenKind::Punctuation(p) => f.write_str(p.text()),
            TokenKind::Keyword(kw) => f.write_str(kw.text()),
            TokenKind::Eof => f.write_str("end of file"),
        }
    }
}

#[cfg(test)]
mod tests;
