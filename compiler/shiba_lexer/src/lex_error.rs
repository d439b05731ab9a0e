//! Lexer errors.
//!
//! A lex error never stops the lexer. It is recorded with the range of the
//! offending literal and lexing resumes after it.

use shiba_diagnostic::Diagnostic;
use shiba_ir::SourceRange;
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub range: SourceRange,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum LexErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated character literal")]
    UnterminatedChar,
    #[error("character literal must contain exactly one ASCII character")]
    InvalidCharLiteral,
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),
    #[error("unterminated block comment")]
    UnterminatedComment,
}

impl From<LexError> for Diagnostic {
    fn from(error: LexError) -> Self {
        Diagnostic::error(error.kind.to_string()).at_range(Some(error.range))
    }
}
