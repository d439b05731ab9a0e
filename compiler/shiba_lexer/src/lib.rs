//! Lexer for Shiba.
//!
//! Walks the source one Unicode scalar at a time and produces a flat token
//! list. Newlines are significant: each one becomes a separator token, as
//! does each `;`. Malformed literals are recorded as [`LexError`]s and
//! lexing continues with the next token.
//!
//! The returned token list never contains the end-of-file token; the
//! parser synthesizes one when it runs off the end.

mod cursor;
mod lex_error;

use shiba_ir::{BuiltinOperator, Keyword, Punctuation, SourceLocation, SourceRange, Token, TokenKind};

use cursor::Cursor;
pub use lex_error::{LexError, LexErrorKind};

/// Tokens and errors produced for one source text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lex `source` to completion.
pub fn lex(source: &str) -> LexOutput {
    Lexer::new(source).run()
}

#[inline]
fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[inline]
fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '+' | '-' | '*' | '/' | '%' | '=' | '~' | '<' | '>' | '^' | '|' | '&' | '!'
    )
}

/// Resolve an operator-class run to a token kind.
fn operator_kind(text: &str) -> Option<TokenKind> {
    if text == "->" {
        return Some(TokenKind::Punctuation(Punctuation::Arrow));
    }
    BuiltinOperator::from_text(text).map(TokenKind::Operator)
}

/// Parse a digit-leading identifier run as an integer.
fn parse_number(text: &str) -> Option<i64> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    let (digits, radix) = match cleaned.get(..2) {
        Some("0x" | "0X") => (&cleaned[2..], 16),
        Some("0b" | "0B") => (&cleaned[2..], 2),
        Some("0o" | "0O") => (&cleaned[2..], 8),
        _ => (cleaned.as_str(), 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    i64::from_str_radix(digits, radix).ok()
}

pub struct Lexer {
    cursor: Cursor,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn run(mut self) -> LexOutput {
        loop {
            self.skip_trivia();
            if self.cursor.is_eof() {
                break;
            }
            self.lex_token();
        }
        LexOutput {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    fn push(&mut self, kind: TokenKind, start: SourceLocation) {
        let range = SourceRange::new(start, self.cursor.location());
        self.tokens.push(Token::new(kind, range));
    }

    fn error(&mut self, kind: LexErrorKind, start: SourceLocation) {
        let range = SourceRange::new(start, self.cursor.location());
        self.errors.push(LexError { kind, range });
    }

    /// Skip spaces, tabs, carriage returns and comments. Newlines stay.
    fn skip_trivia(&mut self) {
        loop {
            match (self.cursor.current(), self.cursor.peek(1)) {
                (Some(c), _) if c != '\n' && c.is_whitespace() => {
                    self.cursor.bump();
                }
                (Some('/'), Some('/')) => {
                    self.cursor.eat_while(|c| c != '\n');
                }
                (Some('/'), Some('*')) => self.skip_block_comment(),
                _ => return,
            }
        }
    }

    fn skip_block_comment(&mut self) {
        let start = self.cursor.location();
        self.cursor.bump_n(2);
        loop {
            match (self.cursor.current(), self.cursor.peek(1)) {
                (Some('*'), Some('/')) => {
                    self.cursor.bump_n(2);
                    return;
                }
                (Some(_), _) => {
                    self.cursor.bump();
                }
                (None, _) => {
                    self.error(LexErrorKind::UnterminatedComment, start);
                    return;
                }
            }
        }
    }

    fn lex_token(&mut self) {
        let start = self.cursor.location();
        let Some(c) = self.cursor.current() else {
            return;
        };
        match c {
            '.' if self.cursor.peek(1) == Some('.') && self.cursor.peek(2) == Some('.') => {
                self.cursor.bump_n(3);
                self.push(TokenKind::Punctuation(Punctuation::Ellipsis), start);
            }
            '\'' => self.lex_char(start),
            '"' => self.lex_string(start),
            '#' => self.lex_pound(start),
            c if is_identifier_char(c) => self.lex_word(start),
            c if is_operator_char(c) => self.lex_operator(start),
            c => {
                self.cursor.bump();
                let kind = Punctuation::from_char(c)
                    .map_or_else(|| TokenKind::Unknown(c.to_string()), TokenKind::Punctuation);
                self.push(kind, start);
            }
        }
    }

    fn lex_word(&mut self, start: SourceLocation) {
        let text = self.cursor.eat_while(is_identifier_char);
        if text.starts_with(|c: char| c.is_ascii_digit()) {
            match parse_number(&text) {
                Some(value) => self.push(TokenKind::Number { value, raw: text }, start),
                None => self.error(LexErrorKind::InvalidNumber(text), start),
            }
            return;
        }
        let kind = if text == "as" {
            TokenKind::Operator(BuiltinOperator::As)
        } else if let Some(keyword) = Keyword::from_text(&text) {
            TokenKind::Keyword(keyword)
        } else {
            TokenKind::Identifier(text)
        };
        self.push(kind, start);
    }

    fn lex_pound(&mut self, start: SourceLocation) {
        self.cursor.bump();
        let word = self.cursor.eat_while(is_identifier_char);
        let text = format!("#{word}");
        let kind = Keyword::from_text(&text).map_or(TokenKind::Unknown(text), TokenKind::Keyword);
        self.push(kind, start);
    }

    /// Operator runs: the whole run if it is an operator, otherwise the
    /// longest prefix that is, otherwise one unknown scalar.
    fn lex_operator(&mut self, start: SourceLocation) {
        let mut run = String::new();
        let mut ahead = 0;
        while let Some(c) = self.cursor.peek(ahead).filter(|&c| is_operator_char(c)) {
            // A comment opener ends the run.
            if c == '/' && matches!(self.cursor.peek(ahead + 1), Some('/' | '*')) {
                break;
            }
            run.push(c);
            ahead += 1;
        }

        let chars: Vec<char> = run.chars().collect();
        for len in (1..=chars.len()).rev() {
            let prefix: String = chars[..len].iter().collect();
            if let Some(kind) = operator_kind(&prefix) {
                self.cursor.bump_n(len);
                self.push(kind, start);
                return;
            }
        }
        self.cursor.bump();
        let unknown = chars.first().map_or_else(String::new, char::to_string);
        self.push(TokenKind::Unknown(unknown), start);
    }

    /// Read one scalar of a literal body, applying escapes.
    ///
    /// Returns `Err` with the bad escape character for an unknown escape.
    fn read_escaped(&mut self) -> Result<char, char> {
        let Some(c) = self.cursor.bump() else {
            return Ok('\0');
        };
        if c != '\\' {
            return Ok(c);
        }
        // A trailing backslash leaves the newline for the caller to report.
        let escaped = match self.cursor.current() {
            None | Some('\n') => return Err('\\'),
            Some(escaped) => escaped,
        };
        self.cursor.bump();
        match escaped {
            'n' => Ok('\n'),
            't' => Ok('\t'),
            'r' => Ok('\r'),
            '"' => Ok('"'),
            '\'' => Ok('\''),
            '\\' => Ok('\\'),
            '0' => Ok('\0'),
            other => Err(other),
        }
    }

    fn lex_char(&mut self, start: SourceLocation) {
        self.cursor.bump();
        let mut value = Vec::new();
        let mut bad_escape = None;
        loop {
            match self.cursor.current() {
                None | Some('\n') => {
                    self.error(LexErrorKind::UnterminatedChar, start);
                    return;
                }
                Some('\'') => {
                    self.cursor.bump();
                    break;
                }
                Some(_) => match self.read_escaped() {
                    Ok(c) => value.push(c),
                    Err(c) => bad_escape = bad_escape.or(Some(c)),
                },
            }
        }
        if let Some(c) = bad_escape {
            self.error(LexErrorKind::InvalidEscape(c), start);
            return;
        }
        match value.as_slice() {
            [c] if c.is_ascii() => {
                // ASCII scalars fit in a byte.
                let byte = u8::try_from(u32::from(*c)).unwrap_or(0);
                self.push(TokenKind::Char(byte), start);
            }
            _ => self.error(LexErrorKind::InvalidCharLiteral, start),
        }
    }

    fn lex_string(&mut self, start: SourceLocation) {
        self.cursor.bump();
        let mut value = String::new();
        let mut bad_escape = None;
        loop {
            match self.cursor.current() {
                None | Some('\n') => {
                    self.error(LexErrorKind::UnterminatedString, start);
                    return;
                }
                Some('"') => {
                    self.cursor.bump();
                    break;
                }
                Some(_) => match self.read_escaped() {
                    Ok(c) => value.push(c),
                    Err(c) => bad_escape = bad_escape.or(Some(c)),
                },
            }
        }
        match bad_escape {
            Some(c) => self.error(LexErrorKind::InvalidEscape(c), start),
            None => self.push(TokenKind::StringLiteral(value), start),
        }
    }
}

#[cfg(test)]
mod tests;
