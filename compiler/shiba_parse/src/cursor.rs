//! Token cursor for navigating the token stream.
//!
//! Consuming a token also skips the newlines that follow it, so grammar
//! code never sees a newline token directly. Whether one was skipped is
//! still observable through [`Cursor::after_separator`], which is how
//! statement boundaries and the same-line rules for `(` and `*` are
//! enforced. Semicolons are never skipped implicitly.

use shiba_ir::{Punctuation, SourceLocation, SourceRange, Token, TokenKind};

pub struct Cursor {
    tokens: Vec<Token>,
    /// Returned for every position past the last token.
    eof: Token,
    pos: usize,
    /// End of the last consumed token.
    last_end: SourceLocation,
}

impl Cursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens
            .last()
            .map_or(SourceLocation::START, |token| token.range.end);
        let mut cursor = Cursor {
            tokens,
            eof: Token::new(TokenKind::Eof, SourceRange::point(end)),
            pos: 0,
            last_end: SourceLocation::START,
        };
        cursor.skip_newlines();
        cursor
    }

    #[inline]
    pub fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    #[inline]
    pub fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_range(&self) -> SourceRange {
        self.current().range
    }

    /// Kind of the token `ahead` positions after the current one, counting
    /// newline tokens.
    pub fn peek_kind(&self, ahead: usize) -> &TokenKind {
        self.tokens
            .get(self.pos + ahead)
            .map_or(&self.eof.kind, |token| &token.kind)
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn last_end(&self) -> SourceLocation {
        self.last_end
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    #[inline]
    pub fn check_punct(&self, punct: Punctuation) -> bool {
        self.current_kind().is_punct(punct)
    }

    /// Whether a newline or `;` sits between the last consumed token and
    /// the current one.
    pub fn after_separator(&self) -> bool {
        self.pos
            .checked_sub(1)
            .and_then(|prev| self.tokens.get(prev))
            .is_some_and(Token::is_line_separator)
    }

    /// Consume the current token and any newlines after it.
    pub fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !self.is_at_end() {
            self.last_end = token.range.end;
            self.pos += 1;
            self.skip_newlines();
        }
        token
    }

    fn skip_newlines(&mut self) {
        while self.current_kind().is_punct(Punctuation::Newline) {
            self.pos += 1;
        }
    }

    /// Skip any run of newlines and semicolons.
    pub fn skip_separators(&mut self) {
        while self.current_kind().is_line_separator() {
            self.pos += 1;
        }
    }

    /// Brace nesting of the tokens in `from..self.pos`.
    pub fn brace_depth_since(&self, from: usize) -> i32 {
        self.tokens
            .get(from..self.pos.min(self.tokens.len()))
            .unwrap_or_default()
            .iter()
            .map(|token| match token.kind {
                TokenKind::Punctuation(Punctuation::LeftBrace) => 1,
                TokenKind::Punctuation(Punctuation::RightBrace) => -1,
                _ => 0,
            })
            .sum()
    }

    /// Skip a single token without the newline handling of `advance`.
    pub fn bump_raw(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }
}
