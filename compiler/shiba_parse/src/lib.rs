//! Recursive descent parser for Shiba.
//!
//! Builds nodes in the context's AST arena and registers top-level
//! declarations with the context as they are parsed. A syntax error
//! abandons the current top-level item only: it is reported to the
//! context's diagnostic engine and parsing resumes at the next item.

mod cursor;
mod error;
mod grammar;
mod recovery;

pub use cursor::Cursor;
pub use error::ParseError;

use shiba_context::ASTContext;
use shiba_diagnostic::Diagnostic;
use shiba_ir::{Expr, ExprId, ExprKind, Identifier, Keyword, Punctuation, SourceRange, Token, TokenKind};

/// Result of a grammar production. The error is a finished diagnostic.
pub(crate) type ParseResult<T> = Result<T, Diagnostic>;

/// Lex `source` and parse it into `ctx`, reporting lex errors as well.
pub fn parse_source(source: &str, ctx: &mut ASTContext) {
    let output = shiba_lexer::lex(source);
    ctx.diag.extend(output.errors.into_iter().map(Diagnostic::from));
    Parser::new(output.tokens, ctx).parse_top_level();
}

/// Parser state.
pub struct Parser<'ctx> {
    cursor: Cursor,
    ctx: &'ctx mut ASTContext,
}

impl<'ctx> Parser<'ctx> {
    pub fn new(tokens: Vec<Token>, ctx: &'ctx mut ASTContext) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            ctx,
        }
    }

    /// Parse every top-level item, recovering after each syntax error.
    pub fn parse_top_level(&mut self) {
        loop {
            self.cursor.skip_separators();
            if self.cursor.is_at_end() {
                break;
            }
            let start = self.cursor.position();
            if let Err(diagnostic) = self.parse_item() {
                tracing::debug!(message = %diagnostic.message, "recovering from parse error");
                self.ctx.diag.add(diagnostic);
                recovery::synchronize(&mut self.cursor, start);
            }
        }
    }

    // Token helpers

    #[inline]
    fn current_kind(&self) -> &TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn check_punct(&self, punct: Punctuation) -> bool {
        self.cursor.check_punct(punct)
    }

    #[inline]
    fn check_kw(&self, keyword: Keyword) -> bool {
        self.cursor.current_kind().is_kw(keyword)
    }

    /// Range from `start` to the end of the last consumed token.
    fn range_from(&self, start: SourceRange) -> Option<SourceRange> {
        Some(SourceRange::new(start.start, self.cursor.last_end().max(start.start)))
    }

    /// An error located at the current token.
    #[cold]
    fn error_here(&self, error: &ParseError) -> Diagnostic {
        let range = self.cursor.current_range();
        Diagnostic::error(error.to_string())
            .at(range.start)
            .with_highlight(range)
    }

    #[cold]
    fn error_at(&self, error: &ParseError, range: Option<SourceRange>) -> Diagnostic {
        Diagnostic::error(error.to_string()).at_range(range)
    }

    /// "unexpected token", located after the last consumed token and
    /// underlining the offending one.
    #[cold]
    fn unexpected_token(&self) -> Diagnostic {
        let error = ParseError::UnexpectedToken(self.current_kind().to_string());
        Diagnostic::error(error.to_string())
            .at(self.cursor.last_end())
            .with_highlight(self.cursor.current_range())
    }

    fn expect_punct(&mut self, punct: Punctuation) -> ParseResult<Token> {
        if self.check_punct(punct) {
            Ok(self.cursor.advance())
        } else {
            Err(self.unexpected_token())
        }
    }

    fn expect_kw(&mut self, keyword: Keyword) -> ParseResult<Token> {
        if self.check_kw(keyword) {
            Ok(self.cursor.advance())
        } else {
            Err(self.unexpected_token())
        }
    }

    fn parse_identifier(&mut self) -> ParseResult<Identifier> {
        match self.current_kind() {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                let token = self.cursor.advance();
                Ok(Identifier::with_range(name, token.range))
            }
            other => {
                let error = ParseError::ExpectedIdentifier(other.to_string());
                Err(self.error_here(&error))
            }
        }
    }

    /// After an item or statement: a newline or `;` must follow, unless
    /// the input ends here.
    fn expect_separator(&mut self) -> ParseResult<()> {
        if self.cursor.is_at_end() {
            return Ok(());
        }
        if !self.current_kind().is_line_separator() && !self.cursor.after_separator() {
            let end = self.cursor.last_end();
            return Err(Diagnostic::error(ParseError::MissingLineSeparator.to_string()).at(end));
        }
        self.cursor.skip_separators();
        Ok(())
    }

    fn alloc(&mut self, kind: ExprKind, range: Option<SourceRange>) -> ExprId {
        self.ctx.ast.alloc_expr(Expr::new(kind, range))
    }
}

#[cfg(test)]
mod tests;
