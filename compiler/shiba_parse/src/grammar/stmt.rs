//! Statements and blocks.
//!
//! A block is `{ stmt (sep stmt)* }`. Statements are expression nodes; the
//! block itself becomes a `Compound`.

use shiba_ir::{
    DeclAttributes, ExprId, ExprKind, IfBlock, Keyword, Punctuation, SwitchCase, TokenKind,
    VarKind,
};

use crate::{ParseError, ParseResult, Parser};

/// Where a statement list stops.
#[derive(Copy, Clone, PartialEq, Eq)]
enum ListEnd {
    /// `}` of a block.
    Brace,
    /// `}` or the next `case` / `default` label.
    SwitchArm,
}

impl Parser<'_> {
    /// `"{" stmts "}"` as a `Compound`.
    pub(crate) fn parse_block(&mut self) -> ParseResult<ExprId> {
        let start = self.expect_punct(Punctuation::LeftBrace)?.range;
        let stmts = self.parse_statements(ListEnd::Brace)?;
        self.expect_punct(Punctuation::RightBrace)?;
        let range = self.range_from(start);
        Ok(self.alloc(ExprKind::Compound(stmts), range))
    }

    /// Statements up to, not including, the closing `}`.
    pub(crate) fn parse_block_body(&mut self) -> ParseResult<Vec<ExprId>> {
        self.parse_statements(ListEnd::Brace)
    }

    fn parse_statements(&mut self, end: ListEnd) -> ParseResult<Vec<ExprId>> {
        let mut stmts = Vec::new();
        loop {
            self.cursor.skip_separators();
            if self.at_list_end(end) {
                return Ok(stmts);
            }
            if self.cursor.is_at_end() {
                return Err(self.unexpected_token());
            }
            stmts.push(self.parse_statement()?);
            if !self.at_list_end(end) {
                self.expect_separator()?;
            }
        }
    }

    fn at_list_end(&self, end: ListEnd) -> bool {
        match end {
            ListEnd::Brace => self.check_punct(Punctuation::RightBrace),
            ListEnd::SwitchArm => {
                self.check_punct(Punctuation::RightBrace)
                    || self.check_kw(Keyword::Case)
                    || self.check_kw(Keyword::Default)
            }
        }
    }

    pub(crate) fn parse_statement(&mut self) -> ParseResult<ExprId> {
        let start = self.cursor.current_range();
        match self.current_kind() {
            TokenKind::Keyword(Keyword::If) => self.parse_if(),
            TokenKind::Keyword(Keyword::While) => {
                self.cursor.advance();
                let cond = self.parse_value()?;
                let body = self.parse_block()?;
                let range = self.range_from(start);
                Ok(self.alloc(ExprKind::While { cond, body }, range))
            }
            TokenKind::Keyword(Keyword::For) => self.parse_for(),
            TokenKind::Keyword(Keyword::Switch) => self.parse_switch(),
            TokenKind::Keyword(Keyword::Let | Keyword::Mut) => {
                let var = self.parse_var_decl(DeclAttributes::empty(), VarKind::Local)?;
                let range = self.range_from(start);
                Ok(self.alloc(ExprKind::VarDecl(var), range))
            }
            TokenKind::Keyword(Keyword::Break) => {
                self.cursor.advance();
                Ok(self.alloc(ExprKind::Break, Some(start)))
            }
            TokenKind::Keyword(Keyword::Continue) => {
                self.cursor.advance();
                Ok(self.alloc(ExprKind::Continue, Some(start)))
            }
            TokenKind::Keyword(Keyword::Return) => {
                self.cursor.advance();
                let value = if self.ends_bare_return() {
                    self.alloc(ExprKind::Void, Some(start))
                } else {
                    self.parse_value()?
                };
                let range = self.range_from(start);
                Ok(self.alloc(ExprKind::Return(value), range))
            }
            TokenKind::Keyword(Keyword::PoundWarning | Keyword::PoundError) => {
                let diagnostic = self.parse_pound_diagnostic()?;
                let kind = ExprKind::PoundDiagnostic {
                    is_error: diagnostic.is_error,
                    content: diagnostic.content,
                };
                Ok(self.alloc(kind, diagnostic.range))
            }
            _ => self.parse_value(),
        }
    }

    fn ends_bare_return(&self) -> bool {
        self.cursor.after_separator()
            || self.cursor.is_at_end()
            || self.check_punct(Punctuation::RightBrace)
            || self.check_punct(Punctuation::Semicolon)
    }

    /// `if c { } (else if c { })* (else { })?`
    fn parse_if(&mut self) -> ParseResult<ExprId> {
        let start = self.expect_kw(Keyword::If)?.range;
        let mut blocks = Vec::new();
        let mut else_body = None;

        let cond = self.parse_value()?;
        let body = self.parse_block()?;
        blocks.push(IfBlock { cond, body });

        while self.check_kw(Keyword::Else) {
            self.cursor.advance();
            if self.check_kw(Keyword::If) {
                self.cursor.advance();
                let cond = self.parse_value()?;
                let body = self.parse_block()?;
                blocks.push(IfBlock { cond, body });
            } else {
                else_body = Some(self.parse_block()?);
                break;
            }
        }

        let range = self.range_from(start);
        Ok(self.alloc(ExprKind::If { blocks, else_body }, range))
    }

    /// `for init? ; cond? ; step? { }`
    fn parse_for(&mut self) -> ParseResult<ExprId> {
        let start = self.expect_kw(Keyword::For)?.range;

        let init = if self.check_punct(Punctuation::Semicolon) {
            None
        } else {
            Some(self.parse_statement()?)
        };
        self.expect_punct(Punctuation::Semicolon)?;

        let cond = if self.check_punct(Punctuation::Semicolon) {
            None
        } else {
            Some(self.parse_value()?)
        };
        self.expect_punct(Punctuation::Semicolon)?;

        let step = if self.check_punct(Punctuation::LeftBrace) {
            None
        } else {
            Some(self.parse_value()?)
        };
        let body = self.parse_block()?;

        let range = self.range_from(start);
        Ok(self.alloc(
            ExprKind::For {
                init,
                cond,
                step,
                body,
            },
            range,
        ))
    }

    /// `switch v { (case c: stmts)* (default: stmts)? }`
    fn parse_switch(&mut self) -> ParseResult<ExprId> {
        let start = self.expect_kw(Keyword::Switch)?.range;
        let value = self.parse_value()?;
        self.expect_punct(Punctuation::LeftBrace)?;

        let mut cases = Vec::new();
        let mut default = None;
        loop {
            self.cursor.skip_separators();
            match self.current_kind() {
                TokenKind::Keyword(Keyword::Case) => {
                    self.cursor.advance();
                    let constant = self.parse_value()?;
                    if !self.ctx.ast.expr(constant).kind.is_constant() {
                        let range = self.ctx.ast.range(constant);
                        return Err(self.error_at(&ParseError::CaseMustBeConstant, range));
                    }
                    self.expect_punct(Punctuation::Colon)?;
                    let body = self.parse_arm()?;
                    cases.push(SwitchCase { constant, body });
                }
                TokenKind::Keyword(Keyword::Default) => {
                    if default.is_some() {
                        return Err(self.error_here(&ParseError::DuplicateDefault));
                    }
                    self.cursor.advance();
                    self.expect_punct(Punctuation::Colon)?;
                    default = Some(self.parse_arm()?);
                }
                TokenKind::Punctuation(Punctuation::RightBrace) => {
                    self.cursor.advance();
                    break;
                }
                _ => return Err(self.unexpected_token()),
            }
        }

        let range = self.range_from(start);
        Ok(self.alloc(
            ExprKind::Switch {
                value,
                cases,
                default,
            },
            range,
        ))
    }

    fn parse_arm(&mut self) -> ParseResult<ExprId> {
        let start = self.cursor.current_range();
        let stmts = self.parse_statements(ListEnd::SwitchArm)?;
        let range = if stmts.is_empty() {
            None
        } else {
            self.range_from(start)
        };
        Ok(self.alloc(ExprKind::Compound(stmts), range))
    }
}
