//! Primary expressions: literals, names, parentheses, closures, `sizeof`
//! and the `#` keywords.

use shiba_ir::{BuiltinOperator, ExprId, ExprKind, Identifier, Keyword, Punctuation, TokenKind};

use crate::{ParseError, ParseResult, Parser};

impl Parser<'_> {
    pub(super) fn parse_primary(&mut self) -> ParseResult<ExprId> {
        let start = self.cursor.current_range();
        let kind = match self.current_kind() {
            TokenKind::Char(c) => ExprKind::Char(*c),
            TokenKind::Number { value, raw } => {
                let (value, raw) = (*value, raw.clone());
                return Ok(self.parse_number(value, raw));
            }
            TokenKind::StringLiteral(value) => ExprKind::Str(value.clone()),
            TokenKind::Identifier(name) => ExprKind::Var(Identifier::with_range(name.clone(), start)),
            TokenKind::Keyword(Keyword::True) => ExprKind::Bool(true),
            TokenKind::Keyword(Keyword::False) => ExprKind::Bool(false),
            TokenKind::Keyword(Keyword::Nil) => ExprKind::Nil,
            TokenKind::Keyword(Keyword::PoundFunction) => ExprKind::PoundFunction,
            TokenKind::Keyword(Keyword::PoundFile) => ExprKind::Str(self.ctx.filename.clone()),
            TokenKind::Keyword(Keyword::PoundLine) => {
                let line = start.start.line;
                ExprKind::Num {
                    value: i64::from(line),
                    raw: line.to_string(),
                }
            }
            TokenKind::Keyword(Keyword::Sizeof) => return self.parse_sizeof(),
            TokenKind::Punctuation(Punctuation::LeftParen) => return self.parse_parenthesized(),
            TokenKind::Punctuation(Punctuation::LeftBrace) => return self.parse_closure(),
            _ => {
                let error = ParseError::UnexpectedExpression("value");
                return Err(self.error_here(&error));
            }
        };
        self.cursor.advance();
        Ok(self.alloc(kind, Some(start)))
    }

    /// An integer literal, or a float literal spelled `int.frac`.
    fn parse_number(&mut self, value: i64, raw: String) -> ExprId {
        let token = self.cursor.advance();

        if self.check_punct(Punctuation::Period) {
            if let TokenKind::Number { raw: fraction, .. } = self.cursor.peek_kind(1) {
                let text = format!("{raw}.{fraction}").replace('_', "");
                if let Ok(float) = text.parse::<f64>() {
                    self.cursor.advance();
                    self.cursor.advance();
                    let range = self.range_from(token.range);
                    let kind = ExprKind::Float {
                        bits: float.to_bits(),
                    };
                    return self.alloc(kind, range);
                }
            }
        }
        self.alloc(ExprKind::Num { value, raw }, Some(token.range))
    }

    /// `()`, `(e)` or `(e, e, ...)`.
    fn parse_parenthesized(&mut self) -> ParseResult<ExprId> {
        let start = self.expect_punct(Punctuation::LeftParen)?.range;
        if self.check_punct(Punctuation::RightParen) {
            self.cursor.advance();
            let range = self.range_from(start);
            return Ok(self.alloc(ExprKind::Void, range));
        }

        let first = self.parse_value()?;
        if !self.check_punct(Punctuation::Comma) {
            self.expect_punct(Punctuation::RightParen)?;
            let range = self.range_from(start);
            return Ok(self.alloc(ExprKind::Paren(first), range));
        }

        let mut fields = vec![first];
        while self.check_punct(Punctuation::Comma) {
            self.cursor.advance();
            fields.push(self.parse_value()?);
        }
        self.expect_punct(Punctuation::RightParen)?;
        let range = self.range_from(start);
        Ok(self.alloc(ExprKind::Tuple(fields), range))
    }

    /// `{ (params) -> Ret in stmts }`
    fn parse_closure(&mut self) -> ParseResult<ExprId> {
        let start = self.expect_punct(Punctuation::LeftBrace)?.range;
        let params = self.parse_params()?;
        let ret = self.parse_return_type()?;
        self.expect_kw(Keyword::In)?;

        let body_start = self.cursor.current_range();
        let stmts = self.parse_block_body()?;
        let body_range = self.range_from(body_start);
        self.expect_punct(Punctuation::RightBrace)?;
        let body = self.alloc(ExprKind::Compound(stmts), body_range);

        let range = self.range_from(start);
        let kind = ExprKind::Closure {
            args: params.args,
            ret,
            body,
        };
        Ok(self.alloc(kind, range))
    }

    /// `sizeof(T)`, `sizeof T`, `sizeof(value)` or `sizeof value`.
    ///
    /// The operand is a type when it is some pointer levels over a
    /// capitalized name; anything else is a value.
    fn parse_sizeof(&mut self) -> ParseResult<ExprId> {
        let start = self.expect_kw(Keyword::Sizeof)?.range;
        let parenthesized = self.check_punct(Punctuation::LeftParen);
        if parenthesized {
            self.cursor.advance();
        }

        let operand = if self.at_type_operand(parenthesized) {
            let ty = self.parse_type()?;
            self.type_ref_expr(ty)
        } else {
            self.parse_value()?
        };
        if parenthesized {
            self.expect_punct(Punctuation::RightParen)?;
        }

        let range = self.range_from(start);
        Ok(self.alloc(ExprKind::Sizeof(operand), range))
    }

    fn at_type_operand(&self, parenthesized: bool) -> bool {
        let mut ahead = 0;
        while self.cursor.peek_kind(ahead).is_op(BuiltinOperator::Star) {
            ahead += 1;
        }
        let TokenKind::Identifier(name) = self.cursor.peek_kind(ahead) else {
            return false;
        };
        if !name.starts_with(|c: char| c.is_ascii_uppercase()) {
            return false;
        }
        !parenthesized || self.cursor.peek_kind(ahead + 1).is_punct(Punctuation::RightParen)
    }
}
