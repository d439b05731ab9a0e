//! Calls and member access.

use shiba_ir::{CallArg, ExprId, ExprKind, Identifier, Punctuation, TokenKind};

use crate::{ParseError, ParseResult, Parser};

impl Parser<'_> {
    /// `lhs(arg, label: arg, ...)`
    pub(super) fn parse_call(&mut self, lhs: ExprId) -> ParseResult<ExprId> {
        self.expect_punct(Punctuation::LeftParen)?;
        let mut args = Vec::new();
        while !self.check_punct(Punctuation::RightParen) {
            args.push(self.parse_call_arg()?);
            if self.check_punct(Punctuation::Comma) {
                self.cursor.advance();
            } else if !self.check_punct(Punctuation::RightParen) {
                return Err(self.unexpected_token());
            }
        }
        self.expect_punct(Punctuation::RightParen)?;
        let range = self.range_from_expr(lhs);
        Ok(self.alloc(ExprKind::Call { lhs, args }, range))
    }

    fn parse_call_arg(&mut self) -> ParseResult<CallArg> {
        let label = match self.current_kind() {
            TokenKind::Identifier(name) if self.cursor.peek_kind(1).is_punct(Punctuation::Colon) => {
                let name = name.clone();
                let range = self.cursor.advance().range;
                self.cursor.advance();
                Some(Identifier::with_range(name, range))
            }
            _ => None,
        };
        let value = self.parse_value()?;
        Ok(CallArg { label, value })
    }

    /// `lhs.name` or `lhs.0`
    pub(super) fn parse_field_access(&mut self, lhs: ExprId) -> ParseResult<ExprId> {
        self.expect_punct(Punctuation::Period)?;
        let kind = match self.current_kind() {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                let range = self.cursor.advance().range;
                ExprKind::FieldLookup {
                    lhs,
                    name: Identifier::with_range(name, range),
                }
            }
            TokenKind::Number { value, .. } => {
                let Ok(field) = usize::try_from(*value) else {
                    return Err(self.unexpected_token());
                };
                self.cursor.advance();
                ExprKind::TupleField { lhs, field }
            }
            other => {
                let error = ParseError::ExpectedIdentifier(other.to_string());
                return Err(self.error_here(&error));
            }
        };
        let range = self.range_from_expr(lhs);
        Ok(self.alloc(kind, range))
    }
}
