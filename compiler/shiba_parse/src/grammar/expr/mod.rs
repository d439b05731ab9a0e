//! Expression parsing.
//!
//! Operators are parsed right-recursively: after an infix operator the
//! whole remaining expression is parsed as its right operand, and the
//! result is rotated into precedence order by [`rebalance`]. Prefix
//! operators are attached the same way, to the leftmost operand of what
//! follows them.
//!
//! Two same-line rules keep statements apart: `(` only starts a call on
//! the line of its callee, and `*` on a new line starts a new statement
//! (a dereference) instead of continuing a multiplication.

mod postfix;
mod primary;
mod rebalance;

use shiba_ir::{BuiltinOperator, ExprId, ExprKind, Punctuation, SourceRange, TokenKind, TypeRef};

use crate::{ParseResult, Parser};

impl Parser<'_> {
    /// Parse a full value expression.
    pub(crate) fn parse_value(&mut self) -> ParseResult<ExprId> {
        shiba_stack::ensure_sufficient_stack(|| self.parse_value_inner())
    }

    fn parse_value_inner(&mut self) -> ParseResult<ExprId> {
        if let TokenKind::Operator(op) = self.current_kind() {
            let op = *op;
            if op.is_prefix() {
                let op_range = self.cursor.advance().range;
                let operand = self.parse_value()?;
                return Ok(self.attach_prefix(op, op_range, operand));
            }
        }

        let mut lhs = self.parse_primary()?;
        loop {
            match self.current_kind() {
                TokenKind::Punctuation(Punctuation::LeftParen) if !self.cursor.after_separator() => {
                    lhs = self.parse_call(lhs)?;
                }
                TokenKind::Punctuation(Punctuation::Period) => {
                    lhs = self.parse_field_access(lhs)?;
                }
                TokenKind::Punctuation(Punctuation::LeftBracket) => {
                    self.cursor.advance();
                    let index = self.parse_value()?;
                    self.expect_punct(Punctuation::RightBracket)?;
                    let range = self.range_from_expr(lhs);
                    lhs = self.alloc(ExprKind::Subscript { lhs, index }, range);
                }
                TokenKind::Punctuation(Punctuation::Question) => {
                    self.cursor.advance();
                    let then_value = self.parse_value()?;
                    self.expect_punct(Punctuation::Colon)?;
                    let else_value = self.parse_value()?;
                    let range = self.merged_range(lhs, else_value);
                    let kind = ExprKind::Ternary {
                        cond: lhs,
                        then_value,
                        else_value,
                    };
                    lhs = self.alloc(kind, range);
                }
                TokenKind::Operator(BuiltinOperator::Star) if self.cursor.after_separator() => break,
                TokenKind::Operator(BuiltinOperator::Not | BuiltinOperator::BitwiseNot) => break,
                TokenKind::Operator(BuiltinOperator::As) => {
                    let op_range = self.cursor.advance().range;
                    let ty = self.parse_type()?;
                    let rhs = self.type_ref_expr(ty);
                    lhs = self.build_infix(BuiltinOperator::As, Some(op_range), lhs, rhs);
                }
                TokenKind::Operator(op) => {
                    let op = *op;
                    let op_range = self.cursor.advance().range;
                    let rhs = self.parse_value()?;
                    lhs = self.attach_infix(op, Some(op_range), lhs, rhs);
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    /// A type in value position.
    fn type_ref_expr(&mut self, ty: TypeRef) -> ExprId {
        let range = ty.range;
        self.alloc(ExprKind::TypeRef(ty), range)
    }

    /// From the start of `expr` to the end of the last consumed token.
    fn range_from_expr(&self, expr: ExprId) -> Option<SourceRange> {
        self.ctx.ast.range(expr).and_then(|start| self.range_from(start))
    }

    /// Smallest range covering both nodes, if either has one.
    fn merged_range(&self, first: ExprId, second: ExprId) -> Option<SourceRange> {
        match (self.ctx.ast.range(first), self.ctx.ast.range(second)) {
            (Some(a), Some(b)) => Some(a.merge(b)),
            (a, b) => a.or(b),
        }
    }
}
