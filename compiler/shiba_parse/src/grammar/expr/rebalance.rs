//! Operator placement.
//!
//! The right operand of an infix operator is parsed before its precedence
//! is known, so it may be a looser operator that must end up above this
//! one. [`Parser::attach_infix`] rotates such operands:
//!
//! ```text
//! a * (b + c)   parsed   ->   (a * b) + c
//! a - (b - c)   parsed   ->   (a - b) - c       left associative
//! a = (b = c)   parsed   ->   a = (b = c)       assignment stays right
//! a + (b ? c : d)        ->   (a + b) ? c : d
//! ```
//!
//! Parenthesized operands are `Paren` nodes and are never rotated.

use shiba_ir::{BuiltinOperator, ExprId, ExprKind, SourceRange};

use crate::Parser;

/// The parts of a node that rotation looks at.
#[derive(Copy, Clone)]
enum Shape {
    Infix {
        op: BuiltinOperator,
        op_range: Option<SourceRange>,
        lhs: ExprId,
        rhs: ExprId,
    },
    Ternary {
        cond: ExprId,
        then_value: ExprId,
        else_value: ExprId,
    },
    Num,
    Float,
    Other,
}

impl Parser<'_> {
    fn shape(&self, id: ExprId) -> Shape {
        match self.ctx.ast.expr(id).kind {
            ExprKind::Infix {
                op,
                op_range,
                lhs,
                rhs,
            } => Shape::Infix {
                op,
                op_range,
                lhs,
                rhs,
            },
            ExprKind::Ternary {
                cond,
                then_value,
                else_value,
            } => Shape::Ternary {
                cond,
                then_value,
                else_value,
            },
            ExprKind::Num { .. } => Shape::Num,
            ExprKind::Float { .. } => Shape::Float,
            _ => Shape::Other,
        }
    }

    /// `lhs op rhs`, rotating `rhs` when it binds looser than `op`.
    pub(super) fn attach_infix(
        &mut self,
        op: BuiltinOperator,
        op_range: Option<SourceRange>,
        lhs: ExprId,
        rhs: ExprId,
    ) -> ExprId {
        match self.shape(rhs) {
            Shape::Infix {
                op: inner,
                op_range: inner_range,
                lhs: inner_lhs,
                rhs: inner_rhs,
            } if binds_looser(inner, op) => {
                let new_lhs = shiba_stack::ensure_sufficient_stack(|| {
                    self.attach_infix(op, op_range, lhs, inner_lhs)
                });
                self.build_infix(inner, inner_range, new_lhs, inner_rhs)
            }
            Shape::Ternary {
                cond,
                then_value,
                else_value,
            } if !op.is_assign() => {
                let cond = shiba_stack::ensure_sufficient_stack(|| {
                    self.attach_infix(op, op_range, lhs, cond)
                });
                let range = self.merged_range(cond, else_value);
                let kind = ExprKind::Ternary {
                    cond,
                    then_value,
                    else_value,
                };
                self.alloc(kind, range)
            }
            _ => self.build_infix(op, op_range, lhs, rhs),
        }
    }

    pub(super) fn build_infix(
        &mut self,
        op: BuiltinOperator,
        op_range: Option<SourceRange>,
        lhs: ExprId,
        rhs: ExprId,
    ) -> ExprId {
        let range = self.merged_range(lhs, rhs);
        let kind = ExprKind::Infix {
            op,
            op_range,
            lhs,
            rhs,
        };
        self.alloc(kind, range)
    }

    /// Apply a prefix operator to the leftmost operand of `operand`.
    ///
    /// `-` directly on a literal folds into a negative literal.
    pub(super) fn attach_prefix(&mut self, op: BuiltinOperator, op_range: SourceRange, operand: ExprId) -> ExprId {
        match self.shape(operand) {
            Shape::Infix {
                op: inner,
                op_range: inner_range,
                lhs,
                rhs,
            } => {
                let lhs = shiba_stack::ensure_sufficient_stack(|| self.attach_prefix(op, op_range, lhs));
                self.build_infix(inner, inner_range, lhs, rhs)
            }
            Shape::Ternary {
                cond,
                then_value,
                else_value,
            } => {
                let cond = shiba_stack::ensure_sufficient_stack(|| self.attach_prefix(op, op_range, cond));
                let range = self.merged_range(cond, else_value);
                let kind = ExprKind::Ternary {
                    cond,
                    then_value,
                    else_value,
                };
                self.alloc(kind, range)
            }
            Shape::Num | Shape::Float if op == BuiltinOperator::Minus => self.negate_literal(op_range, operand),
            _ => {
                let range = self.ctx.ast.range(operand).map(|range| op_range.merge(range));
                let kind = ExprKind::Prefix {
                    op,
                    op_range: Some(op_range),
                    rhs: operand,
                };
                self.alloc(kind, range.or(Some(op_range)))
            }
        }
    }

    fn negate_literal(&mut self, op_range: SourceRange, literal: ExprId) -> ExprId {
        let expr = self.ctx.ast.expr(literal);
        let range = expr.range.map_or(op_range, |range| op_range.merge(range));
        let kind = match &expr.kind {
            ExprKind::Num { value, raw } => ExprKind::Num {
                value: value.wrapping_neg(),
                raw: format!("-{raw}"),
            },
            ExprKind::Float { bits } => ExprKind::Float {
                bits: (-f64::from_bits(*bits)).to_bits(),
            },
            other => other.clone(),
        };
        self.alloc(kind, Some(range))
    }
}

/// Whether an already-built `inner` operand must be rotated above `outer`.
/// Equal precedence rotates for left associativity, except assignment.
fn binds_looser(inner: BuiltinOperator, outer: BuiltinOperator) -> bool {
    let (inner_prec, outer_prec) = (inner.infix_precedence(), outer.infix_precedence());
    inner_prec < outer_prec || (inner_prec == outer_prec && !outer.is_assign())
}
