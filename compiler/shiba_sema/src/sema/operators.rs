//! Prefix, infix and cast typing.
//!
//! Integer and `nil` literals have no fixed type of their own: next to a
//! concretely typed operand, a declared variable or a parameter they take
//! that type instead of their default. This is decided once here and is
//! authoritative for the type checker.

use shiba_context::Mutability;
use shiba_ir::{BuiltinOperator, DataType, ExprId, ExprKind, SourceRange};

use super::Binder;
use crate::SemaError;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Literal {
    Int,
    Nil,
}

impl<'ctx> Binder<'ctx> {
    fn literal(&self, expr: ExprId) -> Option<Literal> {
        match self.kind(expr) {
            ExprKind::Num { .. } => Some(Literal::Int),
            ExprKind::Nil => Some(Literal::Nil),
            ExprKind::Paren(inner) => self.literal(*inner),
            ExprKind::Prefix {
                op: BuiltinOperator::Minus,
                rhs,
                ..
            } => (self.literal(*rhs) == Some(Literal::Int)).then_some(Literal::Int),
            _ => None,
        }
    }

    /// Whether `expr` is a literal that may take the type `target`.
    pub(super) fn can_adopt(&self, expr: ExprId, target: &DataType) -> bool {
        match (self.literal(expr), self.canonical(target)) {
            (Some(Literal::Int), DataType::Int { .. } | DataType::Floating(_))
            | (Some(Literal::Nil), DataType::Pointer(_)) => true,
            _ => false,
        }
    }

    /// Retype a literal (and any parens or negation around it) as `target`.
    pub(super) fn retype_literal(&mut self, expr: ExprId, target: &DataType) {
        self.set_type(expr, target.clone());
        match self.kind(expr) {
            ExprKind::Paren(inner) | ExprKind::Prefix { rhs: inner, .. } => {
                self.retype_literal(*inner, target);
            }
            _ => {}
        }
    }

    /// Give `expr` the type `target` if it is a literal that may take it.
    pub(super) fn adopt_literal(&mut self, expr: ExprId, target: &DataType) -> bool {
        let adopts = self.can_adopt(expr, target);
        if adopts {
            self.retype_literal(expr, target);
        }
        adopts
    }

    pub(super) fn bind_prefix(
        &mut self,
        id: ExprId,
        op: BuiltinOperator,
        op_range: Option<SourceRange>,
        rhs: ExprId,
    ) {
        self.visit(rhs);
        let Some(rhs_ty) = self.type_of(rhs) else {
            return;
        };
        let canonical = self.canonical(&rhs_ty);

        match op {
            BuiltinOperator::Star if !canonical.is_pointer() => {
                self.error(SemaError::DereferenceNonPointer(rhs_ty), self.range(id));
                return;
            }
            BuiltinOperator::Ampersand => {
                let target = self.ctx.ast.skip_parens(rhs);
                let addressable = matches!(
                    self.kind(target),
                    ExprKind::Var(_) | ExprKind::Subscript { .. } | ExprKind::FieldLookup { .. }
                );
                if !addressable {
                    self.error(SemaError::AddressOfRValue, self.range(id));
                    return;
                }
            }
            _ => {}
        }

        match op.prefix_type(&rhs_ty, &canonical) {
            Some(ty) => self.set_type(id, ty),
            None => {
                let error = SemaError::InvalidOperand { op, ty: rhs_ty };
                self.error(error, op_range.or(self.range(id)));
            }
        }
    }

    pub(super) fn bind_infix(
        &mut self,
        id: ExprId,
        op: BuiltinOperator,
        lhs: ExprId,
        rhs: ExprId,
    ) {
        self.visit(lhs);
        if op == BuiltinOperator::As {
            self.bind_cast(id, lhs, rhs);
            return;
        }
        self.visit(rhs);
        if op.is_assign() {
            self.set_type(id, DataType::Void);
        }

        let (Some(mut lhs_ty), Some(mut rhs_ty)) = (self.type_of(lhs), self.type_of(rhs)) else {
            return;
        };
        if self.adopt_literal(rhs, &lhs_ty) {
            rhs_ty = lhs_ty.clone();
        } else if self.adopt_literal(lhs, &rhs_ty) {
            lhs_ty = rhs_ty.clone();
        }

        if op.is_assign() {
            self.check_assignment(id, op, lhs, rhs, &lhs_ty);
            return;
        }

        let canonical_lhs = self.canonical(&lhs_ty);
        if op.is_pointer_offset(&canonical_lhs, &self.canonical(&rhs_ty)) {
            self.set_type(id, lhs_ty);
        } else if let Some(ty) = op.infix_type(&lhs_ty, &canonical_lhs) {
            self.set_type(id, ty);
        }
    }

    fn check_assignment(
        &mut self,
        id: ExprId,
        op: BuiltinOperator,
        lhs: ExprId,
        rhs: ExprId,
        lhs_ty: &DataType,
    ) {
        let nil = matches!(self.kind(self.ctx.ast.skip_parens(rhs)), ExprKind::Nil);
        if op == BuiltinOperator::Assign && nil && !self.canonical(lhs_ty).is_pointer() {
            self.error(SemaError::NonPointerNil(lhs_ty.clone()), self.range(id));
        }
        if self.in_initializer() {
            return;
        }
        if let Mutability::Immutable { culprit } = self.ctx.mutability_with(&self.ann, lhs) {
            self.error(SemaError::AssignToConstant(culprit), self.range(lhs));
        }
    }

    /// `value as T`. The target is a type written in value position.
    fn bind_cast(&mut self, id: ExprId, lhs: ExprId, rhs: ExprId) {
        let ctx = self.ctx;
        let target = match self.kind(rhs) {
            ExprKind::TypeRef(ty) => ty.ty.clone(),
            ExprKind::Var(name) => DataType::from_name(&name.name),
            _ => {
                self.visit(rhs);
                let Some(ty) = self.type_of(rhs) else {
                    return;
                };
                ty
            }
        };
        if !ctx.is_valid_type(&target) {
            self.error(SemaError::UnknownType(target), self.range(rhs));
            return;
        }
        self.set_type(rhs, target.clone());

        if let Some(from) = self.type_of(lhs) {
            if !ctx.can_coerce(&from, &target) {
                let error = SemaError::CannotCoerce {
                    from,
                    to: target.clone(),
                };
                self.error(error, self.range(id));
            }
        }
        self.set_type(id, target);
    }
}
