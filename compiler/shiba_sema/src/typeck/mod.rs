//! The verification pass.
//!
//! Walks the tree once more after binding and checks that the types Sema
//! recorded are consistent with one another. Nothing is resolved again:
//! a node Sema could not type was already diagnosed and is skipped here.

use shiba_context::{ASTContext, Callee};
use shiba_diagnostic::Diagnostic;
use shiba_driver::Pass;
use shiba_ir::ast::visitor::{walk_expr, walk_func, walk_var, Visitor};
use shiba_ir::{
    Ast, BuiltinOperator, CallArg, DataType, ExprId, ExprKind, FuncId, SourceRange, VarId,
};
use shiba_stack::ensure_sufficient_stack;

use crate::signature::Signature;
use crate::TypeCheckError;

/// The verification pass, registered as "Type Checking".
#[derive(Copy, Clone, Debug, Default)]
pub struct TypeChecker;

impl Pass for TypeChecker {
    fn title(&self) -> &str {
        "Type Checking"
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn run(&mut self, ctx: &mut ASTContext) -> Result<(), Diagnostic> {
        let mut checker = Checker {
            ctx: &*ctx,
            diagnostics: Vec::new(),
            returns: Vec::new(),
        };
        checker.check_all();
        let diagnostics = checker.diagnostics;

        tracing::debug!(diagnostics = diagnostics.len(), "type checking finished");
        ctx.diag.extend(diagnostics);
        Ok(())
    }
}

struct Checker<'ctx> {
    ctx: &'ctx ASTContext,
    diagnostics: Vec<Diagnostic>,
    /// Return types of the enclosing functions and closures.
    returns: Vec<DataType>,
}

/// Smallest and largest value of an integer type.
fn int_bounds(width: u8, signed: bool) -> (i128, i128) {
    let bits = u32::from(width);
    if signed {
        (-(1_i128 << (bits - 1)), (1_i128 << (bits - 1)) - 1)
    } else {
        (0, (1_i128 << bits) - 1)
    }
}

impl<'ctx> Checker<'ctx> {
    fn check_all(&mut self) {
        let ctx = self.ctx;
        for &global in ctx.globals() {
            self.visit_var(global, &ctx.ast);
        }
        for &ty in ctx.types() {
            self.visit_type_decl(ty, &ctx.ast);
        }
        for &func in ctx.functions() {
            self.visit_func(func, &ctx.ast);
        }
        for extension in ctx.extensions() {
            if extension.target.is_none() {
                continue;
            }
            for &method in &extension.methods {
                self.visit_func(method, &ctx.ast);
            }
        }
    }

    fn error(&mut self, error: TypeCheckError, range: Option<SourceRange>) {
        self.diagnostics
            .push(Diagnostic::error(error.to_string()).at_range(range));
    }

    fn type_of(&self, id: ExprId) -> Option<DataType> {
        self.ctx.ann.type_of(id).cloned()
    }

    fn range(&self, id: ExprId) -> Option<SourceRange> {
        self.ctx.ast.range(id)
    }

    /// Whether a value of type `got` may be used where `expected` is.
    fn accepts(&self, expected: &DataType, got: &DataType) -> bool {
        self.ctx.canonical_type(expected) == DataType::Any || self.ctx.matches(expected, got)
    }

    fn expect_type(&mut self, expected: &DataType, value: ExprId) {
        let Some(got) = self.type_of(value) else {
            return;
        };
        if !self.accepts(expected, &got) {
            let error = TypeCheckError::TypeMismatch {
                expected: expected.clone(),
                got,
            };
            self.error(error, self.range(value));
        }
    }

    fn check_expr(&mut self, id: ExprId) {
        let ctx = self.ctx;
        match &ctx.ast.expr(id).kind {
            ExprKind::Num { value, raw } => self.check_overflow(id, i128::from(*value), raw),
            ExprKind::Prefix {
                op: BuiltinOperator::Minus,
                rhs,
                ..
            } => {
                if let ExprKind::Num { value, raw } = &ctx.ast.expr(ctx.ast.skip_parens(*rhs)).kind {
                    self.check_overflow(id, -i128::from(*value), &format!("-{raw}"));
                } else {
                    walk_expr(self, id, &ctx.ast);
                }
            }
            ExprKind::Call { lhs, args } => {
                walk_expr(self, id, &ctx.ast);
                self.check_call(id, *lhs, args);
            }
            ExprKind::Closure { ret, .. } => {
                self.returns.push(ret.ty.clone());
                walk_expr(self, id, &ctx.ast);
                self.returns.pop();
            }
            ExprKind::If { blocks, .. } => {
                walk_expr(self, id, &ctx.ast);
                for block in blocks {
                    self.check_condition(block.cond);
                }
            }
            ExprKind::While { cond, .. } => {
                walk_expr(self, id, &ctx.ast);
                self.check_condition(*cond);
            }
            ExprKind::For { cond, .. } => {
                walk_expr(self, id, &ctx.ast);
                if let Some(cond) = cond {
                    self.check_condition(*cond);
                }
            }
            ExprKind::Ternary {
                cond,
                then_value,
                else_value,
            } => {
                walk_expr(self, id, &ctx.ast);
                self.check_ternary(*cond, *then_value, *else_value);
            }
            ExprKind::Switch { value, cases, .. } => {
                walk_expr(self, id, &ctx.ast);
                if let Some(scrutinee) = self.type_of(*value) {
                    for case in cases {
                        self.expect_type(&scrutinee, case.constant);
                    }
                }
            }
            ExprKind::Return(value) => {
                walk_expr(self, id, &ctx.ast);
                if let Some(expected) = self.returns.last().cloned() {
                    self.expect_type(&expected, *value);
                }
            }
            ExprKind::Infix {
                op,
                op_range,
                lhs,
                rhs,
            } => {
                walk_expr(self, id, &ctx.ast);
                if *op != BuiltinOperator::As {
                    self.check_infix(id, *op, *op_range, *lhs, *rhs);
                }
            }
            ExprKind::Subscript { index, .. } => {
                walk_expr(self, id, &ctx.ast);
                if let Some(ty) = self.type_of(*index) {
                    if !matches!(ctx.canonical_type(&ty), DataType::Int { .. }) {
                        self.error(TypeCheckError::InvalidSubscript(ty), self.range(*index));
                    }
                }
            }
            _ => walk_expr(self, id, &ctx.ast),
        }
    }

    /// An integer literal must fit its resolved type. `value` already
    /// carries any negation applied to the literal.
    fn check_overflow(&mut self, id: ExprId, value: i128, raw: &str) {
        let Some(ty) = self.type_of(id) else {
            return;
        };
        let DataType::Int { width, signed } = self.ctx.canonical_type(&ty) else {
            return;
        };
        let (min, max) = int_bounds(width, signed);
        if value < min || value > max {
            let error = TypeCheckError::Overflow {
                raw: raw.to_owned(),
                ty,
            };
            self.error(error, self.range(id));
        }
    }

    fn check_condition(&mut self, cond: ExprId) {
        let Some(ty) = self.type_of(cond) else {
            return;
        };
        if self.ctx.canonical_type(&ty) != DataType::Bool {
            self.error(TypeCheckError::NonBoolCondition(ty), self.range(cond));
        }
    }

    fn check_ternary(&mut self, cond: ExprId, then_value: ExprId, else_value: ExprId) {
        if let Some(ty) = self.type_of(cond) {
            if self.ctx.canonical_type(&ty) != DataType::Bool {
                self.error(TypeCheckError::NonBoolTernary(ty), self.range(cond));
            }
        }
        if let Some(expected) = self.type_of(then_value) {
            self.expect_type(&expected, else_value);
        }
    }

    fn check_infix(
        &mut self,
        id: ExprId,
        op: BuiltinOperator,
        op_range: Option<SourceRange>,
        lhs: ExprId,
        rhs: ExprId,
    ) {
        let (Some(lhs_ty), Some(rhs_ty)) = (self.type_of(lhs), self.type_of(rhs)) else {
            return;
        };
        let canonical_lhs = self.ctx.canonical_type(&lhs_ty);
        let canonical_rhs = self.ctx.canonical_type(&rhs_ty);
        if op.is_pointer_offset(&canonical_lhs, &canonical_rhs) {
            return;
        }
        if canonical_lhs == DataType::Any || canonical_rhs == DataType::Any {
            return;
        }
        let defined = op.infix_type(&lhs_ty, &canonical_lhs).is_some();
        if !defined || canonical_lhs != canonical_rhs {
            let error = TypeCheckError::InvalidBinaryOperands {
                op,
                lhs: lhs_ty,
                rhs: rhs_ty,
            };
            self.error(error, op_range.or(self.range(id)));
        }
    }

    /// Re-verify arity, labels and argument types against the callee Sema
    /// chose.
    fn check_call(&mut self, id: ExprId, lhs: ExprId, args: &[CallArg]) {
        let ctx = self.ctx;
        let Some(callee) = ctx.ann.callees.get(&id) else {
            return;
        };
        let signature = Signature::of_callee(ctx, callee);

        if !signature.accepts_count(args.len()) {
            let error = TypeCheckError::ArityMismatch {
                name: self.callee_name(callee, lhs),
                expected: signature.params.len(),
                got: args.len(),
            };
            self.error(error, self.range(id));
            return;
        }

        for (param, arg) in signature.params.iter().zip(args) {
            let arg_range = self.range(arg.value);
            match (param.label, &arg.label) {
                (Some(expected), Some(got)) if expected != got => {
                    let error = TypeCheckError::IncorrectLabel {
                        expected: expected.clone(),
                        got: got.clone(),
                    };
                    self.error(error, got.range.or(arg_range));
                }
                (Some(expected), None) => {
                    self.error(TypeCheckError::MissingLabel(expected.clone()), arg_range);
                }
                (None, Some(got)) => {
                    self.error(TypeCheckError::ExtraLabel(got.clone()), got.range.or(arg_range));
                }
                _ => {}
            }
            self.expect_type(&param.ty, arg.value);
        }
    }

    fn callee_name(&self, callee: &Callee, lhs: ExprId) -> String {
        let ctx = self.ctx;
        match (callee, &ctx.ast.expr(lhs).kind) {
            (Callee::Func(func), _) => ctx.ast.func(*func).name.to_string(),
            (_, ExprKind::Var(name) | ExprKind::FieldLookup { name, .. }) => name.to_string(),
            _ => "expression".to_owned(),
        }
    }
}

impl<'ctx> Visitor<'ctx> for Checker<'ctx> {
    fn visit_expr(&mut self, id: ExprId, _: &'ctx Ast) {
        ensure_sufficient_stack(|| self.check_expr(id));
    }

    fn visit_func(&mut self, id: FuncId, ast: &'ctx Ast) {
        self.returns.push(ast.func(id).ret.ty.clone());
        walk_func(self, id, ast);
        self.returns.pop();
    }

    fn visit_var(&mut self, id: VarId, ast: &'ctx Ast) {
        walk_var(self, id, ast);
        let Some(rhs) = ast.var(id).rhs else {
            return;
        };
        if let Some(expected) = self.ctx.var_type(id) {
            self.expect_type(&expected, rhs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::int_bounds;

    #[test]
    fn integer_bounds() {
        assert_eq!(int_bounds(8, true), (-128, 127));
        assert_eq!(int_bounds(8, false), (0, 255));
        assert_eq!(int_bounds(64, true), (i128::from(i64::MIN), i128::from(i64::MAX)));
        assert_eq!(int_bounds(64, false), (0, i128::from(u64::MAX)));
    }
}
