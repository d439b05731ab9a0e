use shiba_context::Callee;
use shiba_ir::{
    BuiltinOperator, DataType, DeclAttributes, ExprId, ExprKind, SwitchCase, TypeRef, VarId,
};

use super::{Binder, ClosureFrame};
use crate::SemaError;

impl<'ctx> Binder<'ctx> {
    /// Bind a block in its own scope and record whether it always returns.
    /// The first statement after a `return`, `break`, `continue` or
    /// noreturn call is reported as unreachable.
    pub(super) fn bind_compound(&mut self, id: ExprId, stmts: &'ctx [ExprId]) {
        self.with_scope(|this| {
            let mut terminator = None;
            let mut warned = false;
            let mut returns = false;
            for &stmt in stmts {
                if let (Some(after), false) = (terminator, warned) {
                    this.warning(SemaError::Unreachable(after), this.range(stmt));
                    warned = true;
                }
                this.visit(stmt);
                if terminator.is_none() {
                    terminator = this.terminator(stmt);
                    returns |= this.always_returns(stmt);
                }
            }
            if returns {
                this.ann.has_return.insert(id);
            }
        });
    }

    /// What ends control flow at `stmt`, for the unreachable-code warning.
    fn terminator(&self, stmt: ExprId) -> Option<&'static str> {
        match self.kind(stmt) {
            ExprKind::Return(_) => Some("return"),
            ExprKind::Break => Some("break"),
            ExprKind::Continue => Some("continue"),
            ExprKind::Call { .. } if self.is_noreturn_call(stmt) => {
                Some("call to noreturn function")
            }
            _ => None,
        }
    }

    fn always_returns(&self, stmt: ExprId) -> bool {
        match self.kind(stmt) {
            ExprKind::Return(_) => true,
            ExprKind::Call { .. } => self.is_noreturn_call(stmt),
            ExprKind::Compound(_) => self.ann.has_return(stmt),
            ExprKind::If {
                blocks,
                else_body: Some(else_body),
            } => {
                blocks.iter().all(|block| self.always_returns(block.body))
                    && self.always_returns(*else_body)
            }
            _ => false,
        }
    }

    fn is_noreturn_call(&self, call: ExprId) -> bool {
        match self.ann.callees.get(&call) {
            Some(Callee::Func(func)) => self.ctx.ast.func(*func).has(DeclAttributes::NORETURN),
            _ => false,
        }
    }

    pub(super) fn in_loop(&mut self, f: impl FnOnce(&mut Self)) {
        self.loops += 1;
        f(self);
        self.loops -= 1;
    }

    fn in_switch(&mut self, f: impl FnOnce(&mut Self)) {
        self.switches += 1;
        f(self);
        self.switches -= 1;
    }

    pub(super) fn bind_switch(
        &mut self,
        value: ExprId,
        cases: &'ctx [SwitchCase],
        default: Option<ExprId>,
    ) {
        self.visit(value);
        let scrutinee = self.type_of(value);
        if let Some(ty) = &scrutinee {
            let canonical = self.canonical(ty);
            let comparable = BuiltinOperator::Equal.infix_type(ty, &canonical).is_some();
            if canonical.is_pointer() || !comparable {
                self.error(SemaError::CannotSwitch(ty.clone()), self.range(value));
            }
        }

        for case in cases {
            self.visit(case.constant);
            if let Some(ty) = &scrutinee {
                self.adopt_literal(case.constant, ty);
            }
            self.in_switch(|this| this.visit(case.body));
        }
        if let Some(default) = default {
            self.in_switch(|this| this.visit(default));
        }
    }

    /// Coerce a returned literal to the return type of the innermost
    /// closure or function.
    pub(super) fn bind_return(&mut self, value: ExprId) {
        self.visit(value);
        let expected = match self.closures.last() {
            Some(frame) => Some(frame.ret.clone()),
            None => self.function.map(|func| self.ctx.ast.func(func).ret.ty.clone()),
        };
        if let Some(expected) = expected {
            self.adopt_literal(value, &expected);
        }
    }

    pub(super) fn bind_closure(
        &mut self,
        id: ExprId,
        args: &'ctx [VarId],
        ret: &'ctx TypeRef,
        body: ExprId,
    ) {
        let ctx = self.ctx;
        if !ctx.is_valid_type(&ret.ty) {
            self.error(SemaError::UnknownType(ret.ty.clone()), ret.range.or(self.range(id)));
        }

        self.ann.captures.entry(id).or_default();
        self.closures.push(ClosureFrame {
            expr: id,
            ret: ret.ty.clone(),
            base: self.scopes.len(),
        });
        let (loops, switches) = (self.loops, self.switches);
        self.loops = 0;
        self.switches = 0;

        self.with_scope(|this| {
            for &arg in args {
                this.bind_var(arg);
            }
            this.visit(body);
        });

        self.loops = loops;
        self.switches = switches;
        self.closures.pop();

        let arg_types: Vec<DataType> = args.iter().map(|&arg| ctx.declared_var_type(arg)).collect();
        self.set_type(id, DataType::function(arg_types, ret.ty.clone()));
    }
}
