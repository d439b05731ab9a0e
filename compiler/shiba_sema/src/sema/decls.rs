use shiba_ir::ast::visitor::walk_func;
use shiba_ir::{DeclAttributes, FuncId, FuncKind, Identifier, TypeAlias, VarId, VarKind};

use super::Binder;
use crate::SemaError;

impl<'ctx> Binder<'ctx> {
    pub(super) fn bind_func(&mut self, id: FuncId) {
        let ctx = self.ctx;
        let func = ctx.ast.func(id);

        let outer = self.function.replace(id);
        self.with_scope(|this| walk_func(this, id, &ctx.ast));
        self.function = outer;

        let foreign = func.has(DeclAttributes::FOREIGN);
        let range = func.name.range.or(func.range);
        if foreign && func.body.is_some() {
            self.error(SemaError::ForeignFunctionWithBody(func.name.clone()), range);
        }
        if !foreign && !func.has(DeclAttributes::IMPLICIT) && func.body.is_none() {
            self.error(SemaError::MissingBody(func.name.clone()), range);
        }
        if func.has_varargs && !foreign {
            self.error(SemaError::VarargsInNonForeign, range);
        }

        if !ctx.is_valid_type(&func.ret.ty) {
            let error = SemaError::UnknownType(func.ret.ty.clone());
            self.error(error, func.ret.range.or(range));
        } else if let Some(body) = func.body {
            let returns_value = !self.canonical(&func.ret.ty).is_void();
            if returns_value && !func.is_initializer() && !self.ann.has_return(body) {
                self.error(SemaError::MissingReturn(func.ret.ty.clone()), range);
            }
        }

        if let FuncKind::Deinitializer(owner) = &func.kind {
            if !ctx.is_indirect(owner) {
                let owner = Identifier::new(owner.to_string());
                self.error(SemaError::DeinitOnValueType(owner), range);
            }
        }
    }

    /// Bind a variable of any kind. The initial value is bound before the
    /// name comes into scope.
    pub(super) fn bind_var(&mut self, id: VarId) {
        let ctx = self.ctx;
        let var = ctx.ast.var(id);
        if let Some(rhs) = var.rhs {
            self.visit(rhs);
        }

        if let VarKind::Argument { .. } = var.kind {
            if let Some(declared) = &var.type_ref {
                if !ctx.is_valid_type(&declared.ty) {
                    let error = SemaError::UnknownType(declared.ty.clone());
                    self.error(error, declared.range.or(var.range));
                }
                self.ann.var_types.insert(id, declared.ty.clone());
            }
            self.bind_local(id);
            return;
        }

        if var.is_foreign() && var.rhs.is_some() {
            self.error(SemaError::ForeignVarWithValue(var.name.clone()), var.range);
        }

        let ty = match &var.type_ref {
            Some(declared) => {
                if !ctx.is_valid_type(&declared.ty) {
                    let error = SemaError::UnknownType(declared.ty.clone());
                    self.error(error, declared.range.or(var.range));
                } else if let Some(rhs) = var.rhs {
                    self.adopt_literal(rhs, &declared.ty);
                }
                Some(declared.ty.clone())
            }
            None => var.rhs.and_then(|rhs| self.type_of(rhs)),
        };
        if let Some(ty) = ty {
            self.ann.var_types.insert(id, ty);
        }

        if var.kind == VarKind::Local {
            self.bind_local(id);
        }
    }

    pub(super) fn check_alias(&mut self, alias: &TypeAlias) {
        if !self.ctx.is_valid_type(&alias.bound.ty) {
            let error = SemaError::UnknownType(alias.bound.ty.clone());
            self.error(error, alias.bound.range.or(alias.name.range));
        }
    }
}
