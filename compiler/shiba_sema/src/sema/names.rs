use shiba_context::DeclRef;
use shiba_ir::{DataType, ExprId, ExprKind, FuncId, Identifier, TypeDeclId, VarId};

use super::Binder;
use crate::signature;
use crate::SemaError;

impl<'ctx> Binder<'ctx> {
    /// Resolve a bare name: `self` in an initializer, then locals, globals
    /// and finally the free functions of that name.
    pub(super) fn bind_name(&mut self, id: ExprId, name: &Identifier) {
        let ctx = self.ctx;
        if let Some(func) = self.function {
            let decl = ctx.ast.func(func);
            if decl.is_initializer() && name == "self" {
                self.resolve(id, DeclRef::InitSelf(func), Some(decl.ret.ty.clone()), None);
                return;
            }
        }

        if let Some((var, depth)) = self.lookup_local(&name.name) {
            self.resolve(id, DeclRef::Var(var), self.var_type(var), Some(depth));
            return;
        }
        if let Some(var) = ctx.global(&name.name) {
            self.resolve(id, DeclRef::Var(var), self.var_type(var), None);
            return;
        }

        match ctx.functions_named(&name.name) {
            [] => self.error(SemaError::UnknownVariable(name.clone()), self.range(id)),
            [func] => {
                let ty = ctx.function_type(ctx.ast.func(*func));
                self.resolve(id, DeclRef::Func(*func), Some(ty), None);
            }
            _ => self.error(SemaError::AmbiguousReference(name.clone()), self.range(id)),
        }
    }

    /// A local or global variable named `name`, without resolving it.
    pub(super) fn variable_named(&self, name: &str) -> Option<VarId> {
        self.lookup_local(name)
            .map(|(var, _)| var)
            .or_else(|| self.ctx.global(name))
    }

    /// Resolve `lhs.name` and return the nominal type it was looked up in.
    ///
    /// A field wins over methods of the same name. When the lookup is the
    /// callee of a call, methods are left for overload resolution;
    /// otherwise naming a method is ambiguous.
    pub(super) fn bind_field_lookup(
        &mut self,
        id: ExprId,
        lhs: ExprId,
        name: &Identifier,
        callee: bool,
    ) -> Option<TypeDeclId> {
        let ctx = self.ctx;
        self.visit(lhs);
        let lhs_ty = self.type_of(lhs)?;

        if let DataType::Function { .. } = self.canonical(&lhs_ty) {
            self.error(SemaError::FieldOfFunction(lhs_ty), self.range(id));
            return None;
        }
        let Some(owner) = ctx.decl_for(&lhs_ty) else {
            self.error(SemaError::UnknownType(lhs_ty), self.range(id));
            return None;
        };
        self.ann.field_owners.insert(id, owner);

        let decl = ctx.ast.type_decl(owner);
        let field = decl
            .fields
            .iter()
            .copied()
            .find(|&field| ctx.ast.var(field).name == *name);
        if let Some(field) = field {
            self.ann.decl_refs.insert(id, DeclRef::Var(field));
            if let Some(ty) = self.var_type(field) {
                self.set_type(id, ty);
            }
            return Some(owner);
        }

        let has_methods = self.methods_named(owner, name).next().is_some();
        match (has_methods, callee) {
            (true, true) => Some(owner),
            (true, false) => {
                self.error(SemaError::AmbiguousReference(name.clone()), self.range(id));
                None
            }
            (false, _) => {
                let error = SemaError::UnknownField {
                    field: name.clone(),
                    ty: decl.name.clone(),
                };
                self.error(error, name.range.or(self.range(id)));
                None
            }
        }
    }

    /// Methods of `owner` named `name`, extension methods included.
    pub(super) fn methods_named<'a>(
        &'a self,
        owner: TypeDeclId,
        name: &'a Identifier,
    ) -> impl Iterator<Item = FuncId> + 'a {
        let ctx = self.ctx;
        ctx.methods_of(owner)
            .filter(move |&method| ctx.ast.func(method).name == *name)
    }

    pub(super) fn bind_tuple_field(&mut self, id: ExprId, lhs: ExprId, field: usize) {
        self.visit(lhs);
        let Some(lhs_ty) = self.type_of(lhs) else {
            return;
        };
        let DataType::Tuple(fields) = self.canonical(&lhs_ty) else {
            self.error(SemaError::IndexIntoNonTuple, self.range(id));
            return;
        };
        match fields.get(field) {
            Some(ty) => self.set_type(id, ty.clone()),
            None => {
                let error = SemaError::TupleFieldOutOfBounds {
                    field,
                    count: fields.len(),
                };
                self.error(error, self.range(id));
            }
        }
    }

    pub(super) fn bind_subscript(&mut self, id: ExprId, lhs: ExprId, index: ExprId) {
        self.visit(lhs);
        self.visit(index);
        let Some(lhs_ty) = self.type_of(lhs) else {
            return;
        };
        match self.canonical(&lhs_ty) {
            DataType::Pointer(pointee) => self.set_type(id, *pointee),
            _ => self.error(SemaError::CannotSubscript(lhs_ty), self.range(lhs)),
        }
    }

    /// `sizeof` of a type name or of a value. A name that spells a valid
    /// type is taken as the type.
    pub(super) fn bind_sizeof(&mut self, id: ExprId, operand: ExprId) {
        let ctx = self.ctx;
        let inner = ctx.ast.skip_parens(operand);
        match self.kind(inner) {
            ExprKind::Var(name) if ctx.is_valid_type(&DataType::from_name(&name.name)) => {
                self.set_type(inner, DataType::from_name(&name.name));
            }
            ExprKind::TypeRef(ty) if !ctx.is_valid_type(&ty.ty) => {
                self.error(SemaError::UnknownType(ty.ty.clone()), ty.range.or(self.range(inner)));
            }
            _ => self.visit(operand),
        }
        self.set_type(id, DataType::INT64);
    }

    pub(super) fn bind_pound_function(&mut self, id: ExprId) {
        let Some(func) = self.function else {
            self.error(SemaError::PoundFunctionOutsideFunction, self.range(id));
            return;
        };
        let name = signature::display_name(self.ctx, func);
        self.ann.function_names.insert(id, name);
        self.set_type(id, DataType::c_string());
    }
}
