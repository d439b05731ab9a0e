//! Call binding and overload selection.
//!
//! Candidates are collected from the callee expression, then tried in
//! declaration order; the first one whose arity, labels and argument types
//! fit wins. There is no ranking between candidates.

use shiba_context::{Callee, DeclRef, Mutability};
use shiba_ir::{
    CallArg, DataType, DeclAttributes, ExprId, ExprKind, FuncId, Identifier, TypeDeclId,
};

use super::Binder;
use crate::signature::Signature;
use crate::SemaError;

/// What a callee expression may call.
struct Candidates {
    name: Identifier,
    callees: Vec<Callee>,
    /// The value a method is called on.
    receiver: Option<ExprId>,
}

/// A candidate that fits, with the literal coercions it needs.
struct Selection {
    callee: Callee,
    coercions: Vec<(ExprId, DataType)>,
}

impl<'ctx> Binder<'ctx> {
    pub(super) fn bind_call(&mut self, id: ExprId, lhs: ExprId, args: &'ctx [CallArg]) {
        for arg in args {
            self.visit(arg.value);
        }
        let Some(arg_types) = args
            .iter()
            .map(|arg| self.type_of(arg.value))
            .collect::<Option<Vec<_>>>()
        else {
            return;
        };

        let Some(candidates) = self.candidates(lhs) else {
            return;
        };
        if candidates.callees.is_empty() {
            self.error(SemaError::UnknownFunction(candidates.name), self.range(lhs));
            return;
        }

        let Some(selection) = self.select(&candidates.callees, args, &arg_types) else {
            let args = args
                .iter()
                .zip(&arg_types)
                .map(|(arg, ty)| match &arg.label {
                    Some(label) => format!("{label}: {ty}"),
                    None => ty.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            let error = SemaError::NoViableOverload {
                name: candidates.name,
                args,
            };
            self.error(error, self.range(id));
            return;
        };

        for (arg, ty) in &selection.coercions {
            self.retype_literal(*arg, ty);
        }
        let ret = Signature::of_callee(self.ctx, &selection.callee).ret;
        if let Callee::Func(func) = selection.callee {
            self.record_function_callee(id, lhs, func, candidates.receiver);
        }
        self.ann.callees.insert(id, selection.callee);
        self.set_type(id, ret);
    }

    fn record_function_callee(
        &mut self,
        id: ExprId,
        lhs: ExprId,
        func: FuncId,
        receiver: Option<ExprId>,
    ) {
        let ctx = self.ctx;
        let decl = ctx.ast.func(func);
        self.ann.decl_refs.insert(id, DeclRef::Func(func));
        self.ann.decl_refs.insert(lhs, DeclRef::Func(func));
        self.set_type(lhs, ctx.function_type(decl));
        self.capture(DeclRef::Func(func), None);

        let Some(receiver) = receiver else {
            return;
        };
        if !decl.has(DeclAttributes::MUTATING) || self.in_initializer() {
            return;
        }
        let indirect = self
            .type_of(receiver)
            .is_some_and(|ty| ctx.is_indirect(&ty));
        if indirect {
            return;
        }
        if let Mutability::Immutable { culprit } = ctx.mutability_with(&self.ann, receiver) {
            self.error(SemaError::AssignToConstant(culprit), self.range(receiver));
        }
    }

    /// A nominal type spelled by a bare name that is not shadowed by a
    /// variable.
    fn type_named(&self, name: &Identifier) -> Option<TypeDeclId> {
        if self.variable_named(&name.name).is_some() {
            return None;
        }
        let ty = DataType::from_name(&name.name);
        if !self.ctx.is_valid_type(&ty) {
            return None;
        }
        self.ctx.decl_for(&ty)
    }

    /// Collect the candidates of a callee. `None` means an error was
    /// already reported.
    fn candidates(&mut self, lhs: ExprId) -> Option<Candidates> {
        let ctx = self.ctx;
        match self.kind(lhs) {
            ExprKind::FieldLookup { lhs: base, name } => {
                if let ExprKind::Var(type_name) = self.kind(*base) {
                    if let Some(owner) = self.type_named(type_name) {
                        return Some(self.static_candidates(lhs, *base, owner, name));
                    }
                }

                let owner = self.bind_field_lookup(lhs, *base, name, true)?;
                let mut callees = Vec::new();
                if let Some(DeclRef::Var(field)) = self.ann.decl_of(lhs) {
                    match self.var_type(field).map(|ty| self.canonical(&ty)) {
                        Some(DataType::Function { args, ret }) => {
                            callees.push(Callee::Value { args, ret: *ret });
                        }
                        Some(_) if self.methods_named(owner, name).next().is_none() => {
                            let ty = self.type_of(lhs).unwrap_or(DataType::Void);
                            self.error(SemaError::CallNonFunction(ty), self.range(lhs));
                            return None;
                        }
                        _ => {}
                    }
                }
                callees.extend(
                    self.methods_named(owner, name)
                        .filter(|&method| !ctx.ast.func(method).has(DeclAttributes::STATIC))
                        .map(Callee::Func),
                );
                Some(Candidates {
                    name: name.clone(),
                    callees,
                    receiver: Some(*base),
                })
            }
            ExprKind::Var(name) => {
                if self.variable_named(&name.name).is_some() {
                    self.bind_name(lhs, name);
                    let callee = self.value_callee(lhs)?;
                    return Some(Candidates {
                        name: name.clone(),
                        callees: vec![callee],
                        receiver: None,
                    });
                }
                if let Some(owner) = self.type_named(name) {
                    let initializers = ctx.ast.type_decl(owner).initializers.iter();
                    return Some(Candidates {
                        name: name.clone(),
                        callees: initializers.copied().map(Callee::Func).collect(),
                        receiver: None,
                    });
                }
                let callees = ctx
                    .functions_named(&name.name)
                    .iter()
                    .copied()
                    .map(Callee::Func)
                    .collect();
                Some(Candidates {
                    name: name.clone(),
                    callees,
                    receiver: None,
                })
            }
            _ => {
                self.visit(lhs);
                let callee = self.value_callee(lhs)?;
                Some(Candidates {
                    name: Identifier::new("expression"),
                    callees: vec![callee],
                    receiver: None,
                })
            }
        }
    }

    /// `Type.method(...)`: the static methods of `owner` named `name`.
    fn static_candidates(
        &mut self,
        lhs: ExprId,
        base: ExprId,
        owner: TypeDeclId,
        name: &Identifier,
    ) -> Candidates {
        let ctx = self.ctx;
        self.set_type(base, ctx.ast.type_decl(owner).ty());
        self.ann.field_owners.insert(lhs, owner);
        let callees = self
            .methods_named(owner, name)
            .filter(|&method| ctx.ast.func(method).has(DeclAttributes::STATIC))
            .map(Callee::Func)
            .collect();
        Candidates {
            name: name.clone(),
            callees,
            receiver: None,
        }
    }

    /// The signature of a function-typed value, or an error.
    fn value_callee(&mut self, lhs: ExprId) -> Option<Callee> {
        let ty = self.type_of(lhs)?;
        match self.canonical(&ty) {
            DataType::Function { args, ret } => Some(Callee::Value { args, ret: *ret }),
            _ => {
                self.error(SemaError::CallNonFunction(ty), self.range(lhs));
                None
            }
        }
    }

    fn select(
        &self,
        callees: &[Callee],
        args: &[CallArg],
        arg_types: &[DataType],
    ) -> Option<Selection> {
        callees.iter().find_map(|callee| {
            let signature = Signature::of_callee(self.ctx, callee);
            if !signature.accepts_count(args.len()) {
                return None;
            }
            let mut coercions = Vec::new();
            for (index, (arg, ty)) in args.iter().zip(arg_types).enumerate() {
                // Arguments past the declared ones go to the varargs.
                let Some(param) = signature.params.get(index) else {
                    continue;
                };
                if param.label.is_some() && arg.label.as_ref() != param.label {
                    return None;
                }
                if self.canonical(&param.ty) == DataType::Any || self.ctx.matches(ty, &param.ty) {
                    continue;
                }
                if !self.can_adopt(arg.value, &param.ty) {
                    return None;
                }
                coercions.push((arg.value, param.ty.clone()));
            }
            Some(Selection {
                callee: callee.clone(),
                coercions,
            })
        })
    }
}
