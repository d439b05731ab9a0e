//! Call signatures shared by overload selection and the type checker.

use std::fmt::Write as _;

use shiba_context::{ASTContext, Callee};
use shiba_ir::{DataType, FuncId, Identifier};

/// One parameter as seen from a call site.
pub(crate) struct Param<'ctx> {
    /// Required argument label, if any.
    pub label: Option<&'ctx Identifier>,
    pub ty: DataType,
}

/// What a callee expects, excluding any implicit `self`.
pub(crate) struct Signature<'ctx> {
    pub params: Vec<Param<'ctx>>,
    pub varargs: bool,
    pub ret: DataType,
}

impl<'ctx> Signature<'ctx> {
    pub fn of_func(ctx: &'ctx ASTContext, id: FuncId) -> Self {
        let func = ctx.ast.func(id);
        let params = func
            .args
            .iter()
            .map(|&arg| Param {
                label: ctx.ast.var(arg).external_name(),
                ty: ctx.declared_var_type(arg),
            })
            .collect();
        Signature {
            params,
            varargs: func.has_varargs,
            ret: func.ret.ty.clone(),
        }
    }

    /// A function value's signature. Its parameters carry no labels.
    pub fn of_value(args: &[DataType], ret: &DataType) -> Self {
        Signature {
            params: args
                .iter()
                .map(|ty| Param {
                    label: None,
                    ty: ty.clone(),
                })
                .collect(),
            varargs: false,
            ret: ret.clone(),
        }
    }

    pub fn of_callee(ctx: &'ctx ASTContext, callee: &Callee) -> Self {
        match callee {
            Callee::Func(id) => Self::of_func(ctx, *id),
            Callee::Value { args, ret } => Self::of_value(args, ret),
        }
    }

    /// Whether `count` arguments can be passed.
    pub fn accepts_count(&self, count: usize) -> bool {
        if self.varargs {
            self.params.len() <= count
        } else {
            self.params.len() == count
        }
    }
}

/// The readable signature `#function` expands to.
///
/// ```text
/// Point.distance(to other: Point, _: Int) -> Double
/// printf(_ format: *Int8, _: ...) -> Int32
/// ```
pub(crate) fn display_name(ctx: &ASTContext, id: FuncId) -> String {
    let func = ctx.ast.func(id);
    let mut out = String::new();
    if let Some(owner) = func.kind.owner() {
        let _ = write!(out, "{owner}.");
    }
    out.push_str(&func.name.name);

    let mut params: Vec<String> = func
        .args
        .iter()
        .map(|&arg| {
            let var = ctx.ast.var(arg);
            let label = var.external_name().map_or("_", |label| label.as_str());
            let mut param = label.to_owned();
            if var.name != label {
                let _ = write!(param, " {}", var.name);
            }
            let _ = write!(param, ": {}", ctx.declared_var_type(arg));
            param
        })
        .collect();
    if func.has_varargs {
        params.push("_: ...".to_owned());
    }
    let _ = write!(out, "({})", params.join(", "));

    if !func.ret.ty.is_void() {
        let _ = write!(out, " -> {}", func.ret.ty);
    }
    out
}
