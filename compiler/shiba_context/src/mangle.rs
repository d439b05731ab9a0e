//! Symbol mangling.
//!
//! Every variable-length component is prefixed with its length in
//! scalars, so a mangled name can be read back unambiguously and two
//! overloads with different labels, arities or types never collide.
//!
//! ```text
//! fn add(a: Int, _ b: Int) -> Int      _WF3addS1asI1bsI_RsI
//! extension Point { fn len() -> Int }  _WFM5Point3len_RsI
//! **Int8                               _WTP2Tsi8
//! ```

use std::fmt::Write as _;

use shiba_ir::{DataType, DeclAttributes, FloatKind, FuncId, FuncKind};

use crate::ASTContext;

const FUNCTION_ROOT: &str = "_WF";
const CLOSURE_ROOT: &str = "_WC";
const TYPE_ROOT: &str = "_WT";

/// Mangles declarations of one context. Argument and return types are
/// canonicalized first, so aliases of the same type mangle alike.
pub struct Mangler<'ctx> {
    ctx: &'ctx ASTContext,
}

fn push_counted(out: &mut String, name: &str) {
    let _ = write!(out, "{}{name}", name.chars().count());
}

impl<'ctx> Mangler<'ctx> {
    pub fn new(ctx: &'ctx ASTContext) -> Self {
        Mangler { ctx }
    }

    /// Symbol of a function. Foreign functions keep their bare name.
    pub fn function(&self, id: FuncId) -> String {
        let func = self.ctx.ast.func(id);
        if func.has(DeclAttributes::FOREIGN) {
            return func.name.name.clone();
        }
        let mut out = String::from(FUNCTION_ROOT);
        self.write_function(&mut out, id);
        out
    }

    /// Symbol of a closure defined inside `enclosing`.
    pub fn closure(&self, enclosing: FuncId) -> String {
        let mut out = String::from(CLOSURE_ROOT);
        self.write_function(&mut out, enclosing);
        out
    }

    /// Symbol of a type on its own.
    pub fn ty(&self, ty: &DataType) -> String {
        let mut out = String::from(TYPE_ROOT);
        write_type(&mut out, &self.ctx.canonical_type(ty));
        out
    }

    fn write_function(&self, out: &mut String, id: FuncId) {
        let func = self.ctx.ast.func(id);
        match &func.kind {
            FuncKind::Deinitializer(owner) => {
                out.push('D');
                write_type(out, &self.ctx.canonical_type(owner));
                return;
            }
            FuncKind::Initializer(owner) => {
                out.push('I');
                write_type(out, &self.ctx.canonical_type(owner));
            }
            FuncKind::Method(owner) => {
                out.push('M');
                write_type(out, &self.ctx.canonical_type(owner));
                push_counted(out, &func.name.name);
            }
            FuncKind::Free => push_counted(out, &func.name.name),
        }

        for &arg in &func.args {
            let var = self.ctx.ast.var(arg);
            match var.external_name() {
                Some(external) if *external == var.name => out.push('S'),
                Some(external) => {
                    out.push('E');
                    push_counted(out, &external.name);
                }
                None => {}
            }
            push_counted(out, &var.name.name);
            let ty = self.ctx.canonical_type(&self.ctx.declared_var_type(arg));
            write_type(out, &ty);
        }

        out.push('_');
        let ret = self.ctx.canonical_type(&func.ret.ty);
        if !ret.is_void() {
            out.push('R');
            write_type(out, &ret);
        }
    }
}

fn write_type(out: &mut String, ty: &DataType) {
    match ty {
        DataType::Function { args, ret } => {
            out.push('F');
            for arg in args {
                write_type(out, arg);
            }
            out.push('R');
            write_type(out, ret);
        }
        DataType::Tuple(fields) => {
            out.push('t');
            for field in fields {
                write_type(out, field);
            }
            out.push('T');
        }
        DataType::Int { width, signed } => {
            let (full, sized) = if *signed { ('I', 'i') } else { ('U', 'u') };
            if *width == 64 {
                let _ = write!(out, "s{full}");
            } else {
                let _ = write!(out, "s{sized}{width}");
            }
        }
        DataType::Floating(kind) => out.push_str(match kind {
            FloatKind::Float => "sf",
            FloatKind::Double => "sd",
            FloatKind::Float80 => "sF",
        }),
        DataType::Bool => out.push_str("sb"),
        DataType::Void => out.push_str("sv"),
        DataType::Any => out.push_str("sA"),
        DataType::Pointer(_) => {
            let _ = write!(out, "P{}T", ty.pointer_level());
            write_type(out, ty.root_type());
        }
        DataType::Custom(name) => push_counted(out, name),
    }
}

#[cfg(test)]
mod tests;
