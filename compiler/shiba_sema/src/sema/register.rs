//! Top-level registration, run once before binding.

use rustc_hash::{FxHashMap, FxHashSet};
use shiba_context::{ASTContext, ContextError, Mangler};
use shiba_diagnostic::Diagnostic;
use shiba_ir::SourceRange;

use crate::SemaError;

/// Hoist extension methods onto their types, then check every type for
/// duplicate members and by-value self reference.
pub(super) fn register_top_level(ctx: &mut ASTContext) {
    let mut diagnostics = Vec::new();

    let mut hoisted = Vec::new();
    for (index, extension) in ctx.extensions().iter().enumerate() {
        let ty = &extension.type_ref.ty;
        match ctx.decl_for(ty) {
            Some(target) => hoisted.push((index, target)),
            None => {
                let range = extension.type_ref.range.or(extension.range);
                diagnostics.push(error(&SemaError::UnknownType(ty.clone()), range));
            }
        }
    }
    tracing::debug!(extensions = hoisted.len(), "hoisting extensions");
    for (index, target) in hoisted {
        ctx.hoist_extension(index, target);
    }

    let mangler = Mangler::new(ctx);
    for id in ctx.types_with_members() {
        let decl = ctx.ast.type_decl(id);

        let mut fields = FxHashSet::default();
        for &field in &decl.fields {
            let name = &ctx.ast.var(field).name;
            if !fields.insert(name.as_str()) {
                let duplicate = SemaError::DuplicateField {
                    name: name.clone(),
                    ty: decl.name.clone(),
                };
                diagnostics.push(error(&duplicate, name.range));
            }
        }

        let mut methods = FxHashMap::default();
        for method in ctx.methods_of(id) {
            let name = &ctx.ast.func(method).name;
            if methods.insert(mangler.function(method), method).is_some() {
                let duplicate = SemaError::DuplicateMethod {
                    name: name.clone(),
                    ty: decl.name.clone(),
                };
                diagnostics.push(error(&duplicate, name.range));
            }
        }

        if ctx.is_circular_type(id) {
            let circular = ContextError::CircularType(decl.name.clone());
            diagnostics.push(Diagnostic::error(circular.to_string()).at_range(decl.name.range));
        }
    }

    ctx.diag.extend(diagnostics);
}

fn error(error: &SemaError, range: Option<SourceRange>) -> Diagnostic {
    Diagnostic::error(error.to_string()).at_range(range)
}
