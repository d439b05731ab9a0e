//! AST visitor.
//!
//! Default methods call the matching `walk_*` function, which visits the
//! children in source order. Override a `visit_*` method to act on a node
//! and call the `walk_*` function to keep descending.
//!
//! ```text
//! struct CountCalls(usize);
//!
//! impl<'ast> Visitor<'ast> for CountCalls {
//!     fn visit_expr(&mut self, id: ExprId, ast: &'ast Ast) {
//!         if let ExprKind::Call { .. } = ast.expr(id).kind {
//!             self.0 += 1;
//!         }
//!         walk_expr(self, id, ast);
//!     }
//! }
//! ```

use super::{Ast, ExprId, ExprKind, FuncId, TypeDeclId, VarId};

pub trait Visitor<'ast> {
    fn visit_expr(&mut self, id: ExprId, ast: &'ast Ast) {
        walk_expr(self, id, ast);
    }

    fn visit_func(&mut self, id: FuncId, ast: &'ast Ast) {
        walk_func(self, id, ast);
    }

    fn visit_var(&mut self, id: VarId, ast: &'ast Ast) {
        walk_var(self, id, ast);
    }

    fn visit_type_decl(&mut self, id: TypeDeclId, ast: &'ast Ast) {
        walk_type_decl(self, id, ast);
    }
}

pub fn walk_func<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, id: FuncId, ast: &'ast Ast) {
    let func = ast.func(id);
    if let Some(self_arg) = func.self_arg {
        visitor.visit_var(self_arg, ast);
    }
    for &arg in &func.args {
        visitor.visit_var(arg, ast);
    }
    if let Some(body) = func.body {
        visitor.visit_expr(body, ast);
    }
}

pub fn walk_var<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, id: VarId, ast: &'ast Ast) {
    if let Some(rhs) = ast.var(id).rhs {
        visitor.visit_expr(rhs, ast);
    }
}

pub fn walk_type_decl<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    id: TypeDeclId,
    ast: &'ast Ast,
) {
    let decl = ast.type_decl(id);
    for &field in &decl.fields {
        visitor.visit_var(field, ast);
    }
    for &init in &decl.initializers {
        visitor.visit_func(init, ast);
    }
    for &method in &decl.methods {
        visitor.visit_func(method, ast);
    }
    if let Some(deinit) = decl.deinit {
        visitor.visit_func(deinit, ast);
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, id: ExprId, ast: &'ast Ast) {
    match &ast.expr(id).kind {
        ExprKind::Num { .. }
        | ExprKind::Char(_)
        | ExprKind::Float { .. }
        | ExprKind::Bool(_)
        | ExprKind::Str(_)
        | ExprKind::Nil
        | ExprKind::Void
        | ExprKind::Var(_)
        | ExprKind::TypeRef(_)
        | ExprKind::PoundFunction
        | ExprKind::Break
        | ExprKind::Continue
        | ExprKind::PoundDiagnostic { .. } => {}
        ExprKind::Paren(inner) | ExprKind::Sizeof(inner) | ExprKind::Return(inner) => {
            visitor.visit_expr(*inner, ast);
        }
        ExprKind::FieldLookup { lhs, .. } | ExprKind::TupleField { lhs, .. } => {
            visitor.visit_expr(*lhs, ast);
        }
        ExprKind::Tuple(items) | ExprKind::Compound(items) => {
            for &item in items {
                visitor.visit_expr(item, ast);
            }
        }
        ExprKind::Subscript { lhs, index } => {
            visitor.visit_expr(*lhs, ast);
            visitor.visit_expr(*index, ast);
        }
        ExprKind::Ternary {
            cond,
            then_value,
            else_value,
        } => {
            visitor.visit_expr(*cond, ast);
            visitor.visit_expr(*then_value, ast);
            visitor.visit_expr(*else_value, ast);
        }
        ExprKind::Prefix { rhs, .. } => visitor.visit_expr(*rhs, ast),
        ExprKind::Infix { lhs, rhs, .. } => {
            visitor.visit_expr(*lhs, ast);
            visitor.visit_expr(*rhs, ast);
        }
        ExprKind::Call { lhs, args } => {
            visitor.visit_expr(*lhs, ast);
            for arg in args {
                visitor.visit_expr(arg.value, ast);
            }
        }
        ExprKind::Closure { args, body, .. } => {
            for &arg in args {
                visitor.visit_var(arg, ast);
            }
            visitor.visit_expr(*body, ast);
        }
        ExprKind::VarDecl(var) => visitor.visit_var(*var, ast),
        ExprKind::If { blocks, else_body } => {
            for block in blocks {
                visitor.visit_expr(block.cond, ast);
                visitor.visit_expr(block.body, ast);
            }
            if let Some(body) = else_body {
                visitor.visit_expr(*body, ast);
            }
        }
        ExprKind::While { cond, body } => {
            visitor.visit_expr(*cond, ast);
            visitor.visit_expr(*body, ast);
        }
        ExprKind::For {
            init,
            cond,
            step,
            body,
        } => {
            for part in [init, cond, step].into_iter().flatten() {
                visitor.visit_expr(*part, ast);
            }
            visitor.visit_expr(*body, ast);
        }
        ExprKind::Switch {
            value,
            cases,
            default,
        } => {
            visitor.visit_expr(*value, ast);
            for case in cases {
                visitor.visit_expr(case.constant, ast);
                visitor.visit_expr(case.body, ast);
            }
            if let Some(body) = default {
                visitor.visit_expr(*body, ast);
            }
        }
    }
}
