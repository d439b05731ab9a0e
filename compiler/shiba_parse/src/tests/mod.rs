//! Parser tests.
//!
//! - `expressions`: precedence, prefix folding, postfix forms, literals
//! - `statements`: control flow, declarations, separators
//! - `items`: functions, types, extensions, globals, attributes
//! - `recovery`: resynchronization after syntax errors
//!
//! Trees are compared through [`render`], a compact s-expression form.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod items;
mod recovery;

use shiba_context::ASTContext;
use shiba_ir::{Ast, ExprId, ExprKind, FuncDecl, VarId};

pub(crate) fn parse(source: &str) -> ASTContext {
    let mut ctx = ASTContext::new("test.sh");
    crate::parse_source(source, &mut ctx);
    ctx
}

pub(crate) fn messages(ctx: &ASTContext) -> Vec<String> {
    ctx.diag
        .sorted_diagnostics()
        .into_iter()
        .map(|d| d.message)
        .collect()
}

pub(crate) fn function<'a>(ctx: &'a ASTContext, name: &str) -> &'a FuncDecl {
    let id = ctx
        .functions_named(name)
        .first()
        .copied()
        .unwrap_or_else(|| panic!("no function named {name}"));
    ctx.ast.func(id)
}

/// Rendered statements of `fn f() { <body> }`.
pub(crate) fn body(source_body: &str) -> Vec<String> {
    let ctx = parse(&format!("fn f() {{\n{source_body}\n}}"));
    assert_eq!(messages(&ctx), Vec::<String>::new(), "in {source_body:?}");
    let func = function(&ctx, "f");
    let body = func.body.expect("body");
    let ExprKind::Compound(stmts) = &ctx.ast.expr(body).kind else {
        panic!("body is not a block");
    };
    stmts.iter().map(|&stmt| render(&ctx.ast, stmt)).collect()
}

/// Rendered single expression statement.
pub(crate) fn expr(source: &str) -> String {
    let mut stmts = body(source);
    assert_eq!(stmts.len(), 1, "{stmts:?}");
    stmts.remove(0)
}

pub(crate) fn render(ast: &Ast, id: ExprId) -> String {
    let r = |id: ExprId| render(ast, id);
    match &ast.expr(id).kind {
        ExprKind::Num { value, .. } => value.to_string(),
        ExprKind::Char(c) => format!("'{}'", char::from(*c)),
        ExprKind::Float { bits } => f64::from_bits(*bits).to_string(),
        ExprKind::Bool(b) => b.to_string(),
        ExprKind::Str(s) => format!("{s:?}"),
        ExprKind::Nil => "nil".to_owned(),
        ExprKind::Void => "()".to_owned(),
        ExprKind::Var(name) => name.name.clone(),
        ExprKind::TypeRef(ty) => format!("<{}>", ty.ty),
        ExprKind::Paren(inner) => format!("(paren {})", r(*inner)),
        ExprKind::Tuple(fields) => format!("(tuple {})", join(fields.iter().map(|&f| r(f)))),
        ExprKind::FieldLookup { lhs, name } => format!("(. {} {name})", r(*lhs)),
        ExprKind::TupleField { lhs, field } => format!("(. {} {field})", r(*lhs)),
        ExprKind::Subscript { lhs, index } => format!("(index {} {})", r(*lhs), r(*index)),
        ExprKind::Ternary {
            cond,
            then_value,
            else_value,
        } => format!("(? {} {} {})", r(*cond), r(*then_value), r(*else_value)),
        ExprKind::Prefix { op, rhs, .. } => format!("({op} {})", r(*rhs)),
        ExprKind::Infix { op, lhs, rhs, .. } => format!("({op} {} {})", r(*lhs), r(*rhs)),
        ExprKind::Call { lhs, args } => {
            let mut out = format!("(call {}", r(*lhs));
            for arg in args {
                out.push(' ');
                if let Some(label) = &arg.label {
                    out.push_str(&format!("{label}:"));
                }
                out.push_str(&r(arg.value));
            }
            out.push(')');
            out
        }
        ExprKind::Closure { args, ret, body } => {
            format!("(closure {} -> {} {})", args.len(), ret.ty, r(*body))
        }
        ExprKind::Sizeof(operand) => format!("(sizeof {})", r(*operand)),
        ExprKind::PoundFunction => "#function".to_owned(),
        ExprKind::VarDecl(var) => render_var(ast, *var),
        ExprKind::Compound(stmts) => format!("{{{}}}", stmts.iter().map(|&s| r(s)).collect::<Vec<_>>().join("; ")),
        ExprKind::If { blocks, else_body } => {
            let mut out = String::from("(if");
            for (i, block) in blocks.iter().enumerate() {
                let keyword = if i == 0 { "" } else { " elif" };
                out.push_str(&format!("{keyword} {} {}", r(block.cond), r(block.body)));
            }
            if let Some(else_body) = else_body {
                out.push_str(&format!(" else {}", r(*else_body)));
            }
            out.push(')');
            out
        }
        ExprKind::While { cond, body } => format!("(while {} {})", r(*cond), r(*body)),
        ExprKind::For {
            init,
            cond,
            step,
            body,
        } => {
            let part = |e: &Option<ExprId>| e.map_or_else(|| "_".to_owned(), r);
            format!("(for {} {} {} {})", part(init), part(cond), part(step), r(*body))
        }
        ExprKind::Switch {
            value,
            cases,
            default,
        } => {
            let mut out = format!("(switch {}", r(*value));
            for case in cases {
                out.push_str(&format!(" (case {} {})", r(case.constant), r(case.body)));
            }
            if let Some(default) = default {
                out.push_str(&format!(" (default {})", r(*default)));
            }
            out.push(')');
            out
        }
        ExprKind::Break => "break".to_owned(),
        ExprKind::Continue => "continue".to_owned(),
        ExprKind::Return(value) => format!("(return {})", r(*value)),
        ExprKind::PoundDiagnostic { is_error, content } => {
            let keyword = if *is_error { "#error" } else { "#warning" };
            format!("({keyword} {content:?})")
        }
    }
}

fn render_var(ast: &Ast, id: VarId) -> String {
    let var = ast.var(id);
    let keyword = if var.mutable { "mut" } else { "let" };
    let mut out = format!("({keyword} {}", var.name);
    if let Some(ty) = &var.type_ref {
        out.push_str(&format!(": {}", ty.ty));
    }
    if let Some(rhs) = var.rhs {
        out.push_str(&format!(" = {}", render(ast, rhs)));
    }
    out.push(')');
    out
}

fn join(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join(" ")
}
