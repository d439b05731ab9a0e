//! Semantic pass tests.
//!
//! - `binding`: names, calls, overloads, operators, closures, control flow
//! - `declarations`: functions, variables, aliases, type registration
//! - `checking`: the verification pass on top of binding
//!
//! Sources go through the real parser; the tests only assert on what the
//! passes record.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod checking;
mod declarations;

use shiba_context::ASTContext;
use shiba_diagnostic::Severity;
use shiba_driver::{Driver, Pass};
use shiba_ir::{ExprId, ExprKind, FuncDecl};

use crate::{Sema, TypeChecker};

fn parse(source: &str) -> ASTContext {
    let mut ctx = ASTContext::new("test.sh");
    shiba_parse::parse_source(source, &mut ctx);
    assert!(
        !ctx.diag.has_errors(),
        "parse errors in {source:?}: {:?}",
        messages(&ctx)
    );
    ctx
}

/// Parse and run the binding pass only.
pub(crate) fn bind(source: &str) -> ASTContext {
    let mut ctx = parse(source);
    Sema.run(&mut ctx).unwrap();
    ctx
}

/// Parse, bind and type check, halting after binding errors.
pub(crate) fn check(source: &str) -> ASTContext {
    let mut ctx = parse(source);
    let mut driver = Driver::new();
    driver.add_pass(Sema);
    driver.add_pass(TypeChecker);
    driver.run(&mut ctx);
    ctx
}

pub(crate) fn messages(ctx: &ASTContext) -> Vec<String> {
    ctx.diag
        .sorted_diagnostics()
        .into_iter()
        .map(|d| d.message)
        .collect()
}

pub(crate) fn warnings(ctx: &ASTContext) -> Vec<String> {
    ctx.diag
        .sorted_diagnostics()
        .into_iter()
        .filter(|d| d.severity == Severity::Warning)
        .map(|d| d.message)
        .collect()
}

pub(crate) fn function<'a>(ctx: &'a ASTContext, name: &str) -> &'a FuncDecl {
    ctx.ast.func(ctx.functions_named(name)[0])
}

/// Top-level statements of a free function's body.
pub(crate) fn body<'a>(ctx: &'a ASTContext, name: &str) -> &'a [ExprId] {
    let body = function(ctx, name).body.expect("function has a body");
    let ExprKind::Compound(stmts) = &ctx.ast.expr(body).kind else {
        panic!("body of {name} is not a block");
    };
    stmts
}

/// Initial value of a `let`/`mut` statement.
pub(crate) fn initializer(ctx: &ASTContext, stmt: ExprId) -> ExprId {
    let ExprKind::VarDecl(var) = ctx.ast.expr(stmt).kind else {
        panic!("not a variable declaration");
    };
    ctx.ast.var(var).rhs.expect("variable has a value")
}
