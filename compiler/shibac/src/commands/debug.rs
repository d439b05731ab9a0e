//! Debug commands: `lex` and `mangle` for inspecting compiler internals.

use std::io::Write;

use shiba_context::{ASTContext, Mangler};
use shiba_diagnostic::{ColorMode, Diagnostic};
use shiba_ir::{FuncId, Token};

use super::{read_file, render};
use crate::compile;

/// Lex a file and print the token stream. Returns `false` on read or
/// lex errors.
pub fn lex_file(path: &str, color: ColorMode, is_tty: bool) -> bool {
    let source = match read_file(path) {
        Ok(source) => source,
        Err(message) => {
            eprintln!("error: {message}");
            return false;
        }
    };

    let output = shiba_lexer::lex(&source);
    println!("Tokens for '{path}' ({} tokens):", output.tokens.len());
    for token in &output.tokens {
        println!("{}", describe_token(token));
    }

    if output.has_errors() {
        let diagnostics: Vec<Diagnostic> = output.errors.into_iter().map(Diagnostic::from).collect();
        let _ = std::io::stderr().write_all(&render(path, &source, &diagnostics, color, is_tty));
        return false;
    }
    true
}

/// `start-end  class  text  [flags]`
fn describe_token(token: &Token) -> String {
    let mut flags = Vec::new();
    if token.is_keyword() {
        flags.push("keyword");
    }
    if token.is_literal() {
        flags.push("literal");
    }
    if token.is_string() {
        flags.push("string");
    }
    if token.is_line_separator() {
        flags.push("separator");
    }

    let range = format!("{}-{}", token.range.start, token.range.end);
    let line = format!("  {range:<12}{:<13}{}", token.kind.display_name(), token.kind);
    if flags.is_empty() {
        line
    } else {
        format!("{line}  [{}]", flags.join(", "))
    }
}

/// Compile a file and print the mangled name of every function it
/// declares. Returns `false` if compilation failed.
pub fn mangle_file(path: &str, color: ColorMode, is_tty: bool) -> bool {
    let source = match read_file(path) {
        Ok(source) => source,
        Err(message) => {
            eprintln!("error: {message}");
            return false;
        }
    };

    let output = compile(&source, path);
    let _ = std::io::stderr().write_all(&render(path, &source, &output.diagnostics, color, is_tty));
    let Some(ctx) = output.context else {
        return false;
    };

    let mangler = Mangler::new(&ctx);
    for func in declared_functions(&ctx) {
        let decl = ctx.ast.func(func);
        println!("{:<40}{}", mangler.function(func), decl.name);
    }
    true
}

/// Free functions, then per type its initializers, methods (extension
/// methods included) and deinitializer. Extended primitives come last.
fn declared_functions(ctx: &ASTContext) -> Vec<FuncId> {
    let mut funcs = ctx.functions().to_vec();
    for ty in ctx.types_with_members() {
        let decl = ctx.ast.type_decl(ty);
        funcs.extend(decl.initializers.iter().copied());
        funcs.extend(ctx.methods_of(ty));
        funcs.extend(decl.deinit);
    }
    funcs
}
