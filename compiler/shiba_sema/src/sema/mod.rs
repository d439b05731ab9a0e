//! The binding pass.
//!
//! One depth-first walk resolves every name and call to a declaration and
//! types every value expression from the leaves up. Results go to the
//! context's [`Annotations`]; problems go to its diagnostic engine. Nothing
//! in the tree is rewritten.
//!
//! Before the walk, top-level registration hoists extension methods onto
//! their types and checks each type's members and layout.
//!
//! - `register`: extension hoisting, duplicate members, circular layouts
//! - `decls`: functions, variables, aliases
//! - `names`: variable references, member and tuple lookups
//! - `calls`: candidate collection and overload selection
//! - `operators`: prefix, infix and cast typing, literal coercion
//! - `control`: blocks, loops, switches, returns, closures

mod calls;
mod control;
mod decls;
mod names;
mod operators;
mod register;

use rustc_hash::FxHashMap;
use shiba_context::{ASTContext, Annotations, DeclRef};
use shiba_diagnostic::Diagnostic;
use shiba_driver::Pass;
use shiba_ir::ast::visitor::{walk_expr, Visitor};
use shiba_ir::{Ast, DataType, ExprId, ExprKind, FuncId, SourceRange, VarId};
use shiba_stack::ensure_sufficient_stack;

use crate::SemaError;

/// The binding pass, registered as "Semantic Analysis".
#[derive(Copy, Clone, Debug, Default)]
pub struct Sema;

impl Pass for Sema {
    fn title(&self) -> &str {
        "Semantic Analysis"
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn run(&mut self, ctx: &mut ASTContext) -> Result<(), Diagnostic> {
        register::register_top_level(ctx);

        let mut binder = Binder::new(ctx);
        binder.bind_all();
        let Binder {
            ann, diagnostics, ..
        } = binder;

        tracing::debug!(
            typed = ann.expr_types.len(),
            resolved = ann.decl_refs.len(),
            diagnostics = diagnostics.len(),
            "binding finished"
        );
        ctx.ann = ann;
        ctx.diag.extend(diagnostics);
        Ok(())
    }
}

/// A closure being bound.
struct ClosureFrame {
    expr: ExprId,
    ret: DataType,
    /// Number of scopes open outside the closure. Locals found in a
    /// shallower scope are captures.
    base: usize,
}

pub(crate) struct Binder<'ctx> {
    ctx: &'ctx ASTContext,
    ann: Annotations,
    diagnostics: Vec<Diagnostic>,
    /// Local bindings, innermost last.
    scopes: Vec<FxHashMap<&'ctx str, VarId>>,
    function: Option<FuncId>,
    closures: Vec<ClosureFrame>,
    loops: u32,
    switches: u32,
}

impl<'ctx> Binder<'ctx> {
    fn new(ctx: &'ctx ASTContext) -> Self {
        Binder {
            ctx,
            ann: Annotations::default(),
            diagnostics: Vec::new(),
            scopes: Vec::new(),
            function: None,
            closures: Vec::new(),
            loops: 0,
            switches: 0,
        }
    }

    /// Pending diagnostics, globals, types, aliases, functions, then
    /// extensions whose type resolved.
    fn bind_all(&mut self) {
        let ctx = self.ctx;
        for pound in ctx.pending_diagnostics() {
            self.pound_diagnostic(pound.is_error, &pound.content, pound.range);
        }
        for &global in ctx.globals() {
            self.visit_var(global, &ctx.ast);
        }
        for &ty in ctx.types() {
            self.visit_type_decl(ty, &ctx.ast);
        }
        for alias in ctx.type_aliases() {
            self.check_alias(alias);
        }
        for &func in ctx.functions() {
            self.visit_func(func, &ctx.ast);
        }
        for extension in ctx.extensions() {
            if extension.target.is_none() {
                continue;
            }
            for &method in &extension.methods {
                self.visit_func(method, &ctx.ast);
            }
        }
    }

    // Reporting

    fn error(&mut self, error: SemaError, range: Option<SourceRange>) {
        self.diagnostics
            .push(Diagnostic::error(error.to_string()).at_range(range));
    }

    fn warning(&mut self, warning: SemaError, range: Option<SourceRange>) {
        self.diagnostics
            .push(Diagnostic::warning(warning.to_string()).at_range(range));
    }

    fn pound_diagnostic(&mut self, is_error: bool, content: &str, range: Option<SourceRange>) {
        let diagnostic = if is_error {
            Diagnostic::error(content)
        } else {
            Diagnostic::warning(content)
        };
        self.diagnostics.push(diagnostic.at_range(range));
    }

    // Annotations

    fn visit(&mut self, id: ExprId) {
        let ctx = self.ctx;
        self.visit_expr(id, &ctx.ast);
    }

    fn set_type(&mut self, id: ExprId, ty: DataType) {
        self.ann.expr_types.insert(id, ty);
    }

    fn type_of(&self, id: ExprId) -> Option<DataType> {
        self.ann.type_of(id).cloned()
    }

    fn canonical(&self, ty: &DataType) -> DataType {
        self.ctx.canonical_type(ty)
    }

    /// Inferred type if this pass has seen the variable, else its
    /// declared type.
    fn var_type(&self, id: VarId) -> Option<DataType> {
        self.ann.var_types.get(&id).cloned().or_else(|| {
            self.ctx
                .ast
                .var(id)
                .type_ref
                .as_ref()
                .map(|t| t.ty.clone())
        })
    }

    fn kind(&self, id: ExprId) -> &'ctx ExprKind {
        let ctx = self.ctx;
        &ctx.ast.expr(id).kind
    }

    fn range(&self, id: ExprId) -> Option<SourceRange> {
        self.ctx.ast.range(id)
    }

    fn in_initializer(&self) -> bool {
        self.function
            .is_some_and(|func| self.ctx.ast.func(func).is_initializer())
    }

    // Scopes

    fn with_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.scopes.push(FxHashMap::default());
        let result = f(self);
        self.scopes.pop();
        result
    }

    fn bind_local(&mut self, id: VarId) {
        let ctx = self.ctx;
        let name = ctx.ast.var(id).name.name.as_str();
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, id);
        }
    }

    /// Innermost local named `name` and the depth of its scope.
    fn lookup_local(&self, name: &str) -> Option<(VarId, usize)> {
        self.scopes
            .iter()
            .enumerate()
            .rev()
            .find_map(|(depth, scope)| scope.get(name).map(|&id| (id, depth)))
    }

    /// Record `decl` as captured by every enclosing closure it is not
    /// local to. `depth` is the scope depth of a local, `None` otherwise.
    fn capture(&mut self, decl: DeclRef, depth: Option<usize>) {
        for frame in &self.closures {
            if depth.map_or(true, |depth| depth < frame.base) {
                self.ann
                    .captures
                    .entry(frame.expr)
                    .or_default()
                    .insert(decl);
            }
        }
    }

    /// Record what a name expression resolved to.
    fn resolve(&mut self, id: ExprId, decl: DeclRef, ty: Option<DataType>, depth: Option<usize>) {
        self.ann.decl_refs.insert(id, decl);
        if let Some(ty) = ty {
            self.set_type(id, ty);
        }
        self.capture(decl, depth);
    }

    fn bind_expr(&mut self, id: ExprId) {
        let ctx = self.ctx;
        let expr = ctx.ast.expr(id);
        match &expr.kind {
            ExprKind::Num { .. } => self.set_type(id, DataType::INT64),
            ExprKind::Char(_) => self.set_type(id, DataType::INT8),
            ExprKind::Float { .. } => self.set_type(id, DataType::DOUBLE),
            ExprKind::Bool(_) => self.set_type(id, DataType::Bool),
            ExprKind::Str(_) | ExprKind::Nil => self.set_type(id, DataType::c_string()),
            ExprKind::Void => self.set_type(id, DataType::Void),
            ExprKind::TypeRef(ty) => self.set_type(id, ty.ty.clone()),
            ExprKind::Var(name) => self.bind_name(id, name),
            ExprKind::Paren(inner) => {
                self.visit(*inner);
                if let Some(ty) = self.type_of(*inner) {
                    self.set_type(id, ty);
                }
            }
            ExprKind::Tuple(items) => {
                walk_expr(self, id, &ctx.ast);
                let fields: Option<Vec<DataType>> =
                    items.iter().map(|&item| self.type_of(item)).collect();
                if let Some(fields) = fields {
                    self.set_type(id, DataType::Tuple(fields));
                }
            }
            ExprKind::FieldLookup { lhs, name } => {
                self.bind_field_lookup(id, *lhs, name, false);
            }
            ExprKind::TupleField { lhs, field } => self.bind_tuple_field(id, *lhs, *field),
            ExprKind::Subscript { lhs, index } => self.bind_subscript(id, *lhs, *index),
            ExprKind::Ternary { then_value, .. } => {
                walk_expr(self, id, &ctx.ast);
                if let Some(ty) = self.type_of(*then_value) {
                    self.set_type(id, ty);
                }
            }
            ExprKind::Prefix { op, op_range, rhs } => self.bind_prefix(id, *op, *op_range, *rhs),
            ExprKind::Infix { op, lhs, rhs, .. } => self.bind_infix(id, *op, *lhs, *rhs),
            ExprKind::Call { lhs, args } => self.bind_call(id, *lhs, args),
            ExprKind::Closure { args, ret, body } => self.bind_closure(id, args, ret, *body),
            ExprKind::Sizeof(operand) => self.bind_sizeof(id, *operand),
            ExprKind::PoundFunction => self.bind_pound_function(id),
            ExprKind::VarDecl(var) => self.visit_var(*var, &ctx.ast),
            ExprKind::Compound(stmts) => self.bind_compound(id, stmts),
            ExprKind::If { .. } => walk_expr(self, id, &ctx.ast),
            ExprKind::While { cond, body } => {
                self.visit(*cond);
                self.in_loop(|this| this.visit(*body));
            }
            ExprKind::For {
                init,
                cond,
                step,
                body,
            } => self.with_scope(|this| {
                for part in [init, cond, step].into_iter().flatten() {
                    this.visit(*part);
                }
                this.in_loop(|this| this.visit(*body));
            }),
            ExprKind::Switch {
                value,
                cases,
                default,
            } => self.bind_switch(*value, cases, *default),
            ExprKind::Break => {
                if self.loops + self.switches == 0 {
                    self.error(SemaError::BreakOutsideLoop, expr.range);
                }
            }
            ExprKind::Continue => {
                if self.loops == 0 {
                    self.error(SemaError::ContinueOutsideLoop, expr.range);
                }
            }
            ExprKind::Return(value) => self.bind_return(*value),
            ExprKind::PoundDiagnostic { is_error, content } => {
                self.pound_diagnostic(*is_error, content, expr.range);
            }
        }
    }
}

impl<'ctx> Visitor<'ctx> for Binder<'ctx> {
    fn visit_expr(&mut self, id: ExprId, _: &'ctx Ast) {
        ensure_sufficient_stack(|| self.bind_expr(id));
    }

    fn visit_func(&mut self, id: FuncId, _: &'ctx Ast) {
        self.bind_func(id);
    }

    fn visit_var(&mut self, id: VarId, _: &'ctx Ast) {
        self.bind_var(id);
    }
}
