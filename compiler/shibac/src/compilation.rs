//! One compilation of one source text.

use std::time::Duration;

use shiba_context::ASTContext;
use shiba_diagnostic::{Diagnostic, DiagnosticConsumer};
use shiba_driver::{Driver, RunStatus};
use shiba_sema::{Sema, TypeChecker};

/// The standard front-end pipeline over a single source text.
///
/// Owns its context, and through it the diagnostic engine, plus the
/// driver that runs the passes. Nothing is shared between compilations,
/// so independent files can be compiled on separate threads.
pub struct Compilation {
    ctx: ASTContext,
    driver: Driver,
}

impl Compilation {
    /// Set up "Lexing and Parsing", "Semantic Analysis" and
    /// "Type Checking" over `source`.
    pub fn new(source: impl Into<String>, filename: impl Into<String>) -> Self {
        let source = source.into();
        let mut driver = Driver::new();
        driver.add("Lexing and Parsing", move |ctx: &mut ASTContext| {
            shiba_parse::parse_source(&source, ctx);
            Ok(())
        });
        driver.add_pass(Sema);
        driver.add_pass(TypeChecker);

        Compilation {
            ctx: ASTContext::new(filename),
            driver,
        }
    }

    /// Deliver this compilation's diagnostics to `consumer` as well.
    pub fn register(&mut self, consumer: Box<dyn DiagnosticConsumer + Send>) {
        self.ctx.diag.register(consumer);
    }

    /// Run the pipeline, then hand every diagnostic to the registered
    /// consumers. Meant to be called once.
    #[tracing::instrument(level = "debug", skip_all, fields(file = %self.ctx.filename))]
    pub fn run(&mut self) -> RunStatus {
        let status = self.driver.run(&mut self.ctx);
        tracing::debug!(
            ?status,
            errors = self.ctx.diag.error_count(),
            warnings = self.ctx.diag.warning_count(),
            "compilation finished"
        );
        self.ctx.diag.consume_diagnostics();
        status
    }

    pub fn context(&self) -> &ASTContext {
        &self.ctx
    }

    pub fn into_context(self) -> ASTContext {
        self.ctx
    }

    pub fn has_errors(&self) -> bool {
        self.ctx.diag.has_errors()
    }

    /// Everything recorded so far, in position order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.ctx.diag.sorted_diagnostics()
    }

    /// `(title, elapsed)` of every pass that ran.
    pub fn timings(&self) -> &[(String, Duration)] {
        self.driver.timings()
    }
}

/// Result of [`compile`].
pub struct CompileOutput {
    /// The fully checked context, or `None` if any error was recorded.
    pub context: Option<ASTContext>,
    /// Errors and warnings, in position order.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Compile `source` through the whole pipeline.
pub fn compile(source: &str, filename: &str) -> CompileOutput {
    let mut compilation = Compilation::new(source, filename);
    compilation.run();
    let diagnostics = compilation.diagnostics();
    let context = if compilation.has_errors() {
        None
    } else {
        Some(compilation.into_context())
    };
    CompileOutput {
        context,
        diagnostics,
    }
}
