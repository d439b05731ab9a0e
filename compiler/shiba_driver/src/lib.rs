//! The pass pipeline.
//!
//! A [`Driver`] owns an ordered list of passes and runs them one after the
//! other over a single [`ASTContext`]. The pipeline halts as soon as the
//! context has recorded an error, so later passes only ever see a tree
//! that every earlier pass accepted.
//!
//! A pass either implements [`Pass`] or is a `(title, closure)` pair
//! registered through [`Driver::add`].

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{Duration, Instant};

use shiba_context::ASTContext;
use shiba_diagnostic::Diagnostic;

/// One named step over the compilation context.
///
/// Source problems are recorded into `ctx.diag`. `Err` is reserved for
/// failures of the pass itself; the driver records it like any other
/// diagnostic.
pub trait Pass {
    fn title(&self) -> &str;

    fn run(&mut self, ctx: &mut ASTContext) -> Result<(), Diagnostic>;
}

/// A pass built from a closure.
struct FnPass<F> {
    title: String,
    run: F,
}

impl<F> Pass for FnPass<F>
where
    F: FnMut(&mut ASTContext) -> Result<(), Diagnostic>,
{
    fn title(&self) -> &str {
        &self.title
    }

    fn run(&mut self, ctx: &mut ASTContext) -> Result<(), Diagnostic> {
        (self.run)(ctx)
    }
}

/// How a [`Driver::run`] ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RunStatus {
    /// Every registered pass ran.
    Complete,
    /// A pass left errors behind; the passes after it were skipped.
    Halted,
}

#[derive(Default)]
pub struct Driver {
    passes: Vec<Box<dyn Pass>>,
    timings: Vec<(String, Duration)>,
}

impl Driver {
    pub fn new() -> Self {
        Driver::default()
    }

    /// Register a closure as a pass.
    pub fn add<F>(&mut self, title: impl Into<String>, run: F)
    where
        F: FnMut(&mut ASTContext) -> Result<(), Diagnostic> + 'static,
    {
        self.passes.push(Box::new(FnPass {
            title: title.into(),
            run,
        }));
    }

    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Run every pass in registration order.
    ///
    /// A panic inside a pass is caught and reported as an internal error,
    /// which halts the pipeline like any other error.
    pub fn run(&mut self, ctx: &mut ASTContext) -> RunStatus {
        self.timings.clear();
        for pass in &mut self.passes {
            let title = pass.title().to_owned();
            tracing::debug!(pass = %title, "running pass");

            let start = Instant::now();
            let outcome = catch_unwind(AssertUnwindSafe(|| pass.run(ctx)));
            let elapsed = start.elapsed();
            tracing::debug!(pass = %title, ?elapsed, "pass finished");

            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(diagnostic)) => ctx.diag.add(diagnostic),
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    ctx.diag.add(Diagnostic::error(format!(
                        "internal error in pass '{title}': {message}"
                    )));
                }
            }
            let halt = ctx.diag.has_errors();
            if halt {
                tracing::debug!(pass = %title, errors = ctx.diag.error_count(), "halting pipeline");
            }
            self.timings.push((title, elapsed));
            if halt {
                return RunStatus::Halted;
            }
        }
        RunStatus::Complete
    }

    /// `(title, elapsed)` of every pass that ran in the last `run`.
    pub fn timings(&self) -> &[(String, Duration)] {
        &self.timings
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else {
        "unknown panic".to_owned()
    }
}
