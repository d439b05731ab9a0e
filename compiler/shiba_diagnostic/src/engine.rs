//! The diagnostic engine.
//!
//! Warnings and errors are recorded separately and merged on demand.
//! Delivery to consumers is position ordered: a stable sort on the
//! character offset, with unlocated diagnostics first. Nothing is
//! deduplicated.

use std::fmt;

use crate::{Diagnostic, Severity};

/// Receives diagnostics from [`DiagnosticEngine::consume_diagnostics`].
pub trait DiagnosticConsumer {
    fn consume(&mut self, diagnostic: &Diagnostic);

    /// Called once after the last diagnostic of a batch.
    fn finish(&mut self) {}
}

#[derive(Default)]
pub struct DiagnosticEngine {
    warnings: Vec<Diagnostic>,
    errors: Vec<Diagnostic>,
    consumers: Vec<Box<dyn DiagnosticConsumer + Send>>,
}

impl DiagnosticEngine {
    pub fn new() -> Self {
        DiagnosticEngine::default()
    }

    /// Record a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.errors.push(diagnostic),
            Severity::Warning => self.warnings.push(diagnostic),
        }
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.add(diagnostic);
        }
    }

    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[inline]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    #[inline]
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn register(&mut self, consumer: Box<dyn DiagnosticConsumer + Send>) {
        self.consumers.push(consumer);
    }

    /// Every recorded diagnostic, position ordered.
    pub fn sorted_diagnostics(&self) -> Vec<Diagnostic> {
        let mut all: Vec<Diagnostic> = self
            .warnings
            .iter()
            .chain(&self.errors)
            .cloned()
            .collect();
        // `Option` orders `None` first, which is what unlocated entries need.
        all.sort_by_key(Diagnostic::char_offset);
        all
    }

    /// Deliver every diagnostic, in position order, to every consumer.
    pub fn consume_diagnostics(&mut self) {
        let sorted = self.sorted_diagnostics();
        for consumer in &mut self.consumers {
            for diagnostic in &sorted {
                consumer.consume(diagnostic);
            }
            consumer.finish();
        }
    }
}

impl fmt::Debug for DiagnosticEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticEngine")
            .field("warnings", &self.warnings)
            .field("errors", &self.errors)
            .field("consumers", &self.consumers.len())
            .finish()
    }
}
