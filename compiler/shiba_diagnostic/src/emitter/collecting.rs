use std::sync::Arc;

use parking_lot::Mutex;

use crate::{Diagnostic, DiagnosticConsumer};

/// Stores every consumed diagnostic in a buffer shared between clones.
///
/// Register one clone with the engine and keep another to read back what
/// was delivered.
#[derive(Clone, Debug, Default)]
pub struct CollectingConsumer {
    buffer: Arc<Mutex<Vec<Diagnostic>>>,
}

impl CollectingConsumer {
    pub fn new() -> Self {
        CollectingConsumer::default()
    }

    /// Snapshot of everything delivered so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.buffer.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    /// Remove and return everything delivered so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.buffer.lock())
    }
}

impl DiagnosticConsumer for CollectingConsumer {
    fn consume(&mut self, diagnostic: &Diagnostic) {
        self.buffer.lock().push(diagnostic.clone());
    }
}
