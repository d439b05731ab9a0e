//! Diagnostics for the Shiba compiler.
//!
//! Every stage reports problems as [`Diagnostic`] values recorded into a
//! [`DiagnosticEngine`]. The engine fans them out, position ordered, to any
//! registered [`DiagnosticConsumer`].

mod diagnostic;
mod emitter;
mod engine;

pub use diagnostic::{Diagnostic, Severity};
pub use emitter::{CollectingConsumer, ColorMode, StreamConsumer};
pub use engine::{DiagnosticConsumer, DiagnosticEngine};
