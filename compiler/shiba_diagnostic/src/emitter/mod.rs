//! Diagnostic consumers.
//!
//! - [`StreamConsumer`]: human-readable output with source excerpts
//! - [`CollectingConsumer`]: a shared buffer for programmatic use

mod collecting;
mod terminal;

pub use collecting::CollectingConsumer;
pub use terminal::{ColorMode, StreamConsumer};
