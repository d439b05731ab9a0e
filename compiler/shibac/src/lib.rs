//! The Shiba compiler front end.
//!
//! [`Compilation`] wires lexing and parsing, semantic analysis and type
//! checking into one pipeline over a single source text; [`compile`] is the
//! one-call entry point. The `commands` module backs the `shibac` binary.

pub mod commands;
mod compilation;

pub use compilation::{compile, CompileOutput, Compilation};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber for debug output.
///
/// Does nothing unless `RUST_LOG` is set. With `SHIBA_LOG_TREE` also set,
/// spans are printed as an indented tree instead of flat lines.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var("SHIBA_LOG_TREE").is_ok() {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
