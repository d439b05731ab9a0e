//! Command handlers for the `shibac` CLI.
//!
//! Each submodule implements one command. Shared helpers for reading
//! sources and rendering diagnostics live here.

mod check;
mod debug;

pub use check::{check_files, CheckOptions};
pub use debug::{lex_file, mangle_file};

use shiba_diagnostic::{ColorMode, Diagnostic, DiagnosticConsumer, StreamConsumer};

/// Read a source file, turning I/O failures into a one-line message.
pub(crate) fn read_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        std::io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("error reading '{path}': {e}"),
    })
}

/// Render `diagnostics` the way the terminal consumer prints them.
pub(crate) fn render(
    path: &str,
    source: &str,
    diagnostics: &[Diagnostic],
    mode: ColorMode,
    is_tty: bool,
) -> Vec<u8> {
    let mut consumer = StreamConsumer::new(Vec::new(), path, source, mode, is_tty);
    for diagnostic in diagnostics {
        consumer.consume(diagnostic);
    }
    consumer.finish();
    consumer.into_inner()
}
