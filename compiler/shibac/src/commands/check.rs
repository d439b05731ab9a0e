//! The `check` command: run the front end over one or more files.

use std::io::Write;
use std::time::Duration;

use rayon::prelude::*;
use shiba_diagnostic::ColorMode;

use super::{read_file, render};
use crate::Compilation;

#[derive(Copy, Clone, Debug, Default)]
pub struct CheckOptions {
    pub color: ColorMode,
    pub timings: bool,
    /// Whether stderr is a terminal, for `ColorMode::Auto`.
    pub is_tty: bool,
}

/// What one file's compilation produced, ready to print.
struct FileReport {
    path: String,
    rendered: Vec<u8>,
    timings: Vec<(String, Duration)>,
    failed: bool,
}

fn check_one(path: &str, options: &CheckOptions) -> FileReport {
    let source = match read_file(path) {
        Ok(source) => source,
        Err(message) => {
            return FileReport {
                path: path.to_owned(),
                rendered: format!("error: {message}\n").into_bytes(),
                timings: Vec::new(),
                failed: true,
            };
        }
    };

    let mut compilation = Compilation::new(source.as_str(), path);
    compilation.run();
    let diagnostics = compilation.diagnostics();
    FileReport {
        path: path.to_owned(),
        rendered: render(path, &source, &diagnostics, options.color, options.is_tty),
        timings: compilation.timings().to_vec(),
        failed: compilation.has_errors(),
    }
}

/// Compile every file in parallel and print the results in input order.
///
/// Returns `true` when no file had errors.
pub fn check_files(paths: &[String], options: &CheckOptions) -> bool {
    let reports: Vec<FileReport> = paths
        .par_iter()
        .map(|path| check_one(path, options))
        .collect();

    let mut stderr = std::io::stderr().lock();
    let mut ok = true;
    for report in &reports {
        // A closed pipe is not worth failing the run over.
        let _ = stderr.write_all(&report.rendered);
        if options.timings {
            print_timings(&report.path, &report.timings);
        }
        ok &= !report.failed;
    }
    tracing::debug!(files = reports.len(), ok, "check finished");
    ok
}

fn print_timings(path: &str, timings: &[(String, Duration)]) {
    println!("{path}:");
    for (title, elapsed) in timings {
        println!("  {title:<24}{:>10.3}ms", elapsed.as_secs_f64() * 1000.0);
    }
}
