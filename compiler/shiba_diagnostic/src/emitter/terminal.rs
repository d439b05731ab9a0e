//! Terminal rendering.
//!
//! ```text
//! main.sb:3:9: error: unknown variable 'cout'
//!     let x = cout + 1
//!             ^~~~
//! ```

use std::io::{self, Write};
use std::path::Path;

use shiba_ir::SourceLocation;

use crate::{Diagnostic, DiagnosticConsumer, Severity};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;32m"; // Bold green
    pub const MARKER: &str = "\x1b[1;35m"; // Bold magenta
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for the terminal consumer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Parse a `--color=` value.
    pub fn from_flag(value: &str) -> Option<ColorMode> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }

    /// `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Writes each diagnostic as a header line, the offending source line and
/// a marker line underneath it.
pub struct StreamConsumer<W: Write> {
    writer: W,
    file_name: String,
    lines: Vec<String>,
    colors: bool,
}

impl<W: Write> StreamConsumer<W> {
    /// `path` is shown by its last component only.
    pub fn new(writer: W, path: &str, source: &str, mode: ColorMode, is_tty: bool) -> Self {
        let file_name = Path::new(path)
            .file_name()
            .map_or_else(|| path.to_owned(), |name| name.to_string_lossy().into_owned());
        StreamConsumer {
            writer,
            file_name,
            lines: source.lines().map(str::to_owned).collect(),
            colors: mode.should_use_colors(is_tty),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write text with optional ANSI color codes.
    fn write_colored(&mut self, text: &str, color: &str) -> io::Result<()> {
        if self.colors {
            write!(self.writer, "{color}{text}{}", colors::RESET)
        } else {
            write!(self.writer, "{text}")
        }
    }

    fn write_header(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        let location = match diagnostic.location {
            Some(loc) => format!("{}:{}:{}:", self.file_name, loc.line, loc.column),
            None => format!("{}:", self.file_name),
        };
        self.write_colored(&location, colors::BOLD)?;
        write!(self.writer, " ")?;
        let color = match diagnostic.severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
        };
        self.write_colored(&format!("{}:", diagnostic.severity), color)?;
        write!(self.writer, " ")?;
        self.write_colored(&diagnostic.message, colors::BOLD)?;
        writeln!(self.writer)
    }

    fn write_excerpt(&mut self, diagnostic: &Diagnostic, loc: SourceLocation) -> io::Result<()> {
        let Some(line) = (loc.line as usize)
            .checked_sub(1)
            .and_then(|index| self.lines.get(index))
        else {
            return Ok(());
        };
        let marker = marker_line(line, diagnostic, loc);
        let line = line.clone();
        writeln!(self.writer, "{line}")?;
        self.write_colored(&marker, colors::MARKER)?;
        writeln!(self.writer)
    }

    fn emit(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        self.write_header(diagnostic)?;
        if let Some(loc) = diagnostic.location {
            self.write_excerpt(diagnostic, loc)?;
        }
        Ok(())
    }
}

/// `~` under every highlighted column of the location's line and `^` at
/// the location's column. Tabs in the source are kept so columns line up.
fn marker_line(line: &str, diagnostic: &Diagnostic, loc: SourceLocation) -> String {
    let chars: Vec<char> = line.chars().collect();
    let caret = loc.column.saturating_sub(1) as usize;
    let width = chars.len().max(caret + 1);
    let mut marker: Vec<char> = (0..width)
        .map(|i| if chars.get(i) == Some(&'\t') { '\t' } else { ' ' })
        .collect();

    for range in &diagnostic.highlights {
        if range.start.line > loc.line || range.end.line < loc.line {
            continue;
        }
        let from = if range.start.line == loc.line {
            range.start.column.saturating_sub(1) as usize
        } else {
            0
        };
        let to = if range.end.line == loc.line {
            range.end.column.saturating_sub(1) as usize
        } else {
            chars.len()
        };
        for slot in marker.iter_mut().take(to.min(width)).skip(from) {
            *slot = '~';
        }
    }
    marker[caret] = '^';

    let text: String = marker.into_iter().collect();
    text.trim_end().to_owned()
}

impl<W: Write> DiagnosticConsumer for StreamConsumer<W> {
    fn consume(&mut self, diagnostic: &Diagnostic) {
        // A closed pipe must not abort compilation.
        let _ = self.emit(diagnostic);
    }

    fn finish(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests;
