use std::fmt;

use shiba_ir::{SourceLocation, SourceRange};
use smallvec::SmallVec;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A warning or error with an optional location and underlined ranges.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: Option<SourceLocation>,
    pub highlights: SmallVec<[SourceRange; 2]>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            message: message.into(),
            location: None,
            highlights: SmallVec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Pin the diagnostic to `location`.
    #[must_use]
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Pin the diagnostic to `location` if there is one.
    #[must_use]
    pub fn at_opt(mut self, location: Option<SourceLocation>) -> Self {
        if location.is_some() {
            self.location = location;
        }
        self
    }

    #[must_use]
    pub fn with_highlight(mut self, range: SourceRange) -> Self {
        self.highlights.push(range);
        self
    }

    /// Locate at the start of `range` and underline it.
    ///
    /// Synthesized nodes carry no range; the diagnostic is then unlocated.
    #[must_use]
    pub fn at_range(self, range: Option<SourceRange>) -> Self {
        match range {
            Some(range) => self.at(range.start).with_highlight(range),
            None => self,
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Sort key: unlocated diagnostics come first.
    #[inline]
    pub fn char_offset(&self) -> Option<u32> {
        self.location.map(|loc| loc.char_offset)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = self.location {
            write!(f, "{loc}: ")?;
        }
        write!(f, "{}: {}", self.severity, self.message)
    }
}
