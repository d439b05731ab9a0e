//! Source locations and ranges.
//!
//! Every later stage refers back into the source text through these two
//! value types. Locations are ordered by their scalar offset; `line` and
//! `column` ride along for display only.

use std::cmp::Ordering;
use std::fmt;

/// A position in the source text.
///
/// `line` and `column` are 1-based and counted in Unicode scalars.
/// `char_offset` is the 0-based scalar index from the start of the file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
    pub char_offset: u32,
}

impl SourceLocation {
    /// The first scalar of a file.
    pub const START: SourceLocation = SourceLocation {
        line: 1,
        column: 1,
        char_offset: 0,
    };

    #[inline]
    pub const fn new(line: u32, column: u32, char_offset: u32) -> Self {
        SourceLocation {
            line,
            column,
            char_offset,
        }
    }
}

impl Ord for SourceLocation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.char_offset
            .cmp(&other.char_offset)
            .then_with(|| (self.line, self.column).cmp(&(other.line, other.column)))
    }
}

impl PartialOrd for SourceLocation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.line, self.column, self.char_offset)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range `[start, end)` of source text.
///
/// A range whose end does not lie after its start is empty; empty ranges
/// are valid and used for synthesized or zero-width positions.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct SourceRange {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceRange {
    #[inline]
    pub const fn new(start: SourceLocation, end: SourceLocation) -> Self {
        SourceRange { start, end }
    }

    /// Zero-width range at `loc`.
    #[inline]
    pub const fn point(loc: SourceLocation) -> Self {
        SourceRange {
            start: loc,
            end: loc,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end.char_offset <= self.start.char_offset
    }

    /// Number of scalars covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.char_offset.saturating_sub(self.start.char_offset) as usize
    }

    /// Smallest range covering both `self` and `other`.
    #[must_use]
    pub fn merge(self, other: SourceRange) -> SourceRange {
        SourceRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Scalar index range, for slicing a `[char]` buffer.
    #[inline]
    pub fn to_range(self) -> std::ops::Range<usize> {
        let start = self.start.char_offset as usize;
        start..start + self.len()
    }
}

impl fmt::Debug for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}
