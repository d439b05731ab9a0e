//! Scalar cursor with line and column tracking.

use shiba_ir::SourceLocation;

pub(crate) struct Cursor {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
}

impl Cursor {
    pub(crate) fn new(source: &str) -> Self {
        Cursor {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    #[inline]
    pub(crate) fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    #[inline]
    pub(crate) fn peek(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Consume one scalar.
    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.current()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consume `count` scalars.
    pub(crate) fn bump_n(&mut self, count: usize) {
        for _ in 0..count {
            self.bump();
        }
    }

    /// Consume scalars while `pred` holds and return them.
    pub(crate) fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(c) = self.current().filter(|&c| pred(c)) {
            text.push(c);
            self.bump();
        }
        text
    }

    pub(crate) fn location(&self) -> SourceLocation {
        // Source files are far below u32::MAX scalars.
        let offset = u32::try_from(self.pos).unwrap_or(u32::MAX);
        SourceLocation::new(self.line, self.column, offset)
    }
}

#[cfg(test)]
mod tests;
