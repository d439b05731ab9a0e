//! Identifiers with provenance.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::SourceRange;

/// A name as written in the source.
///
/// Equality and hashing look at `name` only; `range` records where the
/// name came from and is `None` for synthesized identifiers.
#[derive(Clone, Debug, Default)]
pub struct Identifier {
    pub name: String,
    pub range: Option<SourceRange>,
}

impl Identifier {
    /// A synthesized identifier with no source range.
    pub fn new(name: impl Into<String>) -> Self {
        Identifier {
            name: name.into(),
            range: None,
        }
    }

    pub fn with_range(name: impl Into<String>, range: SourceRange) -> Self {
        Identifier {
            name: name.into(),
            range: Some(range),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Identifier {}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
