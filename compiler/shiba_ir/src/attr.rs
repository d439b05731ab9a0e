//! Declaration attributes and where each one may appear.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// The attribute set attached to a declaration.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct DeclAttributes: u8 {
        /// Defined outside Shiba; linked by bare name.
        const FOREIGN = 1 << 0;
        /// Method may mutate `self`.
        const MUTATING = 1 << 1;
        /// Function never returns to its caller.
        const NORETURN = 1 << 2;
        /// Method has no implicit `self`.
        const STATIC = 1 << 3;
        /// Type is heap-indirected and may contain itself.
        const INDIRECT = 1 << 4;
        /// Synthesized by the compiler.
        const IMPLICIT = 1 << 5;
    }
}

/// A single attribute as written in the source.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DeclAttribute {
    Foreign,
    Mutating,
    Noreturn,
    Static,
    Indirect,
    Implicit,
}

/// What kind of declaration an attribute is attached to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DeclContextKind {
    Function,
    Variable,
    Type,
    Extension,
    Diagnostic,
}

impl DeclAttribute {
    pub fn from_name(name: &str) -> Option<DeclAttribute> {
        Some(match name {
            "foreign" => DeclAttribute::Foreign,
            "mutating" => DeclAttribute::Mutating,
            "noreturn" => DeclAttribute::Noreturn,
            "static" => DeclAttribute::Static,
            "indirect" => DeclAttribute::Indirect,
            "implicit" => DeclAttribute::Implicit,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            DeclAttribute::Foreign => "foreign",
            DeclAttribute::Mutating => "mutating",
            DeclAttribute::Noreturn => "noreturn",
            DeclAttribute::Static => "static",
            DeclAttribute::Indirect => "indirect",
            DeclAttribute::Implicit => "implicit",
        }
    }

    pub fn flag(self) -> DeclAttributes {
        match self {
            DeclAttribute::Foreign => DeclAttributes::FOREIGN,
            DeclAttribute::Mutating => DeclAttributes::MUTATING,
            DeclAttribute::Noreturn => DeclAttributes::NORETURN,
            DeclAttribute::Static => DeclAttributes::STATIC,
            DeclAttribute::Indirect => DeclAttributes::INDIRECT,
            DeclAttribute::Implicit => DeclAttributes::IMPLICIT,
        }
    }

    pub fn is_valid_on(self, kind: DeclContextKind) -> bool {
        use DeclContextKind as K;
        match self {
            DeclAttribute::Foreign => matches!(kind, K::Function | K::Type | K::Variable),
            DeclAttribute::Mutating | DeclAttribute::Noreturn | DeclAttribute::Static => {
                kind == K::Function
            }
            DeclAttribute::Indirect => kind == K::Type,
            DeclAttribute::Implicit => matches!(kind, K::Type | K::Function | K::Variable),
        }
    }
}

impl fmt::Display for DeclAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for DeclContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeclContextKind::Function => "function",
            DeclContextKind::Variable => "variable",
            DeclContextKind::Type => "type",
            DeclContextKind::Extension => "extension",
            DeclContextKind::Diagnostic => "diagnostic",
        })
    }
}
