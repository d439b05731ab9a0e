//! The AST context for Shiba.
//!
//! One [`ASTContext`] owns everything known about a compilation unit:
//!
//! - the AST arena and the [`Annotations`] side tables
//! - registries of functions, types, aliases, extensions and globals
//! - the diagnostic engine
//!
//! It also answers the type questions every pass asks: alias
//! canonicalization, validity and cycle checks, assignability, and
//! symbol mangling.

mod annotations;
mod canonical;
mod context;
mod error;
mod mangle;
mod mutability;

pub use annotations::{Annotations, Callee, DeclRef};
pub use context::{ASTContext, MainFlags};
pub use error::ContextError;
pub use mangle::Mangler;
pub use mutability::Mutability;
