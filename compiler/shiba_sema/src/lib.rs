//! Semantic passes for Shiba.
//!
//! - [`Sema`] binds names, resolves overloads and types every value
//!   expression, recording the results in the context's annotations.
//! - [`TypeChecker`] re-walks the bound tree and verifies that calls,
//!   literals, conditions and operators are consistent with those types.
//!
//! Both are [`shiba_driver::Pass`]es and report through the context's
//! diagnostic engine. Neither rewrites the tree.

mod error;
mod sema;
mod signature;
mod typeck;

pub use error::{SemaError, TypeCheckError};
pub use sema::Sema;
pub use typeck::TypeChecker;

#[cfg(test)]
mod tests;
