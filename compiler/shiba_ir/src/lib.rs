//! Shiba IR: the data shared by every stage of the front end.
//!
//! - Source locations and ranges
//! - Identifiers
//! - Tokens
//! - `DataType` and the built-in operator table
//! - Declaration attributes
//! - The arena AST and its visitor
//!
//! Nothing here performs resolution. Names, aliases and overloads are
//! resolved by the context and the semantic passes, which record their
//! results in side tables keyed by the handles defined in [`ast`].

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
pub mod attr;
mod ident;
mod operator;
mod source;
pub mod token;
mod types;

pub use ast::{
    Ast, CallArg, Expr, ExprId, ExprKind, Extension, FuncDecl, FuncId, FuncKind, IfBlock,
    PoundDiagnostic, SwitchCase, TypeAlias, TypeDecl, TypeDeclId, TypeRef, VarDecl, VarId,
    VarKind,
};
pub use attr::{DeclAttribute, DeclAttributes, DeclContextKind};
pub use ident::Identifier;
pub use operator::BuiltinOperator;
pub use source::{SourceLocation, SourceRange};
pub use token::{Keyword, Punctuation, Token, TokenKind};
pub use types::{DataType, FloatKind, TypeClass};
