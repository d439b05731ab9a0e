use shiba_ir::{DataType, Identifier};
use thiserror::Error;

/// Problems found while registering top-level declarations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ContextError {
    #[error("invalid redeclaration of type '{0}'")]
    DuplicateType(Identifier),
    #[error("invalid redeclaration of variable '{0}'")]
    DuplicateVar(Identifier),
    #[error("declaration of '{0}' is circular")]
    CircularAlias(Identifier),
    #[error(
        "invalid main (must be () -> Void, () -> Int, (Int, **Int8) -> Void or (Int, **Int8) -> Int, got {0})"
    )]
    InvalidMain(DataType),
    #[error("only one main function is allowed")]
    DuplicateMain,
    #[error("type '{0}' cannot have a property that reference itself")]
    CircularType(Identifier),
}
