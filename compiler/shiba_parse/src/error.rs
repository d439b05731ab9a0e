use shiba_ir::{DeclAttribute, DeclContextKind};
use thiserror::Error;

/// Syntax errors. Each one aborts the current top-level item.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),
    #[error("missing line separator")]
    MissingLineSeparator,
    #[error("expected identifier (got '{0}')")]
    ExpectedIdentifier(String),
    #[error("expected type (got '{0}')")]
    ExpectedType(String),
    #[error("only one default statement is allowed in a switch")]
    DuplicateDefault,
    #[error("case statement expressions must be constants")]
    CaseMustBeConstant,
    #[error("unexpected expression (expected '{0}')")]
    UnexpectedExpression(&'static str),
    #[error("cannot have multiple 'deinit's within a type")]
    DuplicateDeinit,
    #[error("'{attr}' is not valid on {kind}s")]
    InvalidAttribute {
        attr: DeclAttribute,
        kind: DeclContextKind,
    },
    #[error("declaration of '{0}' needs a type or an initial value")]
    UntypedVariable(String),
    #[error("expected string literal (got '{0}')")]
    ExpectedString(String),
}
