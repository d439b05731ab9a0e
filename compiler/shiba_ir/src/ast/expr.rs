//! Expressions and statements.
//!
//! Statements are expressions in this tree: a function body is a
//! `Compound` whose children are declarations, control flow and plain
//! value expressions alike.

use super::{ExprId, VarId};
use crate::{BuiltinOperator, DataType, Identifier, SourceRange};

/// A node in the expression arena.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub range: Option<SourceRange>,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, range: Option<SourceRange>) -> Self {
        Expr { kind, range }
    }

    /// Synthesized node with no source range.
    #[inline]
    pub fn synthesized(kind: ExprKind) -> Self {
        Expr { kind, range: None }
    }
}

/// A type as written, with where it was written.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TypeRef {
    pub ty: DataType,
    pub range: Option<SourceRange>,
}

impl TypeRef {
    #[inline]
    pub fn new(ty: DataType, range: Option<SourceRange>) -> Self {
        TypeRef { ty, range }
    }

    #[inline]
    pub fn synthesized(ty: DataType) -> Self {
        TypeRef { ty, range: None }
    }
}

/// One argument at a call site.
#[derive(Clone, Debug, PartialEq)]
pub struct CallArg {
    pub label: Option<Identifier>,
    pub value: ExprId,
}

/// `if cond { body }` or `else if cond { body }`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct IfBlock {
    pub cond: ExprId,
    pub body: ExprId,
}

/// `case constant: body`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SwitchCase {
    pub constant: ExprId,
    pub body: ExprId,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    // Literals

    /// Integer literal. `raw` is the literal as written, for diagnostics.
    Num { value: i64, raw: String },
    Char(u8),
    /// Float literal, stored as bits so the tree stays `Eq`-friendly.
    Float { bits: u64 },
    Bool(bool),
    Str(String),
    Nil,
    /// The empty value; also the operand of a bare `return`.
    Void,

    // Values

    Var(Identifier),
    /// A type used in value position, e.g. `sizeof(Int)`.
    TypeRef(TypeRef),
    Paren(ExprId),
    Tuple(Vec<ExprId>),
    FieldLookup { lhs: ExprId, name: Identifier },
    TupleField { lhs: ExprId, field: usize },
    Subscript { lhs: ExprId, index: ExprId },
    Ternary { cond: ExprId, then_value: ExprId, else_value: ExprId },
    Prefix {
        op: BuiltinOperator,
        op_range: Option<SourceRange>,
        rhs: ExprId,
    },
    Infix {
        op: BuiltinOperator,
        op_range: Option<SourceRange>,
        lhs: ExprId,
        rhs: ExprId,
    },
    Call { lhs: ExprId, args: Vec<CallArg> },
    Closure {
        args: Vec<VarId>,
        ret: TypeRef,
        body: ExprId,
    },
    Sizeof(ExprId),
    PoundFunction,

    // Statements

    VarDecl(VarId),
    Compound(Vec<ExprId>),
    If { blocks: Vec<IfBlock>, else_body: Option<ExprId> },
    While { cond: ExprId, body: ExprId },
    For {
        init: Option<ExprId>,
        cond: Option<ExprId>,
        step: Option<ExprId>,
        body: ExprId,
    },
    Switch {
        value: ExprId,
        cases: Vec<SwitchCase>,
        default: Option<ExprId>,
    },
    Break,
    Continue,
    Return(ExprId),
    PoundDiagnostic { is_error: bool, content: String },
}

impl ExprKind {
    /// Literal kinds allowed as `case` constants.
    pub fn is_constant(&self) -> bool {
        matches!(
            self,
            ExprKind::Num { .. }
                | ExprKind::Char(_)
                | ExprKind::Float { .. }
                | ExprKind::Bool(_)
                | ExprKind::Str(_)
        )
    }

    /// Kinds that only appear in statement position.
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            ExprKind::VarDecl(_)
                | ExprKind::Compound(_)
                | ExprKind::If { .. }
                | ExprKind::While { .. }
                | ExprKind::For { .. }
                | ExprKind::Switch { .. }
                | ExprKind::Break
                | ExprKind::Continue
                | ExprKind::Return(_)
                | ExprKind::PoundDiagnostic { .. }
        )
    }

    /// Value of a float literal.
    pub fn float_value(&self) -> Option<f64> {
        match self {
            ExprKind::Float { bits } => Some(f64::from_bits(*bits)),
            _ => None,
        }
    }
}
