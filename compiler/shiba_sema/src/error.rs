use shiba_ir::{BuiltinOperator, DataType, Identifier};
use thiserror::Error;

/// Problems found while binding names, calls and operators.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SemaError {
    #[error("unknown function '{0}'")]
    UnknownFunction(Identifier),
    #[error("unknown type '{0}'")]
    UnknownType(DataType),
    #[error("cannot call non-function type '{0}'")]
    CallNonFunction(DataType),
    #[error("unknown field name '{field}' in type '{ty}'")]
    UnknownField { field: Identifier, ty: Identifier },
    #[error("unknown variable '{0}'")]
    UnknownVariable(Identifier),
    #[error("invalid argument for operator '{op}' (got '{ty}')")]
    InvalidOperand { op: BuiltinOperator, ty: DataType },
    #[error("cannot subscript value of type '{0}'")]
    CannotSubscript(DataType),
    #[error("cannot coerce '{from}' to '{to}'")]
    CannotCoerce { from: DataType, to: DataType },
    #[error("varargs in non-foreign declarations are not yet supported")]
    VarargsInNonForeign,
    #[error("foreign function '{0}' cannot have a body")]
    ForeignFunctionWithBody(Identifier),
    #[error("function '{0}' must have a body")]
    MissingBody(Identifier),
    #[error("foreign var '{0}' cannot have a value")]
    ForeignVarWithValue(Identifier),
    #[error("cannot dereference a value of non-pointer type '{0}'")]
    DereferenceNonPointer(DataType),
    #[error("cannot switch over values of type '{0}'")]
    CannotSwitch(DataType),
    #[error("cannot set non-pointer type '{0}' to nil")]
    NonPointerNil(DataType),
    #[error("missing return in a function expected to return {0}")]
    MissingReturn(DataType),
    #[error("could not find a viable overload for {name} with arguments of type ({args})")]
    NoViableOverload { name: Identifier, args: String },
    #[error("ambiguous reference to '{0}'")]
    AmbiguousReference(Identifier),
    #[error("cannot get address of an r-value")]
    AddressOfRValue,
    #[error("'break' not allowed outside loop")]
    BreakOutsideLoop,
    #[error("'continue' not allowed outside loop")]
    ContinueOutsideLoop,
    #[error("cannot find field on function of type '{0}'")]
    FieldOfFunction(DataType),
    #[error("invalid redeclaration of method '{name}' on type '{ty}'")]
    DuplicateMethod { name: Identifier, ty: Identifier },
    #[error("invalid redeclaration of field '{name}' on type '{ty}'")]
    DuplicateField { name: Identifier, ty: Identifier },
    #[error("'#function' is only valid inside function scope")]
    PoundFunctionOutsideFunction,
    #[error("cannot mutate {}; expression is a 'let' constant", culprit(.0.as_ref()))]
    AssignToConstant(Option<Identifier>),
    #[error("cannot have a deinitializer in non-indirect type '{0}'")]
    DeinitOnValueType(Identifier),
    #[error("cannot index into non-tuple expression")]
    IndexIntoNonTuple,
    #[error("cannot access field {field} in tuple with {count} fields")]
    TupleFieldOutOfBounds { field: usize, count: usize },
    #[error("code after {0} will not be executed")]
    Unreachable(&'static str),
}

fn culprit(name: Option<&Identifier>) -> String {
    name.map_or_else(|| "expression".to_owned(), |name| format!("'{name}'"))
}

/// Inconsistencies found when re-checking a bound tree.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TypeCheckError {
    #[error("incorrect argument label (expected '{expected}', got '{got}')")]
    IncorrectLabel { expected: Identifier, got: Identifier },
    #[error("missing argument label (expected '{0}')")]
    MissingLabel(Identifier),
    #[error("extra argument label (got '{0}')")]
    ExtraLabel(Identifier),
    #[error("expected {expected} arguments to function {name} (got {got})")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("cannot apply binary operator '{op}' to operands of type '{lhs}' and '{rhs}'")]
    InvalidBinaryOperands {
        op: BuiltinOperator,
        lhs: DataType,
        rhs: DataType,
    },
    #[error("type mismatch (expected value of type '{expected}', got '{got}')")]
    TypeMismatch { expected: DataType, got: DataType },
    #[error("ternary condition must be a Bool (got '{0}')")]
    NonBoolTernary(DataType),
    #[error("if condition must be a Bool (got '{0}')")]
    NonBoolCondition(DataType),
    #[error("value '{raw}' overflows when stored into '{ty}'")]
    Overflow { raw: String, ty: DataType },
    #[error("cannot subscript with argument of type {0}")]
    InvalidSubscript(DataType),
}
