//! Built-in operators and their operand/type compatibility table.
//!
//! The table is shared by the binding pass, which uses it to assign result
//! types, and the type checker, which uses it to reject invalid operands.
//! Lookups take the *canonical* operand type for classification and hand
//! back the operand type as written when the result keeps it.

use std::fmt;

use crate::types::{DataType, TypeClass};

/// Every operator the lexer recognizes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BuiltinOperator {
    Plus,
    Minus,
    Star,
    Divide,
    Mod,
    Assign,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
    Xor,
    Ampersand,
    Not,
    BitwiseOr,
    BitwiseNot,
    LeftShift,
    RightShift,
    PlusAssign,
    MinusAssign,
    TimesAssign,
    DivideAssign,
    ModAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    RightShiftAssign,
    LeftShiftAssign,
    As,
}

use BuiltinOperator as Op;

/// Spelling table. `==`/`!=` are accepted as aliases of `===`/`!==`.
const SPELLINGS: &[(&str, BuiltinOperator)] = &[
    ("+", Op::Plus),
    ("-", Op::Minus),
    ("*", Op::Star),
    ("/", Op::Divide),
    ("%", Op::Mod),
    ("=", Op::Assign),
    ("===", Op::Equal),
    ("!==", Op::NotEqual),
    ("==", Op::Equal),
    ("!=", Op::NotEqual),
    ("<", Op::LessThan),
    ("<=", Op::LessThanOrEqual),
    (">", Op::GreaterThan),
    (">=", Op::GreaterThanOrEqual),
    ("&&", Op::And),
    ("||", Op::Or),
    ("^", Op::Xor),
    ("&", Op::Ampersand),
    ("!", Op::Not),
    ("|", Op::BitwiseOr),
    ("~", Op::BitwiseNot),
    ("<<", Op::LeftShift),
    (">>", Op::RightShift),
    ("+=", Op::PlusAssign),
    ("-=", Op::MinusAssign),
    ("*=", Op::TimesAssign),
    ("/=", Op::DivideAssign),
    ("%=", Op::ModAssign),
    ("&=", Op::AndAssign),
    ("|=", Op::OrAssign),
    ("^=", Op::XorAssign),
    (">>=", Op::RightShiftAssign),
    ("<<=", Op::LeftShiftAssign),
    ("as", Op::As),
];

impl BuiltinOperator {
    /// Look up an operator by its exact spelling.
    pub fn from_text(text: &str) -> Option<BuiltinOperator> {
        SPELLINGS
            .iter()
            .find(|(spelling, _)| *spelling == text)
            .map(|(_, op)| *op)
    }

    /// Canonical spelling.
    pub fn text(self) -> &'static str {
        match self {
            Op::Plus => "+",
            Op::Minus => "-",
            Op::Star => "*",
            Op::Divide => "/",
            Op::Mod => "%",
            Op::Assign => "=",
            Op::Equal => "===",
            Op::NotEqual => "!==",
            Op::LessThan => "<",
            Op::LessThanOrEqual => "<=",
            Op::GreaterThan => ">",
            Op::GreaterThanOrEqual => ">=",
            Op::And => "&&",
            Op::Or => "||",
            Op::Xor => "^",
            Op::Ampersand => "&",
            Op::Not => "!",
            Op::BitwiseOr => "|",
            Op::BitwiseNot => "~",
            Op::LeftShift => "<<",
            Op::RightShift => ">>",
            Op::PlusAssign => "+=",
            Op::MinusAssign => "-=",
            Op::TimesAssign => "*=",
            Op::DivideAssign => "/=",
            Op::ModAssign => "%=",
            Op::AndAssign => "&=",
            Op::OrAssign => "|=",
            Op::XorAssign => "^=",
            Op::RightShiftAssign => ">>=",
            Op::LeftShiftAssign => "<<=",
            Op::As => "as",
        }
    }

    /// Binding strength when used infix. Higher binds tighter.
    pub fn infix_precedence(self) -> u32 {
        match self {
            Op::As => 200,
            Op::LeftShift | Op::RightShift => 190,
            Op::Star | Op::Divide | Op::Mod | Op::Ampersand => 180,
            Op::Plus | Op::Minus | Op::Xor | Op::BitwiseOr => 170,
            Op::Equal
            | Op::NotEqual
            | Op::LessThan
            | Op::LessThanOrEqual
            | Op::GreaterThan
            | Op::GreaterThanOrEqual => 160,
            Op::And => 150,
            Op::Or => 140,
            Op::Assign
            | Op::PlusAssign
            | Op::MinusAssign
            | Op::TimesAssign
            | Op::DivideAssign
            | Op::ModAssign
            | Op::AndAssign
            | Op::OrAssign
            | Op::XorAssign
            | Op::RightShiftAssign
            | Op::LeftShiftAssign => 130,
            Op::Not | Op::BitwiseNot => 999,
        }
    }

    /// Operators that may appear in prefix position.
    pub fn is_prefix(self) -> bool {
        matches!(
            self,
            Op::BitwiseNot | Op::Not | Op::Minus | Op::Ampersand | Op::Star
        )
    }

    /// `=` and every compound assignment.
    pub fn is_assign(self) -> bool {
        self == Op::Assign || self.associated_op().is_some()
    }

    /// The arithmetic/bitwise operator behind a compound assignment.
    pub fn associated_op(self) -> Option<BuiltinOperator> {
        Some(match self {
            Op::PlusAssign => Op::Plus,
            Op::MinusAssign => Op::Minus,
            Op::TimesAssign => Op::Star,
            Op::DivideAssign => Op::Divide,
            Op::ModAssign => Op::Mod,
            Op::AndAssign => Op::Ampersand,
            Op::OrAssign => Op::BitwiseOr,
            Op::XorAssign => Op::Xor,
            Op::RightShiftAssign => Op::RightShift,
            Op::LeftShiftAssign => Op::LeftShift,
            _ => return None,
        })
    }

    /// Result type of this operator applied as a prefix to `arg`.
    ///
    /// `canonical` is `arg` with aliases resolved.
    pub fn prefix_type(self, arg: &DataType, canonical: &DataType) -> Option<DataType> {
        match (self, canonical) {
            (Op::Minus, DataType::Int { .. } | DataType::Floating(_))
            | (Op::Not, DataType::Bool)
            | (Op::BitwiseNot, DataType::Int { .. }) => Some(arg.clone()),
            (Op::Star, DataType::Pointer(pointee)) => Some((**pointee).clone()),
            (Op::Ampersand, _) => Some(DataType::pointer(arg.clone())),
            _ => None,
        }
    }

    /// Result type of this operator applied infix to two operands of type
    /// `arg` (classified through `canonical`).
    ///
    /// Plain assignment accepts every type. Compound assignment accepts
    /// what its associated operator accepts. The binding pass types every
    /// assignment as `Void` regardless of what is returned here.
    pub fn infix_type(self, arg: &DataType, canonical: &DataType) -> Option<DataType> {
        if self == Op::Assign {
            return Some(arg.clone());
        }
        if let Some(op) = self.associated_op() {
            return op.infix_type(arg, canonical).map(|_| arg.clone());
        }
        let class = canonical.class();
        match (self, class) {
            (Op::Plus, TypeClass::Int | TypeClass::Float | TypeClass::Pointer)
            | (Op::Minus | Op::Star | Op::Divide, TypeClass::Int | TypeClass::Float)
            | (
                Op::Mod
                | Op::Xor
                | Op::BitwiseOr
                | Op::Ampersand
                | Op::LeftShift
                | Op::RightShift,
                TypeClass::Int,
            ) => Some(arg.clone()),
            (Op::Minus | Op::Star, TypeClass::Pointer) => Some(DataType::INT64),
            (Op::Equal | Op::NotEqual, TypeClass::Int | TypeClass::Pointer | TypeClass::Float | TypeClass::Bool)
            | (
                Op::LessThan | Op::LessThanOrEqual | Op::GreaterThan | Op::GreaterThanOrEqual,
                TypeClass::Int | TypeClass::Pointer | TypeClass::Float,
            )
            | (Op::And | Op::Or | Op::Xor, TypeClass::Bool) => Some(DataType::Bool),
            _ => None,
        }
    }

    /// `pointer + int` and `pointer - int`, which keep the pointer type.
    pub fn is_pointer_offset(self, lhs: &DataType, rhs: &DataType) -> bool {
        matches!(
            self,
            Op::Plus | Op::Minus | Op::PlusAssign | Op::MinusAssign
        ) && lhs.is_pointer()
            && matches!(rhs, DataType::Int { .. })
    }
}

impl fmt::Display for BuiltinOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
