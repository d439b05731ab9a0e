//! The `DataType` algebra.
//!
//! Types compare structurally. `Custom` names compare by name only; what a
//! name means is decided by canonicalization in the context, not here.

use std::fmt;

/// Floating point widths.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FloatKind {
    Float,
    Double,
    Float80,
}

/// A Shiba type.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum DataType {
    Int { width: u8, signed: bool },
    Floating(FloatKind),
    Bool,
    Void,
    /// Matches every other type.
    Any,
    /// A nominal type or alias, resolved through the context.
    Custom(String),
    Function { args: Vec<DataType>, ret: Box<DataType> },
    Pointer(Box<DataType>),
    Tuple(Vec<DataType>),
}

/// Operand classes used by the operator table.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TypeClass {
    Int,
    Float,
    Pointer,
    Bool,
    Other,
}

impl DataType {
    pub const INT8: DataType = DataType::Int {
        width: 8,
        signed: true,
    };
    pub const INT16: DataType = DataType::Int {
        width: 16,
        signed: true,
    };
    pub const INT32: DataType = DataType::Int {
        width: 32,
        signed: true,
    };
    pub const INT64: DataType = DataType::Int {
        width: 64,
        signed: true,
    };
    pub const UINT8: DataType = DataType::Int {
        width: 8,
        signed: false,
    };
    pub const UINT16: DataType = DataType::Int {
        width: 16,
        signed: false,
    };
    pub const UINT32: DataType = DataType::Int {
        width: 32,
        signed: false,
    };
    pub const UINT64: DataType = DataType::Int {
        width: 64,
        signed: false,
    };
    pub const FLOAT: DataType = DataType::Floating(FloatKind::Float);
    pub const DOUBLE: DataType = DataType::Floating(FloatKind::Double);
    pub const FLOAT80: DataType = DataType::Floating(FloatKind::Float80);

    /// Every primitive that has a built-in declaration, with its spelling.
    pub const PRIMITIVES: [(&'static str, DataType); 12] = [
        ("Int8", DataType::INT8),
        ("Int16", DataType::INT16),
        ("Int32", DataType::INT32),
        ("Int", DataType::INT64),
        ("UInt8", DataType::UINT8),
        ("UInt16", DataType::UINT16),
        ("UInt32", DataType::UINT32),
        ("UInt", DataType::UINT64),
        ("Float", DataType::FLOAT),
        ("Double", DataType::DOUBLE),
        ("Float80", DataType::FLOAT80),
        ("Bool", DataType::Bool),
    ];

    /// Resolve a written type name. Unknown names become `Custom`.
    pub fn from_name(name: &str) -> DataType {
        match name {
            "Void" => DataType::Void,
            "Any" => DataType::Any,
            _ => Self::PRIMITIVES
                .iter()
                .find(|(spelling, _)| *spelling == name)
                .map_or_else(|| DataType::Custom(name.to_owned()), |(_, ty)| ty.clone()),
        }
    }

    #[inline]
    pub fn pointer(pointee: DataType) -> DataType {
        DataType::Pointer(Box::new(pointee))
    }

    #[inline]
    pub fn function(args: Vec<DataType>, ret: DataType) -> DataType {
        DataType::Function {
            args,
            ret: Box::new(ret),
        }
    }

    /// `*Int8`, the type of string literals and `nil`.
    pub fn c_string() -> DataType {
        DataType::pointer(DataType::INT8)
    }

    #[inline]
    pub fn is_pointer(&self) -> bool {
        matches!(self, DataType::Pointer(_))
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        matches!(self, DataType::Void)
    }

    /// Number of pointer levels wrapped around the root type.
    pub fn pointer_level(&self) -> usize {
        let mut level = 0;
        let mut ty = self;
        while let DataType::Pointer(inner) = ty {
            level += 1;
            ty = inner;
        }
        level
    }

    /// The type under every pointer level.
    pub fn root_type(&self) -> &DataType {
        let mut ty = self;
        while let DataType::Pointer(inner) = ty {
            ty = inner;
        }
        ty
    }

    /// Operator class of an already canonical type.
    pub fn class(&self) -> TypeClass {
        match self {
            DataType::Int { .. } => TypeClass::Int,
            DataType::Floating(_) => TypeClass::Float,
            DataType::Pointer(_) => TypeClass::Pointer,
            DataType::Bool => TypeClass::Bool,
            _ => TypeClass::Other,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Int { width, signed } => {
                let prefix = if *signed { "" } else { "U" };
                if *width == 64 {
                    write!(f, "{prefix}Int")
                } else {
                    write!(f, "{prefix}Int{width}")
                }
            }
            DataType::Floating(FloatKind::Float) => f.write_str("Float"),
            DataType::Floating(FloatKind::Double) => f.write_str("Double"),
            DataType::Floating(FloatKind::Float80) => f.write_str("Float80"),
            DataType::Bool => f.write_str("Bool"),
            DataType::Void => f.write_str("Void"),
            DataType::Any => f.write_str("Any"),
            DataType::Custom(name) => f.write_str(name),
            DataType::Pointer(inner) => write!(f, "*{inner}"),
            DataType::Tuple(fields) => {
                f.write_str("(")?;
                write_list(f, fields)?;
                f.write_str(")")
            }
            DataType::Function { args, ret } => {
                f.write_str("(")?;
                write_list(f, args)?;
                write!(f, ") -> {ret}")
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, types: &[DataType]) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{ty}")?;
    }
    Ok(())
}
