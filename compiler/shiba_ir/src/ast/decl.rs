//! Declarations.

use super::{ExprId, FuncId, TypeDeclId, VarId};
use crate::attr::DeclAttributes;
use crate::{DataType, Identifier, SourceRange};

use super::expr::TypeRef;

/// Where a variable lives.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VarKind {
    Local,
    Global,
    Field,
    /// A function argument. `external` is the call-site label, if any.
    Argument {
        external: Option<Identifier>,
        implicit_self: bool,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct VarDecl {
    pub name: Identifier,
    /// Declared type. `None` means the type is inferred from `rhs`.
    pub type_ref: Option<TypeRef>,
    pub rhs: Option<ExprId>,
    pub mutable: bool,
    pub attrs: DeclAttributes,
    pub kind: VarKind,
    pub range: Option<SourceRange>,
}

impl VarDecl {
    pub fn argument(name: Identifier, external: Option<Identifier>, ty: TypeRef, mutable: bool) -> Self {
        let range = name.range;
        VarDecl {
            name,
            type_ref: Some(ty),
            rhs: None,
            mutable,
            attrs: DeclAttributes::empty(),
            kind: VarKind::Argument {
                external,
                implicit_self: false,
            },
            range,
        }
    }

    /// Call-site label of an argument.
    pub fn external_name(&self) -> Option<&Identifier> {
        match &self.kind {
            VarKind::Argument { external, .. } => external.as_ref(),
            _ => None,
        }
    }

    #[inline]
    pub fn is_implicit_self(&self) -> bool {
        matches!(
            self.kind,
            VarKind::Argument {
                implicit_self: true,
                ..
            }
        )
    }

    #[inline]
    pub fn is_foreign(&self) -> bool {
        self.attrs.contains(DeclAttributes::FOREIGN)
    }
}

/// The role a function plays.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FuncKind {
    Free,
    Method(DataType),
    Initializer(DataType),
    Deinitializer(DataType),
}

impl FuncKind {
    /// Owning type of a method, initializer or deinitializer.
    pub fn owner(&self) -> Option<&DataType> {
        match self {
            FuncKind::Free => None,
            FuncKind::Method(ty) | FuncKind::Initializer(ty) | FuncKind::Deinitializer(ty) => {
                Some(ty)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FuncDecl {
    pub name: Identifier,
    /// The synthesized receiver of a non-static method or deinitializer.
    pub self_arg: Option<VarId>,
    /// Arguments as written, excluding `self_arg`.
    pub args: Vec<VarId>,
    pub ret: TypeRef,
    pub body: Option<ExprId>,
    pub kind: FuncKind,
    pub attrs: DeclAttributes,
    pub has_varargs: bool,
    pub range: Option<SourceRange>,
}

impl FuncDecl {
    #[inline]
    pub fn has(&self, attr: DeclAttributes) -> bool {
        self.attrs.contains(attr)
    }

    #[inline]
    pub fn is_initializer(&self) -> bool {
        matches!(self.kind, FuncKind::Initializer(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeDecl {
    pub name: Identifier,
    pub fields: Vec<VarId>,
    pub methods: Vec<FuncId>,
    pub initializers: Vec<FuncId>,
    pub deinit: Option<FuncId>,
    pub attrs: DeclAttributes,
    pub range: Option<SourceRange>,
}

impl TypeDecl {
    /// A declaration with no members, used for primitives and foreign types.
    pub fn opaque(name: Identifier, attrs: DeclAttributes) -> Self {
        let range = name.range;
        TypeDecl {
            name,
            fields: Vec::new(),
            methods: Vec::new(),
            initializers: Vec::new(),
            deinit: None,
            attrs,
            range,
        }
    }

    #[inline]
    pub fn ty(&self) -> DataType {
        DataType::Custom(self.name.name.clone())
    }

    #[inline]
    pub fn is_indirect(&self) -> bool {
        self.attrs.contains(DeclAttributes::INDIRECT)
    }
}

/// `typedef Name = Type`.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeAlias {
    pub name: Identifier,
    pub bound: TypeRef,
    pub range: Option<SourceRange>,
}

/// `extension Type { methods }`. Methods are hoisted onto the type at
/// registration; `target` is filled in once the type is resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct Extension {
    pub type_ref: TypeRef,
    pub methods: Vec<FuncId>,
    pub target: Option<TypeDeclId>,
    pub range: Option<SourceRange>,
}

/// `#warning "..."` / `#error "..."` outside a function body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoundDiagnostic {
    pub is_error: bool,
    pub content: String,
    pub range: Option<SourceRange>,
}
