//! Arena-allocated AST.
//!
//! Nodes live in flat vectors inside [`Ast`] and refer to one another by
//! 32-bit handles. Nothing is boxed and nothing points back up the tree;
//! resolution results (types, declaration references) are kept in side
//! tables by the passes that compute them.

mod decl;
mod expr;
pub mod visitor;

pub use decl::{Extension, FuncDecl, FuncKind, PoundDiagnostic, TypeAlias, TypeDecl, VarDecl, VarKind};
pub use expr::{CallArg, Expr, ExprKind, IfBlock, SwitchCase, TypeRef};

use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Sentinel for "no node".
            pub const INVALID: $name = $name(u32::MAX);

            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Index into the owning arena.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", stringify!($name), self.0)
                } else {
                    write!(f, "{}::INVALID", stringify!($name))
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }
    };
}

arena_id!(
    /// Handle to an expression or statement.
    ExprId
);
arena_id!(
    /// Handle to a function, method, initializer or deinitializer.
    FuncId
);
arena_id!(
    /// Handle to a variable: local, global, field or argument.
    VarId
);
arena_id!(
    /// Handle to a nominal type declaration.
    TypeDeclId
);

crate::static_assert_size!(ExprId, 4);

#[inline]
fn next_id(len: usize) -> u32 {
    // Arenas never approach u32::MAX nodes for a single file.
    u32::try_from(len).unwrap_or(u32::MAX - 1)
}

/// Owner of every node produced for one compilation.
#[derive(Clone, Debug, Default)]
pub struct Ast {
    exprs: Vec<Expr>,
    funcs: Vec<FuncDecl>,
    vars: Vec<VarDecl>,
    types: Vec<TypeDecl>,
}

impl Ast {
    pub fn new() -> Self {
        Ast::default()
    }

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(next_id(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    pub fn alloc_func(&mut self, func: FuncDecl) -> FuncId {
        let id = FuncId::new(next_id(self.funcs.len()));
        self.funcs.push(func);
        id
    }

    pub fn alloc_var(&mut self, var: VarDecl) -> VarId {
        let id = VarId::new(next_id(self.vars.len()));
        self.vars.push(var);
        id
    }

    pub fn alloc_type(&mut self, decl: TypeDecl) -> TypeDeclId {
        let id = TypeDeclId::new(next_id(self.types.len()));
        self.types.push(decl);
        id
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn expr_mut(&mut self, id: ExprId) -> &mut Expr {
        &mut self.exprs[id.index()]
    }

    #[inline]
    pub fn func(&self, id: FuncId) -> &FuncDecl {
        &self.funcs[id.index()]
    }

    #[inline]
    pub fn func_mut(&mut self, id: FuncId) -> &mut FuncDecl {
        &mut self.funcs[id.index()]
    }

    #[inline]
    pub fn var(&self, id: VarId) -> &VarDecl {
        &self.vars[id.index()]
    }

    #[inline]
    pub fn var_mut(&mut self, id: VarId) -> &mut VarDecl {
        &mut self.vars[id.index()]
    }

    #[inline]
    pub fn type_decl(&self, id: TypeDeclId) -> &TypeDecl {
        &self.types[id.index()]
    }

    #[inline]
    pub fn type_decl_mut(&mut self, id: TypeDeclId) -> &mut TypeDecl {
        &mut self.types[id.index()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn type_decl_ids(&self) -> impl Iterator<Item = TypeDeclId> {
        (0..self.types.len()).map(|i| TypeDeclId::new(next_id(i)))
    }

    /// Smallest range covering the expression.
    pub fn range(&self, id: ExprId) -> Option<crate::SourceRange> {
        self.expr(id).range
    }

    /// Strip any number of parentheses.
    pub fn skip_parens(&self, mut id: ExprId) -> ExprId {
        while let ExprKind::Paren(inner) = self.expr(id).kind {
            id = inner;
        }
        id
    }
}
