//! Side tables filled in by the semantic passes.
//!
//! The tree itself is never rewritten after parsing. Everything Sema
//! learns about a node is stored here, keyed by the node's handle.

use rustc_hash::{FxHashMap, FxHashSet};
use shiba_ir::{DataType, ExprId, FuncId, TypeDeclId, VarId};

/// What a name, field lookup or call resolved to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DeclRef {
    Var(VarId),
    Func(FuncId),
    /// `self` inside the given initializer: the value being built.
    InitSelf(FuncId),
}

/// The target of a call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Callee {
    Func(FuncId),
    /// A function-typed value: a closure, variable or field.
    Value { args: Vec<DataType>, ret: DataType },
}

#[derive(Clone, Debug, Default)]
pub struct Annotations {
    /// Type of every value expression Sema could type.
    pub expr_types: FxHashMap<ExprId, DataType>,
    /// Resolved declaration of `Var`, `FieldLookup` and `Call` nodes.
    pub decl_refs: FxHashMap<ExprId, DeclRef>,
    pub callees: FxHashMap<ExprId, Callee>,
    /// Compound blocks that always return.
    pub has_return: FxHashSet<ExprId>,
    /// Final type of every visited variable, declared or inferred.
    pub var_types: FxHashMap<VarId, DataType>,
    /// Declarations captured by each closure expression.
    pub captures: FxHashMap<ExprId, FxHashSet<DeclRef>>,
    /// Nominal type a field lookup was resolved against.
    pub field_owners: FxHashMap<ExprId, TypeDeclId>,
    /// Expansion of each `#function`.
    pub function_names: FxHashMap<ExprId, String>,
}

impl Annotations {
    #[inline]
    pub fn type_of(&self, expr: ExprId) -> Option<&DataType> {
        self.expr_types.get(&expr)
    }

    #[inline]
    pub fn decl_of(&self, expr: ExprId) -> Option<DeclRef> {
        self.decl_refs.get(&expr).copied()
    }

    #[inline]
    pub fn has_return(&self, block: ExprId) -> bool {
        self.has_return.contains(&block)
    }
}
