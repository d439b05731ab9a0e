//! Whether an expression may be assigned to.

use shiba_ir::{BuiltinOperator, DataType, ExprId, ExprKind, Identifier, VarId, VarKind};

use crate::{ASTContext, Annotations, DeclRef};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Mutability {
    Mutable,
    /// `culprit` names the declaration that makes the target immutable.
    Immutable { culprit: Option<Identifier> },
}

impl Mutability {
    #[inline]
    pub fn is_mutable(&self) -> bool {
        matches!(self, Mutability::Mutable)
    }

    fn blame(name: &Identifier) -> Mutability {
        Mutability::Immutable {
            culprit: Some(name.clone()),
        }
    }
}

impl ASTContext {
    /// Mutability of `expr` using the annotations recorded so far.
    pub fn mutability(&self, expr: ExprId) -> Mutability {
        self.mutability_with(&self.ann, expr)
    }

    /// Mutability of `expr` against a caller-held annotation table.
    ///
    /// Name resolution must already have run on `expr`.
    pub fn mutability_with(&self, ann: &Annotations, expr: ExprId) -> Mutability {
        match &self.ast.expr(expr).kind {
            ExprKind::Var(name) => match ann.decl_of(expr) {
                Some(DeclRef::InitSelf(_)) => Mutability::Mutable,
                Some(DeclRef::Var(id)) => {
                    let var = self.ast.var(id);
                    let indirect_arg = matches!(var.kind, VarKind::Argument { .. })
                        && self
                            .var_type_in(ann, id)
                            .is_some_and(|ty| self.is_indirect(&ty));
                    if var.mutable || indirect_arg {
                        Mutability::Mutable
                    } else {
                        Mutability::blame(&var.name)
                    }
                }
                Some(DeclRef::Func(_)) | None => Mutability::blame(name),
            },
            ExprKind::FieldLookup { lhs, name } => {
                match ann.decl_of(expr) {
                    Some(DeclRef::Var(field)) => {
                        let field = self.ast.var(field);
                        if !field.mutable {
                            return Mutability::blame(&field.name);
                        }
                    }
                    _ => return Mutability::blame(name),
                }
                let lhs_indirect = ann.type_of(*lhs).is_some_and(|ty| self.is_indirect(ty));
                if lhs_indirect {
                    Mutability::Mutable
                } else {
                    self.mutability_with(ann, *lhs)
                }
            }
            ExprKind::Paren(inner) | ExprKind::TupleField { lhs: inner, .. } => {
                self.mutability_with(ann, *inner)
            }
            ExprKind::Prefix {
                op: BuiltinOperator::Star,
                ..
            }
            | ExprKind::Subscript { .. } => Mutability::Mutable,
            _ => Mutability::Immutable { culprit: None },
        }
    }

    fn var_type_in(&self, ann: &Annotations, id: VarId) -> Option<DataType> {
        ann.var_types.get(&id).cloned().or_else(|| self.var_type(id))
    }
}
