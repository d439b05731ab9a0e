//! Alias resolution and structural type queries.

use rustc_hash::FxHashSet;
use shiba_ir::{DataType, TypeDeclId};

use crate::ASTContext;

impl ASTContext {
    /// Resolve every alias inside `ty`.
    ///
    /// Idempotent. Aliases that reach themselves through a pointer are left
    /// nominal, so the result is always finite.
    pub fn canonical_type(&self, ty: &DataType) -> DataType {
        self.canonical_inner(ty, &mut FxHashSet::default())
    }

    fn canonical_inner<'a>(&'a self, ty: &'a DataType, visiting: &mut FxHashSet<&'a str>) -> DataType {
        match ty {
            DataType::Custom(name) => {
                if self.opaque_aliases.contains(name) {
                    return ty.clone();
                }
                let Some(bound) = self.alias_map.get(name) else {
                    return ty.clone();
                };
                if !visiting.insert(name.as_str()) {
                    return ty.clone();
                }
                let resolved = self.canonical_inner(bound, visiting);
                visiting.remove(name.as_str());
                resolved
            }
            DataType::Pointer(inner) => DataType::pointer(self.canonical_inner(inner, visiting)),
            DataType::Function { args, ret } => {
                let args = args
                    .iter()
                    .map(|arg| self.canonical_inner(arg, visiting))
                    .collect();
                DataType::function(args, self.canonical_inner(ret, visiting))
            }
            DataType::Tuple(fields) => DataType::Tuple(
                fields
                    .iter()
                    .map(|field| self.canonical_inner(field, visiting))
                    .collect(),
            ),
            _ => ty.clone(),
        }
    }

    /// Whether `ty` reaches a name in `visited` without crossing a pointer.
    ///
    /// `visited` starts with the alias being declared.
    pub fn is_circular_alias(&self, ty: &DataType, visited: &mut FxHashSet<String>) -> bool {
        match ty {
            DataType::Custom(name) => {
                if visited.contains(name) {
                    return true;
                }
                let Some(bound) = self.alias_map.get(name) else {
                    return false;
                };
                visited.insert(name.clone());
                let circular = self.is_circular_alias(bound, visited);
                visited.remove(name);
                circular
            }
            DataType::Function { args, ret } => {
                args.iter().any(|arg| self.is_circular_alias(arg, visited))
                    || self.is_circular_alias(ret, visited)
            }
            DataType::Tuple(fields) => fields.iter().any(|f| self.is_circular_alias(f, visited)),
            _ => false,
        }
    }

    /// Whether `ty` mentions the alias `target` anywhere, pointers included.
    pub(crate) fn alias_refers_to(
        &self,
        ty: &DataType,
        target: &str,
        seen: &mut FxHashSet<String>,
    ) -> bool {
        match ty {
            DataType::Custom(name) => {
                if name == target {
                    return true;
                }
                if !seen.insert(name.clone()) {
                    return false;
                }
                self.alias_map
                    .get(name)
                    .is_some_and(|bound| self.alias_refers_to(bound, target, seen))
            }
            DataType::Pointer(inner) => self.alias_refers_to(inner, target, seen),
            DataType::Function { args, ret } => {
                args.iter().any(|arg| self.alias_refers_to(arg, target, seen))
                    || self.alias_refers_to(ret, target, seen)
            }
            DataType::Tuple(fields) => fields
                .iter()
                .any(|field| self.alias_refers_to(field, target, seen)),
            _ => false,
        }
    }

    /// Whether the nominal type contains itself by value.
    ///
    /// Pointers, function values and `indirect` types on the path break
    /// the cycle. An `indirect` type is never circular.
    pub fn is_circular_type(&self, id: TypeDeclId) -> bool {
        let decl = self.ast.type_decl(id);
        if decl.is_indirect() {
            return false;
        }
        let target = decl.name.name.as_str();
        let mut visited = FxHashSet::default();
        self.field_types(id)
            .iter()
            .any(|ty| self.contains_by_value(ty, target, &mut visited))
    }

    fn field_types(&self, id: TypeDeclId) -> Vec<DataType> {
        self.ast
            .type_decl(id)
            .fields
            .iter()
            .filter_map(|&field| self.var_type(field))
            .collect()
    }

    fn contains_by_value(&self, ty: &DataType, target: &str, visited: &mut FxHashSet<String>) -> bool {
        match self.canonical_type(ty) {
            DataType::Custom(name) => {
                if name == target {
                    return true;
                }
                let Some(id) = self.type_map.get(&DataType::Custom(name.clone())).copied() else {
                    return false;
                };
                if self.ast.type_decl(id).is_indirect() || !visited.insert(name) {
                    return false;
                }
                self.field_types(id)
                    .iter()
                    .any(|field| self.contains_by_value(field, target, visited))
            }
            DataType::Tuple(fields) => fields
                .iter()
                .any(|field| self.contains_by_value(field, target, visited)),
            _ => false,
        }
    }

    /// Whether every nominal name inside `ty` is declared.
    pub fn is_valid_type(&self, ty: &DataType) -> bool {
        match ty {
            DataType::Custom(name) => {
                self.opaque_aliases.contains(name)
                    || self.type_map.contains_key(ty)
                    || self
                        .alias_map
                        .get(name)
                        .is_some_and(|bound| self.is_valid_type(&self.canonical_type(bound)))
            }
            DataType::Pointer(inner) => self.is_valid_type(inner),
            DataType::Function { args, ret } => {
                args.iter().all(|arg| self.is_valid_type(arg)) && self.is_valid_type(ret)
            }
            DataType::Tuple(fields) => fields.iter().all(|field| self.is_valid_type(field)),
            _ => true,
        }
    }

    /// Structural equality after alias resolution.
    pub fn matches(&self, a: &DataType, b: &DataType) -> bool {
        a == b || self.canonical_type(a) == self.canonical_type(b)
    }

    /// Whether an `as` conversion between the two types is allowed.
    pub fn can_coerce(&self, from: &DataType, to: &DataType) -> bool {
        let from = self.canonical_type(from);
        let to = self.canonical_type(to);
        if from == to || from == DataType::Any || to == DataType::Any {
            return true;
        }
        let numeric = |ty: &DataType| matches!(ty, DataType::Int { .. } | DataType::Floating(_));
        let int = |ty: &DataType| matches!(ty, DataType::Int { .. });
        (numeric(&from) && numeric(&to))
            || (int(&from) && to.is_pointer())
            || (from.is_pointer() && int(&to))
            || (from.is_pointer() && to.is_pointer())
    }

    /// Whether `ty` is a nominal type marked `indirect`.
    pub fn is_indirect(&self, ty: &DataType) -> bool {
        self.decl_for(ty)
            .is_some_and(|id| self.ast.type_decl(id).is_indirect())
    }
}

#[cfg(test)]
mod tests;
