//! The declaration registry.

use bitflags::bitflags;
use rustc_hash::{FxHashMap, FxHashSet};
use shiba_diagnostic::{Diagnostic, DiagnosticEngine};
use shiba_ir::{
    Ast, DataType, DeclAttributes, Extension, FuncDecl, FuncId, FuncKind, Identifier,
    PoundDiagnostic, SourceRange, TypeAlias, TypeDecl, TypeDeclId, VarId,
};

use crate::{Annotations, ContextError};

bitflags! {
    /// What the program's `main` expects from the runtime.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct MainFlags: u8 {
        /// `main` takes `(argc, argv)`.
        const ARGS = 1 << 0;
        /// `main` returns the process exit code.
        const EXIT_CODE = 1 << 1;
    }
}

/// Everything known about one compilation unit.
///
/// Owns the AST arena, the side tables the passes fill in, and the
/// diagnostic engine. One context per compilation; it is not shared
/// between threads while a pipeline runs.
#[derive(Debug)]
pub struct ASTContext {
    pub filename: String,
    pub ast: Ast,
    pub ann: Annotations,
    pub diag: DiagnosticEngine,

    pub(crate) functions: Vec<FuncId>,
    pub(crate) types: Vec<TypeDeclId>,
    pub(crate) extensions: Vec<Extension>,
    pub(crate) globals: Vec<VarId>,
    pub(crate) type_aliases: Vec<TypeAlias>,
    pub(crate) pending_diagnostics: Vec<PoundDiagnostic>,

    pub(crate) func_map: FxHashMap<String, Vec<FuncId>>,
    pub(crate) type_map: FxHashMap<DataType, TypeDeclId>,
    pub(crate) global_map: FxHashMap<String, VarId>,
    pub(crate) alias_map: FxHashMap<String, DataType>,
    /// Aliases that refer to themselves through a pointer. They stay
    /// nominal under canonicalization so it terminates.
    pub(crate) opaque_aliases: FxHashSet<String>,
    pub(crate) extension_methods: FxHashMap<TypeDeclId, Vec<FuncId>>,

    main_function: Option<FuncId>,
    main_flags: MainFlags,
}

impl ASTContext {
    pub fn new(filename: impl Into<String>) -> Self {
        let mut ast = Ast::new();
        let mut type_map = FxHashMap::default();
        let primitives = DataType::PRIMITIVES
            .into_iter()
            .chain([("Void", DataType::Void)]);
        for (name, ty) in primitives {
            let id = ast.alloc_type(TypeDecl::opaque(Identifier::new(name), DeclAttributes::IMPLICIT));
            type_map.insert(ty, id);
        }
        ASTContext {
            filename: filename.into(),
            ast,
            ann: Annotations::default(),
            diag: DiagnosticEngine::new(),
            functions: Vec::new(),
            types: Vec::new(),
            extensions: Vec::new(),
            globals: Vec::new(),
            type_aliases: Vec::new(),
            pending_diagnostics: Vec::new(),
            func_map: FxHashMap::default(),
            type_map,
            global_map: FxHashMap::default(),
            alias_map: FxHashMap::default(),
            opaque_aliases: FxHashSet::default(),
            extension_methods: FxHashMap::default(),
            main_function: None,
            main_flags: MainFlags::empty(),
        }
    }

    // Reporting

    pub fn error(&mut self, error: &ContextError, range: Option<SourceRange>) {
        self.diag.add(Diagnostic::error(error.to_string()).at_range(range));
    }

    // Registration

    /// Register a top-level function. A function named `main` is checked
    /// against the four accepted signatures.
    pub fn add_function(&mut self, id: FuncId) {
        self.functions.push(id);
        let func = self.ast.func(id);
        let name = func.name.name.clone();
        if name == "main" && func.kind == FuncKind::Free {
            self.set_main(id);
        }
        self.func_map.entry(name).or_default().push(id);
    }

    fn set_main(&mut self, id: FuncId) {
        let func = self.ast.func(id);
        let range = func.name.range;
        if self.main_function.is_some() {
            self.error(&ContextError::DuplicateMain, range);
            return;
        }

        let args: Vec<DataType> = func
            .args
            .iter()
            .map(|&arg| self.declared_var_type(arg))
            .map(|ty| self.canonical_type(&ty))
            .collect();
        let ret = self.canonical_type(&func.ret.ty);

        let mut flags = MainFlags::empty();
        if ret == DataType::INT64 {
            flags |= MainFlags::EXIT_CODE;
        }
        let argv = DataType::pointer(DataType::c_string());
        if let [argc, argv_ty] = args.as_slice() {
            if *argc == DataType::INT64 && *argv_ty == argv {
                flags |= MainFlags::ARGS;
            }
        }

        let bad_args = !args.is_empty() && !flags.contains(MainFlags::ARGS);
        let bad_ret = !ret.is_void() && !flags.contains(MainFlags::EXIT_CODE);
        if bad_args || bad_ret {
            let ty = DataType::function(args, ret);
            self.error(&ContextError::InvalidMain(ty), range);
            return;
        }
        tracing::debug!(?flags, "registered main");
        self.main_function = Some(id);
        self.main_flags = flags;
    }

    /// Register a nominal type. Returns `false` and reports if the name
    /// is already a type or alias.
    pub fn add_type(&mut self, id: TypeDeclId) -> bool {
        let decl = self.ast.type_decl(id);
        let ty = decl.ty();
        if self.type_map.contains_key(&ty) || self.alias_map.contains_key(&decl.name.name) {
            let error = ContextError::DuplicateType(decl.name.clone());
            let range = decl.name.range;
            self.error(&error, range);
            return false;
        }
        self.types.push(id);
        self.type_map.insert(ty, id);
        true
    }

    /// Register a global. Returns `false` and reports a redeclaration.
    pub fn add_global(&mut self, id: VarId) -> bool {
        let var = self.ast.var(id);
        if self.global_map.contains_key(&var.name.name) {
            let error = ContextError::DuplicateVar(var.name.clone());
            let range = var.range;
            self.error(&error, range);
            return false;
        }
        self.global_map.insert(var.name.name.clone(), id);
        self.globals.push(id);
        true
    }

    /// Register `typedef Name = Bound`. Circular aliases are rejected; an
    /// alias that reaches itself only through a pointer stays nominal.
    pub fn add_alias(&mut self, alias: TypeAlias) -> bool {
        let name = alias.name.name.clone();
        if self.alias_map.contains_key(&name)
            || self.type_map.contains_key(&DataType::Custom(name.clone()))
        {
            self.error(&ContextError::DuplicateType(alias.name.clone()), alias.name.range);
            return false;
        }

        let mut visited = FxHashSet::default();
        visited.insert(name.clone());
        if self.is_circular_alias(&alias.bound.ty, &mut visited) {
            self.error(&ContextError::CircularAlias(alias.name.clone()), alias.name.range);
            return false;
        }

        self.alias_map.insert(name.clone(), alias.bound.ty.clone());
        if self.alias_refers_to(&alias.bound.ty, &name, &mut FxHashSet::default()) {
            self.opaque_aliases.insert(name);
        }
        self.type_aliases.push(alias);
        true
    }

    pub fn add_extension(&mut self, extension: Extension) {
        self.extensions.push(extension);
    }

    pub fn add_pending_diagnostic(&mut self, diagnostic: PoundDiagnostic) {
        self.pending_diagnostics.push(diagnostic);
    }

    /// Attach an extension's methods to their resolved type.
    pub fn hoist_extension(&mut self, index: usize, target: TypeDeclId) {
        let Some(extension) = self.extensions.get_mut(index) else {
            return;
        };
        extension.target = Some(target);
        self.extension_methods
            .entry(target)
            .or_default()
            .extend(extension.methods.iter().copied());
    }

    // Lookup

    pub fn functions(&self) -> &[FuncId] {
        &self.functions
    }

    /// User-declared nominal types, in declaration order.
    pub fn types(&self) -> &[TypeDeclId] {
        &self.types
    }

    /// User-declared types, then primitive types that gained methods
    /// through an extension, each once.
    pub fn types_with_members(&self) -> Vec<TypeDeclId> {
        let mut ids = self.types.clone();
        for target in self.extensions.iter().filter_map(|extension| extension.target) {
            if !ids.contains(&target) {
                ids.push(target);
            }
        }
        ids
    }

    pub fn extensions(&self) -> &[Extension] {
        &self.extensions
    }

    pub fn globals(&self) -> &[VarId] {
        &self.globals
    }

    pub fn type_aliases(&self) -> &[TypeAlias] {
        &self.type_aliases
    }

    pub fn pending_diagnostics(&self) -> &[PoundDiagnostic] {
        &self.pending_diagnostics
    }

    /// Overload set of a free function name, in declaration order.
    pub fn functions_named(&self, name: &str) -> &[FuncId] {
        self.func_map.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn global(&self, name: &str) -> Option<VarId> {
        self.global_map.get(name).copied()
    }

    pub fn alias_bound(&self, name: &str) -> Option<&DataType> {
        self.alias_map.get(name)
    }

    /// Declaration of a type, looked up through its canonical form.
    pub fn decl_for(&self, ty: &DataType) -> Option<TypeDeclId> {
        self.type_map.get(&self.canonical_type(ty)).copied()
    }

    /// Methods declared in the type body followed by extension methods.
    pub fn methods_of(&self, id: TypeDeclId) -> impl Iterator<Item = FuncId> + '_ {
        let own = self.ast.type_decl(id).methods.iter().copied();
        let extended = self
            .extension_methods
            .get(&id)
            .into_iter()
            .flat_map(|methods| methods.iter().copied());
        own.chain(extended)
    }

    pub fn main_function(&self) -> Option<FuncId> {
        self.main_function
    }

    pub fn main_flags(&self) -> MainFlags {
        self.main_flags
    }

    /// Declared type of a variable, or `Void` when it has none.
    pub fn declared_var_type(&self, id: VarId) -> DataType {
        self.ast
            .var(id)
            .type_ref
            .as_ref()
            .map_or(DataType::Void, |t| t.ty.clone())
    }

    /// Declared type of a variable, else the type Sema inferred for it.
    pub fn var_type(&self, id: VarId) -> Option<DataType> {
        self.ann
            .var_types
            .get(&id)
            .cloned()
            .or_else(|| self.ast.var(id).type_ref.as_ref().map(|t| t.ty.clone()))
    }

    /// The function type of a declaration, without its implicit `self`.
    pub fn function_type(&self, func: &FuncDecl) -> DataType {
        let args = func
            .args
            .iter()
            .map(|&arg| self.declared_var_type(arg))
            .collect();
        DataType::function(args, func.ret.ty.clone())
    }
}
