use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use shiba_ir::{DeclAttributes, Identifier, TypeAlias, TypeDecl, TypeRef, VarDecl, VarKind};

fn custom(name: &str) -> DataType {
    DataType::Custom(name.to_owned())
}

fn alias(ctx: &mut ASTContext, name: &str, bound: DataType) -> bool {
    ctx.add_alias(TypeAlias {
        name: Identifier::new(name),
        bound: TypeRef::synthesized(bound),
        range: None,
    })
}

fn record(ctx: &mut ASTContext, name: &str, fields: &[DataType], attrs: DeclAttributes) -> TypeDeclId {
    let fields = fields
        .iter()
        .enumerate()
        .map(|(i, ty)| {
            ctx.ast.alloc_var(VarDecl {
                name: Identifier::new(format!("f{i}")),
                type_ref: Some(TypeRef::synthesized(ty.clone())),
                rhs: None,
                mutable: false,
                attrs: DeclAttributes::empty(),
                kind: VarKind::Field,
                range: None,
            })
        })
        .collect();
    let mut decl = TypeDecl::opaque(Identifier::new(name), attrs);
    decl.fields = fields;
    let id = ctx.ast.alloc_type(decl);
    ctx.add_type(id);
    id
}

#[test]
fn aliases_resolve_inside_composites() {
    let mut ctx = ASTContext::new("t.sb");
    assert!(alias(&mut ctx, "Byte", DataType::INT8));
    assert!(alias(&mut ctx, "CString", DataType::pointer(custom("Byte"))));

    let callback = DataType::function(vec![custom("CString")], custom("Byte"));
    assert_eq!(
        ctx.canonical_type(&callback),
        DataType::function(vec![DataType::c_string()], DataType::INT8)
    );
    assert_eq!(
        ctx.canonical_type(&DataType::Tuple(vec![custom("Byte"), DataType::Bool])),
        DataType::Tuple(vec![DataType::INT8, DataType::Bool])
    );
    assert_eq!(ctx.canonical_type(&custom("Point")), custom("Point"));
}

#[test]
fn mutual_alias_cycle_is_rejected() {
    let mut ctx = ASTContext::new("t.sb");
    assert!(alias(&mut ctx, "A", custom("B")));
    assert!(!alias(&mut ctx, "B", custom("A")));
    assert_eq!(ctx.diag.error_count(), 1);
    assert_eq!(ctx.alias_bound("B"), None);
}

#[test]
fn alias_through_pointer_stays_nominal() {
    let mut ctx = ASTContext::new("t.sb");
    assert!(alias(&mut ctx, "List", DataType::pointer(custom("List"))));
    assert!(!ctx.diag.has_errors());
    assert_eq!(ctx.canonical_type(&custom("List")), custom("List"));
    assert!(ctx.is_valid_type(&custom("List")));
}

#[test]
fn validity_requires_declared_names() {
    let mut ctx = ASTContext::new("t.sb");
    record(&mut ctx, "Point", &[DataType::INT64], DeclAttributes::empty());
    alias(&mut ctx, "Handle", DataType::pointer(custom("Point")));

    assert!(ctx.is_valid_type(&DataType::pointer(custom("Handle"))));
    assert!(ctx.is_valid_type(&DataType::function(vec![DataType::Bool], DataType::Void)));
    assert!(!ctx.is_valid_type(&custom("Nope")));
    assert!(!ctx.is_valid_type(&DataType::Tuple(vec![DataType::INT8, custom("Nope")])));
}

#[test]
fn by_value_self_reference_is_circular() {
    let mut ctx = ASTContext::new("t.sb");
    let node = record(&mut ctx, "Node", &[custom("Node")], DeclAttributes::empty());
    let list = record(&mut ctx, "List", &[DataType::pointer(custom("List"))], DeclAttributes::empty());
    assert!(ctx.is_circular_type(node));
    assert!(!ctx.is_circular_type(list));
}

#[test]
fn circularity_through_other_types() {
    let mut ctx = ASTContext::new("t.sb");
    let a = record(&mut ctx, "A", &[custom("B")], DeclAttributes::empty());
    record(&mut ctx, "B", &[DataType::Tuple(vec![custom("A")])], DeclAttributes::empty());
    let c = record(&mut ctx, "C", &[custom("D")], DeclAttributes::empty());
    record(&mut ctx, "D", &[custom("C")], DeclAttributes::INDIRECT);

    assert!(ctx.is_circular_type(a));
    assert!(!ctx.is_circular_type(c));
}

#[test]
fn indirect_types_are_never_circular() {
    let mut ctx = ASTContext::new("t.sb");
    let tree = record(&mut ctx, "Tree", &[custom("Tree")], DeclAttributes::INDIRECT);
    assert!(!ctx.is_circular_type(tree));
    assert!(ctx.is_indirect(&custom("Tree")));
}

#[test]
fn coercions() {
    let ctx = ASTContext::new("t.sb");
    assert!(ctx.can_coerce(&DataType::INT64, &DataType::DOUBLE));
    assert!(ctx.can_coerce(&DataType::INT64, &DataType::c_string()));
    assert!(ctx.can_coerce(&DataType::c_string(), &DataType::pointer(DataType::Bool)));
    assert!(ctx.can_coerce(&DataType::Bool, &DataType::Any));
    assert!(!ctx.can_coerce(&DataType::Bool, &DataType::INT64));
    assert!(!ctx.can_coerce(&custom("Point"), &DataType::INT64));
}

#[test]
fn matches_after_resolution() {
    let mut ctx = ASTContext::new("t.sb");
    alias(&mut ctx, "Size", DataType::UINT64);
    assert!(ctx.matches(&custom("Size"), &DataType::UINT64));
    assert!(!ctx.matches(&custom("Size"), &DataType::INT64));
}

fn arb_type() -> impl Strategy<Value = DataType> {
    let leaf = prop_oneof![
        Just(DataType::INT64),
        Just(DataType::Bool),
        Just(custom("A")),
        Just(custom("B")),
        Just(custom("L")),
        Just(custom("Point")),
    ];
    leaf.prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(DataType::pointer),
            prop::collection::vec(inner.clone(), 0..3).prop_map(DataType::Tuple),
            (prop::collection::vec(inner.clone(), 0..3), inner)
                .prop_map(|(args, ret)| DataType::function(args, ret)),
        ]
    })
}

proptest! {
    #[test]
    fn canonicalization_is_idempotent(ty in arb_type()) {
        let mut ctx = ASTContext::new("t.sb");
        alias(&mut ctx, "A", DataType::pointer(custom("B")));
        alias(&mut ctx, "B", DataType::Tuple(vec![DataType::INT8, custom("L")]));
        alias(&mut ctx, "L", DataType::pointer(custom("L")));

        let once = ctx.canonical_type(&ty);
        prop_assert_eq!(ctx.canonical_type(&once), once.clone());
        prop_assert!(ctx.matches(&ty, &once));
    }
}
