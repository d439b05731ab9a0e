use super::*;
use pretty_assertions::assert_eq;
use shiba_ir::{FuncDecl, Identifier, TypeAlias, TypeRef, VarDecl};

fn arg(ctx: &mut ASTContext, external: Option<&str>, name: &str, ty: DataType) -> shiba_ir::VarId {
    ctx.ast.alloc_var(VarDecl::argument(
        Identifier::new(name),
        external.map(Identifier::new),
        TypeRef::synthesized(ty),
        false,
    ))
}

fn func(ctx: &mut ASTContext, name: &str, kind: FuncKind, args: Vec<shiba_ir::VarId>, ret: DataType) -> FuncId {
    ctx.ast.alloc_func(FuncDecl {
        name: Identifier::new(name),
        self_arg: None,
        args,
        ret: TypeRef::synthesized(ret),
        body: None,
        kind,
        attrs: DeclAttributes::empty(),
        has_varargs: false,
        range: None,
    })
}

#[test]
fn free_function_labels() {
    let mut ctx = ASTContext::new("t.sb");
    let a = arg(&mut ctx, Some("a"), "a", DataType::INT64);
    let b = arg(&mut ctx, None, "b", DataType::INT64);
    let c = arg(&mut ctx, Some("to"), "c", DataType::c_string());
    let add = func(&mut ctx, "add", FuncKind::Free, vec![a, b, c], DataType::INT64);

    assert_eq!(
        Mangler::new(&ctx).function(add),
        "_WF3addS1asI1bsIE2to1cP1Tsi8_RsI"
    );
}

#[test]
fn roles_and_receivers() {
    let mut ctx = ASTContext::new("t.sb");
    let point = DataType::Custom("Point".into());
    let x = arg(&mut ctx, Some("x"), "x", DataType::DOUBLE);
    let init = func(&mut ctx, "init", FuncKind::Initializer(point.clone()), vec![x], DataType::Void);
    let len = func(&mut ctx, "len", FuncKind::Method(point.clone()), Vec::new(), DataType::UINT32);
    let deinit = func(&mut ctx, "deinit", FuncKind::Deinitializer(point), Vec::new(), DataType::Void);

    let mangler = Mangler::new(&ctx);
    assert_eq!(mangler.function(init), "_WFI5PointS1xsd_");
    assert_eq!(mangler.function(len), "_WFM5Point3len_Rsu32");
    assert_eq!(mangler.function(deinit), "_WFD5Point");
    assert_eq!(mangler.closure(len), "_WCM5Point3len_Rsu32");
}

#[test]
fn foreign_functions_keep_their_name() {
    let mut ctx = ASTContext::new("t.sb");
    let s = arg(&mut ctx, None, "s", DataType::c_string());
    let puts = func(&mut ctx, "puts", FuncKind::Free, vec![s], DataType::INT32);
    ctx.ast.func_mut(puts).attrs = DeclAttributes::FOREIGN;
    assert_eq!(Mangler::new(&ctx).function(puts), "puts");
}

#[test]
fn types() {
    let ctx = ASTContext::new("t.sb");
    let mangler = Mangler::new(&ctx);
    assert_eq!(mangler.ty(&DataType::pointer(DataType::c_string())), "_WTP2Tsi8");
    assert_eq!(
        mangler.ty(&DataType::function(vec![DataType::Bool], DataType::Void)),
        "_WTFsbRsv"
    );
    assert_eq!(
        mangler.ty(&DataType::Tuple(vec![DataType::FLOAT, DataType::FLOAT80])),
        "_WTtsfsFT"
    );
    assert_eq!(mangler.ty(&DataType::Custom("Node".into())), "_WT4Node");
}

#[test]
fn aliases_mangle_as_their_target() {
    let mut ctx = ASTContext::new("t.sb");
    ctx.add_alias(TypeAlias {
        name: Identifier::new("Size"),
        bound: TypeRef::synthesized(DataType::UINT64),
        range: None,
    });
    let mangler = Mangler::new(&ctx);
    assert_eq!(mangler.ty(&DataType::Custom("Size".into())), "_WTsU");
}

#[test]
fn overloads_by_arity_do_not_collide() {
    let mut ctx = ASTContext::new("t.sb");
    let a1 = arg(&mut ctx, Some("a"), "a", DataType::INT64);
    let one = func(&mut ctx, "f", FuncKind::Free, vec![a1], DataType::Void);
    let a2 = arg(&mut ctx, Some("a"), "a", DataType::INT64);
    let b2 = arg(&mut ctx, Some("b"), "b", DataType::INT64);
    let two = func(&mut ctx, "f", FuncKind::Free, vec![a2, b2], DataType::Void);
    let s = arg(&mut ctx, Some("a"), "a", DataType::INT32);
    let narrow = func(&mut ctx, "f", FuncKind::Free, vec![s], DataType::Void);

    let mangler = Mangler::new(&ctx);
    let names = [mangler.function(one), mangler.function(two), mangler.function(narrow)];
    assert_ne!(names[0], names[1]);
    assert_ne!(names[0], names[2]);
    assert_ne!(names[1], names[2]);
}
