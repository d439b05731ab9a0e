use pretty_assertions::assert_eq;
use shiba_ir::{DataType, DeclAttributes, FuncKind, VarKind};

use super::{function, messages, parse, render};

const POINT: &str = "\
typedef Point {
  let x: Int
  mut y: Int
  init(value: Int) {
    self.x = value
    self.y = value
  }
  fn sum() -> Int { return self.x + self.y }
  mutating fn reset() { self.y = 0 }
  static fn origin() -> Point { return Point(x: 0, y: 0) }
  deinit {
  }
}
";

#[test]
fn function_signatures() {
    let ctx = parse("fn add(a: Int, to b: Int, _ c: Int8, _: Bool) -> Int {\n  return a\n}");
    assert_eq!(messages(&ctx), Vec::<String>::new());
    let func = function(&ctx, "add");
    assert_eq!(func.kind, FuncKind::Free);
    assert_eq!(func.ret.ty, DataType::INT64);

    let args: Vec<(String, Option<String>)> = func
        .args
        .iter()
        .map(|&arg| {
            let var = ctx.ast.var(arg);
            (var.name.name.clone(), var.external_name().map(|e| e.name.clone()))
        })
        .collect();
    assert_eq!(
        args,
        vec![
            ("a".to_owned(), Some("a".to_owned())),
            ("b".to_owned(), Some("to".to_owned())),
            ("c".to_owned(), None),
            ("_".to_owned(), None),
        ]
    );
}

#[test]
fn foreign_declarations_have_no_body() {
    let ctx = parse("foreign fn printf(_ format: *Int8, ...) -> Int32\nforeign fn exit(_ code: Int32)");
    assert_eq!(messages(&ctx), Vec::<String>::new());
    let printf = function(&ctx, "printf");
    assert!(printf.has_varargs);
    assert!(printf.body.is_none());
    assert!(printf.has(DeclAttributes::FOREIGN));
    assert!(function(&ctx, "exit").ret.ty.is_void());
}

#[test]
fn type_members() {
    let ctx = parse(POINT);
    assert_eq!(messages(&ctx), Vec::<String>::new());
    let [id] = ctx.types() else {
        panic!("expected one type");
    };
    let decl = ctx.ast.type_decl(*id);
    assert_eq!(decl.name.name, "Point");
    assert_eq!(decl.fields.len(), 2);
    assert!(decl
        .fields
        .iter()
        .all(|&field| ctx.ast.var(field).kind == VarKind::Field));
    assert_eq!(decl.methods.len(), 3);
    assert_eq!(decl.initializers.len(), 2);
    assert!(decl.deinit.is_some());

    let owner = DataType::Custom("Point".into());
    let method = |name: &str| {
        decl.methods
            .iter()
            .map(|&m| ctx.ast.func(m))
            .find(|m| m.name.name == name)
            .unwrap()
    };
    let sum = method("sum");
    assert_eq!(sum.kind, FuncKind::Method(owner.clone()));
    let receiver = ctx.ast.var(sum.self_arg.unwrap());
    assert!(receiver.is_implicit_self());
    assert!(!receiver.mutable);
    assert_eq!(receiver.type_ref.as_ref().unwrap().ty, owner);

    assert!(ctx.ast.var(method("reset").self_arg.unwrap()).mutable);
    assert!(method("origin").self_arg.is_none());

    let deinit = ctx.ast.func(decl.deinit.unwrap());
    assert_eq!(deinit.kind, FuncKind::Deinitializer(owner.clone()));
    assert!(deinit.self_arg.is_some());

    let init = ctx.ast.func(decl.initializers[0]);
    assert!(init.self_arg.is_none());
    assert_eq!(init.ret.ty, owner);
    assert!(!init.has(DeclAttributes::IMPLICIT));
}

#[test]
fn memberwise_initializer_is_synthesized() {
    let ctx = parse(POINT);
    let decl = ctx.ast.type_decl(ctx.types()[0]);
    let init = ctx.ast.func(*decl.initializers.last().unwrap());

    assert!(init.has(DeclAttributes::IMPLICIT));
    assert_eq!(init.kind, FuncKind::Initializer(DataType::Custom("Point".into())));
    let labels: Vec<_> = init
        .args
        .iter()
        .map(|&arg| ctx.ast.var(arg).external_name().unwrap().name.clone())
        .collect();
    assert_eq!(labels, vec!["x", "y"]);
    assert_eq!(
        render(&ctx.ast, init.body.unwrap()),
        "{(= (. self x) x); (= (. self y) y)}"
    );
}

#[test]
fn foreign_types() {
    let ctx = parse("foreign typedef FILE\nforeign typedef Timeval {\n  let sec: Int\n}");
    assert_eq!(messages(&ctx), Vec::<String>::new());
    assert_eq!(ctx.types().len(), 2);
    for &id in ctx.types() {
        let decl = ctx.ast.type_decl(id);
        assert!(decl.attrs.contains(DeclAttributes::FOREIGN));
        assert!(decl.initializers.is_empty());
    }
}

#[test]
fn indirect_types() {
    let ctx = parse("indirect typedef Node {\n  let next: *Node\n}");
    assert_eq!(messages(&ctx), Vec::<String>::new());
    assert!(ctx.ast.type_decl(ctx.types()[0]).is_indirect());
}

#[test]
fn duplicate_deinit() {
    let ctx = parse("typedef T {\n  deinit {}\n  deinit {}\n}");
    assert_eq!(messages(&ctx), vec!["cannot have multiple 'deinit's within a type"]);
}

#[test]
fn aliases() {
    let ctx = parse("typedef Size = UInt\ntypedef Callback = (*Int8) -> Void");
    assert_eq!(messages(&ctx), Vec::<String>::new());
    assert_eq!(ctx.alias_bound("Size"), Some(&DataType::UINT64));
    assert_eq!(
        ctx.alias_bound("Callback"),
        Some(&DataType::function(vec![DataType::c_string()], DataType::Void))
    );
}

#[test]
fn extensions() {
    let ctx = parse("extension Point {\n  fn twice() -> Int { return 2 }\n  static fn zero() -> Int { return 0 }\n}");
    assert_eq!(messages(&ctx), Vec::<String>::new());
    let [extension] = ctx.extensions() else {
        panic!("expected one extension");
    };
    assert_eq!(extension.type_ref.ty, DataType::Custom("Point".into()));
    assert_eq!(extension.methods.len(), 2);
    let twice = ctx.ast.func(extension.methods[0]);
    assert_eq!(twice.kind, FuncKind::Method(DataType::Custom("Point".into())));
    assert!(twice.self_arg.is_some());
}

#[test]
fn extensions_only_hold_functions() {
    let ctx = parse("extension Point {\n  let x: Int\n}");
    assert_eq!(messages(&ctx), vec!["unexpected expression (expected 'function')"]);
}

#[test]
fn globals() {
    let ctx = parse("let limit: Int = 10\nmut counter = 0\nforeign let errno: Int32");
    assert_eq!(messages(&ctx), Vec::<String>::new());
    assert_eq!(ctx.globals().len(), 3);
    let counter = ctx.ast.var(ctx.global("counter").unwrap());
    assert!(counter.mutable);
    assert_eq!(counter.kind, VarKind::Global);
}

#[test]
fn top_level_pound_diagnostics_are_deferred() {
    let ctx = parse("#warning \"careful\"\ntypedef T {\n  #error \"inside\"\n}");
    assert_eq!(messages(&ctx), Vec::<String>::new());
    let pending: Vec<_> = ctx
        .pending_diagnostics()
        .iter()
        .map(|d| (d.is_error, d.content.as_str()))
        .collect();
    assert_eq!(pending, vec![(false, "careful"), (true, "inside")]);
}

#[test]
fn attributes_are_checked_against_the_declaration() {
    let ctx = parse("indirect fn f() {}");
    assert_eq!(messages(&ctx), vec!["'indirect' is not valid on functions"]);

    let ctx = parse("mutating let x: Int = 1");
    assert_eq!(messages(&ctx), vec!["'mutating' is not valid on variables"]);
}

#[test]
fn items_need_separators() {
    let ctx = parse("fn f() {} fn g() {}");
    assert_eq!(messages(&ctx), vec!["missing line separator"]);
    assert_eq!(ctx.functions().len(), 1);
}
