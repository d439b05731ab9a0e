use pretty_assertions::assert_eq;
use shiba_context::Callee;
use shiba_ir::{DeclAttributes, ExprKind};

use super::{bind, body, initializer, messages, warnings};

#[test]
fn function_bodies() {
    let ctx = bind(
        "foreign fn f() {}
fn g() -> Int
foreign fn puts(_ s: *Int8) -> Int32",
    );
    assert_eq!(
        messages(&ctx),
        vec![
            "foreign function 'f' cannot have a body",
            "function 'g' must have a body",
        ]
    );
}

#[test]
fn varargs_are_foreign_only() {
    let ctx = bind(
        "foreign fn printf(_ format: *Int8, ...) -> Int32
fn log(_ format: *Int8, ...) {}",
    );
    assert_eq!(
        messages(&ctx),
        vec!["varargs in non-foreign declarations are not yet supported"]
    );
}

#[test]
fn varargs_accept_extra_arguments() {
    let ctx = bind(
        "foreign fn printf(_ format: *Int8, ...) -> Int32
fn main() {
  printf(\"%d %d\", 1, true)
}",
    );
    assert_eq!(messages(&ctx), Vec::<String>::new());
    let call = body(&ctx, "main")[0];
    assert_eq!(
        ctx.ann.callees.get(&call),
        Some(&Callee::Func(ctx.functions_named("printf")[0]))
    );
}

#[test]
fn unknown_types_in_signatures() {
    let ctx = bind(
        "fn f(_ x: Nope) {}
fn g() -> *Missing {}
typedef Handle = Gone",
    );
    assert_eq!(
        messages(&ctx),
        vec![
            "unknown type 'Nope'",
            "unknown type '*Missing'",
            "unknown type 'Gone'",
        ]
    );
}

#[test]
fn aliases_resolve_to_their_bound() {
    let ctx = bind(
        "typedef Byte = Int8
typedef Bytes = *Byte
fn f(_ p: Bytes) -> Byte {
  return p[0]
}",
    );
    assert_eq!(messages(&ctx), Vec::<String>::new());
}

#[test]
fn foreign_variables_have_no_value() {
    let ctx = bind(
        "foreign let errno: Int32
foreign let x: Int = 3",
    );
    assert_eq!(messages(&ctx), vec!["foreign var 'x' cannot have a value"]);
}

#[test]
fn inferred_variable_types() {
    let ctx = bind(
        "let greeting = \"hi\"
fn f() {
  let copy = greeting
}",
    );
    assert_eq!(messages(&ctx), Vec::<String>::new());
    let copy = body(&ctx, "f")[0];
    let ExprKind::VarDecl(var) = ctx.ast.expr(copy).kind else {
        panic!("not a declaration");
    };
    assert_eq!(ctx.ann.var_types.get(&var).map(ToString::to_string), Some("*Int8".to_owned()));
    assert_eq!(
        ctx.ann.type_of(initializer(&ctx, copy)).map(ToString::to_string),
        Some("*Int8".to_owned())
    );
}

#[test]
fn deinitializers_need_indirect_types() {
    let ctx = bind(
        "typedef T {
  let a: Int
  deinit {}
}
indirect typedef U {
  let a: Int
  deinit {}
}",
    );
    assert_eq!(
        messages(&ctx),
        vec!["cannot have a deinitializer in non-indirect type 'T'"]
    );
}

#[test]
fn duplicate_members() {
    let ctx = bind(
        "typedef T {
  let a: Int
  let a: Int
  fn f() {}
  fn f(_ x: Int) {}
}
extension T {
  fn f() {}
}",
    );
    assert_eq!(
        messages(&ctx),
        vec![
            "invalid redeclaration of field 'a' on type 'T'",
            "invalid redeclaration of method 'f' on type 'T'",
        ]
    );
}

#[test]
fn duplicate_methods_on_primitive_types() {
    let ctx = bind(
        "extension Int {
  fn d() -> Int { return self }
}
extension Int {
  fn d() -> Int { return self }
  fn d(_ by: Int) -> Int { return self + by }
}",
    );
    assert_eq!(
        messages(&ctx),
        vec!["invalid redeclaration of method 'd' on type 'Int'"]
    );
    assert_eq!(ctx.diag.sorted_diagnostics()[0].location.unwrap().line, 5);
}

#[test]
fn unknown_extension_target() {
    let ctx = bind(
        "extension Nope {
  fn f() {}
}",
    );
    assert_eq!(messages(&ctx), vec!["unknown type 'Nope'"]);
}

#[test]
fn circular_types() {
    let ctx = bind(
        "typedef A {
  let a: A
}
typedef Node {
  let next: *Node
}
indirect typedef List {
  let rest: List
}
typedef Pair {
  let inner: (Int, Outer)
}
typedef Outer {
  let pair: Pair
}",
    );
    assert_eq!(
        messages(&ctx),
        vec![
            "type 'A' cannot have a property that reference itself",
            "type 'Pair' cannot have a property that reference itself",
            "type 'Outer' cannot have a property that reference itself",
        ]
    );
}

#[test]
fn extension_methods_are_callable() {
    let ctx = bind(
        "typedef V {
  let x: Int
}
extension V {
  fn doubled() -> Int { return self.x * 2 }
}
fn main() {
  let v = V(x: 1)
  let d = v.doubled()
}",
    );
    assert_eq!(messages(&ctx), Vec::<String>::new());
    let call = initializer(&ctx, body(&ctx, "main")[1]);
    let extension = &ctx.extensions()[0];
    assert_eq!(
        ctx.ann.callees.get(&call),
        Some(&Callee::Func(extension.methods[0]))
    );
}

#[test]
fn static_methods_are_called_on_the_type() {
    let ctx = bind(
        "typedef V {
  let x: Int
  static fn zero() -> V { return V(x: 0) }
  fn get() -> Int { return self.x }
}
fn main() {
  let v = V.zero()
  let w = V.get()
  let u = v.zero()
}",
    );
    assert_eq!(
        messages(&ctx),
        vec!["unknown function 'get'", "unknown function 'zero'"]
    );
    let call = initializer(&ctx, body(&ctx, "main")[0]);
    let Some(Callee::Func(zero)) = ctx.ann.callees.get(&call) else {
        panic!("V.zero() was not resolved");
    };
    assert!(ctx.ast.func(*zero).has(DeclAttributes::STATIC));
    assert_eq!(ctx.ann.type_of(call).map(ToString::to_string), Some("V".to_owned()));
}

#[test]
fn memberwise_initializer_takes_labels() {
    let ctx = bind(
        "typedef Point {
  let x: Int
  let y: Int
}
fn main() {
  let p = Point(x: 1, y: 2)
  let q = Point(1, 2)
}",
    );
    assert_eq!(
        messages(&ctx),
        vec!["could not find a viable overload for Point with arguments of type (Int, Int)"]
    );
}

#[test]
fn pound_diagnostics_are_reported() {
    let ctx = bind(
        "#warning \"careful\"
fn f() {
  #error \"stop\"
}",
    );
    assert_eq!(warnings(&ctx), vec!["careful"]);
    assert_eq!(messages(&ctx), vec!["careful", "stop"]);
}
