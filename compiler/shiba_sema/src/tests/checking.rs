use pretty_assertions::assert_eq;

use super::{check, messages};

#[test]
fn clean_program() {
    let ctx = check(
        "foreign fn printf(_ format: *Int8, ...) -> Int32
typedef Point {
  let x: Int
  let y: Int
  fn sum() -> Int { return self.x + self.y }
}
fn main() -> Int {
  let p = Point(x: 1, y: 2)
  mut total: Int8 = 0
  for let i = 0; i < p.sum(); i += 1 {
    total += 1
  }
  printf(\"%d\", p.sum())
  return 0
}",
    );
    assert_eq!(messages(&ctx), Vec::<String>::new());
}

#[test]
fn literal_overflow() {
    let ctx = check(
        "fn f(_ x: Int8) {}
fn main() {
  let a: Int8 = 200
  let b: UInt8 = -1
  let c: Int8 = 100
  let d: Int8 = -128
  f(300)
}",
    );
    assert_eq!(
        messages(&ctx),
        vec![
            "value '200' overflows when stored into 'Int8'",
            "value '-1' overflows when stored into 'UInt8'",
            "value '300' overflows when stored into 'Int8'",
        ]
    );
}

#[test]
fn extra_argument_label() {
    let ctx = check(
        "fn f(_ x: Int) {}
fn main() {
  f(y: 1)
}",
    );
    assert_eq!(messages(&ctx), vec!["extra argument label (got 'y')"]);
}

#[test]
fn conditions_must_be_bool() {
    let ctx = check(
        "fn main() {
  if 1 {}
  while 2 {}
  let t = 3 ? 4 : 5
}",
    );
    assert_eq!(
        messages(&ctx),
        vec![
            "if condition must be a Bool (got 'Int')",
            "if condition must be a Bool (got 'Int')",
            "ternary condition must be a Bool (got 'Int')",
        ]
    );
}

#[test]
fn mismatched_values() {
    let ctx = check(
        "let x: Int = true
fn f() -> Int {
  return true
}
fn g(_ b: Bool) {
  let y = b ? 1 : false
  switch b {
  case 1:
    break
  default:
    break
  }
  let c = { () -> Int in return b }
}",
    );
    assert_eq!(
        messages(&ctx),
        vec![
            "type mismatch (expected value of type 'Int', got 'Bool')",
            "type mismatch (expected value of type 'Int', got 'Bool')",
            "type mismatch (expected value of type 'Int', got 'Bool')",
            "type mismatch (expected value of type 'Bool', got 'Int')",
            "type mismatch (expected value of type 'Int', got 'Bool')",
        ]
    );
}

#[test]
fn binary_operands_must_agree() {
    let ctx = check(
        "fn f(_ p: *Int) {
  let z = 1 + true
  let q = p + 2
  let n: Int8 = 1
  let m = n * 3
}",
    );
    assert_eq!(
        messages(&ctx),
        vec!["cannot apply binary operator '+' to operands of type 'Int' and 'Bool'"]
    );
}

#[test]
fn subscript_index_must_be_int() {
    let ctx = check(
        "fn g(_ p: *Int) {
  let v = p[true]
  let w = p[1]
}",
    );
    assert_eq!(messages(&ctx), vec!["cannot subscript with argument of type Bool"]);
}

#[test]
fn binding_errors_stop_before_checking() {
    let ctx = check(
        "let x: Int = true
fn f() {
  nope()
}",
    );
    assert_eq!(messages(&ctx), vec!["unknown function 'nope'"]);
}
