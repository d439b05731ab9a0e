//! Whole-pipeline tests through the public entry points.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use shiba_context::Mangler;
use shiba_diagnostic::{ColorMode, DiagnosticConsumer, Severity, StreamConsumer};
use shibac::{compile, Compilation};

const LIST: &str = r#"foreign fn printf(_ format: *Int8, ...) -> Int32
foreign fn malloc(_ size: Int) -> *Int8
foreign fn free(_ ptr: *Int8)

indirect typedef Buffer {
  mut data: *Int
  mut count: Int
  mut capacity: Int

  init(capacity: Int) {
    self.data = malloc(capacity * sizeof(Int)) as *Int
    self.count = 0
    self.capacity = capacity
  }

  fn append(_ value: Int) {
    if self.count == self.capacity {
      return
    }
    self.data[self.count] = value
    self.count += 1
  }

  fn sum() -> Int {
    mut total = 0
    for let i = 0; i < self.count; i += 1 {
      total += self.data[i]
    }
    return total
  }

  deinit {
    free(self.data as *Int8)
  }
}

typedef Pair = (Int, Int)

fn minmax(_ buffer: Buffer) -> Pair {
  mut low = buffer.data[0]
  mut high = low
  for let i = 1; i < buffer.count; i += 1 {
    let value = buffer.data[i]
    low = value < low ? value : low
    high = value > high ? value : high
  }
  return (low, high)
}

fn main() -> Int {
  let buffer = Buffer(capacity: 8)
  buffer.append(3)
  buffer.append(-4)
  buffer.append(10)
  let pair = minmax(buffer)
  let describe = { (label: *Int8, value: Int) -> Void in
    printf("%s: %d\n", label, value)
  }
  describe("sum", buffer.sum())
  describe("low", pair.0)
  printf("%s\n", #function)
  return 0
}
"#;

fn messages(source: &str) -> Vec<String> {
    compile(source, "test.sh")
        .diagnostics
        .into_iter()
        .map(|d| d.message)
        .collect()
}

#[test]
fn realistic_program_compiles_cleanly() {
    let output = compile(LIST, "list.sh");
    assert_eq!(
        output.diagnostics.iter().map(|d| d.message.clone()).collect::<Vec<_>>(),
        Vec::<String>::new()
    );
    let ctx = output.context.expect("context of a clean compilation");
    assert!(ctx.main_function().is_some());
}

#[test]
fn lexing_errors_are_reported_with_parse_errors() {
    let output = compile("let c = '\\q'\nlet n = 0xZZ\n", "bad.sh");
    assert!(output.context.is_none());
    assert!(output.diagnostics.iter().all(|d| d.severity == Severity::Error));
    assert!(!output.diagnostics.is_empty());
}

#[test]
fn diagnostics_are_position_ordered() {
    let source = "fn f() -> Int {
  return 1
  let x = 2
}
fn g() {
  nope()
}
#warning \"late\"";
    let output = compile(source, "order.sh");
    let seen: Vec<(Severity, u32, &str)> = output
        .diagnostics
        .iter()
        .map(|d| (d.severity, d.location.unwrap().line, d.message.as_str()))
        .collect();
    assert_eq!(
        seen,
        vec![
            (Severity::Warning, 3, "code after return will not be executed"),
            (Severity::Error, 6, "unknown function 'nope'"),
            (Severity::Warning, 8, "late"),
        ]
    );
}

#[test]
fn registration_errors() {
    assert_eq!(
        messages("typedef A = B\ntypedef B = A\nfn main() {}"),
        vec!["declaration of 'B' is circular"]
    );
    assert_eq!(
        messages("fn main(_ x: Bool) {}"),
        vec![
            "invalid main (must be () -> Void, () -> Int, (Int, **Int8) -> Void or \
             (Int, **Int8) -> Int, got (Bool) -> Void)"
        ]
    );
}

#[test]
fn verification_runs_only_after_clean_binding() {
    let clean = messages("fn f() -> Int8 { return 300 }");
    assert_eq!(clean, vec!["value '300' overflows when stored into 'Int8'"]);

    let halted = messages("fn f() -> Int8 { return 300 }\nfn g() { nope() }");
    assert_eq!(halted, vec!["unknown function 'nope'"]);
}

#[test]
fn mangled_names_of_parsed_declarations() {
    let output = compile(
        "fn add(a: Int, _ b: Int, to c: *Int8) -> Int { return a + b }
typedef Point {
  let x: Double
}",
        "mangle.sh",
    );
    let ctx = output.context.unwrap();
    let mangler = Mangler::new(&ctx);
    let add = ctx.functions_named("add")[0];
    assert_eq!(mangler.function(add), "_WF3addS1asI1bsIE2to1cP1Tsi8_RsI");

    let point = ctx.types()[0];
    let init = ctx.ast.type_decl(point).initializers[0];
    assert_eq!(mangler.function(init), "_WFI5PointS1xsd_");
}

#[test]
fn rendered_output_points_at_the_problem() {
    let source = "fn main() {\n  let x: Int8 = true as Nope\n}";
    let mut compilation = Compilation::new(source, "dir/render.sh");
    compilation.run();

    let mut consumer = StreamConsumer::new(Vec::new(), "dir/render.sh", source, ColorMode::Never, false);
    for diagnostic in compilation.diagnostics() {
        consumer.consume(&diagnostic);
    }
    let rendered = String::from_utf8(consumer.into_inner()).unwrap();
    let mut lines = rendered.lines();
    assert_eq!(lines.next(), Some("render.sh:2:25: error: unknown type 'Nope'"));
    assert_eq!(lines.next(), Some("  let x: Int8 = true as Nope"));
}
