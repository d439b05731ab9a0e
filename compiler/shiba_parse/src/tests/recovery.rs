use pretty_assertions::assert_eq;

use super::{messages, parse};

#[test]
fn resumes_at_the_next_item() {
    let ctx = parse("fn broken() {\n  let = 3\n}\nfn ok() {\n}");
    assert_eq!(messages(&ctx), vec!["expected identifier (got '=')"]);
    assert_eq!(ctx.functions_named("ok").len(), 1);
    assert!(ctx.functions_named("broken").is_empty());
}

#[test]
fn skips_item_keywords_nested_in_braces() {
    let source = "fn broken() {\n  if x {\n    let = 1\n  }\n  let y = 2\n}\nfn ok() {}";
    let ctx = parse(source);
    assert_eq!(messages(&ctx).len(), 1);
    assert_eq!(ctx.functions().len(), 1);
    assert_eq!(ctx.functions_named("ok").len(), 1);
}

#[test]
fn reports_every_broken_item() {
    let ctx = parse("fn a() { ) }\nfn b() {}\ntypedef = 3\nfn c() {}");
    assert_eq!(
        messages(&ctx),
        vec![
            "unexpected expression (expected 'value')",
            "expected identifier (got '=')",
        ]
    );
    assert_eq!(ctx.functions().len(), 2);
}

#[test]
fn junk_at_top_level() {
    let ctx = parse("42\nfn ok() {}");
    assert_eq!(
        messages(&ctx),
        vec!["unexpected expression (expected 'function, type, or extension')"]
    );
    assert_eq!(ctx.functions().len(), 1);
}

#[test]
fn attributes_start_items_after_an_error() {
    let ctx = parse("fn broken( {\n}\nforeign fn puts(_ s: *Int8) -> Int32");
    assert_eq!(messages(&ctx).len(), 1);
    assert_eq!(ctx.functions_named("puts").len(), 1);
}

#[test]
fn lex_errors_are_reported_alongside() {
    let ctx = parse("fn f() {\n  let c = 'ab'\n}");
    assert!(!messages(&ctx).is_empty());
    assert!(ctx.diag.has_errors());
}
