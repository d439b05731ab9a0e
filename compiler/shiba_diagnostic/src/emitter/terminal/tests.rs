#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;
use shiba_ir::SourceRange;

const SOURCE: &str = "fn main() {\n    let x = cout + 1\n}\n";

fn unknown_cout() -> Diagnostic {
    let start = SourceLocation::new(2, 13, 24);
    let end = SourceLocation::new(2, 17, 28);
    Diagnostic::error("unknown variable 'cout'").at_range(Some(SourceRange::new(start, end)))
}

fn render(diagnostic: &Diagnostic, mode: ColorMode) -> String {
    let mut consumer = StreamConsumer::new(Vec::new(), "src/demo/main.sb", SOURCE, mode, false);
    consumer.consume(diagnostic);
    consumer.finish();
    String::from_utf8(consumer.into_inner()).unwrap()
}

#[test]
fn plain_rendering_has_header_line_and_marker() {
    assert_eq!(
        render(&unknown_cout(), ColorMode::Never),
        "main.sb:2:13: error: unknown variable 'cout'\n    let x = cout + 1\n            ^~~~\n"
    );
}

#[test]
fn unlocated_diagnostic_has_header_only() {
    let diag = Diagnostic::warning("no main function");
    assert_eq!(
        render(&diag, ColorMode::Never),
        "main.sb: warning: no main function\n"
    );
}

#[test]
fn colors_only_when_enabled() {
    let colored = render(&unknown_cout(), ColorMode::Always);
    assert!(colored.contains("\x1b[1;31merror:\x1b[0m"));
    assert!(colored.contains("\x1b[1;35m"));

    let auto_on_pipe = render(&unknown_cout(), ColorMode::Auto);
    assert!(!auto_on_pipe.contains("\x1b["));
}

#[test]
fn caret_without_highlights() {
    let diag = Diagnostic::error("expected '}'").at(SourceLocation::new(3, 1, 29));
    assert_eq!(
        render(&diag, ColorMode::Never),
        "main.sb:3:1: error: expected '}'\n}\n^\n"
    );
}

#[test]
fn color_flag_parsing() {
    assert_eq!(ColorMode::from_flag("always"), Some(ColorMode::Always));
    assert_eq!(ColorMode::from_flag("never"), Some(ColorMode::Never));
    assert_eq!(ColorMode::from_flag("auto"), Some(ColorMode::Auto));
    assert_eq!(ColorMode::from_flag("sometimes"), None);
}
