//! Error recovery for the parser.

use shiba_ir::{DeclAttribute, Punctuation, TokenKind};

use crate::cursor::Cursor;

/// Whether `kind` may begin a top-level item.
fn starts_item(kind: &TokenKind) -> bool {
    match kind {
        TokenKind::Keyword(keyword) => keyword.starts_item(),
        TokenKind::Identifier(name) => DeclAttribute::from_name(name).is_some(),
        _ => false,
    }
}

/// Skip to the next token that can start a top-level item on a fresh line,
/// outside any braces opened since `item_start`.
///
/// Always makes progress, so a stuck item cannot loop forever.
pub fn synchronize(cursor: &mut Cursor, item_start: usize) {
    let mut depth = cursor.brace_depth_since(item_start).max(0);
    if cursor.position() == item_start {
        step(cursor, &mut depth);
    }
    while !cursor.is_at_end() {
        if depth == 0 && cursor.after_separator() && starts_item(cursor.current_kind()) {
            return;
        }
        step(cursor, &mut depth);
    }
}

fn step(cursor: &mut Cursor, depth: &mut i32) {
    match cursor.current_kind() {
        TokenKind::Punctuation(Punctuation::LeftBrace) => *depth += 1,
        TokenKind::Punctuation(Punctuation::RightBrace) => *depth = (*depth - 1).max(0),
        _ => {}
    }
    cursor.bump_raw();
}
