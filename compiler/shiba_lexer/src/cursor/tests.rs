use super::*;
use pretty_assertions::assert_eq;

#[test]
fn tracks_lines_and_columns() {
    let mut cursor = Cursor::new("ab\ncd");
    cursor.bump_n(2);
    assert_eq!(cursor.location(), SourceLocation::new(1, 3, 2));
    cursor.bump();
    assert_eq!(cursor.location(), SourceLocation::new(2, 1, 3));
    assert_eq!(cursor.current(), Some('c'));
    assert_eq!(cursor.peek(1), Some('d'));
    assert_eq!(cursor.peek(2), None);
}

#[test]
fn counts_scalars_not_bytes() {
    let mut cursor = Cursor::new("é=1");
    cursor.bump();
    assert_eq!(cursor.location().char_offset, 1);
    assert_eq!(cursor.location().column, 2);
}

#[test]
fn eat_while_stops_at_predicate() {
    let mut cursor = Cursor::new("abc1 rest");
    assert_eq!(cursor.eat_while(char::is_alphanumeric), "abc1");
    assert_eq!(cursor.current(), Some(' '));
    assert!(!cursor.is_eof());
}
