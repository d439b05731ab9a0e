//! Declaration attributes.
//!
//! Attributes are plain identifiers written before a declaration. They are
//! checked against the kind of declaration that follows as soon as it is
//! known, so misuse is a syntax error rather than a semantic one.

use shiba_diagnostic::Diagnostic;
use shiba_ir::{DeclAttribute, DeclAttributes, DeclContextKind, Keyword, TokenKind};

use crate::{ParseError, ParseResult, Parser};

impl Parser<'_> {
    /// Parse `attr*` and validate it against the next declaration keyword.
    pub(crate) fn parse_attributes(&mut self) -> ParseResult<DeclAttributes> {
        let mut written = Vec::new();
        while let TokenKind::Identifier(name) = self.current_kind() {
            let Some(attr) = DeclAttribute::from_name(name) else {
                break;
            };
            let token = self.cursor.advance();
            written.push((attr, token.range));
        }
        if written.is_empty() {
            return Ok(DeclAttributes::empty());
        }

        let Some(kind) = self.next_decl_kind() else {
            return Err(self.unexpected_token());
        };
        let mut attrs = DeclAttributes::empty();
        for (attr, range) in written {
            if !attr.is_valid_on(kind) {
                let error = ParseError::InvalidAttribute { attr, kind };
                return Err(Diagnostic::error(error.to_string())
                    .at(range.start)
                    .with_highlight(range));
            }
            attrs |= attr.flag();
        }
        Ok(attrs)
    }

    fn next_decl_kind(&self) -> Option<DeclContextKind> {
        let TokenKind::Keyword(keyword) = self.current_kind() else {
            return None;
        };
        Some(match keyword {
            Keyword::Fn | Keyword::Init | Keyword::Deinit => DeclContextKind::Function,
            Keyword::Let | Keyword::Mut => DeclContextKind::Variable,
            Keyword::Typedef => DeclContextKind::Type,
            Keyword::Extension => DeclContextKind::Extension,
            Keyword::PoundWarning | Keyword::PoundError => DeclContextKind::Diagnostic,
            _ => return None,
        })
    }
}
