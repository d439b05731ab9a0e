//! Type syntax.
//!
//! ```text
//! type := Name | "*" type | "(" ")" | "(" type ("," type)* ")" ("->" type)?
//! ```
//!
//! A parenthesized list followed by `->` is a function type; a single
//! parenthesized type is just that type.

use shiba_ir::{BuiltinOperator, DataType, Punctuation, TokenKind, TypeRef};

use crate::{ParseError, ParseResult, Parser};

impl Parser<'_> {
    pub(crate) fn parse_type(&mut self) -> ParseResult<TypeRef> {
        let start = self.cursor.current_range();
        let ty = self.parse_data_type()?;
        Ok(TypeRef::new(ty, self.range_from(start)))
    }

    fn parse_data_type(&mut self) -> ParseResult<DataType> {
        match self.current_kind() {
            TokenKind::Identifier(name) => {
                let ty = DataType::from_name(name);
                self.cursor.advance();
                Ok(ty)
            }
            TokenKind::Operator(BuiltinOperator::Star) => {
                self.cursor.advance();
                Ok(DataType::pointer(self.parse_data_type()?))
            }
            TokenKind::Punctuation(Punctuation::LeftParen) => {
                self.cursor.advance();
                let mut elements = Vec::new();
                while !self.check_punct(Punctuation::RightParen) {
                    elements.push(self.parse_data_type()?);
                    if self.check_punct(Punctuation::Comma) {
                        self.cursor.advance();
                    } else if !self.check_punct(Punctuation::RightParen) {
                        return Err(self.unexpected_token());
                    }
                }
                self.expect_punct(Punctuation::RightParen)?;

                if self.check_punct(Punctuation::Arrow) {
                    self.cursor.advance();
                    let ret = self.parse_data_type()?;
                    return Ok(DataType::function(elements, ret));
                }
                Ok(match elements.len() {
                    0 => DataType::Void,
                    1 => elements.swap_remove(0),
                    _ => DataType::Tuple(elements),
                })
            }
            other => {
                let error = ParseError::ExpectedType(other.to_string());
                Err(self.error_here(&error))
            }
        }
    }
}
