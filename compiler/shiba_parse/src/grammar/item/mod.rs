//! Top-level items.
//!
//! - `fn`: free functions (see `function.rs`)
//! - `typedef`: nominal types and aliases (see `type_decl.rs`)
//! - `extension`
//! - `let` / `mut`: globals
//! - `#warning` / `#error`

mod function;
mod type_decl;

use shiba_ir::{
    BuiltinOperator, DeclAttributes, Extension, FuncKind, Keyword, PoundDiagnostic, Punctuation,
    TokenKind, VarDecl, VarId, VarKind,
};

use crate::{ParseError, ParseResult, Parser};

impl Parser<'_> {
    pub(crate) fn parse_item(&mut self) -> ParseResult<()> {
        let attrs = self.parse_attributes()?;
        match self.current_kind() {
            TokenKind::Keyword(Keyword::Fn) => {
                let id = self.parse_function(attrs, FuncKind::Free)?;
                tracing::debug!(name = %self.ctx.ast.func(id).name, "parsed function");
                self.ctx.add_function(id);
            }
            TokenKind::Keyword(Keyword::Typedef) => self.parse_typedef(attrs)?,
            TokenKind::Keyword(Keyword::Extension) => {
                let extension = self.parse_extension()?;
                tracing::debug!(ty = %extension.type_ref.ty, "parsed extension");
                self.ctx.add_extension(extension);
            }
            TokenKind::Keyword(Keyword::Let | Keyword::Mut) => {
                let id = self.parse_var_decl(attrs, VarKind::Global)?;
                tracing::debug!(name = %self.ctx.ast.var(id).name, "parsed global");
                self.ctx.add_global(id);
            }
            TokenKind::Keyword(Keyword::PoundWarning | Keyword::PoundError) => {
                let diagnostic = self.parse_pound_diagnostic()?;
                self.ctx.add_pending_diagnostic(diagnostic);
            }
            _ => {
                let error = ParseError::UnexpectedExpression("function, type, or extension");
                return Err(self.error_here(&error));
            }
        }
        self.expect_separator()
    }

    /// `("let" | "mut") name (":" type)? ("=" value)?`
    pub(crate) fn parse_var_decl(&mut self, attrs: DeclAttributes, kind: VarKind) -> ParseResult<VarId> {
        let start = self.cursor.current_range();
        let mutable = self.check_kw(Keyword::Mut);
        self.cursor.advance();
        let name = self.parse_identifier()?;

        let type_ref = if self.check_punct(Punctuation::Colon) {
            self.cursor.advance();
            Some(self.parse_type()?)
        } else {
            None
        };
        let rhs = if self.current_kind().is_op(BuiltinOperator::Assign) {
            self.cursor.advance();
            Some(self.parse_value()?)
        } else {
            None
        };

        if type_ref.is_none() && rhs.is_none() && !attrs.contains(DeclAttributes::FOREIGN) {
            let error = ParseError::UntypedVariable(name.name.clone());
            return Err(self.error_at(&error, name.range));
        }

        let range = self.range_from(start);
        Ok(self.ctx.ast.alloc_var(VarDecl {
            name,
            type_ref,
            rhs,
            mutable,
            attrs,
            kind,
            range,
        }))
    }

    /// `("#warning" | "#error") "text"`, located at the string.
    pub(crate) fn parse_pound_diagnostic(&mut self) -> ParseResult<PoundDiagnostic> {
        let is_error = self.check_kw(Keyword::PoundError);
        self.cursor.advance();
        let TokenKind::StringLiteral(content) = self.current_kind() else {
            let error = ParseError::ExpectedString(self.current_kind().to_string());
            return Err(self.error_here(&error));
        };
        let content = content.clone();
        let token = self.cursor.advance();
        Ok(PoundDiagnostic {
            is_error,
            content,
            range: Some(token.range),
        })
    }

    /// `extension Type { (attr* fn-decl)* }`
    fn parse_extension(&mut self) -> ParseResult<Extension> {
        let start = self.cursor.current_range();
        self.expect_kw(Keyword::Extension)?;
        let type_ref = self.parse_type()?;
        self.expect_punct(Punctuation::LeftBrace)?;

        let mut methods = Vec::new();
        loop {
            self.cursor.skip_separators();
            if self.check_punct(Punctuation::RightBrace) {
                self.cursor.advance();
                break;
            }
            let attrs = self.parse_attributes()?;
            if !self.check_kw(Keyword::Fn) {
                return Err(self.error_here(&ParseError::UnexpectedExpression("function")));
            }
            let method = self.parse_function(attrs, FuncKind::Method(type_ref.ty.clone()))?;
            methods.push(method);
        }

        Ok(Extension {
            type_ref,
            methods,
            target: None,
            range: self.range_from(start),
        })
    }
}
