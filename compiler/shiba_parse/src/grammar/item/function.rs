//! Functions, methods, initializers and deinitializers.

use shiba_ir::{
    DataType, DeclAttributes, FuncDecl, FuncId, FuncKind, Identifier, Keyword, Punctuation,
    TokenKind, TypeRef, VarDecl, VarId, VarKind,
};

use crate::{ParseError, ParseResult, Parser};

/// A parsed parameter list.
pub(crate) struct Params {
    pub args: Vec<VarId>,
    pub has_varargs: bool,
}

impl Parser<'_> {
    /// Parse a function-like declaration. `kind` decides the leading
    /// keyword: `fn` for free functions and methods, `init` or `deinit`
    /// for the other two.
    pub(crate) fn parse_function(&mut self, attrs: DeclAttributes, kind: FuncKind) -> ParseResult<FuncId> {
        let start = self.cursor.current_range();
        let (name, params, ret) = match &kind {
            FuncKind::Free | FuncKind::Method(_) => {
                self.expect_kw(Keyword::Fn)?;
                let name = self.parse_identifier()?;
                let params = self.parse_params()?;
                let ret = self.parse_return_type()?;
                (name, params, ret)
            }
            FuncKind::Initializer(owner) => {
                let token = self.expect_kw(Keyword::Init)?;
                let params = self.parse_params()?;
                let ret = TypeRef::synthesized(owner.clone());
                (Identifier::with_range("init", token.range), params, ret)
            }
            FuncKind::Deinitializer(_) => {
                let token = self.expect_kw(Keyword::Deinit)?;
                if self.check_punct(Punctuation::LeftParen) {
                    self.cursor.advance();
                    self.expect_punct(Punctuation::RightParen)?;
                }
                let params = Params {
                    args: Vec::new(),
                    has_varargs: false,
                };
                let ret = TypeRef::synthesized(DataType::Void);
                (Identifier::with_range("deinit", token.range), params, ret)
            }
        };

        let body = if self.check_punct(Punctuation::LeftBrace) {
            Some(self.parse_block()?)
        } else if matches!(kind, FuncKind::Deinitializer(_)) {
            return Err(self.unexpected_token());
        } else {
            None
        };

        let self_arg = match &kind {
            FuncKind::Method(owner) if !attrs.contains(DeclAttributes::STATIC) => {
                Some(self.implicit_self(owner, attrs.contains(DeclAttributes::MUTATING)))
            }
            FuncKind::Deinitializer(owner) => Some(self.implicit_self(owner, false)),
            _ => None,
        };

        let range = self.range_from(start);
        Ok(self.ctx.ast.alloc_func(FuncDecl {
            name,
            self_arg,
            args: params.args,
            ret,
            body,
            kind,
            attrs,
            has_varargs: params.has_varargs,
            range,
        }))
    }

    fn implicit_self(&mut self, owner: &DataType, mutable: bool) -> VarId {
        self.ctx.ast.alloc_var(VarDecl {
            name: Identifier::new("self"),
            type_ref: Some(TypeRef::synthesized(owner.clone())),
            rhs: None,
            mutable,
            attrs: DeclAttributes::IMPLICIT,
            kind: VarKind::Argument {
                external: None,
                implicit_self: true,
            },
            range: None,
        })
    }

    /// `("->" type)?`, defaulting to `Void`.
    pub(crate) fn parse_return_type(&mut self) -> ParseResult<TypeRef> {
        if self.check_punct(Punctuation::Arrow) {
            self.cursor.advance();
            self.parse_type()
        } else {
            Ok(TypeRef::synthesized(DataType::Void))
        }
    }

    /// `"(" (param ("," param)* ("," "...")?)? ")"`
    pub(crate) fn parse_params(&mut self) -> ParseResult<Params> {
        self.expect_punct(Punctuation::LeftParen)?;
        let mut args = Vec::new();
        let mut has_varargs = false;
        while !self.check_punct(Punctuation::RightParen) {
            if self.check_punct(Punctuation::Ellipsis) {
                self.cursor.advance();
                has_varargs = true;
                break;
            }
            args.push(self.parse_param()?);
            if self.check_punct(Punctuation::Comma) {
                self.cursor.advance();
            } else if !self.check_punct(Punctuation::RightParen) {
                return Err(self.unexpected_token());
            }
        }
        self.expect_punct(Punctuation::RightParen)?;
        Ok(Params { args, has_varargs })
    }

    /// `name: T` is labelled `name`, `_: T` and `_ name: T` are unlabelled,
    /// `label name: T` is labelled `label`.
    fn parse_param(&mut self) -> ParseResult<VarId> {
        let first = match self.current_kind() {
            TokenKind::Identifier(name) => Some(name.clone()),
            TokenKind::Keyword(Keyword::Underscore) => None,
            other => {
                let error = ParseError::ExpectedIdentifier(other.to_string());
                return Err(self.error_here(&error));
            }
        };
        let first_range = self.cursor.advance().range;
        let first = first.map(|name| Identifier::with_range(name, first_range));

        let (external, name) = if self.check_punct(Punctuation::Colon) {
            let name = first
                .clone()
                .unwrap_or_else(|| Identifier::with_range("_", first_range));
            (first, name)
        } else {
            (first, self.parse_identifier()?)
        };
        self.expect_punct(Punctuation::Colon)?;
        let ty = self.parse_type()?;
        Ok(self.ctx.ast.alloc_var(VarDecl::argument(name, external, ty, false)))
    }
}
