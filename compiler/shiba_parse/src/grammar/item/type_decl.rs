//! `typedef` declarations.
//!
//! ```text
//! typedef Name = Type
//! foreign typedef Name
//! attr* typedef Name { member* }
//! ```
//!
//! Every non-foreign type also gets an implicit memberwise initializer,
//! taking one labelled argument per typed field.

use shiba_ir::{
    BuiltinOperator, DataType, DeclAttributes, Expr, ExprId, ExprKind, FuncDecl, FuncId,
    FuncKind, Identifier, Keyword, Punctuation, TokenKind, TypeAlias, TypeDecl, TypeRef, VarDecl,
    VarId, VarKind,
};

use crate::{ParseError, ParseResult, Parser};

impl Parser<'_> {
    pub(crate) fn parse_typedef(&mut self, attrs: DeclAttributes) -> ParseResult<()> {
        let start = self.cursor.current_range();
        self.expect_kw(Keyword::Typedef)?;
        let name = self.parse_identifier()?;

        if self.current_kind().is_op(BuiltinOperator::Assign) {
            self.cursor.advance();
            let bound = self.parse_type()?;
            tracing::debug!(name = %name, bound = %bound.ty, "parsed alias");
            let range = self.range_from(start);
            self.ctx.add_alias(TypeAlias { name, bound, range });
            return Ok(());
        }

        if attrs.contains(DeclAttributes::FOREIGN) && !self.check_punct(Punctuation::LeftBrace) {
            let id = self.ctx.ast.alloc_type(TypeDecl::opaque(name, attrs));
            self.ctx.add_type(id);
            return Ok(());
        }

        let decl = self.parse_type_body(name, attrs)?;
        let decl = TypeDecl {
            range: self.range_from(start),
            ..decl
        };
        tracing::debug!(name = %decl.name, fields = decl.fields.len(), "parsed type");
        let id = self.ctx.ast.alloc_type(decl);
        self.ctx.add_type(id);
        Ok(())
    }

    fn parse_type_body(&mut self, name: Identifier, attrs: DeclAttributes) -> ParseResult<TypeDecl> {
        let owner = DataType::Custom(name.name.clone());
        let mut decl = TypeDecl::opaque(name, attrs);
        self.expect_punct(Punctuation::LeftBrace)?;
        self.cursor.skip_separators();

        while !self.check_punct(Punctuation::RightBrace) {
            if self.cursor.is_at_end() {
                return Err(self.unexpected_token());
            }
            let member_attrs = self.parse_attributes()?;
            match self.current_kind() {
                TokenKind::Keyword(Keyword::Fn) => {
                    let kind = FuncKind::Method(owner.clone());
                    decl.methods.push(self.parse_function(member_attrs, kind)?);
                }
                TokenKind::Keyword(Keyword::Init) => {
                    let kind = FuncKind::Initializer(owner.clone());
                    decl.initializers.push(self.parse_function(member_attrs, kind)?);
                }
                TokenKind::Keyword(Keyword::Deinit) => {
                    if decl.deinit.is_some() {
                        return Err(self.error_here(&ParseError::DuplicateDeinit));
                    }
                    let kind = FuncKind::Deinitializer(owner.clone());
                    decl.deinit = Some(self.parse_function(member_attrs, kind)?);
                }
                TokenKind::Keyword(Keyword::Let | Keyword::Mut) => {
                    decl.fields.push(self.parse_var_decl(member_attrs, VarKind::Field)?);
                }
                TokenKind::Keyword(Keyword::PoundWarning | Keyword::PoundError) => {
                    let diagnostic = self.parse_pound_diagnostic()?;
                    self.ctx.add_pending_diagnostic(diagnostic);
                }
                _ => {
                    let error = ParseError::UnexpectedExpression("field, method, or initializer");
                    return Err(self.error_here(&error));
                }
            }
            if !self.check_punct(Punctuation::RightBrace) {
                self.expect_separator()?;
            }
        }
        self.expect_punct(Punctuation::RightBrace)?;

        if !decl.attrs.contains(DeclAttributes::FOREIGN) {
            let init = self.memberwise_init(&owner, &decl.fields);
            decl.initializers.push(init);
        }
        Ok(decl)
    }

    /// `init(a: A, b: B) { self.a = a; self.b = b }`, fully synthesized.
    fn memberwise_init(&mut self, owner: &DataType, fields: &[VarId]) -> FuncId {
        let typed: Vec<(Identifier, TypeRef)> = fields
            .iter()
            .filter_map(|&field| {
                let var = self.ctx.ast.var(field);
                let ty = var.type_ref.as_ref()?;
                Some((Identifier::new(var.name.name.clone()), TypeRef::synthesized(ty.ty.clone())))
            })
            .collect();

        let mut args = Vec::with_capacity(typed.len());
        let mut stmts = Vec::with_capacity(typed.len());
        for (name, ty) in typed {
            let arg = VarDecl::argument(name.clone(), Some(name.clone()), ty, false);
            args.push(self.ctx.ast.alloc_var(arg));
            stmts.push(self.field_assignment(name));
        }
        let body = self.synthesize(ExprKind::Compound(stmts));

        self.ctx.ast.alloc_func(FuncDecl {
            name: Identifier::new("init"),
            self_arg: None,
            args,
            ret: TypeRef::synthesized(owner.clone()),
            body: Some(body),
            kind: FuncKind::Initializer(owner.clone()),
            attrs: DeclAttributes::IMPLICIT,
            has_varargs: false,
            range: None,
        })
    }

    /// `self.name = name`
    fn field_assignment(&mut self, name: Identifier) -> ExprId {
        let receiver = self.synthesize(ExprKind::Var(Identifier::new("self")));
        let lhs = self.synthesize(ExprKind::FieldLookup {
            lhs: receiver,
            name: name.clone(),
        });
        let rhs = self.synthesize(ExprKind::Var(name));
        self.synthesize(ExprKind::Infix {
            op: BuiltinOperator::Assign,
            op_range: None,
            lhs,
            rhs,
        })
    }

    fn synthesize(&mut self, kind: ExprKind) -> ExprId {
        self.ctx.ast.alloc_expr(Expr::synthesized(kind))
    }
}
