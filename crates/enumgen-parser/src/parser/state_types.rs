//! Parser state - type parsing, identifiers and field lists

use super::state::ParserState;
use super::state_declarations::ParamHead;
use crate::ast::{
    ChanDir, Expr, ExprKind, Field, Ident, InterfaceElem, TypeExpr, TypeExprKind, TypeTerm,
};
use enumgen_common::{Span, diagnostic_codes};
use enumgen_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Parse Methods - Identifiers
    // =========================================================================

    pub(crate) fn parse_ident(&mut self) -> Ident {
        if self.is_token(SyntaxKind::Identifier) {
            let ident = Ident::new(self.token_text(), self.current().span);
            self.next_token();
            ident
        } else {
            self.error_expected("name");
            Ident::new("_", Span::at(self.token_pos()))
        }
    }

    pub(crate) fn parse_ident_list(&mut self) -> Vec<Ident> {
        let mut names = vec![self.parse_ident()];
        while self.parse_optional(SyntaxKind::CommaToken) {
            names.push(self.parse_ident());
        }
        names
    }

    // =========================================================================
    // Parse Methods - Types
    // =========================================================================

    /// Whether the current token can start a type.
    pub(crate) fn is_type_start(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::Identifier
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::AsteriskToken
                | SyntaxKind::MapKeyword
                | SyntaxKind::ChanKeyword
                | SyntaxKind::LessThanMinusToken
                | SyntaxKind::FuncKeyword
                | SyntaxKind::StructKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::OpenParenToken
        )
    }

    pub(crate) fn parse_type(&mut self) -> TypeExpr {
        if !self.enter_recursion() {
            return self.bad_type();
        }
        let ty = self.parse_type_inner();
        self.exit_recursion();
        ty
    }

    fn parse_type_inner(&mut self) -> TypeExpr {
        let start = self.token_pos();
        let kind = match self.token() {
            SyntaxKind::Identifier => return self.parse_type_name(),
            SyntaxKind::OpenBracketToken => {
                self.next_token();
                if self.parse_optional(SyntaxKind::CloseBracketToken) {
                    TypeExprKind::Slice(Box::new(self.parse_type()))
                } else if self.parse_optional(SyntaxKind::DotDotDotToken) {
                    self.parse_expected(SyntaxKind::CloseBracketToken);
                    TypeExprKind::Array {
                        len: None,
                        elem: Box::new(self.parse_type()),
                    }
                } else {
                    let len = self.with_expr_lev(1, |p| p.parse_expr());
                    self.parse_expected(SyntaxKind::CloseBracketToken);
                    TypeExprKind::Array {
                        len: Some(Box::new(len)),
                        elem: Box::new(self.parse_type()),
                    }
                }
            }
            SyntaxKind::AsteriskToken => {
                self.next_token();
                TypeExprKind::Pointer(Box::new(self.parse_type()))
            }
            SyntaxKind::MapKeyword => {
                self.next_token();
                self.parse_expected(SyntaxKind::OpenBracketToken);
                let key = self.with_expr_lev(1, |p| p.parse_type());
                self.parse_expected(SyntaxKind::CloseBracketToken);
                TypeExprKind::Map {
                    key: Box::new(key),
                    value: Box::new(self.parse_type()),
                }
            }
            SyntaxKind::ChanKeyword => {
                self.next_token();
                let dir = if self.parse_optional(SyntaxKind::LessThanMinusToken) {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                TypeExprKind::Chan {
                    dir,
                    elem: Box::new(self.parse_type()),
                }
            }
            SyntaxKind::LessThanMinusToken => {
                self.next_token();
                self.parse_expected(SyntaxKind::ChanKeyword);
                TypeExprKind::Chan {
                    dir: ChanDir::Recv,
                    elem: Box::new(self.parse_type()),
                }
            }
            SyntaxKind::FuncKeyword => {
                self.next_token();
                TypeExprKind::Func(self.parse_signature())
            }
            SyntaxKind::StructKeyword => TypeExprKind::Struct(self.parse_struct_fields()),
            SyntaxKind::InterfaceKeyword => TypeExprKind::Interface(self.parse_interface_elems()),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let inner = self.with_expr_lev(1, |p| p.parse_type());
                self.parse_expected(SyntaxKind::CloseParenToken);
                TypeExprKind::Paren(Box::new(inner))
            }
            _ => {
                let found = self.describe_current();
                self.parse_error_at_current_token(diagnostic_codes::EXPECTED_TYPE, &[&found]);
                return self.bad_type();
            }
        };
        TypeExpr {
            kind,
            span: self.span_from(start),
        }
    }

    /// `T`, `pkg.T`, `T[A, B]` or `pkg.T[A]`.
    fn parse_type_name(&mut self) -> TypeExpr {
        let ident = self.parse_ident();
        if self.is_token(SyntaxKind::DotToken) {
            return self.parse_qualified_type_rest(ident);
        }
        let base = TypeExpr {
            span: ident.span,
            kind: TypeExprKind::Name(ident),
        };
        self.parse_optional_type_args(base)
    }

    /// Continue a qualified type name after the package identifier.
    pub(crate) fn parse_qualified_type_rest(&mut self, package: Ident) -> TypeExpr {
        let start = package.span.start;
        self.parse_expected(SyntaxKind::DotToken);
        let name = self.parse_ident();
        let base = TypeExpr {
            kind: TypeExprKind::Qualified { package, name },
            span: self.span_from(start),
        };
        self.parse_optional_type_args(base)
    }

    fn parse_optional_type_args(&mut self, base: TypeExpr) -> TypeExpr {
        if !self.is_token(SyntaxKind::OpenBracketToken) {
            return base;
        }
        let start = base.span.start;
        self.next_token();
        let args = self.with_expr_lev(1, |p| {
            let mut args = Vec::new();
            while !p.is_token(SyntaxKind::CloseBracketToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                args.push(p.parse_type());
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            args
        });
        self.parse_expected(SyntaxKind::CloseBracketToken);
        TypeExpr {
            kind: TypeExprKind::Generic {
                base: Box::new(base),
                args,
            },
            span: self.span_from(start),
        }
    }

    /// After `name` with the current token at `[`: either a name followed
    /// by an array or slice type, or a generic type instance `name[...]`.
    pub(crate) fn parse_array_field_or_type_instance(
        &mut self,
        name: Ident,
        start: u32,
    ) -> ParamHead {
        let name_type = TypeExpr {
            span: name.span,
            kind: TypeExprKind::Name(name),
        };
        let lbrack = self.token_pos();
        self.next_token();

        if self.parse_optional(SyntaxKind::CloseBracketToken) {
            let elem = self.parse_type();
            let slice = TypeExpr {
                kind: TypeExprKind::Slice(Box::new(elem)),
                span: self.span_from(lbrack),
            };
            return ParamHead::Typed(name_type, slice);
        }
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            self.parse_expected(SyntaxKind::CloseBracketToken);
            let elem = self.parse_type();
            let array = TypeExpr {
                kind: TypeExprKind::Array {
                    len: None,
                    elem: Box::new(elem),
                },
                span: self.span_from(lbrack),
            };
            return ParamHead::Typed(name_type, array);
        }

        let mut args = self.with_expr_lev(1, |p| {
            let mut args = Vec::new();
            while !p.is_token(SyntaxKind::CloseBracketToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                args.push(p.parse_expr());
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            args
        });
        self.parse_expected(SyntaxKind::CloseBracketToken);

        if args.len() == 1 && self.is_type_start() {
            let len = args.swap_remove(0);
            let elem = self.parse_type();
            let array = TypeExpr {
                kind: TypeExprKind::Array {
                    len: Some(Box::new(len)),
                    elem: Box::new(elem),
                },
                span: self.span_from(lbrack),
            };
            return ParamHead::Typed(name_type, array);
        }

        let args = args.into_iter().map(|arg| self.expr_to_type(arg)).collect();
        ParamHead::Single(TypeExpr {
            kind: TypeExprKind::Generic {
                base: Box::new(name_type),
                args,
            },
            span: self.span_from(start),
        })
    }

    /// Reinterpret an expression parsed in an ambiguous position as a type.
    pub(crate) fn expr_to_type(&mut self, expr: Expr) -> TypeExpr {
        let span = expr.span;
        let kind = match expr.kind {
            ExprKind::Ident(ident) => TypeExprKind::Name(ident),
            ExprKind::Type(ty) => return *ty,
            ExprKind::Selector { base, sel } => match base.kind {
                ExprKind::Ident(package) => TypeExprKind::Qualified { package, name: sel },
                _ => return self.not_a_type(span),
            },
            ExprKind::Index { base, indices } => {
                let base = self.expr_to_type(*base);
                let args = indices.into_iter().map(|i| self.expr_to_type(i)).collect();
                TypeExprKind::Generic {
                    base: Box::new(base),
                    args,
                }
            }
            ExprKind::Unary {
                op: SyntaxKind::AsteriskToken,
                operand,
            } => TypeExprKind::Pointer(Box::new(self.expr_to_type(*operand))),
            ExprKind::Paren(inner) => TypeExprKind::Paren(Box::new(self.expr_to_type(*inner))),
            _ => return self.not_a_type(span),
        };
        TypeExpr { kind, span }
    }

    fn not_a_type(&mut self, span: Span) -> TypeExpr {
        let text = span.text(&self.source).to_string();
        self.parse_error_at(span.start, span.len(), diagnostic_codes::EXPECTED_TYPE, &[&text]);
        TypeExpr {
            kind: TypeExprKind::Bad,
            span,
        }
    }

    pub(crate) fn bad_type(&self) -> TypeExpr {
        TypeExpr {
            kind: TypeExprKind::Bad,
            span: Span::at(self.token_pos()),
        }
    }

    // =========================================================================
    // Constraints and interfaces
    // =========================================================================

    /// A type constraint: a type or a union of `~`-prefixed terms.
    pub(crate) fn parse_constraint(&mut self) -> TypeExpr {
        let start = self.token_pos();
        let mut terms = vec![self.parse_type_term()];
        while self.parse_optional(SyntaxKind::BarToken) {
            terms.push(self.parse_type_term());
        }
        if terms.len() == 1 && !terms[0].tilde {
            if let Some(term) = terms.pop() {
                return term.ty;
            }
        }
        TypeExpr {
            kind: TypeExprKind::Union(terms),
            span: self.span_from(start),
        }
    }

    fn parse_type_term(&mut self) -> TypeTerm {
        let tilde = self.parse_optional(SyntaxKind::TildeToken);
        TypeTerm {
            tilde,
            ty: self.parse_type(),
        }
    }

    fn parse_interface_elems(&mut self) -> Vec<InterfaceElem> {
        self.parse_expected(SyntaxKind::InterfaceKeyword);
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut elems = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.token_pos();
            if self.is_token(SyntaxKind::Identifier) && self.peek(1) == SyntaxKind::OpenParenToken {
                let name = self.parse_ident();
                let signature = self.parse_signature();
                elems.push(InterfaceElem::Method { name, signature });
            } else {
                elems.push(InterfaceElem::Embedded(self.parse_constraint()));
            }
            self.parse_semicolon();
            if self.token_pos() == before {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        elems
    }

    // =========================================================================
    // Struct fields
    // =========================================================================

    fn parse_struct_fields(&mut self) -> Vec<Field> {
        self.parse_expected(SyntaxKind::StructKeyword);
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut fields = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.token_pos();
            fields.push(self.parse_field_decl());
            self.parse_semicolon();
            if self.token_pos() == before {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        fields
    }

    fn parse_field_decl(&mut self) -> Field {
        let (names, ty) = if self.is_token(SyntaxKind::AsteriskToken) {
            // Embedded pointer field.
            (Vec::new(), self.parse_type())
        } else if self.is_token(SyntaxKind::Identifier) {
            let start = self.token_pos();
            let ident = self.parse_ident();
            match self.token() {
                SyntaxKind::DotToken => (Vec::new(), self.parse_qualified_type_rest(ident)),
                SyntaxKind::OpenBracketToken => {
                    match self.parse_array_field_or_type_instance(ident, start) {
                        ParamHead::Typed(name, ty) => match name.kind {
                            TypeExprKind::Name(name) => (vec![name], ty),
                            _ => (Vec::new(), ty),
                        },
                        ParamHead::Single(ty) => (Vec::new(), ty),
                    }
                }
                SyntaxKind::SemicolonToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::StringLiteral => (
                    Vec::new(),
                    TypeExpr {
                        span: ident.span,
                        kind: TypeExprKind::Name(ident),
                    },
                ),
                SyntaxKind::CommaToken => {
                    let mut names = vec![ident];
                    while self.parse_optional(SyntaxKind::CommaToken) {
                        names.push(self.parse_ident());
                    }
                    (names, self.parse_type())
                }
                _ => (vec![ident], self.parse_type()),
            }
        } else {
            let found = self.describe_current();
            self.parse_error_at_current_token(diagnostic_codes::EXPECTED_TYPE, &[&found]);
            (Vec::new(), self.bad_type())
        };

        let tag = if self.is_token(SyntaxKind::StringLiteral) {
            let tag = self.token_text().to_string();
            self.next_token();
            Some(tag)
        } else {
            None
        };
        Field { names, ty, tag }
    }
}
