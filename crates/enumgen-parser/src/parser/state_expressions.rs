//! Parser state - expression parsing

use super::state::ParserState;
use crate::ast::{Element, Expr, ExprKind, LitKind, TypeExpr, TypeExprKind};
use enumgen_common::{Span, diagnostic_codes};
use enumgen_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Parse Methods - Binary and unary expressions
    // =========================================================================

    pub(crate) fn parse_expr(&mut self) -> Expr {
        self.parse_binary_expr(1)
    }

    pub(crate) fn parse_expr_list(&mut self) -> Vec<Expr> {
        let mut exprs = vec![self.parse_expr()];
        while self.parse_optional(SyntaxKind::CommaToken) {
            exprs.push(self.parse_expr());
        }
        exprs
    }

    /// Precedence climbing over Go's five binary precedence levels.
    fn parse_binary_expr(&mut self, min_precedence: u8) -> Expr {
        if !self.enter_recursion() {
            return self.bad_expr();
        }
        let mut left = self.parse_unary_expr();
        loop {
            let op = self.token();
            let precedence = op.binary_precedence();
            if precedence == 0 || precedence < min_precedence {
                break;
            }
            self.next_token();
            let right = self.parse_binary_expr(precedence + 1);
            let span = left.span.to(right.span);
            left = Expr {
                kind: ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            };
        }
        self.exit_recursion();
        left
    }

    fn parse_unary_expr(&mut self) -> Expr {
        match self.token() {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::CaretToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::TildeToken
            | SyntaxKind::AsteriskToken => {}
            SyntaxKind::LessThanMinusToken if self.peek(1) == SyntaxKind::ChanKeyword => {
                // `<-chan T` in operand position.
                let start = self.token_pos();
                let ty = self.parse_type();
                let operand = self.type_operand(ty, start);
                return self.parse_primary_suffixes(operand);
            }
            SyntaxKind::LessThanMinusToken => {}
            _ => return self.parse_primary_expr(),
        }

        if !self.enter_recursion() {
            return self.bad_expr();
        }
        let start = self.token_pos();
        let op = self.token();
        self.next_token();
        let operand = self.parse_unary_expr();
        self.exit_recursion();
        Expr {
            kind: ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span: self.span_from(start),
        }
    }

    // =========================================================================
    // Parse Methods - Primary expressions
    // =========================================================================

    fn parse_primary_expr(&mut self) -> Expr {
        let operand = self.parse_operand();
        self.parse_primary_suffixes(operand)
    }

    fn parse_primary_suffixes(&mut self, mut x: Expr) -> Expr {
        loop {
            x = match self.token() {
                SyntaxKind::DotToken => self.parse_selector_or_type_assertion(x),
                SyntaxKind::OpenBracketToken => self.parse_index_or_slice(x),
                SyntaxKind::OpenParenToken => self.parse_call(x),
                SyntaxKind::OpenBraceToken if self.is_composite_literal_type(&x) => {
                    let start = x.span.start;
                    self.parse_literal_value(Some(Box::new(x)), start)
                }
                _ => return x,
            };
        }
    }

    /// Whether `{` after `x` opens a composite literal. Type names are only
    /// literal types outside control clause headers.
    fn is_composite_literal_type(&self, x: &Expr) -> bool {
        match &x.unparen().kind {
            ExprKind::Ident(_) | ExprKind::Selector { .. } | ExprKind::Index { .. } => {
                self.expr_lev >= 0
            }
            ExprKind::Type(ty) => matches!(
                ty.kind,
                TypeExprKind::Array { .. }
                    | TypeExprKind::Slice(_)
                    | TypeExprKind::Map { .. }
                    | TypeExprKind::Struct(_)
                    | TypeExprKind::Generic { .. }
                    | TypeExprKind::Name(_)
                    | TypeExprKind::Qualified { .. }
            ),
            _ => false,
        }
    }

    fn parse_operand(&mut self) -> Expr {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::Identifier => {
                let ident = self.parse_ident();
                Expr {
                    span: ident.span,
                    kind: ExprKind::Ident(ident),
                }
            }
            SyntaxKind::IntLiteral
            | SyntaxKind::FloatLiteral
            | SyntaxKind::ImaginaryLiteral
            | SyntaxKind::RuneLiteral
            | SyntaxKind::StringLiteral => {
                let kind = match self.token() {
                    SyntaxKind::IntLiteral => LitKind::Int,
                    SyntaxKind::FloatLiteral => LitKind::Float,
                    SyntaxKind::ImaginaryLiteral => LitKind::Imag,
                    SyntaxKind::RuneLiteral => LitKind::Rune,
                    _ => LitKind::String,
                };
                let raw = self.token_text().to_string();
                let span = self.current().span;
                self.next_token();
                Expr {
                    kind: ExprKind::BasicLit { kind, raw },
                    span,
                }
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let lev = self.expr_lev + 1;
                let inner = self.with_expr_lev(lev, |p| p.parse_expr());
                self.parse_expected(SyntaxKind::CloseParenToken);
                Expr {
                    kind: ExprKind::Paren(Box::new(inner)),
                    span: self.span_from(start),
                }
            }
            SyntaxKind::FuncKeyword => {
                self.next_token();
                let signature = self.parse_signature();
                if self.is_token(SyntaxKind::OpenBraceToken) {
                    let body = self.with_expr_lev(0, |p| p.parse_block());
                    Expr {
                        kind: ExprKind::FuncLit { signature, body },
                        span: self.span_from(start),
                    }
                } else {
                    let ty = TypeExpr {
                        kind: TypeExprKind::Func(signature),
                        span: self.span_from(start),
                    };
                    self.type_operand(ty, start)
                }
            }
            SyntaxKind::OpenBracketToken
            | SyntaxKind::StructKeyword
            | SyntaxKind::MapKeyword
            | SyntaxKind::ChanKeyword
            | SyntaxKind::InterfaceKeyword => {
                let ty = self.parse_type();
                self.type_operand(ty, start)
            }
            _ => {
                let found = self.describe_current();
                self.parse_error_at_current_token(diagnostic_codes::EXPECTED_EXPRESSION, &[&found]);
                if !matches!(
                    self.token(),
                    SyntaxKind::CloseParenToken
                        | SyntaxKind::CloseBracketToken
                        | SyntaxKind::CloseBraceToken
                        | SyntaxKind::SemicolonToken
                        | SyntaxKind::CommaToken
                        | SyntaxKind::ColonToken
                        | SyntaxKind::EndOfFileToken
                ) {
                    self.next_token();
                }
                Expr {
                    kind: ExprKind::Bad,
                    span: self.span_from(start),
                }
            }
        }
    }

    fn type_operand(&self, ty: TypeExpr, start: u32) -> Expr {
        Expr {
            kind: ExprKind::Type(Box::new(ty)),
            span: self.span_from(start),
        }
    }

    fn parse_selector_or_type_assertion(&mut self, base: Expr) -> Expr {
        let start = base.span.start;
        self.parse_expected(SyntaxKind::DotToken);
        if self.is_token(SyntaxKind::Identifier) {
            let sel = self.parse_ident();
            return Expr {
                kind: ExprKind::Selector {
                    base: Box::new(base),
                    sel,
                },
                span: self.span_from(start),
            };
        }

        self.parse_expected(SyntaxKind::OpenParenToken);
        let ty = if self.parse_optional(SyntaxKind::TypeKeyword) {
            None
        } else {
            Some(Box::new(self.with_expr_lev(1, |p| p.parse_type())))
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        Expr {
            kind: ExprKind::TypeAssert {
                base: Box::new(base),
                ty,
            },
            span: self.span_from(start),
        }
    }

    /// `x[i]`, `x[lo:hi]`, `x[lo:hi:max]` or an instantiation `f[A, B]`.
    fn parse_index_or_slice(&mut self, base: Expr) -> Expr {
        let start = base.span.start;
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let lev = self.expr_lev + 1;
        let kind = self.with_expr_lev(lev, |p| {
            let mut parts: [Option<Box<Expr>>; 3] = [None, None, None];
            let mut colons = 0;
            if !p.is_token(SyntaxKind::ColonToken) {
                parts[0] = Some(Box::new(p.parse_expr()));
            }
            while colons < 2 && p.parse_optional(SyntaxKind::ColonToken) {
                colons += 1;
                if !p.is_token(SyntaxKind::ColonToken) && !p.is_token(SyntaxKind::CloseBracketToken)
                {
                    parts[colons] = Some(Box::new(p.parse_expr()));
                }
            }

            if colons > 0 {
                let [low, high, max] = parts;
                return ExprKind::Slice {
                    base: Box::new(base),
                    low,
                    high,
                    max,
                };
            }

            let mut indices: Vec<Expr> = parts[0].take().map(|e| *e).into_iter().collect();
            while p.parse_optional(SyntaxKind::CommaToken) {
                if p.is_token(SyntaxKind::CloseBracketToken) {
                    break;
                }
                indices.push(p.parse_expr());
            }
            ExprKind::Index {
                base: Box::new(base),
                indices,
            }
        });
        self.parse_expected(SyntaxKind::CloseBracketToken);
        Expr {
            kind,
            span: self.span_from(start),
        }
    }

    fn parse_call(&mut self, func: Expr) -> Expr {
        let start = func.span.start;
        self.parse_expected(SyntaxKind::OpenParenToken);
        let lev = self.expr_lev + 1;
        let (args, ellipsis) = self.with_expr_lev(lev, |p| {
            let mut args = Vec::new();
            let mut ellipsis = false;
            while !p.is_token(SyntaxKind::CloseParenToken) && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                let before = p.token_pos();
                args.push(p.parse_expr());
                if p.parse_optional(SyntaxKind::DotDotDotToken) {
                    ellipsis = true;
                }
                if !p.parse_optional(SyntaxKind::CommaToken) || p.token_pos() == before {
                    break;
                }
            }
            (args, ellipsis)
        });
        self.parse_expected(SyntaxKind::CloseParenToken);
        Expr {
            kind: ExprKind::Call {
                func: Box::new(func),
                args,
                ellipsis,
            },
            span: self.span_from(start),
        }
    }

    /// `{ elem, key: elem, ... }` where elements may themselves be elided
    /// literal values.
    fn parse_literal_value(&mut self, ty: Option<Box<Expr>>, start: u32) -> Expr {
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let lev = self.expr_lev + 1;
        let elements = self.with_expr_lev(lev, |p| {
            let mut elements = Vec::new();
            while !p.is_token(SyntaxKind::CloseBraceToken) && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                let before = p.token_pos();
                let first = p.parse_element_value();
                let element = if p.parse_optional(SyntaxKind::ColonToken) {
                    Element {
                        key: Some(first),
                        value: p.parse_element_value(),
                    }
                } else {
                    Element {
                        key: None,
                        value: first,
                    }
                };
                elements.push(element);

                if !p.parse_optional(SyntaxKind::CommaToken) {
                    if p.current().is_implicit_semicolon() {
                        p.parse_error_at_current_token(
                            diagnostic_codes::MISSING_COMMA_IN_COMPOSITE_LITERAL,
                            &[],
                        );
                        p.next_token();
                    }
                    break;
                }
                if p.token_pos() == before {
                    break;
                }
            }
            elements
        });
        self.parse_expected(SyntaxKind::CloseBraceToken);
        Expr {
            kind: ExprKind::Composite { ty, elements },
            span: self.span_from(start),
        }
    }

    fn parse_element_value(&mut self) -> Expr {
        if self.is_token(SyntaxKind::OpenBraceToken) {
            let start = self.token_pos();
            self.parse_literal_value(None, start)
        } else {
            self.parse_expr()
        }
    }

    pub(crate) fn bad_expr(&self) -> Expr {
        Expr {
            kind: ExprKind::Bad,
            span: Span::at(self.token_pos()),
        }
    }
}
