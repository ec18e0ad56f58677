//! Parser state - statements and blocks
use super::state::ParserState;
use crate::ast::{Block, CaseClause, CommClause, Expr, ExprKind, Stmt};
use enumgen_common::{Span, diagnostic_codes};
use enumgen_scanner::SyntaxKind;

/// What a simple statement may turn into at its call site.
#[derive(Clone, Copy, PartialEq, Eq)]
enum SimpleMode {
    Basic,
    LabelOk,
    RangeOk,
}

impl ParserState {
    // =========================================================================
    // Parse Methods - Blocks
    // =========================================================================

    pub(crate) fn parse_block(&mut self) -> Block {
        let start = self.parse_expected(SyntaxKind::OpenBraceToken);
        let stmts = self.parse_stmt_list();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        Block {
            stmts,
            span: self.span_from(start),
        }
    }

    fn parse_stmt_list(&mut self) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        loop {
            match self.token() {
                SyntaxKind::CloseBraceToken
                | SyntaxKind::CaseKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::EndOfFileToken => break,
                _ => {}
            }
            let before = self.token_pos();
            let stmt = self.parse_stmt();
            if !matches!(stmt, Stmt::Empty) {
                stmts.push(stmt);
            }
            match self.token() {
                SyntaxKind::CloseBraceToken
                | SyntaxKind::CaseKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::EndOfFileToken => {}
                _ => self.parse_semicolon(),
            }
            if self.token_pos() == before {
                self.next_token();
            }
        }
        stmts
    }

    // =========================================================================
    // Parse Methods - Statements
    // =========================================================================

    pub(crate) fn parse_stmt(&mut self) -> Stmt {
        if !self.enter_recursion() {
            let start = self.token_pos();
            self.skip_to_statement_end();
            return Stmt::Bad(self.span_from(start));
        }
        let stmt = self.parse_stmt_inner();
        self.exit_recursion();
        stmt
    }

    fn parse_stmt_inner(&mut self) -> Stmt {
        match self.token() {
            SyntaxKind::ConstKeyword | SyntaxKind::VarKeyword | SyntaxKind::TypeKeyword => {
                Stmt::Decl(self.parse_gen_decl())
            }
            SyntaxKind::Identifier
            | SyntaxKind::IntLiteral
            | SyntaxKind::FloatLiteral
            | SyntaxKind::ImaginaryLiteral
            | SyntaxKind::RuneLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::FuncKeyword
            | SyntaxKind::OpenParenToken
            | SyntaxKind::OpenBracketToken
            | SyntaxKind::StructKeyword
            | SyntaxKind::MapKeyword
            | SyntaxKind::ChanKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::AsteriskToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::CaretToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
            | SyntaxKind::LessThanMinusToken => self.parse_simple_stmt(SimpleMode::LabelOk),
            SyntaxKind::GoKeyword => {
                self.next_token();
                Stmt::Go(self.parse_expr())
            }
            SyntaxKind::DeferKeyword => {
                self.next_token();
                Stmt::Defer(self.parse_expr())
            }
            SyntaxKind::ReturnKeyword => {
                self.next_token();
                let results = match self.token() {
                    SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken => Vec::new(),
                    _ => self.parse_expr_list(),
                };
                Stmt::Return(results)
            }
            SyntaxKind::BreakKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::GotoKeyword
            | SyntaxKind::FallthroughKeyword => {
                let keyword = self.token();
                self.next_token();
                let label = if keyword != SyntaxKind::FallthroughKeyword
                    && self.is_token(SyntaxKind::Identifier)
                {
                    Some(self.parse_ident())
                } else {
                    None
                };
                Stmt::Branch { keyword, label }
            }
            SyntaxKind::OpenBraceToken => Stmt::Block(self.parse_block()),
            SyntaxKind::IfKeyword => self.parse_if_stmt(),
            SyntaxKind::SwitchKeyword => self.parse_switch_stmt(),
            SyntaxKind::SelectKeyword => self.parse_select_stmt(),
            SyntaxKind::ForKeyword => self.parse_for_stmt(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken => Stmt::Empty,
            _ => {
                let start = self.token_pos();
                let found = self.describe_current();
                self.parse_error_at_current_token(diagnostic_codes::EXPECTED_STATEMENT, &[&found]);
                self.skip_to_statement_end();
                Stmt::Bad(self.span_from(start))
            }
        }
    }

    fn parse_simple_stmt(&mut self, mode: SimpleMode) -> Stmt {
        let lhs = self.parse_expr_list();

        match self.token() {
            op if op == SyntaxKind::ColonEqualsToken || op.is_assignment() => {
                self.next_token();
                let is_range_op =
                    op == SyntaxKind::ColonEqualsToken || op == SyntaxKind::EqualsToken;
                if mode == SimpleMode::RangeOk
                    && is_range_op
                    && self.is_token(SyntaxKind::RangeKeyword)
                {
                    self.next_token();
                    let expr = self.parse_expr();
                    let mut lhs = lhs.into_iter();
                    return Stmt::Range {
                        key: lhs.next(),
                        value: lhs.next(),
                        define: op == SyntaxKind::ColonEqualsToken,
                        expr,
                        body: empty_block(),
                    };
                }
                let rhs = self.parse_expr_list();
                Stmt::Assign { lhs, op, rhs }
            }
            SyntaxKind::ColonToken
                if mode == SimpleMode::LabelOk
                    && lhs.len() == 1
                    && matches!(lhs[0].kind, ExprKind::Ident(_)) =>
            {
                self.next_token();
                let label = match lhs.into_iter().next().map(|e| e.kind) {
                    Some(ExprKind::Ident(ident)) => ident,
                    _ => return Stmt::Empty,
                };
                let stmt = if self.is_token(SyntaxKind::CloseBraceToken) {
                    Stmt::Empty
                } else {
                    self.parse_stmt()
                };
                Stmt::Labeled {
                    label,
                    stmt: Box::new(stmt),
                }
            }
            SyntaxKind::LessThanMinusToken => {
                self.next_token();
                let value = self.parse_expr();
                Stmt::Send {
                    chan: first_expr(lhs),
                    value,
                }
            }
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken => {
                let inc = self.is_token(SyntaxKind::PlusPlusToken);
                self.next_token();
                Stmt::IncDec {
                    expr: first_expr(lhs),
                    inc,
                }
            }
            _ => {
                if lhs.len() > 1 {
                    self.error_expected("':=' or '='");
                }
                Stmt::Expr(first_expr(lhs))
            }
        }
    }

    // =========================================================================
    // Parse Methods - Control flow
    // =========================================================================

    fn parse_if_stmt(&mut self) -> Stmt {
        self.parse_expected(SyntaxKind::IfKeyword);
        let (init, cond) = self.with_expr_lev(-1, |p| p.parse_if_header());
        let then = self.parse_block();
        let els = if self.parse_optional(SyntaxKind::ElseKeyword) {
            match self.token() {
                SyntaxKind::IfKeyword => Some(Box::new(self.parse_if_stmt())),
                SyntaxKind::OpenBraceToken => Some(Box::new(Stmt::Block(self.parse_block()))),
                _ => {
                    self.error_expected("if statement or block");
                    None
                }
            }
        } else {
            None
        };
        Stmt::If {
            init,
            cond,
            then,
            els,
        }
    }

    fn parse_if_header(&mut self) -> (Option<Box<Stmt>>, Expr) {
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.error_expected("condition");
            return (None, self.bad_expr());
        }

        let mut init = None;
        let mut cond_stmt = if self.is_token(SyntaxKind::SemicolonToken) {
            None
        } else {
            Some(self.parse_simple_stmt(SimpleMode::Basic))
        };
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            init = cond_stmt.take().map(Box::new);
            if !self.is_token(SyntaxKind::OpenBraceToken) {
                cond_stmt = Some(self.parse_simple_stmt(SimpleMode::Basic));
            }
        }

        let cond = match cond_stmt {
            Some(Stmt::Expr(expr)) => expr,
            _ => {
                self.error_expected("boolean expression");
                self.bad_expr()
            }
        };
        (init, cond)
    }

    fn parse_switch_stmt(&mut self) -> Stmt {
        self.parse_expected(SyntaxKind::SwitchKeyword);
        let (init, tag) = self.with_expr_lev(-1, |p| {
            let mut init = None;
            let mut tag = None;
            if !p.is_token(SyntaxKind::OpenBraceToken) {
                if !p.is_token(SyntaxKind::SemicolonToken) {
                    tag = Some(Box::new(p.parse_simple_stmt(SimpleMode::Basic)));
                }
                if p.parse_optional(SyntaxKind::SemicolonToken) {
                    init = tag.take();
                    if !p.is_token(SyntaxKind::OpenBraceToken) {
                        tag = Some(Box::new(p.parse_simple_stmt(SimpleMode::Basic)));
                    }
                }
            }
            (init, tag)
        });

        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut clauses = Vec::new();
        while self.is_token(SyntaxKind::CaseKeyword) || self.is_token(SyntaxKind::DefaultKeyword) {
            let exprs = if self.parse_optional(SyntaxKind::CaseKeyword) {
                Some(self.parse_expr_list())
            } else {
                self.next_token();
                None
            };
            self.parse_expected(SyntaxKind::ColonToken);
            let body = self.parse_stmt_list();
            clauses.push(CaseClause { exprs, body });
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        Stmt::Switch { init, tag, clauses }
    }

    fn parse_select_stmt(&mut self) -> Stmt {
        self.parse_expected(SyntaxKind::SelectKeyword);
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut clauses = Vec::new();
        while self.is_token(SyntaxKind::CaseKeyword) || self.is_token(SyntaxKind::DefaultKeyword) {
            let comm = if self.parse_optional(SyntaxKind::CaseKeyword) {
                Some(Box::new(self.parse_simple_stmt(SimpleMode::Basic)))
            } else {
                self.next_token();
                None
            };
            self.parse_expected(SyntaxKind::ColonToken);
            let body = self.parse_stmt_list();
            clauses.push(CommClause { comm, body });
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        Stmt::Select { clauses }
    }

    fn parse_for_stmt(&mut self) -> Stmt {
        self.parse_expected(SyntaxKind::ForKeyword);
        let header = self.with_expr_lev(-1, |p| p.parse_for_header());
        let body = self.parse_block();
        match header {
            Stmt::Range {
                key,
                value,
                define,
                expr,
                ..
            } => Stmt::Range {
                key,
                value,
                define,
                expr,
                body,
            },
            Stmt::For {
                init, cond, post, ..
            } => Stmt::For {
                init,
                cond,
                post,
                body,
            },
            _ => Stmt::For {
                init: None,
                cond: None,
                post: None,
                body,
            },
        }
    }

    /// Parse the clauses of a `for` statement into a `Stmt::For` or
    /// `Stmt::Range` with an empty body.
    fn parse_for_header(&mut self) -> Stmt {
        if self.is_token(SyntaxKind::OpenBraceToken) {
            return for_header(None, None, None);
        }
        if self.parse_optional(SyntaxKind::RangeKeyword) {
            let expr = self.parse_expr();
            return Stmt::Range {
                key: None,
                value: None,
                define: false,
                expr,
                body: empty_block(),
            };
        }

        let first = if self.is_token(SyntaxKind::SemicolonToken) {
            None
        } else {
            Some(self.parse_simple_stmt(SimpleMode::RangeOk))
        };
        let first = match first {
            Some(range @ Stmt::Range { .. }) => return range,
            other => other,
        };

        if !self.parse_optional(SyntaxKind::SemicolonToken) {
            // `for cond {`
            return match first {
                Some(Stmt::Expr(cond)) => for_header(None, Some(cond), None),
                Some(_) => {
                    self.error_expected("for loop condition");
                    for_header(None, None, None)
                }
                None => for_header(None, None, None),
            };
        }

        let cond = if self.is_token(SyntaxKind::SemicolonToken) {
            None
        } else {
            match self.parse_simple_stmt(SimpleMode::Basic) {
                Stmt::Expr(cond) => Some(cond),
                _ => {
                    self.error_expected("for loop condition");
                    None
                }
            }
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        let post = if self.is_token(SyntaxKind::OpenBraceToken) {
            None
        } else {
            Some(Box::new(self.parse_simple_stmt(SimpleMode::Basic)))
        };
        for_header(first.map(Box::new), cond, post)
    }
}

fn for_header(init: Option<Box<Stmt>>, cond: Option<Expr>, post: Option<Box<Stmt>>) -> Stmt {
    Stmt::For {
        init,
        cond,
        post,
        body: empty_block(),
    }
}

fn empty_block() -> Block {
    Block {
        stmts: Vec::new(),
        span: Span::default(),
    }
}

fn first_expr(exprs: Vec<Expr>) -> Expr {
    exprs.into_iter().next().unwrap_or(Expr {
        kind: ExprKind::Bad,
        span: Span::default(),
    })
}
