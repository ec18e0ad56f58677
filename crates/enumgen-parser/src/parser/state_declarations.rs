//! Parser state - source file, imports and top-level declarations
use super::state::ParserState;
use crate::ast::{
    Decl, DeclKeyword, Field, FuncDecl, GenDecl, Ident, ImportSpec, Signature, SourceFile, Spec,
    TypeExpr, TypeExprKind, TypeSpec, ValueSpec,
};
use enumgen_common::{Span, diagnostic_codes};
use enumgen_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Parse Methods - Source file
    // =========================================================================

    /// Parse a whole source file. Diagnostics are collected on the parser.
    pub fn parse_source_file(&mut self) -> SourceFile {
        let package = self.parse_package_clause();

        let mut imports = Vec::new();
        while self.is_token(SyntaxKind::ImportKeyword) {
            self.parse_import_decl(&mut imports);
        }

        let mut decls = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            let start = self.token_pos();
            if self.is_token(SyntaxKind::ImportKeyword) {
                self.parse_error_at_current_token(diagnostic_codes::IMPORTS_AFTER_DECLARATIONS, &[]);
                let mut ignored = Vec::new();
                self.parse_import_decl(&mut ignored);
                continue;
            }
            match self.parse_top_level_decl() {
                Some(decl) => decls.push(decl),
                None => {
                    self.skip_after_bad_declaration();
                    decls.push(Decl::Bad(self.span_from(start)));
                }
            }
        }

        SourceFile {
            file_name: self.file_name.clone(),
            text: self.source.clone(),
            package,
            imports,
            decls,
        }
    }

    fn parse_package_clause(&mut self) -> Ident {
        if !self.is_token(SyntaxKind::PackageKeyword) {
            let found = self.describe_current();
            self.parse_error_at_current_token(diagnostic_codes::EXPECTED_PACKAGE_CLAUSE, &[&found]);
            return Ident::new("_", Span::at(self.token_pos()));
        }
        self.next_token();
        let name = self.parse_ident();
        self.parse_semicolon();
        name
    }

    fn skip_after_bad_declaration(&mut self) {
        // Always make progress so a stray token cannot stall the loop.
        let before = self.token_pos();
        self.skip_to_declaration();
        if self.token_pos() == before && !self.is_token(SyntaxKind::EndOfFileToken) {
            self.next_token();
            self.skip_to_declaration();
        }
    }

    fn parse_import_decl(&mut self, imports: &mut Vec<ImportSpec>) {
        self.parse_expected(SyntaxKind::ImportKeyword);
        if self.parse_optional(SyntaxKind::OpenParenToken) {
            while !self.is_token(SyntaxKind::CloseParenToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                let before = self.token_pos();
                if let Some(spec) = self.parse_import_spec() {
                    imports.push(spec);
                }
                self.parse_semicolon();
                if self.token_pos() == before {
                    self.next_token();
                }
            }
            self.parse_expected(SyntaxKind::CloseParenToken);
        } else if let Some(spec) = self.parse_import_spec() {
            imports.push(spec);
        }
        self.parse_semicolon();
    }

    fn parse_import_spec(&mut self) -> Option<ImportSpec> {
        let start = self.token_pos();
        let name = match self.token() {
            SyntaxKind::Identifier => Some(self.parse_ident()),
            SyntaxKind::DotToken => {
                let span = self.current().span;
                self.next_token();
                Some(Ident::new(".", span))
            }
            _ => None,
        };
        if !self.is_token(SyntaxKind::StringLiteral) {
            self.error_expected("import path");
            return None;
        }
        let raw = self.token_text();
        let path = raw[1..raw.len().saturating_sub(1).max(1)].to_string();
        self.next_token();
        Some(ImportSpec {
            name,
            path,
            span: self.span_from(start),
        })
    }

    // =========================================================================
    // Parse Methods - Declarations
    // =========================================================================

    fn parse_top_level_decl(&mut self) -> Option<Decl> {
        let decl = match self.token() {
            SyntaxKind::ConstKeyword | SyntaxKind::VarKeyword | SyntaxKind::TypeKeyword => {
                Decl::Gen(self.parse_gen_decl())
            }
            SyntaxKind::FuncKeyword => Decl::Func(self.parse_func_decl()),
            _ => {
                let found = self.describe_current();
                self.parse_error_at_current_token(diagnostic_codes::EXPECTED_DECLARATION, &[&found]);
                return None;
            }
        };
        if !self.is_token(SyntaxKind::EndOfFileToken) {
            self.parse_semicolon();
        }
        Some(decl)
    }

    /// Parse a `const`, `var` or `type` declaration starting at its keyword.
    pub(crate) fn parse_gen_decl(&mut self) -> GenDecl {
        let start = self.token_pos();
        let keyword = match self.token() {
            SyntaxKind::ConstKeyword => DeclKeyword::Const,
            SyntaxKind::VarKeyword => DeclKeyword::Var,
            _ => DeclKeyword::Type,
        };
        self.next_token();

        let mut specs = Vec::new();
        let grouped = self.parse_optional(SyntaxKind::OpenParenToken);
        if grouped {
            while !self.is_token(SyntaxKind::CloseParenToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                let before = self.token_pos();
                specs.push(self.parse_spec(keyword));
                self.parse_semicolon();
                if self.token_pos() == before {
                    self.next_token();
                }
            }
            self.parse_expected(SyntaxKind::CloseParenToken);
        } else {
            specs.push(self.parse_spec(keyword));
        }

        GenDecl {
            keyword,
            specs,
            grouped,
            span: self.span_from(start),
        }
    }

    fn parse_spec(&mut self, keyword: DeclKeyword) -> Spec {
        match keyword {
            DeclKeyword::Type => Spec::Type(self.parse_type_spec()),
            DeclKeyword::Const | DeclKeyword::Var => Spec::Value(self.parse_value_spec(keyword)),
        }
    }

    fn parse_value_spec(&mut self, keyword: DeclKeyword) -> ValueSpec {
        let start = self.token_pos();
        let names = self.parse_ident_list();

        let ty = match self.token() {
            SyntaxKind::EqualsToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::CloseParenToken
            | SyntaxKind::EndOfFileToken => None,
            _ => Some(self.parse_type()),
        };

        let mut values = Vec::new();
        if self.parse_optional(SyntaxKind::EqualsToken) {
            values = self.parse_expr_list();
        } else if keyword == DeclKeyword::Var && ty.is_none() {
            self.error_expected("type");
        }

        ValueSpec {
            names,
            ty,
            values,
            span: self.span_from(start),
        }
    }

    fn parse_type_spec(&mut self) -> TypeSpec {
        let start = self.token_pos();
        let name = self.parse_ident();

        let mut type_params = Vec::new();
        if self.is_token(SyntaxKind::OpenBracketToken) && self.is_type_parameter_list_start() {
            type_params = self.parse_type_params();
        }

        let alias = self.parse_optional(SyntaxKind::EqualsToken);
        let ty = self.parse_type();
        TypeSpec {
            name,
            type_params,
            alias,
            ty,
            span: self.span_from(start),
        }
    }

    /// Distinguish `type A[P C] ...` from the array type in `type A [N]int`,
    /// looking at the tokens after `[`.
    fn is_type_parameter_list_start(&self) -> bool {
        if self.peek(1) != SyntaxKind::Identifier {
            return false;
        }
        matches!(
            self.peek(2),
            SyntaxKind::Identifier
                | SyntaxKind::CommaToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::TildeToken
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::FuncKeyword
                | SyntaxKind::MapKeyword
                | SyntaxKind::ChanKeyword
                | SyntaxKind::StructKeyword
                | SyntaxKind::OpenParenToken
        )
    }

    /// `[P1, P2 Constraint, Q any]`
    pub(crate) fn parse_type_params(&mut self) -> Vec<Field> {
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let mut fields = Vec::new();
        let mut pending: Vec<Ident> = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.token_pos();
            pending.push(self.parse_ident());
            if !self.is_token(SyntaxKind::CommaToken) && !self.is_token(SyntaxKind::CloseBracketToken)
            {
                let constraint = self.parse_constraint();
                fields.push(Field {
                    names: std::mem::take(&mut pending),
                    ty: constraint,
                    tag: None,
                });
            }
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
            if self.token_pos() == before {
                break;
            }
        }
        if !pending.is_empty() {
            self.error_expected("type constraint");
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        fields
    }

    pub(crate) fn parse_func_decl(&mut self) -> FuncDecl {
        let start = self.parse_expected(SyntaxKind::FuncKeyword);

        let recv = if self.is_token(SyntaxKind::OpenParenToken) {
            let (mut params, _) = self.parse_parameters();
            if params.len() != 1 || params[0].names.len() > 1 {
                self.error_expected("exactly one receiver");
            }
            if params.is_empty() {
                None
            } else {
                Some(params.swap_remove(0))
            }
        } else {
            None
        };

        let name = self.parse_ident();
        let type_params = if self.is_token(SyntaxKind::OpenBracketToken) {
            self.parse_type_params()
        } else {
            Vec::new()
        };
        let signature = self.parse_signature();
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            Some(self.with_expr_lev(0, |p| p.parse_block()))
        } else {
            None
        };

        FuncDecl {
            recv,
            name,
            type_params,
            signature,
            body,
            span: self.span_from(start),
        }
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Parameters followed by an optional result list.
    pub(crate) fn parse_signature(&mut self) -> Signature {
        let (params, variadic) = self.parse_parameters();
        let results = if self.is_token(SyntaxKind::OpenParenToken) {
            self.parse_parameters().0
        } else if self.is_type_start() {
            let ty = self.parse_type();
            vec![Field {
                names: Vec::new(),
                ty,
                tag: None,
            }]
        } else {
            Vec::new()
        };
        Signature {
            params,
            results,
            variadic,
        }
    }

    /// Parse `(a, b int, c ...string)` or `(int, error)`.
    ///
    /// Entries are collected first; a list where any entry carries both a
    /// name and a type is a named list, in which bare names take the type of
    /// the next typed entry.
    pub(crate) fn parse_parameters(&mut self) -> (Vec<Field>, bool) {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let mut entries: Vec<(TypeExpr, Option<TypeExpr>)> = Vec::new();
        let mut variadic = false;

        self.with_expr_lev(1, |p| {
            while !p.is_token(SyntaxKind::CloseParenToken) && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                let before = p.token_pos();
                if p.parse_optional(SyntaxKind::DotDotDotToken) {
                    variadic = true;
                    entries.push((p.parse_type(), None));
                } else if p.is_token(SyntaxKind::Identifier) {
                    let first = p.parse_param_head();
                    match first {
                        ParamHead::Typed(name, ty) => entries.push((name, Some(ty))),
                        ParamHead::Single(first) => {
                            if p.parse_optional(SyntaxKind::DotDotDotToken) {
                                variadic = true;
                                let ty = p.parse_type();
                                entries.push((first, Some(ty)));
                            } else if !p.is_token(SyntaxKind::CommaToken)
                                && !p.is_token(SyntaxKind::CloseParenToken)
                            {
                                let ty = p.parse_type();
                                entries.push((first, Some(ty)));
                            } else {
                                entries.push((first, None));
                            }
                        }
                    }
                } else {
                    entries.push((p.parse_type(), None));
                }
                if !p.parse_optional(SyntaxKind::CommaToken) || p.token_pos() == before {
                    break;
                }
            }
        });
        self.parse_expected(SyntaxKind::CloseParenToken);

        (self.group_parameters(entries), variadic)
    }

    fn group_parameters(&mut self, entries: Vec<(TypeExpr, Option<TypeExpr>)>) -> Vec<Field> {
        let named = entries.iter().any(|(_, ty)| ty.is_some());
        if !named {
            return entries
                .into_iter()
                .map(|(ty, _)| Field {
                    names: Vec::new(),
                    ty,
                    tag: None,
                })
                .collect();
        }

        let mut fields = Vec::new();
        let mut pending = Vec::new();
        let mut last_span = Span::default();
        for (head, ty) in entries {
            last_span = head.span;
            match head.kind {
                TypeExprKind::Name(ident) => pending.push(ident),
                _ => {
                    self.parse_error_at(
                        head.span.start,
                        head.span.len(),
                        diagnostic_codes::MIXED_NAMED_AND_UNNAMED_PARAMETERS,
                        &[],
                    );
                }
            }
            if let Some(ty) = ty {
                fields.push(Field {
                    names: std::mem::take(&mut pending),
                    ty,
                    tag: None,
                });
            }
        }
        if !pending.is_empty() {
            self.parse_error_at(
                last_span.start,
                last_span.len(),
                diagnostic_codes::MIXED_NAMED_AND_UNNAMED_PARAMETERS,
                &[],
            );
        }
        fields
    }

    /// Parse a parameter entry that starts with an identifier. A name
    /// followed by `[` may be a generic type (`List[T]`) or a name with an
    /// array type (`buf [4]byte`).
    fn parse_param_head(&mut self) -> ParamHead {
        let start = self.token_pos();
        let ident = self.parse_ident();
        match self.token() {
            SyntaxKind::DotToken => {
                let ty = self.parse_qualified_type_rest(ident);
                ParamHead::Single(ty)
            }
            SyntaxKind::OpenBracketToken => self.parse_array_field_or_type_instance(ident, start),
            _ => ParamHead::Single(TypeExpr {
                span: ident.span,
                kind: TypeExprKind::Name(ident),
            }),
        }
    }
}

/// Result of parsing the head of a parameter or struct field.
pub(crate) enum ParamHead {
    /// A bare name or a type; what it is depends on what follows.
    Single(TypeExpr),
    /// A name followed by an array or slice type.
    Typed(TypeExpr, TypeExpr),
}
