//! Parser state: token cursor, diagnostics and recovery helpers.

use enumgen_common::limits::{MAX_PARSE_DEPTH, MAX_PARSE_ERRORS};
use enumgen_common::{Diagnostic, Span, diagnostic_codes};
use enumgen_scanner::{SyntaxKind, Token, tokenize};

/// Recursive descent parser over a pre-scanned token stream.
///
/// `expr_lev` follows the Go convention: it is negative while parsing the
/// header of an `if`, `for` or `switch` statement, where a `{` after a type
/// name opens the statement body instead of a composite literal, and is
/// raised inside parentheses and brackets where that ambiguity disappears.
pub struct ParserState {
    pub(crate) file_name: String,
    pub(crate) source: String,
    tokens: Vec<Token>,
    cursor: usize,
    /// End offset of the last consumed token.
    prev_end: u32,
    pub(crate) expr_lev: i32,
    recursion_depth: u32,
    parse_diagnostics: Vec<Diagnostic>,
    last_error_pos: Option<u32>,
}

impl ParserState {
    #[must_use]
    pub fn new(file_name: String, source: String) -> Self {
        let (tokens, scan_diagnostics) = tokenize(&file_name, &source);
        Self {
            file_name,
            source,
            tokens,
            cursor: 0,
            prev_end: 0,
            expr_lev: 0,
            recursion_depth: 0,
            parse_diagnostics: scan_diagnostics,
            last_error_pos: None,
        }
    }

    #[must_use]
    pub fn get_diagnostics(&self) -> &[Diagnostic] {
        &self.parse_diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        let mut diagnostics = std::mem::take(&mut self.parse_diagnostics);
        diagnostics.sort_by_key(|d| d.start);
        diagnostics
    }

    // =========================================================================
    // Token access
    // =========================================================================

    pub(crate) fn current(&self) -> Token {
        // The stream always ends with EndOfFileToken and the cursor never
        // moves past it.
        self.tokens[self.cursor.min(self.tokens.len() - 1)]
    }

    pub(crate) fn token(&self) -> SyntaxKind {
        self.current().kind
    }

    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.token() == kind
    }

    /// Kind of the token `n` positions ahead of the current one.
    pub(crate) fn peek(&self, n: usize) -> SyntaxKind {
        let index = (self.cursor + n).min(self.tokens.len() - 1);
        self.tokens[index].kind
    }

    pub(crate) fn token_pos(&self) -> u32 {
        self.current().span.start
    }

    /// Span from `start` to the end of the last consumed token.
    pub(crate) fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.prev_end.max(start))
    }

    pub(crate) fn token_text(&self) -> &str {
        let token = self.current();
        if token.is_implicit_semicolon() {
            return "\n";
        }
        token.span.text(&self.source)
    }

    pub(crate) fn next_token(&mut self) {
        if self.cursor < self.tokens.len() - 1 {
            self.prev_end = self.current().span.end;
            self.cursor += 1;
        }
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report "expected X, found Y". Returns the start
    /// offset of the token that was (or should have been) consumed.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> u32 {
        let pos = self.token_pos();
        if self.is_token(kind) {
            self.next_token();
        } else {
            self.error_expected(&format!("'{}'", kind.text()));
        }
        pos
    }

    /// A statement or declaration terminator. Closing `)` and `}` make the
    /// semicolon optional.
    pub(crate) fn parse_semicolon(&mut self) {
        match self.token() {
            SyntaxKind::SemicolonToken => self.next_token(),
            SyntaxKind::CloseParenToken | SyntaxKind::CloseBraceToken => {}
            _ => {
                self.error_expected("';'");
                self.skip_to_statement_end();
            }
        }
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Description of the current token for error messages.
    pub(crate) fn describe_current(&self) -> String {
        let token = self.current();
        match token.kind {
            SyntaxKind::EndOfFileToken => "EOF".to_string(),
            SyntaxKind::SemicolonToken if token.is_implicit_semicolon() => "newline".to_string(),
            SyntaxKind::Identifier => format!("name {}", self.token_text()),
            kind if kind.is_literal() => format!("literal {}", self.token_text()),
            kind if kind.is_keyword() => format!("keyword {}", kind.text()),
            kind => format!("'{}'", kind.text()),
        }
    }

    pub(crate) fn error_expected(&mut self, what: &str) {
        let found = self.describe_current();
        self.parse_error_at_current_token(diagnostic_codes::EXPECTED_FOUND, &[what, &found]);
    }

    pub(crate) fn parse_error_at_current_token(&mut self, code: u32, args: &[&str]) {
        let token = self.current();
        self.parse_error_at(token.span.start, token.span.len(), code, args);
    }

    /// Record a diagnostic. Only the first error at a given position is kept,
    /// and recording stops after `MAX_PARSE_ERRORS`.
    pub(crate) fn parse_error_at(&mut self, start: u32, length: u32, code: u32, args: &[&str]) {
        if self.last_error_pos == Some(start) || self.parse_diagnostics.len() >= MAX_PARSE_ERRORS
        {
            return;
        }
        self.last_error_pos = Some(start);
        self.parse_diagnostics
            .push(Diagnostic::from_code(&self.file_name, start, length, code, args));
    }

    // =========================================================================
    // Recovery
    // =========================================================================

    /// Skip to the start of the next top-level declaration.
    pub(crate) fn skip_to_declaration(&mut self) {
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken
                | SyntaxKind::ConstKeyword
                | SyntaxKind::VarKeyword
                | SyntaxKind::TypeKeyword
                | SyntaxKind::FuncKeyword
                | SyntaxKind::ImportKeyword => return,
                _ => self.next_token(),
            }
        }
    }

    /// Skip past the current statement, stopping before a closing brace.
    pub(crate) fn skip_to_statement_end(&mut self) {
        let mut depth = 0u32;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => return,
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => depth += 1,
                SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                SyntaxKind::SemicolonToken if depth == 0 => {
                    self.next_token();
                    return;
                }
                _ => {}
            }
            self.next_token();
        }
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    /// Enter a nested construct. Returns false, after reporting, when the
    /// nesting limit is exceeded.
    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_PARSE_DEPTH {
            let found = self.describe_current();
            self.parse_error_at_current_token(diagnostic_codes::EXPECTED_EXPRESSION, &[&found]);
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    /// Run `f` with `expr_lev` set to `lev`, restoring it afterwards.
    pub(crate) fn with_expr_lev<T>(&mut self, lev: i32, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.expr_lev;
        self.expr_lev = lev;
        let result = f(self);
        self.expr_lev = saved;
        result
    }
}
