//! Scanner state machine.
//!
//! Produces one token per call to [`ScannerState::scan`]. Whitespace and
//! comments are skipped, except that a newline (or a multi-line comment
//! spanning one, or end of file) after a token that may end a statement
//! yields an implicit `;` token, following Go's semicolon insertion rule.

use bitflags::bitflags;
use enumgen_common::diagnostic_codes;
use enumgen_common::{Diagnostic, Span};
use memchr::{memchr, memmem};

use crate::syntax_kind::SyntaxKind;

bitflags! {
    /// Extra facts about a scanned token.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u8 {
        /// A newline separates this token from the previous one.
        const PRECEDING_LINE_BREAK = 1 << 0;
        /// A `;` inserted by the scanner rather than written in the source.
        const IMPLICIT = 1 << 1;
        /// A string, rune or comment that runs into a newline or end of file.
        const UNTERMINATED = 1 << 2;
        /// A back-quoted raw string literal.
        const RAW = 1 << 3;
    }
}

/// A scanned token. The text is recovered from the source through `span`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: Span,
    pub flags: TokenFlags,
}

impl Token {
    #[must_use]
    pub fn is_implicit_semicolon(&self) -> bool {
        self.kind == SyntaxKind::SemicolonToken && self.flags.contains(TokenFlags::IMPLICIT)
    }
}

pub struct ScannerState<'a> {
    file_name: String,
    text: &'a str,
    pos: usize,
    /// Set after a token that triggers semicolon insertion at the next newline.
    insert_semicolon: bool,
    line_break: bool,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> ScannerState<'a> {
    pub fn new(file_name: impl Into<String>, text: &'a str) -> Self {
        // A leading byte order mark is ignored.
        let pos = if text.starts_with('\u{FEFF}') { 3 } else { 0 };
        Self {
            file_name: file_name.into(),
            text,
            pos,
            insert_semicolon: false,
            line_break: false,
            diagnostics: Vec::new(),
        }
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Source text of a token. Implicit semicolons read as `"\n"`.
    #[must_use]
    pub fn token_text(&self, token: &Token) -> &'a str {
        if token.is_implicit_semicolon() {
            return "\n";
        }
        token.span.text(self.text)
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Scan the next token.
    pub fn scan(&mut self) -> Token {
        let bytes = self.text.as_bytes();
        let len = bytes.len();

        loop {
            if self.pos >= len {
                if self.insert_semicolon {
                    self.insert_semicolon = false;
                    return self.implicit_semicolon(Span::at(len as u32));
                }
                return Token {
                    kind: SyntaxKind::EndOfFileToken,
                    span: Span::at(len as u32),
                    flags: self.take_line_break_flag(),
                };
            }

            match bytes[self.pos] {
                b'\n' => {
                    let start = self.pos as u32;
                    self.pos += 1;
                    self.line_break = true;
                    if self.insert_semicolon {
                        self.insert_semicolon = false;
                        return self.implicit_semicolon(Span::new(start, start + 1));
                    }
                }
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'/' if self.peek_byte(1) == Some(b'/') => {
                    // The terminating newline is handled by the next iteration.
                    match memchr(b'\n', &bytes[self.pos..]) {
                        Some(offset) => self.pos += offset,
                        None => self.pos = len,
                    }
                }
                b'/' if self.peek_byte(1) == Some(b'*') => {
                    let start = self.pos;
                    match memmem::find(&bytes[start + 2..], b"*/") {
                        Some(offset) => {
                            let end = start + 2 + offset + 2;
                            self.pos = end;
                            if memchr(b'\n', &bytes[start..end]).is_some() {
                                self.line_break = true;
                                if self.insert_semicolon {
                                    self.insert_semicolon = false;
                                    return self
                                        .implicit_semicolon(Span::new(start as u32, end as u32));
                                }
                            }
                        }
                        None => {
                            self.error(
                                start,
                                len - start,
                                diagnostic_codes::COMMENT_NOT_TERMINATED,
                                &[],
                            );
                            self.pos = len;
                        }
                    }
                }
                _ => break,
            }
        }

        let start = self.pos;
        let mut flags = self.take_line_break_flag();
        let kind = self.scan_token(&mut flags);
        self.insert_semicolon = matches!(
            kind,
            SyntaxKind::Identifier
                | SyntaxKind::IntLiteral
                | SyntaxKind::FloatLiteral
                | SyntaxKind::ImaginaryLiteral
                | SyntaxKind::RuneLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::BreakKeyword
                | SyntaxKind::ContinueKeyword
                | SyntaxKind::FallthroughKeyword
                | SyntaxKind::ReturnKeyword
                | SyntaxKind::PlusPlusToken
                | SyntaxKind::MinusMinusToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken
        );

        Token {
            kind,
            span: Span::new(start as u32, self.pos as u32),
            flags,
        }
    }

    fn scan_token(&mut self, flags: &mut TokenFlags) -> SyntaxKind {
        let ch = self.text.as_bytes()[self.pos];

        if ch.is_ascii_digit() || (ch == b'.' && self.peek_byte(1).is_some_and(|b| b.is_ascii_digit()))
        {
            return self.scan_number();
        }

        if ch == b'_' || ch.is_ascii_alphabetic() || ch >= 0x80 {
            if let Some(kind) = self.scan_identifier() {
                return kind;
            }
        }

        match ch {
            b'"' => self.scan_interpreted_string(flags),
            b'`' => self.scan_raw_string(flags),
            b'\'' => self.scan_rune(flags),
            _ => self.scan_operator(),
        }
    }

    fn scan_identifier(&mut self) -> Option<SyntaxKind> {
        let start = self.pos;
        let mut chars = self.text[start..].char_indices();
        match chars.next() {
            Some((_, c)) if c == '_' || c.is_alphabetic() => {}
            _ => return None,
        }
        let mut end = self.text.len();
        for (offset, c) in chars {
            if !(c == '_' || c.is_alphanumeric()) {
                end = start + offset;
                break;
            }
        }
        self.pos = end;
        let word = &self.text[start..end];
        Some(SyntaxKind::keyword(word).unwrap_or(SyntaxKind::Identifier))
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let mut kind = SyntaxKind::IntLiteral;
        let mut malformed = false;

        if self.current_byte() == Some(b'.') {
            // ".5"
            self.pos += 1;
            self.scan_digits(10);
            kind = SyntaxKind::FloatLiteral;
            if matches!(self.current_byte(), Some(b'e' | b'E')) {
                malformed |= !self.scan_exponent();
            }
        } else if self.current_byte() == Some(b'0')
            && matches!(
                self.peek_byte(1),
                Some(b'x' | b'X' | b'b' | b'B' | b'o' | b'O')
            )
        {
            let prefix = self.peek_byte(1).unwrap_or(b'x').to_ascii_lowercase();
            self.pos += 2;
            let base = match prefix {
                b'x' => 16,
                b'b' => 2,
                _ => 8,
            };
            let mut digits = self.scan_digits(base);
            if base == 16 {
                if self.current_byte() == Some(b'.') {
                    self.pos += 1;
                    digits += self.scan_digits(16);
                    kind = SyntaxKind::FloatLiteral;
                }
                if matches!(self.current_byte(), Some(b'p' | b'P')) {
                    malformed |= !self.scan_exponent();
                    kind = SyntaxKind::FloatLiteral;
                } else if kind == SyntaxKind::FloatLiteral {
                    // Hexadecimal mantissas require a 'p' exponent.
                    malformed = true;
                }
            }
            malformed |= digits == 0;
        } else {
            self.scan_digits(10);
            if self.current_byte() == Some(b'.') {
                self.pos += 1;
                self.scan_digits(10);
                kind = SyntaxKind::FloatLiteral;
            }
            if matches!(self.current_byte(), Some(b'e' | b'E')) {
                malformed |= !self.scan_exponent();
                kind = SyntaxKind::FloatLiteral;
            }
        }

        if self.current_byte() == Some(b'i') {
            self.pos += 1;
            kind = SyntaxKind::ImaginaryLiteral;
        }

        if malformed {
            let text = self.text[start..self.pos].to_string();
            self.error(
                start,
                self.pos - start,
                diagnostic_codes::MALFORMED_NUMBER_LITERAL,
                &[&text],
            );
        }
        kind
    }

    /// Consume digits of `base` and `_` separators; returns the digit count.
    fn scan_digits(&mut self, base: u32) -> usize {
        let mut count = 0;
        while let Some(b) = self.current_byte() {
            let is_digit = match base {
                16 => b.is_ascii_hexdigit(),
                // Invalid digits for binary/octal are reported by the checker
                // with the literal's value, like go/types does.
                _ => b.is_ascii_digit(),
            };
            if is_digit {
                count += 1;
            } else if b != b'_' {
                break;
            }
            self.pos += 1;
        }
        count
    }

    /// Consume an `e`/`p` exponent. Returns false when no digits follow.
    fn scan_exponent(&mut self) -> bool {
        self.pos += 1;
        if matches!(self.current_byte(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        self.scan_digits(10) > 0
    }

    fn scan_interpreted_string(&mut self, flags: &mut TokenFlags) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        if !self.scan_quoted(b'"') {
            *flags |= TokenFlags::UNTERMINATED;
            self.error(
                start,
                self.pos - start,
                diagnostic_codes::STRING_LITERAL_NOT_TERMINATED,
                &[],
            );
        }
        SyntaxKind::StringLiteral
    }

    fn scan_rune(&mut self, flags: &mut TokenFlags) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        if !self.scan_quoted(b'\'') {
            *flags |= TokenFlags::UNTERMINATED;
            self.error(
                start,
                self.pos - start,
                diagnostic_codes::RUNE_LITERAL_NOT_TERMINATED,
                &[],
            );
        }
        SyntaxKind::RuneLiteral
    }

    /// Scan up to and including `quote`, honoring backslash escapes.
    /// Returns false when a newline or end of file comes first.
    fn scan_quoted(&mut self, quote: u8) -> bool {
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'\n' => return false,
                b'\\' => {
                    self.pos += 1;
                    if self.current_byte() == Some(b'\n') {
                        return false;
                    }
                    if self.pos < bytes.len() {
                        self.pos += 1;
                    }
                }
                b if b == quote => {
                    self.pos += 1;
                    return true;
                }
                _ => self.pos += 1,
            }
        }
        false
    }

    fn scan_raw_string(&mut self, flags: &mut TokenFlags) -> SyntaxKind {
        let start = self.pos;
        *flags |= TokenFlags::RAW;
        match memchr(b'`', &self.text.as_bytes()[start + 1..]) {
            Some(offset) => self.pos = start + 1 + offset + 1,
            None => {
                self.pos = self.text.len();
                *flags |= TokenFlags::UNTERMINATED;
                self.error(
                    start,
                    self.pos - start,
                    diagnostic_codes::RAW_STRING_LITERAL_NOT_TERMINATED,
                    &[],
                );
            }
        }
        SyntaxKind::StringLiteral
    }

    fn scan_operator(&mut self) -> SyntaxKind {
        let start = self.pos;
        let ch = self.text.as_bytes()[start];
        self.pos += 1;
        match ch {
            b'+' => {
                if self.eat(b'+') {
                    SyntaxKind::PlusPlusToken
                } else if self.eat(b'=') {
                    SyntaxKind::PlusEqualsToken
                } else {
                    SyntaxKind::PlusToken
                }
            }
            b'-' => {
                if self.eat(b'-') {
                    SyntaxKind::MinusMinusToken
                } else if self.eat(b'=') {
                    SyntaxKind::MinusEqualsToken
                } else {
                    SyntaxKind::MinusToken
                }
            }
            b'*' => self.with_equals(SyntaxKind::AsteriskToken, SyntaxKind::AsteriskEqualsToken),
            b'/' => self.with_equals(SyntaxKind::SlashToken, SyntaxKind::SlashEqualsToken),
            b'%' => self.with_equals(SyntaxKind::PercentToken, SyntaxKind::PercentEqualsToken),
            b'^' => self.with_equals(SyntaxKind::CaretToken, SyntaxKind::CaretEqualsToken),
            b'=' => self.with_equals(SyntaxKind::EqualsToken, SyntaxKind::EqualsEqualsToken),
            b'!' => self.with_equals(SyntaxKind::ExclamationToken, SyntaxKind::ExclamationEqualsToken),
            b':' => self.with_equals(SyntaxKind::ColonToken, SyntaxKind::ColonEqualsToken),
            b'&' => {
                if self.eat(b'&') {
                    SyntaxKind::AmpersandAmpersandToken
                } else if self.eat(b'^') {
                    self.with_equals(
                        SyntaxKind::AmpersandCaretToken,
                        SyntaxKind::AmpersandCaretEqualsToken,
                    )
                } else {
                    self.with_equals(SyntaxKind::AmpersandToken, SyntaxKind::AmpersandEqualsToken)
                }
            }
            b'|' => {
                if self.eat(b'|') {
                    SyntaxKind::BarBarToken
                } else {
                    self.with_equals(SyntaxKind::BarToken, SyntaxKind::BarEqualsToken)
                }
            }
            b'<' => {
                if self.eat(b'<') {
                    self.with_equals(
                        SyntaxKind::LessThanLessThanToken,
                        SyntaxKind::LessThanLessThanEqualsToken,
                    )
                } else if self.eat(b'-') {
                    SyntaxKind::LessThanMinusToken
                } else {
                    self.with_equals(SyntaxKind::LessThanToken, SyntaxKind::LessThanEqualsToken)
                }
            }
            b'>' => {
                if self.eat(b'>') {
                    self.with_equals(
                        SyntaxKind::GreaterThanGreaterThanToken,
                        SyntaxKind::GreaterThanGreaterThanEqualsToken,
                    )
                } else {
                    self.with_equals(SyntaxKind::GreaterThanToken, SyntaxKind::GreaterThanEqualsToken)
                }
            }
            b'.' => {
                if self.current_byte() == Some(b'.') && self.peek_byte(1) == Some(b'.') {
                    self.pos += 2;
                    SyntaxKind::DotDotDotToken
                } else {
                    SyntaxKind::DotToken
                }
            }
            b'~' => SyntaxKind::TildeToken,
            b'(' => SyntaxKind::OpenParenToken,
            b')' => SyntaxKind::CloseParenToken,
            b'[' => SyntaxKind::OpenBracketToken,
            b']' => SyntaxKind::CloseBracketToken,
            b'{' => SyntaxKind::OpenBraceToken,
            b'}' => SyntaxKind::CloseBraceToken,
            b',' => SyntaxKind::CommaToken,
            b';' => SyntaxKind::SemicolonToken,
            _ => {
                // Step over the whole (possibly multi-byte) character.
                let c = self.text[start..].chars().next().unwrap_or('\u{FFFD}');
                self.pos = start + c.len_utf8();
                let shown = format!("{c:?}");
                self.error(start, c.len_utf8(), diagnostic_codes::INVALID_CHARACTER, &[&shown]);
                SyntaxKind::Unknown
            }
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn with_equals(&mut self, plain: SyntaxKind, with_equals: SyntaxKind) -> SyntaxKind {
        if self.eat(b'=') { with_equals } else { plain }
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.current_byte() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn current_byte(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(self.pos + offset).copied()
    }

    fn take_line_break_flag(&mut self) -> TokenFlags {
        if std::mem::take(&mut self.line_break) {
            TokenFlags::PRECEDING_LINE_BREAK
        } else {
            TokenFlags::empty()
        }
    }

    fn implicit_semicolon(&mut self, span: Span) -> Token {
        Token {
            kind: SyntaxKind::SemicolonToken,
            span,
            flags: TokenFlags::IMPLICIT,
        }
    }

    fn error(&mut self, start: usize, length: usize, code: u32, args: &[&str]) {
        self.diagnostics.push(Diagnostic::from_code(
            &self.file_name,
            start as u32,
            length as u32,
            code,
            args,
        ));
    }
}

/// Scan a whole file into a token vector ending with `EndOfFileToken`.
pub fn tokenize(file_name: &str, text: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut scanner = ScannerState::new(file_name, text);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.scan();
        tokens.push(token);
        if token.kind == SyntaxKind::EndOfFileToken {
            break;
        }
    }
    (tokens, scanner.take_diagnostics())
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod tests;
