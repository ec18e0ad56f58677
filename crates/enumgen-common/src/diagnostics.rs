//! Diagnostic types and message lookup.
//!
//! Every diagnostic carries a numeric code whose message template lives in
//! [`DIAGNOSTIC_MESSAGES`]. Templates use `{0}`, `{1}`, ... placeholders that
//! are filled with [`format_message`].

use serde::Serialize;

use crate::position::LineMap;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Message = 2,
}

/// A diagnostic attached to a span of one source file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(file: String, start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
        }
    }

    /// Create a new warning diagnostic.
    #[must_use]
    pub const fn warning(file: String, start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Warning,
            code,
        }
    }

    /// Build an error from a code and its template arguments.
    #[must_use]
    pub fn from_code(file: &str, start: u32, length: u32, code: u32, args: &[&str]) -> Self {
        let template = get_message_template(code).unwrap_or("{0}");
        Self::error(
            file.to_string(),
            start,
            length,
            format_message(template, args),
            code,
        )
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    /// Render as `file:line:col: message`, the way the Go toolchain prints errors.
    #[must_use]
    pub fn render(&self, line_map: &LineMap) -> String {
        let pos = line_map.offset_to_position(self.start);
        format!("{}:{}: {}", self.file, pos, self.message_text)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}: {}", self.file, self.start, self.message_text)
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

// =============================================================================
// Message Data
// =============================================================================

/// Diagnostic codes.
///
/// 1xxx are lexical and syntax errors, 2xxx are type-checking errors.
pub mod diagnostic_codes {
    // Scanner
    pub const STRING_LITERAL_NOT_TERMINATED: u32 = 1001;
    pub const RAW_STRING_LITERAL_NOT_TERMINATED: u32 = 1002;
    pub const COMMENT_NOT_TERMINATED: u32 = 1003;
    pub const RUNE_LITERAL_NOT_TERMINATED: u32 = 1004;
    pub const INVALID_CHARACTER: u32 = 1005;
    pub const MALFORMED_NUMBER_LITERAL: u32 = 1006;

    // Parser
    pub const EXPECTED_FOUND: u32 = 1101;
    pub const EXPECTED_DECLARATION: u32 = 1102;
    pub const EXPECTED_EXPRESSION: u32 = 1103;
    pub const EXPECTED_TYPE: u32 = 1104;
    pub const EXPECTED_STATEMENT: u32 = 1105;
    pub const EXPECTED_PACKAGE_CLAUSE: u32 = 1106;
    pub const MISSING_COMMA_IN_COMPOSITE_LITERAL: u32 = 1107;
    pub const MIXED_NAMED_AND_UNNAMED_PARAMETERS: u32 = 1108;
    pub const IMPORTS_AFTER_DECLARATIONS: u32 = 1109;

    // Checker
    pub const UNDEFINED: u32 = 2001;
    pub const REDECLARED: u32 = 2002;
    pub const NOT_A_TYPE: u32 = 2003;
    pub const INVALID_RECURSIVE_TYPE: u32 = 2004;
    pub const INITIALIZATION_CYCLE: u32 = 2005;
    pub const MISSING_INIT_EXPR: u32 = 2006;
    pub const EXTRA_INIT_EXPR: u32 = 2007;
    pub const CONSTANT_OVERFLOWS: u32 = 2008;
    pub const MISMATCHED_TYPES: u32 = 2009;
    pub const DIVISION_BY_ZERO: u32 = 2010;
    pub const NOT_CONSTANT: u32 = 2011;
    pub const INVALID_CONSTANT_TYPE: u32 = 2012;
    pub const OPERATOR_NOT_DEFINED: u32 = 2013;
    pub const CANNOT_CONVERT: u32 = 2014;
    pub const MISMATCHED_PACKAGE_NAMES: u32 = 2015;
    pub const METHOD_REDECLARED: u32 = 2016;
    pub const CONSTANT_TRUNCATED: u32 = 2017;
    pub const INVALID_RECEIVER: u32 = 2018;
    pub const INVALID_SHIFT_COUNT: u32 = 2019;
    pub const NOT_AN_EXPRESSION: u32 = 2020;
    pub const ALREADY_DECLARED_THROUGH_IMPORT: u32 = 2021;
    pub const CANNOT_USE_AS_VALUE: u32 = 2022;
    pub const WRONG_ARGUMENT_COUNT: u32 = 2023;
    pub const TYPE_WITHOUT_EXPRESSION: u32 = 2024;
    pub const CONSTANT_TOO_DEEP: u32 = 2025;
    pub const INVALID_LITERAL: u32 = 2026;
}

use diagnostic_codes as c;

const fn error(code: u32, message: &'static str) -> DiagnosticMessage {
    DiagnosticMessage {
        code,
        category: DiagnosticCategory::Error,
        message,
    }
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    error(c::STRING_LITERAL_NOT_TERMINATED, "string literal not terminated"),
    error(
        c::RAW_STRING_LITERAL_NOT_TERMINATED,
        "raw string literal not terminated",
    ),
    error(c::COMMENT_NOT_TERMINATED, "comment not terminated"),
    error(c::RUNE_LITERAL_NOT_TERMINATED, "rune literal not terminated"),
    error(c::INVALID_CHARACTER, "invalid character {0} in source"),
    error(c::MALFORMED_NUMBER_LITERAL, "malformed number literal {0}"),
    error(c::EXPECTED_FOUND, "expected {0}, found {1}"),
    error(c::EXPECTED_DECLARATION, "expected declaration, found {0}"),
    error(c::EXPECTED_EXPRESSION, "expected expression, found {0}"),
    error(c::EXPECTED_TYPE, "expected type, found {0}"),
    error(c::EXPECTED_STATEMENT, "expected statement, found {0}"),
    error(c::EXPECTED_PACKAGE_CLAUSE, "expected 'package', found {0}"),
    error(
        c::MISSING_COMMA_IN_COMPOSITE_LITERAL,
        "missing ',' before newline in composite literal",
    ),
    error(
        c::MIXED_NAMED_AND_UNNAMED_PARAMETERS,
        "mixed named and unnamed parameters",
    ),
    error(c::IMPORTS_AFTER_DECLARATIONS, "imports must appear before other declarations"),
    error(c::UNDEFINED, "undefined: {0}"),
    error(c::REDECLARED, "{0} redeclared in this block"),
    error(c::NOT_A_TYPE, "{0} is not a type"),
    error(c::INVALID_RECURSIVE_TYPE, "invalid recursive type {0}"),
    error(c::INITIALIZATION_CYCLE, "initialization cycle: {0} refers to itself"),
    error(c::MISSING_INIT_EXPR, "missing init expr for const declaration"),
    error(c::EXTRA_INIT_EXPR, "extra init expr"),
    error(c::CONSTANT_OVERFLOWS, "cannot use {0} as {1} value (overflows)"),
    error(
        c::MISMATCHED_TYPES,
        "invalid operation: mismatched types {0} and {1}",
    ),
    error(c::DIVISION_BY_ZERO, "invalid operation: division by zero"),
    error(c::NOT_CONSTANT, "{0} is not constant"),
    error(c::INVALID_CONSTANT_TYPE, "invalid constant type {0}"),
    error(
        c::OPERATOR_NOT_DEFINED,
        "invalid operation: operator {0} not defined on {1}",
    ),
    error(c::CANNOT_CONVERT, "cannot convert {0} to type {1}"),
    error(c::MISMATCHED_PACKAGE_NAMES, "mismatched package names: {0} and {1}"),
    error(c::METHOD_REDECLARED, "method {0}.{1} already declared"),
    error(c::CONSTANT_TRUNCATED, "{0} truncated to {1}"),
    error(c::INVALID_RECEIVER, "invalid receiver type {0}"),
    error(c::INVALID_SHIFT_COUNT, "invalid shift count {0}"),
    error(c::NOT_AN_EXPRESSION, "{0} is not an expression"),
    error(
        c::ALREADY_DECLARED_THROUGH_IMPORT,
        "{0} already declared through import of package {1}",
    ),
    error(c::CANNOT_USE_AS_VALUE, "cannot use {0} as {1} value"),
    error(c::WRONG_ARGUMENT_COUNT, "wrong argument count in call to {0}"),
    error(
        c::TYPE_WITHOUT_EXPRESSION,
        "const declaration cannot have type without expression",
    ),
    error(c::CONSTANT_TOO_DEEP, "constant {0} is defined too deeply"),
    error(c::INVALID_LITERAL, "invalid literal {0}"),
];
