//! Centralized limits and thresholds.

// =============================================================================
// Parser
// =============================================================================

/// Maximum number of syntax errors reported for a single file.
///
/// The parser stops after this many errors, like `go/parser` does, so a
/// garbled file does not produce a cascade of follow-on errors.
pub const MAX_PARSE_ERRORS: usize = 10;

/// Maximum nesting depth of expressions, types and blocks.
pub const MAX_PARSE_DEPTH: u32 = 200;

// =============================================================================
// Checker
// =============================================================================

/// Maximum recursion depth while evaluating constant expressions.
///
/// Deep chains of constants referring to constants are evaluated recursively.
pub const MAX_CONST_EVAL_DEPTH: u32 = 200;

/// Shift counts above this are rejected as overflowing any integer constant.
pub const MAX_SHIFT_COUNT: u32 = 127;

/// Maximum number of diagnostics included in an error's display text.
pub const MAX_REPORTED_DIAGNOSTICS: usize = 10;
