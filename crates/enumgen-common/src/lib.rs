//! Common types and utilities for enumgen.
//!
//! This crate provides foundational types used across all enumgen crates:
//! - Source spans (`Span`)
//! - Line/column mapping for byte offsets (`LineMap`, `Position`)
//! - Diagnostics with a numeric code table
//! - Comment scanning utilities
//! - Shared limits and thresholds

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Position types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

// Diagnostics and message templates
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, diagnostic_codes, format_message,
    get_message_template,
};

// Centralized limits and thresholds
pub mod limits;

// Comment scanning utilities
pub mod comments;
