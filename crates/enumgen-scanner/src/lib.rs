//! Go scanner/tokenizer for enumgen.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types, including keywords and operators
//! - `ScannerState` - Tokenizer state machine with automatic semicolon insertion
//! - `Token` / `TokenFlags` - Scanned tokens

pub mod syntax_kind;
pub use syntax_kind::SyntaxKind;

pub mod scanner;
pub use scanner::{ScannerState, Token, TokenFlags, tokenize};
