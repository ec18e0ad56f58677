//! Go parser and syntax tree for enumgen.
//!
//! - `ast` - owned syntax tree for one source file
//! - `parser` - `ParserState`, a recursive descent parser over scanner tokens
//!
//! The parser reads complete Go files, including function bodies, so the same
//! code validates the source packages and the generated output.

pub mod ast;
pub mod parser;

pub use ast::SourceFile;
pub use parser::ParserState;

use enumgen_common::Diagnostic;

/// Parse `text` and return the file together with every scanner and parser
/// diagnostic, sorted by position.
#[must_use]
pub fn parse_file(file_name: &str, text: &str) -> (SourceFile, Vec<Diagnostic>) {
    let mut parser = ParserState::new(file_name.to_string(), text.to_string());
    let file = parser.parse_source_file();
    let diagnostics = parser.take_diagnostics();
    (file, diagnostics)
}

/// Parse `text`, failing with its diagnostics if it is not valid Go syntax.
pub fn check_syntax(file_name: &str, text: &str) -> Result<SourceFile, Vec<Diagnostic>> {
    let (file, diagnostics) = parse_file(file_name, text);
    if diagnostics.iter().any(Diagnostic::is_error) {
        Err(diagnostics)
    } else {
        Ok(file)
    }
}

#[cfg(test)]
#[path = "../tests/parser_tests.rs"]
mod parser_tests;

#[cfg(test)]
#[path = "../tests/state_statement_tests.rs"]
mod state_statement_tests;
