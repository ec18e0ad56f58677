//! Recursive descent parser for Go source files.

pub mod state;
mod state_declarations;
mod state_expressions;
mod state_statements;
mod state_types;

pub use state::ParserState;
