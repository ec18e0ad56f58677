//! Semantic analysis of a Go package for enumgen.
//!
//! This crate is organized into several modules:
//! - `sources` - selecting and parsing the files of one package
//! - `build_context` - GOOS/GOARCH file suffixes and build constraints
//! - `resolver` - package-scope binding, type and method resolution
//! - `const_eval` - evaluation of package-level constant expressions
//! - `extract` - the constants of one named type, in declaration order
//! - `types` / `constant` - type and value representations
//!
//! The usual pipeline is [`load_dir`], [`check_package`], then
//! [`Package::extract_type`] for every requested type.

pub mod build_context;
pub mod constant;
mod const_eval;
pub mod error;
pub mod extract;
pub mod package;
pub mod resolver;
pub mod sources;
pub mod types;

pub use build_context::{BuildContext, Constraint, ConstraintError};
pub use constant::ConstValue;
pub use error::{DiagnosticReport, ExtractionError, LoadError, TypeCheckError};
pub use extract::{EnumExtraction, ExtractedName};
pub use package::{ConstKey, ConstObject, Package};
pub use resolver::check_package;
pub use sources::{DEFAULT_OUTPUT_SUFFIX, load_dir, load_dir_for, load_sources, load_sources_for};
pub use types::{BasicKind, MethodInfo, NamedType, StringerFacts, Type};

#[cfg(test)]
#[path = "../tests/const_eval_tests.rs"]
mod const_eval_tests;

#[cfg(test)]
#[path = "../tests/extract_tests.rs"]
mod extract_tests;
