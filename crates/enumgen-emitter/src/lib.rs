//! Go code generation for enumgen.
//!
//! - `tables` - forward and reverse lookup tables, and `EnumCodec`, an
//!   in-memory model of the generated conversions
//! - `template` - handlebars templates, including the built-in one
//! - `render` - `Renderer`, which turns an extraction into a `GeneratedUnit`
//! - `layout` - gofmt-compatible layout of the rendered text
//! - `config` - `RenderConfig` and its enums

pub mod config;
pub mod context;
pub mod error;
pub mod layout;
pub mod render;
pub mod tables;
pub mod template;

pub use config::{Format, KeyCase, RenderConfig};
pub use context::{TableRow, TemplateContext};
pub use error::{CodecError, RenderError};
pub use layout::{key_value_padding, tidy};
pub use render::{GeneratedUnit, RenderTarget, Renderer};
pub use tables::{EnumCodec, EnumTables, ForwardEntry, ReverseEntry, Stringable};
pub use template::{BUILTIN_TEMPLATE, Template};

#[cfg(test)]
#[path = "../tests/tables_tests.rs"]
mod tables_tests;

#[cfg(test)]
#[path = "../tests/render_tests.rs"]
mod render_tests;
