//! Rendering and codec errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("parse template: {0}")]
    TemplateParse(#[source] Box<handlebars::TemplateError>),

    #[error("execute template for {type_name}: {source}")]
    TemplateRender {
        type_name: String,
        #[source]
        source: handlebars::RenderError,
    },

    #[error("{type_name}: {first} and {second} both serialize as {key:?} with different values")]
    KeyCollision {
        type_name: String,
        key: String,
        first: String,
        second: String,
    },

    #[error("{type_name}: no output format selected")]
    NoFormats { type_name: String },
}

/// Failures of the in-memory codec, worded like the generated Go errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("invalid {type_name}: {value}")]
    InvalidValue { type_name: String, value: i128 },

    #[error("invalid {type_name} {name:?}")]
    InvalidName { type_name: String, name: String },
}
