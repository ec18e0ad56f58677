//! Data handed to the template.

use serde::Serialize;

use crate::config::{Format, KeyCase, RenderConfig};
use crate::layout::key_value_padding;
use crate::tables::EnumTables;

/// One element of a lookup table literal. `pad` holds the spaces between
/// `key:` and the value that align the values of the literal.
#[derive(Debug, Serialize)]
pub struct TableRow<'a> {
    pub key: &'a str,
    pub name: &'a str,
    pub value: i128,
    pub pad: String,
}

/// Everything a template can refer to.
///
/// `values` lists the constant names in declaration order, including
/// aliases, for templates that only need the names.
#[derive(Debug, Serialize)]
pub struct TemplateContext<'a> {
    pub command: &'a str,
    pub package_name: &'a str,
    pub type_name: &'a str,
    pub values: Vec<&'a str>,
    pub forward: Vec<TableRow<'a>>,
    pub reverse: Vec<TableRow<'a>>,
    pub imports: Vec<&'static str>,
    pub key_case: KeyCase,
    pub key_func: Option<&'static str>,
    pub text: bool,
    pub json: bool,
    pub bson: bool,
    /// The `_ToName` / `_FromName` helpers are needed.
    pub codec: bool,
    /// Generate `String()`; false when the type already declares one.
    pub emit_string: bool,
    /// Encode through the existing `String()` method.
    pub use_stringer: bool,
}

pub(crate) struct ContextInput<'a> {
    pub package_name: &'a str,
    pub names: Vec<&'a str>,
    pub tables: &'a EnumTables,
    pub config: &'a RenderConfig,
    pub is_stringer: bool,
    pub defines_string: bool,
}

impl<'a> TemplateContext<'a> {
    pub(crate) fn new(input: ContextInput<'a>) -> Self {
        let config = input.config;
        let text = config.has_format(Format::Text);
        let json = config.has_format(Format::Json);
        let bson = config.has_format(Format::Bson);
        let codec = json || bson;
        let emit_string = text && !input.defines_string;
        let use_stringer = input.is_stringer && !config.ignore_stringer;
        let key_func = config.key_case.go_func();

        // Sorted, as gofmt leaves a single import group.
        let mut imports = Vec::new();
        if json {
            imports.push("encoding/json");
        }
        if codec || emit_string {
            imports.push("fmt");
        }
        if bson {
            imports.push("gopkg.in/mgo.v2/bson");
        }
        if key_func.is_some() && (codec || use_stringer) {
            imports.push("strings");
        }

        let tables = input.tables;
        // Forward keys are printed quoted.
        let forward_keys: Vec<String> = tables
            .forward
            .iter()
            .map(|e| format!("\"{}\"", e.key))
            .collect();
        let forward = tables
            .forward
            .iter()
            .zip(key_value_padding(&forward_keys))
            .map(|(e, pad)| TableRow {
                key: &e.key,
                name: &e.name,
                value: e.value,
                pad,
            })
            .collect();
        let reverse_keys: Vec<&str> = tables.reverse.iter().map(|e| e.name.as_str()).collect();
        let reverse = tables
            .reverse
            .iter()
            .zip(key_value_padding(&reverse_keys))
            .map(|(e, pad)| TableRow {
                key: &e.key,
                name: &e.name,
                value: e.value,
                pad,
            })
            .collect();

        Self {
            command: &config.command,
            package_name: input.package_name,
            type_name: &tables.type_name,
            values: input.names,
            forward,
            reverse,
            imports,
            key_case: config.key_case,
            key_func,
            text,
            json,
            bson,
            codec,
            emit_string,
            use_stringer,
        }
    }
}
