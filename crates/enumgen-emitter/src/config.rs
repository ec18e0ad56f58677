//! Rendering configuration shared by the batch tool and the service.

use std::fmt;

use clap::ValueEnum;
use enumgen_checker::DEFAULT_OUTPUT_SUFFIX;
use serde::{Deserialize, Serialize};

/// A representation the generated code converts the type to and from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// A `String() string` method.
    Text,
    /// `MarshalJSON` / `UnmarshalJSON`.
    Json,
    /// `GetBSON` / `SetBSON`.
    Bson,
}

impl Format {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Format::Text => "text",
            Format::Json => "json",
            Format::Bson => "bson",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case transform applied to serialized keys. Constant names in `String()`
/// output are never transformed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyCase {
    #[default]
    None,
    Lower,
    Upper,
}

impl KeyCase {
    #[must_use]
    pub fn apply(self, name: &str) -> String {
        match self {
            KeyCase::None => name.to_string(),
            KeyCase::Lower => name.to_lowercase(),
            KeyCase::Upper => name.to_uppercase(),
        }
    }

    /// The Go function performing the same transform, if any.
    #[must_use]
    pub const fn go_func(self) -> Option<&'static str> {
        match self {
            KeyCase::None => None,
            KeyCase::Lower => Some("strings.ToLower"),
            KeyCase::Upper => Some("strings.ToUpper"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    pub type_names: Vec<String>,
    pub formats: Vec<Format>,
    pub key_case: KeyCase,
    pub output_suffix: String,
    /// Do not defer to an existing `String() string` method.
    pub ignore_stringer: bool,
    /// Arguments of the invoking command, quoted in the generated header.
    pub command: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            type_names: Vec::new(),
            formats: vec![Format::Json],
            key_case: KeyCase::None,
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            ignore_stringer: false,
            command: String::new(),
        }
    }
}

impl RenderConfig {
    #[must_use]
    pub fn has_format(&self, format: Format) -> bool {
        self.formats.contains(&format)
    }

    /// Name of the file generated for `type_name`: the lowercased type name
    /// followed by the output suffix.
    #[must_use]
    pub fn file_name(&self, type_name: &str) -> String {
        format!("{}{}.go", type_name.to_lowercase(), self.output_suffix)
    }
}
