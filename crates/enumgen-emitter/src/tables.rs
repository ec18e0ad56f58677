//! Forward and reverse lookup tables, and an in-memory model of the
//! generated conversion code.

use enumgen_checker::EnumExtraction;
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;

use crate::config::KeyCase;
use crate::error::{CodecError, RenderError};

/// Serialized key to constant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ForwardEntry {
    pub key: String,
    pub name: String,
    pub value: i128,
}

/// Value to canonical constant: the lexically smallest name among the
/// constants sharing the value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReverseEntry {
    pub value: i128,
    pub name: String,
    /// Serialized form of `name`.
    pub key: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnumTables {
    pub type_name: String,
    pub forward: Vec<ForwardEntry>,
    /// In first-declaration order of each value.
    pub reverse: Vec<ReverseEntry>,
}

impl EnumTables {
    /// Build both tables for `extraction`, serializing keys with `key_case`.
    ///
    /// Two constants whose keys coincide collapse into one forward entry
    /// when their values agree and are a `KeyCollision` otherwise.
    pub fn build(extraction: &EnumExtraction, key_case: KeyCase) -> Result<Self, RenderError> {
        let mut forward: IndexMap<String, ForwardEntry> = IndexMap::new();
        let mut canonical: IndexMap<i128, &str> = IndexMap::new();

        for extracted in extraction.iter() {
            let key = key_case.apply(&extracted.name);
            match forward.entry(key) {
                Entry::Occupied(existing) => {
                    if existing.get().value != extracted.value {
                        return Err(RenderError::KeyCollision {
                            type_name: extraction.type_name.clone(),
                            key: existing.key().clone(),
                            first: existing.get().name.clone(),
                            second: extracted.name.clone(),
                        });
                    }
                }
                Entry::Vacant(slot) => {
                    let key = slot.key().clone();
                    slot.insert(ForwardEntry {
                        key,
                        name: extracted.name.clone(),
                        value: extracted.value,
                    });
                }
            }

            canonical
                .entry(extracted.value)
                .and_modify(|name| {
                    if extracted.name.as_str() < *name {
                        *name = extracted.name.as_str();
                    }
                })
                .or_insert(extracted.name.as_str());
        }

        let reverse = canonical
            .into_iter()
            .map(|(value, name)| ReverseEntry {
                value,
                name: name.to_string(),
                key: key_case.apply(name),
            })
            .collect();

        Ok(Self {
            type_name: extraction.type_name.clone(),
            forward: forward.into_values().collect(),
            reverse,
        })
    }

    #[must_use]
    pub fn canonical(&self, value: i128) -> Option<&ReverseEntry> {
        self.reverse.iter().find(|e| e.value == value)
    }
}

// =============================================================================
// Codec
// =============================================================================

/// A type that already renders its values as text, like a Go type with a
/// value-receiver `String() string` method.
pub trait Stringable {
    fn string(&self, value: i128) -> String;
}

impl<F> Stringable for F
where
    F: Fn(i128) -> String,
{
    fn string(&self, value: i128) -> String {
        self(value)
    }
}

/// Behaves like the code generated from the same tables: `encode` and
/// `decode` are the serialization pair, `text` is `String()`.
pub struct EnumCodec<'s> {
    tables: EnumTables,
    key_case: KeyCase,
    stringer: Option<&'s dyn Stringable>,
    /// Keys in effect for decoding; rebuilt from the stringer when present.
    decode_keys: IndexMap<String, i128>,
}

impl<'s> EnumCodec<'s> {
    #[must_use]
    pub fn new(tables: EnumTables, key_case: KeyCase) -> Self {
        let decode_keys = tables
            .forward
            .iter()
            .map(|e| (e.key.clone(), e.value))
            .collect();
        Self {
            tables,
            key_case,
            stringer: None,
            decode_keys,
        }
    }

    /// Defer to `stringer` for encoding and text, and decode its output
    /// instead of the constant names. Mirrors the generated `init`.
    #[must_use]
    pub fn with_stringer(mut self, stringer: &'s dyn Stringable) -> Self {
        self.decode_keys = self
            .tables
            .reverse
            .iter()
            .map(|e| (self.key_case.apply(&stringer.string(e.value)), e.value))
            .collect();
        self.stringer = Some(stringer);
        self
    }

    #[must_use]
    pub fn tables(&self) -> &EnumTables {
        &self.tables
    }

    pub fn encode(&self, value: i128) -> Result<String, CodecError> {
        if let Some(stringer) = self.stringer {
            return Ok(self.key_case.apply(&stringer.string(value)));
        }
        self.tables
            .canonical(value)
            .map(|e| e.key.clone())
            .ok_or_else(|| CodecError::InvalidValue {
                type_name: self.tables.type_name.clone(),
                value,
            })
    }

    pub fn decode(&self, name: &str) -> Result<i128, CodecError> {
        self.decode_keys
            .get(&self.key_case.apply(name))
            .copied()
            .ok_or_else(|| CodecError::InvalidName {
                type_name: self.tables.type_name.clone(),
                name: name.to_string(),
            })
    }

    #[must_use]
    pub fn text(&self, value: i128) -> String {
        if let Some(stringer) = self.stringer {
            return stringer.string(value);
        }
        match self.tables.canonical(value) {
            Some(entry) => entry.name.clone(),
            None => format!("{}({value})", self.tables.type_name),
        }
    }
}
