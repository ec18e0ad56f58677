//! The checked package: parsed files plus resolved declarations.

use enumgen_parser::SourceFile;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::constant::ConstValue;
use crate::types::{BasicKind, NamedType, StringerFacts, Type};

/// Position of a constant name: file index, declaration index within the
/// file, spec index within the declaration and name index within the spec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstKey {
    pub file: usize,
    pub decl: usize,
    pub spec: usize,
    pub name: usize,
}

/// A package-level constant with its evaluated type and value.
#[derive(Clone, Debug)]
pub struct ConstObject {
    pub name: String,
    pub ty: Type,
    pub value: ConstValue,
}

/// A type-checked package. Read-only once built, so one package may be
/// shared across threads generating different types.
#[derive(Debug)]
pub struct Package {
    pub(crate) name: String,
    pub(crate) files: Vec<SourceFile>,
    pub(crate) constants: FxHashMap<ConstKey, ConstObject>,
    pub(crate) types: IndexMap<String, NamedType>,
}

impl Package {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    #[must_use]
    pub fn constant(&self, key: ConstKey) -> Option<&ConstObject> {
        self.constants.get(&key)
    }

    /// Look up a constant by name. Blank constants are not addressable.
    #[must_use]
    pub fn constant_named(&self, name: &str) -> Option<&ConstObject> {
        if name == "_" {
            return None;
        }
        self.constants.values().find(|c| c.name == name)
    }

    /// Look up a package-level type, following aliases to package-local
    /// targets.
    #[must_use]
    pub fn named_type(&self, name: &str) -> Option<&NamedType> {
        let mut current = self.types.get(name)?;
        let mut hops = 0;
        while let Some(target) = &current.alias_of {
            hops += 1;
            if hops > self.types.len() {
                return None;
            }
            current = self.types.get(target)?;
        }
        Some(current)
    }

    /// The basic kind underlying `ty`, if any.
    #[must_use]
    pub fn basic_kind(&self, ty: &Type) -> Option<BasicKind> {
        match ty {
            Type::Basic(kind) => Some(*kind),
            Type::Named(name) => match self.named_type(name)?.underlying {
                Type::Basic(kind) => Some(kind),
                _ => None,
            },
            _ => None,
        }
    }

    /// Stringer facts for `type_name`; all false when the package does not
    /// declare the type.
    #[must_use]
    pub fn stringer_facts(&self, type_name: &str) -> StringerFacts {
        self.named_type(type_name)
            .map(NamedType::stringer_facts)
            .unwrap_or_default()
    }
}
