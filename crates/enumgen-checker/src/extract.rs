//! Enumeration of the constants declared with a given type.

use enumgen_parser::ast::{Decl, DeclKeyword, GenDecl, Spec};
use serde::Serialize;
use tracing::debug;

use crate::error::ExtractionError;
use crate::package::{ConstKey, Package};

/// One constant of the enumerated type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExtractedName {
    pub name: String,
    pub type_name: String,
    pub value: i128,
    /// Position in declaration order across the package.
    pub order: usize,
}

/// The constants of one type, in declaration order. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnumExtraction {
    pub type_name: String,
    pub names: Vec<ExtractedName>,
}

impl EnumExtraction {
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtractedName> {
        self.names.iter()
    }
}

/// Type of the current spec inside a constant block: a spec with an
/// explicit type sets it, a spec with values and no type clears it, and a
/// spec without either inherits it.
#[derive(Clone, Debug, PartialEq, Eq)]
enum TypeCursor {
    Untyped,
    Typed(String),
}

impl TypeCursor {
    fn matches(&self, type_name: &str) -> bool {
        matches!(self, TypeCursor::Typed(name) if name == type_name)
    }
}

impl Package {
    /// Collect the package-level constants whose declared type is written
    /// as `type_name`, in declaration order.
    pub fn extract_type(&self, type_name: &str) -> Result<EnumExtraction, ExtractionError> {
        let mut names = Vec::new();
        let mut errors = Vec::new();
        for (f, file) in self.files.iter().enumerate() {
            for (d, decl) in file.decls.iter().enumerate() {
                let Decl::Gen(gen_decl) = decl else {
                    continue;
                };
                if gen_decl.keyword != DeclKeyword::Const {
                    continue;
                }
                self.extract_from_block(type_name, f, d, gen_decl, &mut names, &mut errors);
            }
        }

        if !errors.is_empty() {
            return Err(ExtractionError::Inspect(errors));
        }
        if names.is_empty() {
            return Err(ExtractionError::NoValues(type_name.to_string()));
        }
        debug!(type_name, values = names.len(), "extracted constants");
        Ok(EnumExtraction {
            type_name: type_name.to_string(),
            names,
        })
    }

    fn extract_from_block(
        &self,
        type_name: &str,
        file: usize,
        decl: usize,
        gen_decl: &GenDecl,
        names: &mut Vec<ExtractedName>,
        errors: &mut Vec<String>,
    ) {
        let source = &self.files[file].text;
        let mut cursor = TypeCursor::Untyped;
        for (s, spec) in gen_decl.specs.iter().enumerate() {
            let Spec::Value(spec) = spec else {
                continue;
            };
            match &spec.ty {
                Some(ty) => cursor = TypeCursor::Typed(ty.text(source).to_string()),
                None if !spec.values.is_empty() => cursor = TypeCursor::Untyped,
                None => {}
            }
            if !cursor.matches(type_name) {
                continue;
            }

            for (n, name) in spec.names.iter().enumerate() {
                if name.is_blank() {
                    continue;
                }
                let key = ConstKey {
                    file,
                    decl,
                    spec: s,
                    name: n,
                };
                let Some(object) = self.constant(key) else {
                    errors.push(format!("no value for constant {}", name.name));
                    continue;
                };
                if !self
                    .basic_kind(&object.ty)
                    .is_some_and(|kind| kind.is_integer())
                {
                    errors.push(format!("can't handle non-integer constant type {type_name}"));
                    continue;
                }
                match object.value.as_int() {
                    Some(value) => names.push(ExtractedName {
                        name: name.name.clone(),
                        type_name: type_name.to_string(),
                        value,
                        order: names.len(),
                    }),
                    None => errors.push(format!("no value for constant {}", name.name)),
                }
            }
        }
    }
}
