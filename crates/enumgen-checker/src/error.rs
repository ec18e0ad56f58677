//! Error types of loading, checking and extraction.

use std::fmt;
use std::path::PathBuf;

use enumgen_common::limits::MAX_REPORTED_DIAGNOSTICS;
use enumgen_common::{Diagnostic, LineMap};
use thiserror::Error;

use crate::build_context::ConstraintError;

/// Diagnostics together with their `file:line:col: message` rendering.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticReport {
    pub diagnostics: Vec<Diagnostic>,
    rendered: Vec<String>,
}

impl DiagnosticReport {
    /// Render `diagnostics`, looking up each file's line map by file name.
    pub fn new<'a>(
        diagnostics: Vec<Diagnostic>,
        line_map_of: impl Fn(&str) -> Option<&'a LineMap>,
    ) -> Self {
        let rendered = diagnostics
            .iter()
            .map(|d| match line_map_of(&d.file) {
                Some(line_map) => d.render(line_map),
                None => d.to_string(),
            })
            .collect();
        Self {
            diagnostics,
            rendered,
        }
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.rendered
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rendered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty()
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.rendered.iter().take(MAX_REPORTED_DIAGNOSTICS).enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        if self.rendered.len() > MAX_REPORTED_DIAGNOSTICS {
            write!(
                f,
                "\n(and {} more errors)",
                self.rendered.len() - MAX_REPORTED_DIAGNOSTICS
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading directory {dir}: {source}")]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: {source}")]
    BuildConstraint {
        file: String,
        #[source]
        source: ConstraintError,
    },

    #[error("no buildable Go source files in {0}")]
    NoBuildableFiles(String),

    #[error("couldn't load package:\n{0}")]
    Parse(DiagnosticReport),
}

#[derive(Debug, Error)]
#[error("type checking package {package}:\n{report}")]
pub struct TypeCheckError {
    pub package: String,
    pub report: DiagnosticReport,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// Problems found while walking the constant blocks, one message each.
    #[error("inspecting code:\n\t{}", .0.join("\n\t"))]
    Inspect(Vec<String>),

    #[error("no values defined for type {0}")]
    NoValues(String),
}
