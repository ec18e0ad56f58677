//! Source loading: pick the files of one package and parse them.

use std::path::Path;

use enumgen_common::LineMap;
use enumgen_parser::{SourceFile, parse_file};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::build_context::BuildContext;
use crate::error::{DiagnosticReport, LoadError};

/// Default suffix of generated files, which the loader skips.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_jsonenums";

/// Whether a file name denotes a package source file.
///
/// Test files, files generated with `skip_suffix` and files whose name
/// starts with `_` or `.` are excluded, the way the Go tool ignores them.
#[must_use]
pub fn is_source_file_name(file_name: &str, skip_suffix: &str) -> bool {
    if !file_name.ends_with(".go") || file_name.ends_with("_test.go") {
        return false;
    }
    if file_name.starts_with('_') || file_name.starts_with('.') {
        return false;
    }
    if !skip_suffix.is_empty() && file_name.ends_with(&format!("{skip_suffix}.go")) {
        return false;
    }
    true
}

/// Load the package in `dir` for the running platform. Subdirectories are
/// not descended into.
pub fn load_dir(dir: &Path, skip_suffix: &str) -> Result<Vec<SourceFile>, LoadError> {
    load_dir_for(&BuildContext::host(), dir, skip_suffix)
}

/// Load the package in `dir` as built for `context`.
pub fn load_dir_for(
    context: &BuildContext,
    dir: &Path,
    skip_suffix: &str,
) -> Result<Vec<SourceFile>, LoadError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|source| LoadError::ReadDir {
            dir: dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !is_source_file_name(name, skip_suffix) || !context.matches_file_name(name) {
            trace!(file = name, "skipping non-source file");
            continue;
        }
        let path = entry.path();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        files.push((path.display().to_string(), text));
    }
    load_sources_for(context, &dir.display().to_string(), files, skip_suffix)
}

/// Load a package from in-memory `(file name, text)` pairs for the running
/// platform. `origin` names the package location in error messages.
pub fn load_sources(
    origin: &str,
    files: impl IntoIterator<Item = (String, String)>,
    skip_suffix: &str,
) -> Result<Vec<SourceFile>, LoadError> {
    load_sources_for(&BuildContext::host(), origin, files, skip_suffix)
}

/// Load a package from in-memory `(file name, text)` pairs as built for
/// `context`.
pub fn load_sources_for(
    context: &BuildContext,
    origin: &str,
    sources: impl IntoIterator<Item = (String, String)>,
    skip_suffix: &str,
) -> Result<Vec<SourceFile>, LoadError> {
    let mut files = Vec::new();
    for (name, text) in sources {
        let base = Path::new(&name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(name.as_str());
        if !is_source_file_name(base, skip_suffix) || !context.matches_file_name(base) {
            continue;
        }
        let matches = context
            .matches_constraints(&text)
            .map_err(|source| LoadError::BuildConstraint {
                file: name.clone(),
                source,
            })?;
        if !matches {
            debug!(
                file = %name,
                goos = %context.goos,
                goarch = %context.goarch,
                "excluded by build constraint"
            );
            continue;
        }
        files.push((name, text));
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));

    if files.is_empty() {
        return Err(LoadError::NoBuildableFiles(origin.to_string()));
    }

    let mut parsed = Vec::with_capacity(files.len());
    let mut diagnostics = Vec::new();
    let mut line_maps = Vec::new();
    for (name, text) in &files {
        let (file, file_diagnostics) = parse_file(name, text);
        if !file_diagnostics.is_empty() {
            line_maps.push((name.clone(), LineMap::build(text)));
            diagnostics.extend(file_diagnostics);
        }
        parsed.push(file);
    }

    if !diagnostics.is_empty() {
        let report = DiagnosticReport::new(diagnostics, |file| {
            line_maps
                .iter()
                .find(|(name, _)| name == file)
                .map(|(_, line_map)| line_map)
        });
        return Err(LoadError::Parse(report));
    }

    debug!(origin, files = parsed.len(), "loaded package sources");
    Ok(parsed)
}

#[cfg(test)]
#[path = "../tests/sources_tests.rs"]
mod tests;
