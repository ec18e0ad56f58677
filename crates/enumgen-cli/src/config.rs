use anyhow::{Context, Result};
use enumgen_checker::DEFAULT_OUTPUT_SUFFIX;
use enumgen_emitter::{Format, KeyCase, RenderConfig};
use serde::Deserialize;
use std::path::Path;

use crate::args::CliArgs;

/// Name of the optional per-package configuration file.
pub const CONFIG_FILE_NAME: &str = "enumgen.json";

/// Defaults read from `enumgen.json`. Command-line flags take precedence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub formats: Option<Vec<Format>>,
    #[serde(default)]
    pub key_case: Option<KeyCase>,
    #[serde(default)]
    pub ignore_stringer: Option<bool>,
}

/// Read `enumgen.json` from `dir` if it exists.
pub fn load_project_config(dir: &Path) -> Result<Option<ProjectConfig>> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(config))
}

/// Merge flags over the project file over the built-in defaults.
pub fn resolve_render_config(
    args: &CliArgs,
    project: Option<&ProjectConfig>,
    type_names: Vec<String>,
    command: String,
) -> RenderConfig {
    let project = project.cloned().unwrap_or_default();
    let mut formats = args
        .formats
        .clone()
        .or(project.formats)
        .unwrap_or_else(|| vec![Format::Json]);
    formats.sort();
    formats.dedup();

    RenderConfig {
        type_names,
        formats,
        key_case: args.key_case.or(project.key_case).unwrap_or_default(),
        output_suffix: args
            .suffix
            .clone()
            .or(project.suffix)
            .unwrap_or_else(|| DEFAULT_OUTPUT_SUFFIX.to_string()),
        ignore_stringer: args.ignore_stringer || project.ignore_stringer.unwrap_or(false),
        command,
    }
}
