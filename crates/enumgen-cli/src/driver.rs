use anyhow::{Context, Result};
use enumgen_checker::{Package, check_package, load_dir};
use enumgen_emitter::{GeneratedUnit, RenderConfig, RenderTarget, Renderer, Template};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info_span, warn};

use crate::args::CliArgs;
use crate::config::{load_project_config, resolve_render_config};

/// Outcome of one batch run.
#[derive(Debug)]
pub struct GenerationResult {
    pub dir: PathBuf,
    pub config: RenderConfig,
    pub units: Vec<GeneratedUnit>,
    /// Files written, in the order of `units`.
    pub written: Vec<PathBuf>,
}

impl GenerationResult {
    pub fn invalid_units(&self) -> impl Iterator<Item = &GeneratedUnit> {
        self.units.iter().filter(|unit| !unit.is_valid())
    }
}

/// Run the batch tool: load and check the package once, generate every
/// requested type, then write the files. Nothing is written unless every
/// type was generated.
pub fn generate(args: &CliArgs, command: String, cwd: &Path) -> Result<GenerationResult> {
    let dir = cwd.join(args.directory()?);
    let type_names = args.type_names()?;
    let project = load_project_config(&dir)?;
    let config = resolve_render_config(args, project.as_ref(), type_names, command);

    let _span = info_span!("generate", dir = %dir.display()).entered();
    let files = load_dir(&dir, &config.output_suffix).context("parsing package")?;
    let package = check_package(files).context("parsing package")?;
    let renderer = Renderer::new(Template::builtin()?);

    let units = generate_units(&package, &renderer, &config)?;
    let written = write_units(&dir, &units)?;

    Ok(GenerationResult {
        dir,
        config,
        units,
        written,
    })
}

/// Generate every type in `config` in parallel. The first failure, in
/// request order, is returned.
pub fn generate_units(
    package: &Package,
    renderer: &Renderer,
    config: &RenderConfig,
) -> Result<Vec<GeneratedUnit>> {
    config
        .type_names
        .par_iter()
        .map(|type_name| generate_type(package, renderer, config, type_name))
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}

fn generate_type(
    package: &Package,
    renderer: &Renderer,
    config: &RenderConfig,
    type_name: &str,
) -> Result<GeneratedUnit> {
    let extraction = package
        .extract_type(type_name)
        .with_context(|| format!("finding values for type {type_name}"))?;
    let unit = renderer
        .render(RenderTarget::new(package, &extraction), config)
        .with_context(|| format!("generating code for type {type_name}"))?;
    if !unit.is_valid() {
        warn!(type_name, "writing invalid generated code for inspection");
    }
    Ok(unit)
}

fn write_units(dir: &Path, units: &[GeneratedUnit]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(units.len());
    for unit in units {
        let path = dir.join(&unit.file_name);
        std::fs::write(&path, &unit.text)
            .with_context(|| format!("writing output {}", path.display()))?;
        debug!(path = %path.display(), "wrote");
        written.push(path);
    }
    Ok(written)
}
