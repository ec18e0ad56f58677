//! Rendering an extraction into a Go source file.

use enumgen_checker::{EnumExtraction, Package, StringerFacts};
use enumgen_common::LineMap;
use enumgen_parser::check_syntax;
use tracing::{debug, warn};

use crate::config::RenderConfig;
use crate::context::{ContextInput, TemplateContext};
use crate::error::RenderError;
use crate::layout::tidy;
use crate::tables::EnumTables;
use crate::template::Template;

/// What to render: one extracted type of one package.
#[derive(Clone, Copy, Debug)]
pub struct RenderTarget<'a> {
    pub package_name: &'a str,
    pub extraction: &'a EnumExtraction,
    pub stringer: StringerFacts,
}

impl<'a> RenderTarget<'a> {
    #[must_use]
    pub fn new(package: &'a Package, extraction: &'a EnumExtraction) -> Self {
        Self {
            package_name: package.name(),
            extraction,
            stringer: package.stringer_facts(&extraction.type_name),
        }
    }
}

/// A rendered file, ready to be written or served.
#[derive(Clone, Debug)]
pub struct GeneratedUnit {
    pub type_name: String,
    pub file_name: String,
    pub text: String,
    pub config: RenderConfig,
    /// Syntax errors found in `text`, as `file:line:col: message`.
    pub syntax_diagnostics: Vec<String>,
}

impl GeneratedUnit {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.syntax_diagnostics.is_empty()
    }
}

/// Renders extractions with one template. Shareable across threads.
#[derive(Debug)]
pub struct Renderer {
    template: Template,
}

impl Renderer {
    #[must_use]
    pub fn new(template: Template) -> Self {
        Self { template }
    }

    pub fn render(
        &self,
        target: RenderTarget<'_>,
        config: &RenderConfig,
    ) -> Result<GeneratedUnit, RenderError> {
        let type_name = &target.extraction.type_name;
        if config.formats.is_empty() {
            return Err(RenderError::NoFormats {
                type_name: type_name.clone(),
            });
        }

        let tables = EnumTables::build(target.extraction, config.key_case)?;
        if config.has_format(crate::Format::Text) && target.stringer.defines_string {
            debug!(type_name = %type_name, "String method already declared, not generating one");
        }
        let context = TemplateContext::new(ContextInput {
            package_name: target.package_name,
            names: target.extraction.iter().map(|n| n.name.as_str()).collect(),
            tables: &tables,
            config,
            is_stringer: target.stringer.is_stringer,
            defines_string: target.stringer.defines_string,
        });
        let raw = self.template.execute(type_name, &context)?;
        let text = tidy(&raw);

        let file_name = config.file_name(type_name);
        let syntax_diagnostics = match check_syntax(&file_name, &text) {
            Ok(_) => Vec::new(),
            Err(diagnostics) => {
                let line_map = LineMap::build(&text);
                diagnostics.iter().map(|d| d.render(&line_map)).collect()
            }
        };
        if !syntax_diagnostics.is_empty() {
            warn!(
                type_name = %type_name,
                errors = syntax_diagnostics.len(),
                "generated code is not valid Go"
            );
        }

        debug!(
            type_name = %type_name,
            file = %file_name,
            bytes = text.len(),
            "rendered"
        );
        Ok(GeneratedUnit {
            type_name: type_name.clone(),
            file_name,
            text,
            config: config.clone(),
            syntax_diagnostics,
        })
    }
}
