//! Parsed handlebars templates.

use handlebars::{Handlebars, handlebars_helper, no_escape};
use serde::Serialize;

use crate::error::RenderError;

/// Source of the template compiled into the tool.
pub const BUILTIN_TEMPLATE: &str = include_str!("../templates/enums.go.hbs");

const TEMPLATE_NAME: &str = "enums";

handlebars_helper!(lower: |s: str| s.to_lowercase());
handlebars_helper!(upper: |s: str| s.to_uppercase());

/// A parsed template. Output is not HTML-escaped; `lower` and `upper`
/// helpers are available.
pub struct Template {
    registry: Handlebars<'static>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(no_escape);
        registry.register_helper("lower", Box::new(lower));
        registry.register_helper("upper", Box::new(upper));
        registry
            .register_template_string(TEMPLATE_NAME, source)
            .map_err(|err| RenderError::TemplateParse(Box::new(err)))?;
        Ok(Self { registry })
    }

    pub fn builtin() -> Result<Self, RenderError> {
        Self::parse(BUILTIN_TEMPLATE)
    }

    pub(crate) fn execute<T: Serialize>(
        &self,
        type_name: &str,
        context: &T,
    ) -> Result<String, RenderError> {
        self.registry
            .render(TEMPLATE_NAME, context)
            .map_err(|source| RenderError::TemplateRender {
                type_name: type_name.to_string(),
                source,
            })
    }
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template").finish_non_exhaustive()
    }
}
