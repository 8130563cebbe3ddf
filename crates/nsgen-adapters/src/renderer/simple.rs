//! Simple variable substitution renderer.

use nsgen_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{DomainValidator as validator, RenderContext, RenderedFile, Template, TemplateContent},
    error::NsResult,
};
use tracing::{debug, instrument};

/// Renderer using `{{VAR}}` substitution in both paths and contents.
pub struct SimpleRenderer;

impl SimpleRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimpleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(level = "debug", skip_all, fields(template = %template.id))]
    fn render(&self, template: &Template, context: &RenderContext) -> NsResult<Vec<RenderedFile>> {
        validator::validate_template(template)?;

        let mut rendered = Vec::with_capacity(template.files.len());
        for spec in &template.files {
            let path = context.render(&spec.path);
            // Angular interpolation may legitimately survive in contents,
            // never in a path.
            if path.contains("{{") {
                return Err(ApplicationError::RenderingFailed {
                    reason: format!("unresolved placeholder in path '{}'", path),
                }
                .into());
            }

            let content = render_content(&spec.content, context);
            debug!(path = %path, bytes = content.len(), "Rendered file");
            rendered.push(RenderedFile { path, content });
        }

        Ok(rendered)
    }
}

fn render_content(content: &TemplateContent, ctx: &RenderContext) -> String {
    match content {
        TemplateContent::Literal(source) => source.as_str().to_string(),
        TemplateContent::Parameterized(source) => ctx.render(source.as_str()),
    }
}
