use std::sync::Arc;

use anyhow::Context;
use meridian_templates_contracts::{RenderedTemplate, Template, TemplateService, TEMPLATES};
use tera::Tera;

#[derive(Debug, Clone)]
pub struct TemplateServiceImpl {
    tera: Arc<Tera>,
}

impl TemplateServiceImpl {
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();

        for &(name, text, html) in TEMPLATES {
            tera.add_raw_template(&text_name(name), text)
                .with_context(|| format!("Failed to parse text template {name}"))?;
            tera.add_raw_template(&html_name(name), html)
                .with_context(|| format!("Failed to parse html template {name}"))?;
        }

        Ok(Self { tera: tera.into() })
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<RenderedTemplate> {
        let context = tera::Context::from_serialize(template)?;
        Ok(RenderedTemplate {
            text: self.tera.render(&text_name(T::NAME), &context)?,
            html: self.tera.render(&html_name(T::NAME), &context)?,
        })
    }
}

// tera enables autoescaping based on the template name suffix
fn text_name(name: &str) -> String {
    format!("{name}.txt")
}

fn html_name(name: &str) -> String {
    format!("{name}.html")
}
