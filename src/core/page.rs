use crate::domain::model::StatusMessage;
use crate::utils::error::Result;
use tera::{Context, Tera};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
const INDEX_NAME: &str = "index.html";

/// Renders the form page. Values are HTML-escaped by tera's autoescape for `.html` templates.
#[derive(Clone)]
pub struct PageRenderer {
    template_engine: Tera,
}

impl PageRenderer {
    pub fn new() -> Result<Self> {
        let mut template_engine = Tera::default();
        template_engine.add_raw_template(INDEX_NAME, INDEX_TEMPLATE)?;
        Ok(Self { template_engine })
    }

    pub fn render(&self, message: Option<&StatusMessage>) -> Result<String> {
        let mut context = Context::new();
        if let Some(message) = message {
            context.insert("message", message);
        }
        Ok(self.template_engine.render(INDEX_NAME, &context)?)
    }
}
