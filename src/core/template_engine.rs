// src/core/template_engine.rs

use handlebars::Handlebars;
use serde::Serialize;

use crate::core::namespace::Namespace;

/// Thin wrapper around the templating library used for every substitution.
#[derive(Debug)]
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    /// An engine with HTML escaping disabled.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        // Output is source code and prose, not HTML.
        handlebars.register_escape_fn(handlebars::no_escape);
        Self { handlebars }
    }

    /// Renders `text` against any serializable data.
    pub fn render<T: Serialize>(&self, text: &str, data: &T) -> Result<String, String> {
        self.handlebars
            .render_template(text, data)
            .map_err(|e| e.to_string())
    }

    /// Renders `text` against a namespace.
    pub fn render_namespace(&self, text: &str, namespace: &Namespace) -> Result<String, String> {
        self.render(text, &namespace.to_json())
    }
}
