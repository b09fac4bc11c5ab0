use minijinja::{context, Environment};
use std::sync::Arc;

use crate::summary::Summary;

const INDEX: &str = "index.html";
const SUMMARY: &str = "summary.html";

/// Compiled page templates, shared by all handlers
#[derive(Clone)]
pub struct Templates {
    env: Arc<Environment<'static>>,
}

impl Templates {
    /// Compile the bundled templates
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(INDEX, include_str!("../templates/index.html"))?;
        env.add_template(SUMMARY, include_str!("../templates/summary.html"))?;

        Ok(Self { env: Arc::new(env) })
    }

    pub fn render_index(&self) -> Result<String, minijinja::Error> {
        self.env.get_template(INDEX)?.render(context! {})
    }

    /// Render the summary page; `graph_url` is a data URI produced by the chart renderer
    pub fn render_summary(&self, summary: &Summary, graph_url: &str) -> Result<String, minijinja::Error> {
        self.env
            .get_template(SUMMARY)?
            .render(context! { summary => summary, graph_url => graph_url })
    }
}
