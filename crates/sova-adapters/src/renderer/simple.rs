//! Placeholder substitution renderer.

use sova_core::{
    application::ports::TemplateRenderer,
    domain::{ParameterSet, render},
    error::SovaResult,
};
use tracing::{instrument, trace};

/// Renderer for the `{{ Name }}` placeholder syntax.
///
/// Delegates to [`sova_core::domain::render`]; it adds nothing but tracing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRenderer;

impl SimpleRenderer {
    /// Create a new simple renderer.
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(bytes = body.len()))]
    fn render(&self, body: &str, parameters: &ParameterSet) -> SovaResult<String> {
        let out = render(body, parameters)?;
        trace!(output_bytes = out.len(), "rendered");
        Ok(out)
    }
}
