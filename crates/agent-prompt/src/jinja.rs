//! MiniJinja-based template implementation
//!
//! [`JinjaTemplate`] validates its source once at construction and renders
//! it with any serializable context.

use crate::{PromptError, Result};
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

/// A named prompt template backed by MiniJinja
///
/// Undefined variables are an error rather than silently rendering empty,
/// so a typo in a context struct shows up at render time.
///
/// # Examples
///
/// ```
/// use agent_prompt::JinjaTemplate;
/// use serde_json::json;
///
/// let template = JinjaTemplate::new("scenario", "<scenario>{{ description }}</scenario>")?;
/// let rendered = template.render(&json!({ "description": "Trip to Paris" }))?;
/// assert_eq!(rendered, "<scenario>Trip to Paris</scenario>");
/// # Ok::<(), agent_prompt::PromptError>(())
/// ```
pub struct JinjaTemplate {
    name: String,
    source: String,
}

impl JinjaTemplate {
    /// Compile a template
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::TemplateParseFailed`] if the source is not valid
    /// Jinja syntax.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let source = source.into();

        environment()
            .template_from_str(&source)
            .map_err(|e| PromptError::TemplateParseFailed {
                name: name.clone(),
                detail: e.to_string(),
            })?;

        Ok(Self { name, source })
    }

    /// Template name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw template source
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render with a serializable context
    pub fn render<S: Serialize>(&self, context: &S) -> Result<String> {
        // A fresh environment per render keeps the template free of lifetimes
        environment()
            .render_str(&self.source, context)
            .map_err(|e| PromptError::RenderError {
                name: self.name.clone(),
                detail: e.to_string(),
            })
    }
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    env
}

impl std::fmt::Debug for JinjaTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JinjaTemplate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
