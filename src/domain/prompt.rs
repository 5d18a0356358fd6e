//! Prompt templates and strict rendering.
//!
//! Templates are immutable strings with named `{{ placeholder }}` slots.
//! Rendering is substitution-only: block (`{%`) and comment (`{#`) syntax is
//! rejected, and every placeholder referenced by the template must have a
//! value in the context.

use std::collections::HashMap;

use minijinja::{Environment, UndefinedBehavior};

use crate::domain::AppError;

/// Built-in template behind `generate`: one topic placeholder.
pub const JOKE_TEMPLATE: &str = include_str!("../../templates/joke.j2");

/// Built-in template behind `summarize`: document chunks under `docs`.
pub const BRIEFING_TEMPLATE: &str = include_str!("../../templates/briefing.j2");

/// An immutable prompt template with a diagnostic name.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    name: String,
    source: String,
}

impl PromptTemplate {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self { name: name.into(), source: source.into() }
    }

    pub fn joke() -> Self {
        Self::new("joke", JOKE_TEMPLATE)
    }

    pub fn briefing() -> Self {
        Self::new("briefing", BRIEFING_TEMPLATE)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render this template with the given context.
    ///
    /// Fails with `MissingPlaceholder` when the template references a name
    /// the context does not supply. Extra context keys are ignored.
    pub fn render(&self, context: &RenderContext) -> Result<String, AppError> {
        if let Some(token) = disallowed_template_token(&self.source) {
            return Err(AppError::Template {
                template: self.name.clone(),
                reason: format!("template syntax '{token}' is not allowed"),
            });
        }

        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        let template = env.template_from_str(&self.source).map_err(|err| AppError::Template {
            template: self.name.clone(),
            reason: err.to_string(),
        })?;

        let mut missing: Vec<String> = template
            .undeclared_variables(false)
            .into_iter()
            .filter(|name| !context.variables.contains_key(name))
            .collect();

        if !missing.is_empty() {
            missing.sort();
            return Err(AppError::MissingPlaceholder {
                template: self.name.clone(),
                name: missing.remove(0),
            });
        }

        template.render(&context.variables).map_err(|err| AppError::Template {
            template: self.name.clone(),
            reason: err.to_string(),
        })
    }
}

/// Placeholder values for one render, built fresh per invocation.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable to the context.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Add an ordered chunk sequence as a single variable, joined by newline.
    pub fn with_chunks<I, S>(self, name: impl Into<String>, chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined =
            chunks.into_iter().map(|c| c.as_ref().to_string()).collect::<Vec<_>>().join("\n");
        self.with_var(name, joined)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(|s| s.as_str())
    }
}

fn disallowed_template_token(template: &str) -> Option<&'static str> {
    if template.contains("{%") {
        return Some("{%");
    }
    if template.contains("{#") {
        return Some("{#");
    }
    None
}
