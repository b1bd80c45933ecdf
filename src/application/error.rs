use lol_html::errors::RewritingError;
use thiserror::Error;

use crate::{infra::error::InfraError, presentation::views::TemplateRenderError};

use super::loader::LoadError;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Template(#[from] TemplateRenderError),
    #[error("html rewrite failed: {0}")]
    Rewrite(#[from] RewritingError),
    #[error("invalid selector `{selector}` for {target}: {reason}")]
    Selector {
        target: &'static str,
        selector: String,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}

/// Flatten an error and its sources into one line per cause.
pub fn error_chain(error: &dyn std::error::Error) -> Vec<String> {
    let mut messages = vec![error.to_string()];
    let mut current = error.source();
    while let Some(inner) = current {
        messages.push(inner.to_string());
        current = inner.source();
    }
    messages
}
