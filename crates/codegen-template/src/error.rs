/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for building templates and contexts.
//!
//! Rendering itself never fails; these errors only come from loading a
//! template file or turning a configuration document into a context.

use thiserror::Error;

/// Errors that can occur while preparing a render.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The configuration document is well-formed but cannot be a context.
    #[error("Invalid context: {message}")]
    InvalidContext { message: String },

    /// The configuration document is not valid YAML.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The configuration document is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (e.g., reading a template file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;
