/*
 * template.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The template type.
//!
//! There is no compile step: a template is kept as source text and each
//! render runs the substitution passes over it directly.

use std::path::Path;

use crate::error::TemplateResult;

/// A template ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub(crate) source: String,
}

impl Template {
    /// Create a template from source text.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Load a template from a file.
    pub fn from_file(path: &Path) -> TemplateResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self::new(source))
    }

    /// The original template text.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl From<&str> for Template {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for Template {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}
