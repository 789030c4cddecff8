/*
 * diagnostics.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Diagnostics for degraded rendering.
//!
//! Rendering never fails. Anything that cannot be substituted is left in the
//! output (or, for a missing loop collection, dropped), and a [`Diagnostic`]
//! records what happened so a driver can warn about it or refuse the output.

use std::fmt;

/// A non-fatal condition encountered while rendering.
///
/// Loop line numbers are 1-based and counted in the text the loop pass sees,
/// after variable substitution. A substituted value containing newlines
/// shifts them relative to the template source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A `{{ ... }}` expression was left verbatim in the output.
    UnresolvedExpression { expression: String },

    /// A filtered expression named a filter other than `lower`/`upper`.
    UnknownFilter { expression: String, filter: String },

    /// A loop referenced a collection that is not a top-level key.
    MissingCollection { line: usize, collection: String },

    /// A `{% for` line did not match `{% for <var> in <collection> %}`.
    MalformedLoop { line: usize, text: String },

    /// A loop had no `{% endfor %}`; its body ran to the end of the text.
    UnclosedLoop { line: usize, variable: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnresolvedExpression { expression } => {
                write!(f, "unresolved expression `{expression}`")
            }
            Diagnostic::UnknownFilter { expression, filter } => {
                write!(f, "unknown filter `{filter}` in `{expression}`")
            }
            Diagnostic::MissingCollection { line, collection } => {
                write!(
                    f,
                    "line {line}: loop collection `{collection}` not found, block skipped"
                )
            }
            Diagnostic::MalformedLoop { line, text } => {
                write!(f, "line {line}: malformed for-statement `{}`", text.trim())
            }
            Diagnostic::UnclosedLoop { line, variable } => {
                write!(
                    f,
                    "line {line}: loop over `{variable}` has no `{{% endfor %}}`"
                )
            }
        }
    }
}

/// Collector for diagnostics produced during one render call.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty diagnostic collector.
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    /// Record a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(target: "codegen_template", %diagnostic, "degraded render");
        self.diagnostics.push(diagnostic);
    }

    /// Get a reference to the collected diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the collector and return the diagnostics in the order found.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
