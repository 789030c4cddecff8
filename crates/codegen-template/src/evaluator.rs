/*
 * evaluator.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template rendering.
//!
//! Rendering is three passes, each a `&str -> String` function whose output
//! feeds the next:
//!
//! 1. [`substitute_filtered`]: `{{ path | filter }}`
//! 2. [`substitute_plain`]: `{{ key }}` and `{{ key.subkey }}`
//! 3. [`expand_loops`]: `{% for x in xs %} ... {% endfor %}`
//!
//! Rendering never fails. Whatever cannot be substituted is left in place and
//! reported as a [`Diagnostic`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::context::TemplateContext;
use crate::diagnostics::{Diagnostic, DiagnosticCollector};
use crate::filter::Filter;
use crate::filtered::{FILTERED_EXPRESSION, substitute_filtered};
use crate::loops::expand_loops;
use crate::plain::substitute_plain;
use crate::resolver::resolve_path;
use crate::template::Template;

/// Any `{{ ... }}` expression still present after rendering.
static LEFTOVER_EXPRESSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{[^}]*\}\}").unwrap());

/// The result of a render with diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The rendered text.
    pub output: String,

    /// Everything that could not be rendered, in the order found.
    pub diagnostics: Vec<Diagnostic>,
}

impl Rendered {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

impl Template {
    /// Render this template with the given context.
    pub fn render(&self, context: &TemplateContext) -> String {
        render(&self.source, context)
    }

    /// Render this template, keeping track of what could not be rendered.
    pub fn render_with_diagnostics(&self, context: &TemplateContext) -> Rendered {
        render_with_diagnostics(&self.source, context)
    }
}

/// Render a template string against a context.
pub fn render(template: &str, context: &TemplateContext) -> String {
    let mut diagnostics = DiagnosticCollector::new();
    evaluate(template, context, &mut diagnostics)
}

/// Render a template string and return the diagnostics alongside the output.
///
/// The output is identical to [`render`].
pub fn render_with_diagnostics(template: &str, context: &TemplateContext) -> Rendered {
    let mut diagnostics = DiagnosticCollector::new();
    let output = evaluate(template, context, &mut diagnostics);
    Rendered {
        output,
        diagnostics: diagnostics.into_diagnostics(),
    }
}

fn evaluate(
    template: &str,
    context: &TemplateContext,
    diagnostics: &mut DiagnosticCollector,
) -> String {
    let filtered = substitute_filtered(template, context);
    let plain = substitute_plain(&filtered, context);
    let output = expand_loops(&plain, context, diagnostics);

    report_leftovers(&output, context, diagnostics);
    tracing::trace!(
        template_len = template.len(),
        output_len = output.len(),
        "rendered template"
    );
    output
}

/// Report every expression that survived all three passes.
fn report_leftovers(
    output: &str,
    context: &TemplateContext,
    diagnostics: &mut DiagnosticCollector,
) {
    if !output.contains("{{") {
        return;
    }

    for m in LEFTOVER_EXPRESSION.find_iter(output) {
        let expression = m.as_str().to_string();
        let unknown_filter = FILTERED_EXPRESSION.captures(&expression).and_then(|caps| {
            let resolves = resolve_path(&caps[1], context).is_some();
            let known = Filter::from_name(&caps[2]).is_some();
            (resolves && !known).then(|| caps[2].to_string())
        });

        match unknown_filter {
            Some(filter) => diagnostics.add(Diagnostic::UnknownFilter { expression, filter }),
            None => diagnostics.add(Diagnostic::UnresolvedExpression { expression }),
        }
    }
}
