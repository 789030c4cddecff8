/*
 * loops.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Single-level loop expansion.
//!
//! ```text
//! {% for item in items %}
//! {{ item.name }} = {{ item.value }}
//! {% endfor %}
//! ```
//!
//! Loops are line-oriented. The `{% for %}` and `{% endfor %}` lines are
//! removed from the output along with their line terminators; every body line
//! is emitted once per item. Loops do not nest: the body ends at the first
//! `{% endfor %}` line.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::context::{TemplateContext, TemplateValue};
use crate::diagnostics::{Diagnostic, DiagnosticCollector};
use crate::plain::replace_if_present;

const FOR_MARKER: &str = "{% for";
const ENDFOR_MARKER: &str = "{% endfor %}";

/// `{% for <var> in <collection> %}`. Captures the variable and collection;
/// both are any run of non-space characters other than `%`, so keys such as
/// `build-targets` are accepted.
static FOR_STATEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{%\s*for\s+([^\s%]+)\s+in\s+([^\s%]+)\s*%\}").unwrap());

/// A parsed `{% for var in collection %}` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopHeader {
    pub variable: String,
    pub collection: String,
}

impl LoopHeader {
    /// Parse a for-statement line. Returns `None` if the line does not match
    /// the `{% for <var> in <collection> %}` form.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = FOR_STATEMENT.captures(line)?;
        Some(Self {
            variable: caps[1].to_string(),
            collection: caps[2].to_string(),
        })
    }
}

fn opens_loop(line: &str) -> bool {
    line.contains(FOR_MARKER) && line.contains("in")
}

/// Expand every loop region in `input`.
///
/// Lines outside loop regions pass through unchanged. A collection that is
/// not a top-level key produces no output; a malformed for-line is passed
/// through as literal text.
pub fn expand_loops(
    input: &str,
    context: &TemplateContext,
    diagnostics: &mut DiagnosticCollector,
) -> String {
    if !input.contains(FOR_MARKER) {
        return input.to_string();
    }

    let lines: Vec<&str> = input.split_inclusive('\n').collect();
    let mut output = String::with_capacity(input.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if !opens_loop(line) {
            output.push_str(line);
            i += 1;
            continue;
        }

        let line_number = i + 1;
        let Some(header) = LoopHeader::parse(line) else {
            diagnostics.add(Diagnostic::MalformedLoop {
                line: line_number,
                text: line.to_string(),
            });
            output.push_str(line);
            i += 1;
            continue;
        };

        let body_start = i + 1;
        let body_end = lines[body_start..]
            .iter()
            .position(|l| l.contains(ENDFOR_MARKER))
            .map_or(lines.len(), |offset| body_start + offset);
        let body = &lines[body_start..body_end];

        if body_end == lines.len() {
            diagnostics.add(Diagnostic::UnclosedLoop {
                line: line_number,
                variable: header.variable.clone(),
            });
        }

        match context.get(&header.collection) {
            Some(collection) => {
                render_loop(&header.variable, &iteration_items(collection), body, &mut output)
            }
            None => diagnostics.add(Diagnostic::MissingCollection {
                line: line_number,
                collection: header.collection,
            }),
        }

        // Skip past the endfor line
        i = body_end + 1;
    }

    output
}

/// The items a loop iterates over. A map yields its keys in order; other
/// scalars iterate once.
fn iteration_items(collection: &TemplateValue) -> Cow<'_, [TemplateValue]> {
    match collection {
        TemplateValue::List(items) => Cow::Borrowed(items),
        TemplateValue::Map(fields) => Cow::Owned(
            fields
                .keys()
                .map(|key| TemplateValue::String(key.clone()))
                .collect(),
        ),
        TemplateValue::Null => Cow::Borrowed(&[]),
        other => Cow::Borrowed(std::slice::from_ref(other)),
    }
}

fn render_loop(variable: &str, items: &[TemplateValue], body: &[&str], output: &mut String) {
    // Only an unclosed loop at the end of the text has an unterminated last line
    let unterminated = body.last().is_some_and(|l| !l.ends_with('\n'));

    for (n, item) in items.iter().enumerate() {
        for line in body {
            output.push_str(&substitute_item(line, variable, item));
        }
        if unterminated && n + 1 < items.len() {
            output.push('\n');
        }
    }
}

/// Substitute one item's placeholders into a body line.
fn substitute_item(line: &str, variable: &str, item: &TemplateValue) -> String {
    let mut rendered = line.to_string();
    match item {
        TemplateValue::Map(fields) => {
            for (field, value) in fields {
                let placeholder = format!("{{{{ {variable}.{field} }}}}");
                replace_if_present(&mut rendered, &placeholder, value);
            }
        }
        _ => {
            let placeholder = format!("{{{{ {variable} }}}}");
            replace_if_present(&mut rendered, &placeholder, item);
        }
    }
    rendered
}
