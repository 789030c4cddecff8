/*
 * filtered.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Filtered-variable substitution: `{{ path | filter }}`.
//!
//! This pass runs first so the plain pass never sees a filtered expression.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::context::TemplateContext;
use crate::filter::Filter;
use crate::resolver::resolve_path;

/// Matches `{{ <path> | <filter> }}` with insignificant whitespace.
///
/// Group 1 is the path (anything up to the last `|` before the filter name,
/// so a `|` cannot be escaped inside a path), group 2 the filter name.
pub(crate) static FILTERED_EXPRESSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([^}]+?)\s*\|\s*(\w+)\s*\}\}").unwrap());

/// Substitute every filtered expression whose path resolves and whose filter
/// is known. Everything else is left exactly as written.
pub fn substitute_filtered(input: &str, context: &TemplateContext) -> String {
    if !input.contains("{{") {
        return input.to_string();
    }

    FILTERED_EXPRESSION
        .replace_all(input, |caps: &Captures| {
            let original = &caps[0];
            let Some(value) = resolve_path(&caps[1], context) else {
                return original.to_string();
            };
            match Filter::from_name(&caps[2]) {
                Some(filter) => filter.apply(value),
                None => original.to_string(),
            }
        })
        .into_owned()
}
