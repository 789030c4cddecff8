/*
 * filter.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Built-in filters for `{{ path | filter }}` expressions.

use std::fmt;

use crate::context::TemplateValue;

/// A named transform applied to a resolved value's string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Lower,
    Upper,
}

impl Filter {
    /// Look up a filter by the name used in templates.
    ///
    /// Returns `None` for unknown names; the expression is then left as-is.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "lower" => Some(Filter::Lower),
            "upper" => Some(Filter::Upper),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Filter::Lower => "lower",
            Filter::Upper => "upper",
        }
    }

    /// Apply the filter to a value.
    pub fn apply(self, value: &TemplateValue) -> String {
        let text = value.stringify();
        match self {
            Filter::Lower => text.to_lowercase(),
            Filter::Upper => text.to_uppercase(),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
