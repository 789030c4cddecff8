/*
 * plain.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Plain-variable substitution: `{{ key }}` and `{{ key.subkey }}`.
//!
//! Unlike the filtered pass this one is a literal search-and-replace driven by
//! the context, not by the template: for each top-level key (in context order)
//! the exact placeholder text is replaced. Only one level of nesting is
//! covered here. Placeholders are spelled with exactly one space inside the
//! braces; `{{key}}` is not a plain placeholder.

use crate::context::{TemplateContext, TemplateValue};

/// Replace every plain placeholder that names a context entry.
///
/// Replacements are applied in sequence, so a value that itself contains a
/// placeholder for a later key gets substituted too.
pub fn substitute_plain(input: &str, context: &TemplateContext) -> String {
    let mut result = input.to_string();
    if !result.contains("{{") {
        return result;
    }

    for (key, value) in context.iter() {
        match value {
            TemplateValue::Map(entries) => {
                for (subkey, subvalue) in entries {
                    let placeholder = format!("{{{{ {key}.{subkey} }}}}");
                    replace_if_present(&mut result, &placeholder, subvalue);
                }
            }
            _ => {
                let placeholder = format!("{{{{ {key} }}}}");
                replace_if_present(&mut result, &placeholder, value);
            }
        }
    }

    result
}

/// Replace `placeholder` with the stringified value, skipping the allocation
/// when the placeholder does not occur.
pub(crate) fn replace_if_present(text: &mut String, placeholder: &str, value: &TemplateValue) {
    if text.contains(placeholder) {
        *text = text.replace(placeholder, &value.stringify());
    }
}
