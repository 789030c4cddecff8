/*
 * resolver.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Variable path resolution.
//!
//! A path such as `project.name` is split on `.` and walked left to right
//! through nested maps. Resolution fails softly: a missing key or a
//! non-map intermediate value simply yields `None`, and callers leave the
//! expression in the output untouched.

use crate::context::{TemplateContext, TemplateValue};

/// Resolve a dotted path against a context.
///
/// Surrounding whitespace is ignored; whitespace inside a segment is not
/// (`a . b` looks up the keys `"a "` and `" b"`). Any depth is supported.
pub fn resolve_path<'a>(path: &str, context: &'a TemplateContext) -> Option<&'a TemplateValue> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }

    let segments: Vec<&str> = path.split('.').collect();
    context.get_path(&segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn context() -> TemplateContext {
        let mut server = IndexMap::new();
        server.insert("host".to_string(), TemplateValue::from("localhost"));
        server.insert(
            "tls".to_string(),
            TemplateValue::Map(IndexMap::from([(
                "enabled".to_string(),
                TemplateValue::Bool(true),
            )])),
        );

        let mut ctx = TemplateContext::new();
        ctx.insert("name", "demo");
        ctx.insert("server", TemplateValue::Map(server));
        ctx
    }

    #[test]
    fn test_resolve_top_level() {
        let ctx = context();
        assert_eq!(resolve_path("name", &ctx), Some(&TemplateValue::from("demo")));
    }

    #[test]
    fn test_resolve_nested() {
        let ctx = context();
        assert_eq!(
            resolve_path("server.host", &ctx),
            Some(&TemplateValue::from("localhost"))
        );
        assert_eq!(
            resolve_path("server.tls.enabled", &ctx),
            Some(&TemplateValue::Bool(true))
        );
    }

    #[test]
    fn test_resolve_intermediate_map_is_a_value() {
        let ctx = context();
        let tls = resolve_path("server.tls", &ctx).unwrap();
        assert!(tls.as_map().is_some());
    }

    #[test]
    fn test_resolve_missing() {
        let ctx = context();
        assert_eq!(resolve_path("missing", &ctx), None);
        assert_eq!(resolve_path("server.port", &ctx), None);
        // Cannot descend into a string
        assert_eq!(resolve_path("name.length", &ctx), None);
        assert_eq!(resolve_path("", &ctx), None);
        assert_eq!(resolve_path("server.", &ctx), None);
    }

    #[test]
    fn test_resolve_trims_outer_whitespace_only() {
        let ctx = context();
        assert_eq!(
            resolve_path("  server.host ", &ctx),
            Some(&TemplateValue::from("localhost"))
        );
        assert_eq!(resolve_path("server . host", &ctx), None);
    }
}
