/*
 * integration_tests.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Integration tests for codegen-template using test fixtures.
 */

use codegen_template::{
    Diagnostic, Template, TemplateContext, TemplateValue, render, render_with_diagnostics,
};
use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use std::path::Path;

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> std::path::PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir).join("test-fixtures").join(name)
}

/// Helper to load a template from fixtures
fn load_template(name: &str) -> Template {
    let path = fixture_path(name);
    Template::from_file(&path).unwrap_or_else(|_| panic!("Failed to load template: {}", name))
}

fn load_yaml_context(name: &str) -> TemplateContext {
    let source = std::fs::read_to_string(fixture_path(name)).unwrap();
    TemplateContext::from_yaml_str(&source).unwrap()
}

fn generation_metadata() -> TemplateValue {
    let mut generation = IndexMap::new();
    generation.insert(
        "timestamp".to_string(),
        TemplateValue::from("2025-01-01T00:00:00.000000"),
    );
    generation.insert("language".to_string(), TemplateValue::from("rust"));
    generation.insert("generator".to_string(), TemplateValue::from("codegen"));
    TemplateValue::Map(generation)
}

#[test]
fn test_simple_interpolation() {
    let template = load_template("simple.template");

    let mut ctx = TemplateContext::new();
    ctx.insert("name", "World");

    assert_eq!(template.render(&ctx), "Hello, World!\n");
}

#[test]
fn test_missing_variable_left_verbatim() {
    let template = load_template("simple.template");
    let ctx = TemplateContext::new();

    assert_eq!(template.render(&ctx), "Hello, {{ name }}!\n");
}

#[test]
fn test_constants_template() {
    let template = load_template("constants.rs.template");
    let mut ctx = load_yaml_context("project.yaml");
    ctx.insert("generation", generation_metadata());

    let rendered = template.render_with_diagnostics(&ctx);
    assert!(
        !rendered.has_diagnostics(),
        "unexpected diagnostics: {:?}",
        rendered.diagnostics
    );

    let output = rendered.output;
    insta::assert_snapshot!("constants_template", output);
}

#[test]
fn test_json_and_yaml_contexts_render_identically() {
    let template = load_template("constants.rs.template");

    let mut yaml_ctx = load_yaml_context("project.yaml");
    yaml_ctx.insert("generation", generation_metadata());

    let json_source = std::fs::read_to_string(fixture_path("project.json")).unwrap();
    let mut json_ctx = TemplateContext::from_json_str(&json_source).unwrap();
    json_ctx.insert("generation", generation_metadata());

    assert_eq!(template.render(&yaml_ctx), template.render(&json_ctx));
}

#[test]
fn test_header_template_with_partial_data() {
    let template = load_template("config.h.template");
    let ctx = load_yaml_context("project.yaml");

    let rendered = template.render_with_diagnostics(&ctx);
    assert_eq!(
        rendered.output,
        "#ifndef HELLOCODEGEN_CONFIG_H\n\
         #define HELLOCODEGEN_CONFIG_H\n\
         \n\
         #define PROJECT_VERSION \"1.2.0\"\n\
         #define MAX_BUFFER_SIZE 4096\n\
         #define FEATURE_LOGGING true\n\
         \n\
         #define ENDPOINT_health \"/healthz\"\n\
         #define ENDPOINT_metrics \"/metrics\"\n\
         /* {{ project.owner }} */\n\
         \n\
         #endif\n"
    );
    assert_eq!(
        rendered.diagnostics,
        vec![
            Diagnostic::MissingCollection {
                line: 11,
                collection: "missing_collection".to_string(),
            },
            Diagnostic::UnresolvedExpression {
                expression: "{{ project.owner }}".to_string(),
            },
        ]
    );
}

#[test]
fn test_text_without_syntax_is_unchanged() {
    let ctx = load_yaml_context("project.yaml");
    for text in [
        "",
        "plain text",
        "line one\nline two\n",
        "braces { } and percents % but no expressions\r\n",
        "{ {not an expression} }",
    ] {
        assert_eq!(render(text, &ctx), text);
    }
}

#[test]
fn test_depth_one_path_renders_stringified_value() {
    let ctx = load_yaml_context("project.yaml");
    for (key, value) in ctx.iter() {
        if value.as_map().is_some() {
            continue;
        }
        let template = format!("{{{{ {key} }}}}");
        assert_eq!(render(&template, &ctx), value.stringify());
    }
}

#[test]
fn test_rerendering_output_is_idempotent() {
    let template = load_template("constants.rs.template");
    let mut ctx = load_yaml_context("project.yaml");
    ctx.insert("generation", generation_metadata());

    let once = template.render(&ctx);
    assert!(!once.contains("{{") && !once.contains("{%"));
    assert_eq!(render(&once, &ctx), once);
}

#[test]
fn test_loop_region_missing_collection_keeps_surroundings() {
    let mut ctx = TemplateContext::new();
    let mut x = IndexMap::new();
    x.insert("y".to_string(), TemplateValue::Integer(1));
    ctx.insert("x", TemplateValue::Map(x));

    let result = render_with_diagnostics(
        "start\n{% for item in items %}\n{{ item.name }}\n{% endfor %}\nend\n",
        &ctx,
    );
    assert_eq!(result.output, "start\nend\n");
    assert_eq!(result.diagnostics.len(), 1);
}
