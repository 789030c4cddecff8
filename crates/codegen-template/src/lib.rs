/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Minimal text template renderer for configuration-driven code generation.
//!
//! A template is plain text with three kinds of expressions:
//!
//! - Filtered variables: `{{ project.name | upper }}` (filters: `lower`, `upper`)
//! - Plain variables: `{{ name }}` or `{{ project.name }}`
//! - Single-level, line-oriented loops:
//!   `{% for item in items %}` ... `{% endfor %}`
//!
//! Rendering never fails. Anything that cannot be resolved is left verbatim
//! in the output so partial data yields partial, inspectable output; use
//! [`render_with_diagnostics`] to find out what was left behind.
//!
//! # Example
//!
//! ```
//! use codegen_template::{TemplateContext, render};
//!
//! let ctx = TemplateContext::from_yaml_str("name: world\n").unwrap();
//! assert_eq!(render("Hello, {{ name | upper }}!", &ctx), "Hello, WORLD!");
//! ```

pub mod context;
pub mod diagnostics;
pub mod error;
pub mod evaluator;
pub mod filter;
pub mod filtered;
pub mod loops;
pub mod plain;
pub mod resolver;
pub mod template;

// Re-export main types at crate root
pub use context::{TemplateContext, TemplateValue};
pub use diagnostics::{Diagnostic, DiagnosticCollector};
pub use error::{TemplateError, TemplateResult};
pub use evaluator::{Rendered, render, render_with_diagnostics};
pub use filter::Filter;
pub use loops::LoopHeader;
pub use resolver::resolve_path;
pub use template::Template;
