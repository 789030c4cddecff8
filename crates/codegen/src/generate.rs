/*
 * generate.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Generate command implementation
 */

//! Generate command implementation.
//!
//! Loads a configuration file into a template context, injects generation
//! metadata under the reserved `generation` key, renders the template and
//! writes the result to the output path.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use codegen_template::{Diagnostic, Template, TemplateContext, TemplateValue};
use tracing::{debug, info, warn};

/// Context key under which generation metadata is injected.
pub const GENERATION_KEY: &str = "generation";

/// Generator name used when none is given on the command line.
pub const DEFAULT_GENERATOR: &str = "codegen";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Arguments for the generate command
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    /// Target language identifier (e.g. "rust", "c")
    pub language: String,
    /// YAML or JSON configuration file
    pub config: PathBuf,
    /// Template file
    pub template: PathBuf,
    /// Output file
    pub output: PathBuf,
    /// Generator name recorded in the metadata
    pub generator: String,
    /// Refuse to write output that still contains unrendered expressions
    pub strict: bool,
    /// Suppress the final summary line
    pub quiet: bool,
}

/// What a successful run produced.
#[derive(Debug)]
pub struct GenerateOutcome {
    pub output: PathBuf,
    pub bytes_written: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from the file extension. Files without an extension
    /// are read as YAML.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            None => Ok(ConfigFormat::Yaml),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Ok(ConfigFormat::Yaml)
            }
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(ConfigFormat::Json),
            Some(ext) => anyhow::bail!(
                "Unsupported configuration format '.{}' for {} (expected .yaml, .yml or .json)",
                ext,
                path.display()
            ),
        }
    }
}

/// Execute the generate command
pub fn execute(args: &GenerateArgs) -> Result<GenerateOutcome> {
    let mut context = load_context(&args.config)?;
    let template = Template::from_file(&args.template)
        .with_context(|| format!("Failed to read template: {}", args.template.display()))?;

    let metadata = generation_metadata(
        &args.language,
        &args.generator,
        Local::now().naive_local(),
    );
    inject_metadata(&mut context, metadata);

    debug!(
        template = %args.template.display(),
        variables = context.len(),
        "Rendering template"
    );
    let rendered = template.render_with_diagnostics(&context);

    for diagnostic in &rendered.diagnostics {
        warn!(template = %args.template.display(), "{}", diagnostic);
    }

    if args.strict && rendered.has_diagnostics() {
        anyhow::bail!(
            "{} unrendered expression(s) in {} (strict mode); {} was not written",
            rendered.diagnostics.len(),
            args.template.display(),
            args.output.display()
        );
    }

    write_output(&args.output, &rendered.output)?;

    if !args.quiet {
        info!(
            "Generated {} from {}",
            args.output.display(),
            args.template.display()
        );
    }

    Ok(GenerateOutcome {
        output: args.output.clone(),
        bytes_written: rendered.output.len(),
        diagnostics: rendered.diagnostics,
    })
}

/// Load a configuration file into a template context.
pub fn load_context(path: &Path) -> Result<TemplateContext> {
    let format = ConfigFormat::from_path(path)?;
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration: {}", path.display()))?;

    let context = match format {
        ConfigFormat::Yaml => TemplateContext::from_yaml_str(&source),
        ConfigFormat::Json => TemplateContext::from_json_str(&source),
    }
    .with_context(|| format!("Failed to parse configuration: {}", path.display()))?;

    debug!(
        config = %path.display(),
        ?format,
        variables = context.len(),
        "Loaded configuration"
    );
    Ok(context)
}

/// Build the metadata map injected under [`GENERATION_KEY`].
pub fn generation_metadata(
    language: &str,
    generator: &str,
    timestamp: NaiveDateTime,
) -> TemplateValue {
    let entries = [
        ("timestamp", timestamp.format(TIMESTAMP_FORMAT).to_string()),
        ("language", language.to_string()),
        ("generator", generator.to_string()),
    ];
    TemplateValue::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), TemplateValue::String(v)))
            .collect(),
    )
}

/// Insert generation metadata, replacing any `generation` entry from the
/// configuration file.
pub fn inject_metadata(context: &mut TemplateContext, metadata: TemplateValue) {
    if context.contains_key(GENERATION_KEY) {
        debug!("Configuration defines '{GENERATION_KEY}'; replacing it with generation metadata");
    }
    context.insert(GENERATION_KEY, metadata);
}

/// Write rendered output, creating parent directories as needed.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("Failed to write output: {}", path.display()))?;
    Ok(())
}
