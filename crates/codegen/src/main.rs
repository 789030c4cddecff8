//! codegen CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codegen::generate::{self, DEFAULT_GENERATOR, GenerateArgs};

#[derive(Parser, Debug)]
#[command(name = "codegen")]
#[command(version)]
#[command(about = "Render a source file from a template and a YAML/JSON configuration")]
struct Cli {
    /// Target language identifier, injected as `generation.language`
    #[arg(value_name = "LANGUAGE")]
    language: String,

    /// Configuration file (.yaml, .yml or .json)
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Template file
    #[arg(value_name = "TEMPLATE")]
    template: PathBuf,

    /// Output file (parent directories are created as needed)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Generator name, injected as `generation.generator`
    #[arg(long, default_value = DEFAULT_GENERATOR)]
    generator: String,

    /// Fail instead of writing output that contains unrendered expressions
    #[arg(long)]
    strict: bool,

    /// Suppress the summary line
    #[arg(short, long)]
    quiet: bool,
}

impl From<Cli> for GenerateArgs {
    fn from(cli: Cli) -> Self {
        GenerateArgs {
            language: cli.language,
            config: cli.config,
            template: cli.template,
            output: cli.output,
            generator: cli.generator,
            strict: cli.strict,
            quiet: cli.quiet,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codegen=info,codegen_template=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    generate::execute(&cli.into())?;
    Ok(())
}
