//! `gqlgen generate`: write documents to files.

use super::Settings;
use crate::OutputOptions;
use anyhow::{Context, Result};
use colored::Colorize;
use gqlgen_codegen::Outputs;
use std::path::PathBuf;

/// Command-line overrides for `generate`.
#[derive(Debug, Default)]
pub struct GenerateArgs {
    pub schema: Option<PathBuf>,
    pub fragments: Option<PathBuf>,
    pub queries: Option<PathBuf>,
    pub mutations: Option<PathBuf>,
}

pub fn run(config_path: Option<PathBuf>, args: GenerateArgs, output: OutputOptions) -> Result<()> {
    let current_dir = std::env::current_dir().context("Failed to read current directory")?;
    let settings = Settings::load(config_path, &current_dir)?;
    generate(&settings, args, output)
}

#[tracing::instrument(skip_all)]
fn generate(settings: &Settings, args: GenerateArgs, output: OutputOptions) -> Result<()> {
    let start_time = std::time::Instant::now();

    let outputs = resolve_outputs(settings, &args);
    if outputs.is_empty() {
        anyhow::bail!(
            "Nothing to generate. Pass --fragments, --queries or --mutations, \
            or set an output path in a config file."
        );
    }

    let schema = settings.load_schema(args.schema)?;
    let generator = settings.generator()?;

    let written = generator
        .generate(&schema, &outputs)
        .context("Failed to write generated documents")?;

    if output.show_info {
        for document in &written {
            println!(
                "{} {} written to {}",
                "✓".green(),
                document.kind,
                document.path.display().to_string().cyan()
            );
        }
        println!(
            "{} {}",
            "Done".green().bold(),
            format!("({:.2}s)", start_time.elapsed().as_secs_f64()).dimmed()
        );
    }

    Ok(())
}

/// Output paths from the config file, each replaced by its flag when given.
fn resolve_outputs(settings: &Settings, args: &GenerateArgs) -> Outputs {
    let configured = settings.config.outputs(&settings.base_dir);
    Outputs {
        fragments: args.fragments.clone().or(configured.fragments),
        mutations: args.mutations.clone().or(configured.mutations),
        queries: args.queries.clone().or(configured.queries),
    }
}
