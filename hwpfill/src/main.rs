//! hwpfill - HWP template filling tool
//!
//! A CLI tool that fills `${key}` placeholders in HWP document templates
//! from TOML/JSON data files or command-line values.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use hwpfill::fill_config::{FillConfig, CONFIG_FILE_NAME};
use hwpfill::{codec_for_path, collect_keys, fill_template, PlaceholderMap};
use std::path::{Path, PathBuf};

/// Main entry point for the hwpfill CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fill {
            template,
            output,
            data,
            set,
            config,
            strict,
            verbose,
        } => {
            init_logging(verbose);
            handle_fill_command(FillArgs {
                template,
                output,
                data,
                set,
                config,
                strict,
            })?;
        }

        Commands::Keys { template, verbose } => {
            init_logging(verbose);
            handle_keys_command(&template)?;
        }

        Commands::Check { document, verbose } => {
            init_logging(verbose);
            handle_check_command(&document)?;
        }
    }

    Ok(())
}

/// Initialize logging: info level when verbose, otherwise from RUST_LOG
fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();
}

/// Arguments of the fill command
struct FillArgs {
    template: Option<PathBuf>,
    output: Option<PathBuf>,
    data: Option<PathBuf>,
    set: Vec<String>,
    config: Option<PathBuf>,
    strict: bool,
}

/// Handle the fill command
fn handle_fill_command(args: FillArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    let template = args
        .template
        .or_else(|| config.template.clone())
        .context("No template given. Pass TEMPLATE or set 'template' in hwpfill.toml")?;
    let output = args
        .output
        .or_else(|| config.output.clone())
        .context("No output path given. Pass --output or set 'output' in hwpfill.toml")?;
    let strict = args.strict || config.strict;

    // Values: config [values] < data file < --set
    let mut values = config.placeholder_values();
    if let Some(data_path) = args.data.or_else(|| config.data.clone()) {
        let data = PlaceholderMap::load(&data_path)
            .with_context(|| format!("Failed to load data from {}", data_path.display()))?;
        values.merge(data);
    }
    for assignment in &args.set {
        let (key, value) = PlaceholderMap::parse_assignment(assignment)
            .with_context(|| format!("Invalid --set '{}', expected KEY=VALUE", assignment))?;
        values.insert(key, value);
    }

    println!("Filling template...");
    println!("Template: {}", template.display());
    println!("Output: {}", output.display());
    println!("Values: {}", values.len());

    let codec = codec_for_path(&template)
        .with_context(|| format!("Cannot read template {}", template.display()))?;

    let report = fill_template(codec.as_ref(), &template, &output, &values)
        .with_context(|| format!("Failed to fill {}", template.display()))?;

    println!(
        "✓ Replaced {} placeholders in {} of {} paragraphs",
        report.replacements, report.paragraphs_rewritten, report.paragraphs_visited
    );
    for located in &report.errors {
        println!("  ! {}: {}", located.path, located.error);
    }
    if !report.unresolved.is_empty() {
        println!("  Unresolved placeholders:");
        for key in &report.unresolved {
            println!("    ${{{}}}", key);
        }
    }

    if strict && !report.is_complete() {
        anyhow::bail!(
            "{} placeholder(s) unresolved and {} could not be rendered (--strict)",
            report.unresolved.len(),
            report.errors.len()
        );
    }

    println!("✓ Successfully wrote: {}", output.display());
    Ok(())
}

/// Load the explicit config file, or ./hwpfill.toml when present
fn load_config(path: Option<&Path>) -> Result<FillConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(CONFIG_FILE_NAME);
            if !default.exists() {
                return Ok(FillConfig::default());
            }
            default
        }
    };

    log::info!("Loading configuration from {}", path.display());
    FillConfig::load(&path).with_context(|| format!("Failed to load config {}", path.display()))
}

/// Handle the keys command
fn handle_keys_command(template: &Path) -> Result<()> {
    let codec = codec_for_path(template)
        .with_context(|| format!("Cannot read template {}", template.display()))?;
    let document = codec
        .read(template)
        .with_context(|| format!("Failed to read template {}", template.display()))?;

    for key in collect_keys(&document) {
        println!("{}", key);
    }

    Ok(())
}

/// Handle the check command
fn handle_check_command(path: &Path) -> Result<()> {
    let codec = codec_for_path(path)
        .with_context(|| format!("Cannot read document {}", path.display()))?;
    let document = codec
        .read(path)
        .with_context(|| format!("Failed to read document {}", path.display()))?;

    let issues = document.check();
    if issues.is_empty() {
        println!(
            "✓ {} paragraphs, no structural issues",
            document.paragraph_count()
        );
        return Ok(());
    }

    for (location, issue) in &issues {
        println!("  {}: {}", location, issue);
    }
    anyhow::bail!("{} structural issue(s) found", issues.len())
}
