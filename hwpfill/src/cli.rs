//! Command-line interface definitions for hwpfill

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI structure for the hwpfill application
#[derive(Parser)]
#[command(name = "hwpfill")]
#[command(version)]
#[command(about = "Fill ${key} placeholders in HWP document templates", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for hwpfill
#[derive(Subcommand)]
pub enum Commands {
    /// Fill a template and write the result
    Fill {
        /// Template document (overrides `template` in the config file)
        #[arg(value_name = "TEMPLATE")]
        template: Option<PathBuf>,

        /// Output document path (overrides `output` in the config file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Placeholder data file (.toml or .json)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Set a single placeholder value (repeatable)
        #[arg(short, long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Configuration file (defaults to ./hwpfill.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Fail if any placeholder is left unresolved or cannot be rendered
        #[arg(long)]
        strict: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List placeholder keys used in a template
    Keys {
        /// Template document
        template: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Report structural inconsistencies in a document
    Check {
        /// Document to check
        document: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}
