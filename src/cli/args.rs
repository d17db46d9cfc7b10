//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::analysis::OutputFormat;

/// gopolicy - Policy checks for Go codebases.
#[derive(Debug, Parser)]
#[command(name = "gopolicy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .gopolicy.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides go.mod discovery)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the verification tool and the policy rules (default)
    Lint(LintArgs),

    /// List the policy rules and their messages
    Rules(RulesArgs),
}

/// Arguments for the `lint` command.
#[derive(Debug, Clone, clap::Args)]
pub struct LintArgs {
    /// Package pattern, relative to the project root
    #[arg(default_value = "./...")]
    pub pattern: String,

    /// List the policy rules instead of running them
    #[arg(short, long)]
    pub list: bool,

    /// Output format for diagnostics
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Skip the external verification tool
    #[arg(long)]
    pub no_vet: bool,

    /// Worker threads for analysis (0 = one per CPU)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Include _test.go files
    #[arg(long)]
    pub tests: bool,

    /// Extra build tags, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
}

impl Default for LintArgs {
    fn default() -> Self {
        Self {
            pattern: "./...".to_string(),
            list: false,
            format: OutputFormat::Human,
            no_vet: false,
            jobs: None,
            tests: false,
            tags: Vec::new(),
        }
    }
}

/// Arguments for the `rules` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RulesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
