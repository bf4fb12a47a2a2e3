//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Product catalog feed
#[derive(Parser, Debug)]
#[command(name = "catalog-feed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog endpoint (overrides the config file)
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,

    /// Read the catalog from a local JSON file instead of the endpoint
    #[arg(long, global = true, conflicts_with = "endpoint")]
    pub catalog_file: Option<PathBuf>,

    /// Skip the pacing delay before each page
    #[arg(long, global = true)]
    pub no_delay: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the catalog and scroll through it page by page
    Browse {
        /// Rows that fit on screen at once
        #[arg(long, default_value = "4", value_parser = clap::value_parser!(u16).range(1..))]
        viewport: u16,

        /// Stop after this many scroll steps
        #[arg(long)]
        max_steps: Option<usize>,
    },

    /// Fetch the catalog once and summarize it
    Fetch,

    /// Show the effective configuration
    Config,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one event per line)
    Json,
    /// Human-readable output
    Pretty,
}
