//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paged source CLI
#[derive(Parser, Debug)]
#[command(name = "paged-source")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Inline source configuration JSON
    #[arg(long, global = true)]
    pub config_json: Option<String>,

    /// Base listing URL (overrides the config)
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Maximum number of pages to fetch (overrides the config)
    #[arg(long, global = true)]
    pub limit_pages: Option<u64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the number of records a run would attempt
    Count,

    /// Print every planned page URL
    Urls,

    /// Stream records as JSON lines
    Read {
        /// Stop after enough unchanged records (needs --snapshot to detect changes)
        #[arg(long)]
        partial: bool,

        /// Maximum records to read (0 = unlimited)
        #[arg(long)]
        max_items: Option<usize>,

        /// Previous run's output, used to decide which records changed
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Write records here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
