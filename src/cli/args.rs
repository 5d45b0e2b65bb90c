//! Command line argument parsing for the lexeval CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::Variant;

/// lexeval - Compare retrieval quality with and without stemming
#[derive(Parser, Debug, Clone)]
#[command(name = "lexeval")]
#[command(about = "Evaluate vector-space retrieval over the CF collection, with and without stemming")]
#[command(version = crate::VERSION)]
#[command(long_about = None)]
pub struct LexevalArgs {
    /// Verbosity level (-v for progress, -vv for details)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Instruction file naming the collection files and outputs
    #[arg(short, long, value_name = "FILE", env = "LEXEVAL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LexevalArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Convert the query XML into queries.csv and expected.csv
    #[command(name = "process-queries")]
    ProcessQueries,

    /// Analyze the records and write an inverted list
    Invert(VariantArgs),

    /// Build the tf-idf model from an inverted list
    Index(VariantArgs),

    /// Run every processed query against a model
    Search(VariantArgs),

    /// Run every stage for both variants
    Run,

    /// Write the markdown evaluation report
    Report(ReportArgs),
}

/// Arguments for the per-variant stages
#[derive(Parser, Debug, Clone)]
pub struct VariantArgs {
    /// Analysis variant
    #[arg(long, default_value = "plain")]
    pub variant: Variant,
}

/// Arguments for writing the report
#[derive(Parser, Debug, Clone)]
pub struct ReportArgs {
    /// Report path (defaults to the configured REPORT)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable key/value lines
    Human,
    /// JSON output
    Json,
}
