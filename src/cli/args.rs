//! Command line argument parsing for the Sentira CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Sentira - sentiment-analysis pipeline with cross-validated grid search
#[derive(Parser, Debug, Clone)]
#[command(name = "sentira")]
#[command(about = "Sentiment-analysis pipeline tuning via cross-validated grid search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SentiraArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SentiraArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Output format for command results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// Machine-parseable JSON
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Load a corpus, run the grid search, and report the evaluation
    Run(RunArgs),

    /// Print the default parameter grid
    Grid(GridArgs),
}

/// Arguments for a full search run
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to the JSONL corpus ({"text": ..., "sentiment": ...} per line)
    #[arg(value_name = "CORPUS_FILE")]
    pub corpus: PathBuf,

    /// Records fetched per source page
    #[arg(long, default_value_t = 100)]
    pub page_size: usize,

    /// Fraction of the corpus held out for evaluation
    #[arg(long, default_value_t = 0.25)]
    pub eval_fraction: f64,

    /// Number of cross-validation folds
    #[arg(short = 'k', long, default_value_t = 3)]
    pub folds: usize,

    /// Seed for the split and fold shuffles
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Worker threads for combination evaluation (0 = all cores)
    #[arg(short = 'j', long)]
    pub parallelism: Option<usize>,

    /// Parameter grid file (JSON); the default grid is used when omitted
    #[arg(short, long, value_name = "GRID_FILE")]
    pub grid_file: Option<PathBuf>,

    /// Abort the corpus load after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

/// Arguments for printing the default grid
#[derive(Parser, Debug, Clone)]
pub struct GridArgs {}
