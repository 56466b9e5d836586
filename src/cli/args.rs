//! Command line argument parsing for the lexguard CLI using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// lexguard - flag fabricated or garbled words in free text
#[derive(Parser, Debug, Clone)]
#[command(name = "lexguard")]
#[command(about = "Detect fabricated or garbled words in free text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct LexGuardArgs {
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

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "LEXGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LexGuardArgs {
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

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a model and save its artifacts
    Train(TrainArgs),

    /// Classify the words of a text with a saved model
    Classify(ClassifyArgs),

    /// Show the manifest of a saved model
    Inspect(InspectArgs),
}

/// Where word frequencies come from
#[derive(Args, Debug, Clone, Default)]
pub struct LexiconArgs {
    /// Frequency file with `word count` per line (default: bundled English list)
    #[arg(long, value_name = "FREQUENCY_FILE")]
    pub frequency_file: Option<PathBuf>,
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Directory to write the model to
    #[arg(value_name = "MODEL_DIR")]
    pub model_dir: PathBuf,

    #[command(flatten)]
    pub lexicon: LexiconArgs,

    /// Word list (one word per line) for the known-word set
    #[arg(long, value_name = "WORD_LIST")]
    pub word_list: Option<PathBuf>,

    /// Random seed (overrides the configuration file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Overwrite an existing model
    #[arg(long)]
    pub force: bool,
}

/// Arguments for classification
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Directory holding the model
    #[arg(value_name = "MODEL_DIR")]
    pub model_dir: PathBuf,

    /// Text to classify; read line by line from stdin when absent
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    #[command(flatten)]
    pub lexicon: LexiconArgs,

    /// Only list the words judged fake
    #[arg(long)]
    pub fakes_only: bool,

    /// Show which cascade tier decided each word
    #[arg(long)]
    pub detailed: bool,
}

/// Arguments for model inspection
#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    /// Directory holding the model
    #[arg(value_name = "MODEL_DIR")]
    pub model_dir: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
