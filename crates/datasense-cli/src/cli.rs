//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use datasense::{ExportFormat, RelationshipType};

/// DataSense: load, score, fix and join tabular data
#[derive(Parser)]
#[command(name = "datasense")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a data file and print its schema and health report
    Inspect {
        /// Path to the data file (CSV/TSV/JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Field delimiter (auto-detected when omitted)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Keep every delimited field as text
        #[arg(long)]
        no_typing: bool,

        /// Read at most this many data rows
        #[arg(long)]
        max_rows: Option<usize>,
    },

    /// Fix missing values and constant columns, then write the rows
    Clean {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Fill missing values
        #[arg(long)]
        missing: bool,

        /// Remove constant columns
        #[arg(long)]
        constant: bool,

        /// Output path (default: <file>_clean.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,
    },

    /// Inner-join two files on a key pair and write the joined rows
    Join {
        /// Left data file
        #[arg(value_name = "LEFT")]
        left: PathBuf,

        /// Right data file
        #[arg(value_name = "RIGHT")]
        right: PathBuf,

        /// Key column in the left file
        #[arg(long)]
        left_field: String,

        /// Key column in the right file
        #[arg(long)]
        right_field: String,

        /// Declared relationship (one-to-one, one-to-many, many-to-one)
        #[arg(short = 't', long = "type", default_value = "one-to-many")]
        relationship_type: RelationshipType,

        /// Output path (default: <left>_X_<right>.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,
    },

    /// Save the loaded table, with its health report, as JSON
    Export {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: <file>.datasense.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => ExportFormat::Csv,
            OutputFormat::Tsv => ExportFormat::Tsv,
            OutputFormat::Json => ExportFormat::Json,
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv, tsv, or json.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", ExportFormat::from(*self).extension())
    }
}
