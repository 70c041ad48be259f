//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bcdm: BCDM specimen submission pipeline filters
///
/// Every subcommand reads line-delimited JSON records on stdin, writes
/// accepted/transformed records to stdout, and writes tagged
/// diagnostics to stderr.
#[derive(Parser)]
#[command(name = "bcdm")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print a run summary to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check records against the BCDM definition table
    Validate {
        /// Path to the BCDM definition file (TSV)
        #[arg(long, value_name = "FILE")]
        bcdm_def: PathBuf,

        /// Validate as updates of existing records instead of new submissions
        #[arg(long)]
        update: bool,

        /// Accept or reject the entire input stream as a unit
        #[arg(long)]
        all_or_nothing: bool,
    },

    /// Convert BCDM records into database-write instructions
    Convert {
        /// Path to the BCDM-to-DB field mapping file (TSV)
        #[arg(long, value_name = "FILE")]
        mapping: PathBuf,

        /// Accept or reject the entire input stream as a unit
        #[arg(long)]
        all_or_nothing: bool,
    },

    /// Derive verbatim field duplicates on converted records
    Verbatim {
        /// Path to the verbatim field mapping file (TSV)
        #[arg(long, value_name = "FILE")]
        mapping_verbatim: PathBuf,

        /// Append the verbatim destination or replace the primary one
        #[arg(long, default_value = "add")]
        mode: VerbatimModeChoice,

        /// Accept or reject the entire input stream as a unit
        #[arg(long)]
        all_or_nothing: bool,
    },
}

/// Verbatim application mode.
#[derive(Clone, Copy, Debug, Default)]
pub enum VerbatimModeChoice {
    #[default]
    Add,
    Replace,
}

impl From<VerbatimModeChoice> for bcdm::VerbatimMode {
    fn from(choice: VerbatimModeChoice) -> Self {
        match choice {
            VerbatimModeChoice::Add => bcdm::VerbatimMode::Add,
            VerbatimModeChoice::Replace => bcdm::VerbatimMode::Replace,
        }
    }
}

impl std::str::FromStr for VerbatimModeChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "add" => Ok(VerbatimModeChoice::Add),
            "replace" => Ok(VerbatimModeChoice::Replace),
            _ => Err(format!("Unknown mode: {}. Use add or replace.", s)),
        }
    }
}

impl std::fmt::Display for VerbatimModeChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerbatimModeChoice::Add => write!(f, "add"),
            VerbatimModeChoice::Replace => write!(f, "replace"),
        }
    }
}
