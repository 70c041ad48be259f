//! Subcommand implementations.

pub mod convert;
pub mod validate;
pub mod verbatim;

use bcdm::{BatchMode, PipelineSummary};
use colored::Colorize;

/// Map the --all-or-nothing flag to a batch mode.
pub fn batch_mode(all_or_nothing: bool) -> BatchMode {
    if all_or_nothing {
        BatchMode::AllOrNothing
    } else {
        BatchMode::Streaming
    }
}

/// Print the run summary to stderr when --verbose is set.
pub fn print_summary(summary: &PipelineSummary) {
    eprintln!(
        "{} {} read, {} emitted, {} rejected",
        "Summary:".cyan().bold(),
        summary.read,
        summary.emitted.to_string().green(),
        summary.rejected.to_string().yellow()
    );
}
