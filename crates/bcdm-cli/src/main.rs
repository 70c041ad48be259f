//! bcdm CLI - BCDM specimen submission pipeline filters.

mod cli;
mod commands;

use bcdm::BcdmError;
use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate {
            bcdm_def,
            update,
            all_or_nothing,
        } => commands::validate::run(bcdm_def, update, all_or_nothing, cli.verbose),

        Commands::Convert {
            mapping,
            all_or_nothing,
        } => commands::convert::run(mapping, all_or_nothing, cli.verbose),

        Commands::Verbatim {
            mapping_verbatim,
            mode,
            all_or_nothing,
        } => commands::verbatim::run(mapping_verbatim, mode.into(), all_or_nothing, cli.verbose),
    };

    if let Err(e) = result {
        match e {
            // The abort diagnostic has already been written by the
            // pipeline driver.
            BcdmError::BatchAborted => std::process::exit(2),
            other => {
                eprintln!("[ABORT] {}", other);
                std::process::exit(1);
            }
        }
    }
}
