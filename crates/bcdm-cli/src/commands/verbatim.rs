//! Verbatim command - duplicate converted writes into verbatim fields.

use std::io;
use std::path::PathBuf;

use bcdm::mapping::load_verbatim_map;
use bcdm::transform::{ConvertedRecord, VerbatimMode, apply_verbatim};
use bcdm::{Diagnostic, FilterResult, Result, run_pipeline};

use super::{batch_mode, print_summary};

pub fn run(
    mapping_verbatim: PathBuf,
    mode: VerbatimMode,
    all_or_nothing: bool,
    verbose: bool,
) -> Result<()> {
    let verbatim_map = load_verbatim_map(&mapping_verbatim)?;

    let summary = run_pipeline(
        io::stdin().lock(),
        io::stdout().lock(),
        io::stderr().lock(),
        batch_mode(all_or_nothing),
        |line| {
            let mut record: ConvertedRecord = match serde_json::from_str(line) {
                Ok(record) => record,
                Err(e) => {
                    return FilterResult::rejected(vec![Diagnostic::error(
                        None,
                        format!("Malformed input line: {}", e),
                    )]);
                }
            };

            apply_verbatim(&mut record, &verbatim_map, mode);
            match serde_json::to_string(&record) {
                Ok(output) => FilterResult::accepted(output),
                Err(e) => FilterResult::rejected(vec![Diagnostic::error(None, e.to_string())]),
            }
        },
    )?;

    if verbose {
        print_summary(&summary);
    }
    Ok(())
}
