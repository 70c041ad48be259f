//! Convert command - BCDM records to database-write instructions.

use std::io;
use std::path::PathBuf;

use bcdm::mapping::{EXCLUDED_FIELDS, load_field_map};
use bcdm::transform::convert_record;
use bcdm::{Diagnostic, FilterResult, Result, SubmissionRecord, run_pipeline};

use super::{batch_mode, print_summary};

pub fn run(mapping: PathBuf, all_or_nothing: bool, verbose: bool) -> Result<()> {
    let field_map = load_field_map(&mapping, EXCLUDED_FIELDS)?;

    let summary = run_pipeline(
        io::stdin().lock(),
        io::stdout().lock(),
        io::stderr().lock(),
        batch_mode(all_or_nothing),
        |line| {
            let record: SubmissionRecord = match serde_json::from_str(line) {
                Ok(record) => record,
                Err(e) => {
                    return FilterResult::rejected(vec![Diagnostic::error(
                        None,
                        format!("Malformed input line: {}", e),
                    )]);
                }
            };

            match convert_record(&record, &field_map)
                .and_then(|converted| Ok(serde_json::to_string(&converted)?))
            {
                Ok(output) => FilterResult::accepted(output),
                Err(e) => FilterResult::rejected(vec![Diagnostic::error(
                    Some(&record.id),
                    e.to_string(),
                )]),
            }
        },
    )?;

    if verbose {
        print_summary(&summary);
    }
    Ok(())
}
