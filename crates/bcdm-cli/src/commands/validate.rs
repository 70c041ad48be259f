//! Validate command - acceptability check against the BCDM definitions.

use std::io;
use std::path::PathBuf;

use bcdm::mapping::load_definition_table;
use bcdm::validate::RecordValidator;
use bcdm::{Diagnostic, FilterResult, Result, SubmissionMode, SubmissionRecord, run_pipeline};

use super::{batch_mode, print_summary};

pub fn run(bcdm_def: PathBuf, update: bool, all_or_nothing: bool, verbose: bool) -> Result<()> {
    let definitions = load_definition_table(&bcdm_def)?;
    let mode = if update {
        SubmissionMode::Update
    } else {
        SubmissionMode::New
    };
    let validator = RecordValidator::new(&definitions, mode);

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

            let report = validator.validate(&record);
            let id = report.record_id.as_str();
            let mut diagnostics: Vec<Diagnostic> = report
                .errors
                .iter()
                .map(|m| Diagnostic::error(Some(id), m.clone()))
                .collect();
            diagnostics.extend(
                report
                    .warnings
                    .iter()
                    .map(|m| Diagnostic::warning(Some(id), m.clone())),
            );

            FilterResult {
                // Valid records pass through unchanged.
                output: report.is_valid().then(|| line.to_string()),
                diagnostics,
            }
        },
    )?;

    if verbose {
        print_summary(&summary);
    }
    Ok(())
}
