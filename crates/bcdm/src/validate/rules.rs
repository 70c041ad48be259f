//! Minimum-required-field rules per submission type and mode.

use crate::record::{SubmissionMode, SubmissionRecord, SubmissionType};

/// A single required-field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredRule {
    /// The named field must be present and non-empty.
    Single(&'static str),
    /// At least one field of the group must be present and non-empty.
    AnyOf(&'static [&'static str]),
}

impl RequiredRule {
    /// Check the rule against a record's packet; returns the error
    /// message for a violation.
    pub fn check(&self, record: &SubmissionRecord) -> Option<String> {
        match self {
            RequiredRule::Single(field) => {
                if record.has_value(field) {
                    None
                } else {
                    Some(format!("Required column {} is missing or empty", field))
                }
            }
            RequiredRule::AnyOf(fields) => {
                if fields.iter().any(|field| record.has_value(field)) {
                    None
                } else {
                    Some(format!(
                        "At least 1 of the following columns {} is required",
                        fields.join(",")
                    ))
                }
            }
        }
    }
}

/// Required-field rules for a (submission type, mode) pair.
///
/// The pairing is exhaustive by construction; a new submission type or
/// mode forces a decision here at compile time.
pub fn required_rules(
    submission_type: SubmissionType,
    mode: SubmissionMode,
) -> &'static [RequiredRule] {
    match (submission_type, mode) {
        (SubmissionType::Specimen, SubmissionMode::Update) => {
            &[RequiredRule::AnyOf(&["sampleid", "processid"])]
        }
        (SubmissionType::Specimen, SubmissionMode::New) => &[
            RequiredRule::Single("bold_recordset_code_arr"),
            RequiredRule::Single("sampleid"),
        ],
    }
}
