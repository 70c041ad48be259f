//! Record-level validation: submission type, required fields, and
//! per-field type/format checks against the definition table.

use crate::mapping::DefinitionTable;
use crate::record::{SubmissionMode, SubmissionRecord, SubmissionType};

use super::rules::required_rules;
use super::value::ValueValidator;

/// Outcome of validating one submission record.
///
/// Warnings never affect validity; only errors do.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub record_id: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates submission records against a loaded definition table.
#[derive(Debug)]
pub struct RecordValidator<'a> {
    definitions: &'a DefinitionTable,
    mode: SubmissionMode,
    values: ValueValidator,
}

impl<'a> RecordValidator<'a> {
    pub fn new(definitions: &'a DefinitionTable, mode: SubmissionMode) -> Self {
        Self {
            definitions,
            mode,
            values: ValueValidator::new(),
        }
    }

    /// Validate one record, producing errors and non-fatal warnings.
    pub fn validate(&self, record: &SubmissionRecord) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        // Submission type gate; required-field rules only apply to a
        // recognized type.
        let declared = record.submission_type.as_deref().unwrap_or_default();
        match SubmissionType::parse(declared) {
            Some(submission_type) => {
                for rule in required_rules(submission_type, self.mode) {
                    if let Some(message) = rule.check(record) {
                        errors.push(message);
                    }
                }
            }
            None => {
                errors.push(format!(
                    "Invalid submission type: Expected {}, received {}",
                    SubmissionType::accepted().join(","),
                    declared
                ));
            }
        }

        // Submitted fields absent from the data model: non-fatal.
        let unknown_fields: Vec<&str> = record
            .submission_packet
            .keys()
            .map(String::as_str)
            .filter(|field| !self.definitions.contains(field))
            .collect();
        if !unknown_fields.is_empty() {
            warnings.push(format!("Invalid fields found: {}", unknown_fields.join(",")));
        }

        // Datatype/format checks for known fields carrying a value.
        let mut invalid_fields = Vec::new();
        for (field, value) in &record.submission_packet {
            let Some(value) = value.as_deref() else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            if let Some(definition) = self.definitions.definition(field) {
                if !self
                    .values
                    .is_valid(value, definition.data_type, &definition.format)
                {
                    warnings.push(format!(
                        "Bad type for {}; value:{}; type:{:?}; format:{}",
                        field, value, definition.data_type, definition.format
                    ));
                    invalid_fields.push(field.as_str());
                }
            }
        }
        if !invalid_fields.is_empty() {
            errors.push(format!(
                "Invalid data type/format for {} fields: {}",
                invalid_fields.len(),
                invalid_fields.join(",")
            ));
        }

        ValidationReport {
            record_id: record.id.clone(),
            errors,
            warnings,
        }
    }
}
