//! Submission record types shared by all pipeline tools.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Packet fields accepted as a record identifier, in lookup order.
pub const ACCEPTED_RECORD_ID_FIELDS: &[&str] = &["processid", "sampleid"];

/// One submitted record, as it arrives on stdin: an identifier for the
/// request plus a packet of canonical BCDM field/value pairs.
///
/// `submission_type` is present on validator input; the converter
/// accepts records without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_type: Option<String>,
    pub submission_packet: IndexMap<String, Option<String>>,
}

impl SubmissionRecord {
    /// Look up the record identifier from the accepted identifier fields.
    ///
    /// When more than one accepted field is set, the last one in
    /// [`ACCEPTED_RECORD_ID_FIELDS`] wins.
    pub fn record_identifier(&self) -> Option<&str> {
        let mut identifier = None;
        for field in ACCEPTED_RECORD_ID_FIELDS {
            if let Some(Some(value)) = self.submission_packet.get(*field) {
                if !value.is_empty() {
                    identifier = Some(value.as_str());
                }
            }
        }
        identifier
    }

    /// Returns true if the field is present with a non-empty value.
    pub fn has_value(&self, field: &str) -> bool {
        matches!(
            self.submission_packet.get(field),
            Some(Some(value)) if !value.is_empty()
        )
    }
}

/// Submission types accepted by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionType {
    Specimen,
}

impl SubmissionType {
    /// Parse a submission type string; unknown types are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "specimen" => Some(SubmissionType::Specimen),
            _ => None,
        }
    }

    /// All accepted type names, for diagnostics.
    pub fn accepted() -> &'static [&'static str] {
        &["specimen"]
    }
}

impl std::fmt::Display for SubmissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionType::Specimen => write!(f, "specimen"),
        }
    }
}

/// Whether a record creates a new entry or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionMode {
    New,
    Update,
}

impl std::fmt::Display for SubmissionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionMode::New => write!(f, "new"),
            SubmissionMode::Update => write!(f, "update"),
        }
    }
}
