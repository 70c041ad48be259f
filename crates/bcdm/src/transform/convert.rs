//! Conversion of submission packets into database-write instructions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{BcdmError, Result};
use crate::mapping::FieldMap;
use crate::record::{ACCEPTED_RECORD_ID_FIELDS, SubmissionRecord};

/// One database write: destination table/field plus the value to store.
///
/// An empty submitted value is carried as `None` and serializes to JSON
/// null, which translates to NULL downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldWrite {
    pub db_table: String,
    pub db_field: String,
    pub value: Option<String>,
}

/// A converted record: canonical field to its ordered destination list.
///
/// The list holds one primary write after conversion; the verbatim step
/// may append a second entry.
pub type ConvertedRecord = IndexMap<String, Vec<FieldWrite>>;

/// Convert one submission record into write instructions.
///
/// Fields absent from the mapping are dropped. Destination order follows
/// the mapping table, so output is deterministic for a given mapping.
/// Fails with a missing-identifier error when none of the accepted
/// identifier fields carries a value.
pub fn convert_record(record: &SubmissionRecord, mapping: &FieldMap) -> Result<ConvertedRecord> {
    if record.record_identifier().is_none() {
        return Err(BcdmError::MissingIdentifier {
            request_id: record.id.clone(),
            accepted: ACCEPTED_RECORD_ID_FIELDS
                .iter()
                .map(|f| f.to_string())
                .collect(),
        });
    }

    let mut converted = ConvertedRecord::new();
    for entry in mapping.iter() {
        let Some(value) = record.submission_packet.get(&entry.canonical_field) else {
            continue;
        };
        let value = match value.as_deref() {
            None | Some("") => None,
            Some(v) => Some(v.to_string()),
        };
        converted.insert(
            entry.canonical_field.clone(),
            vec![FieldWrite {
                db_table: entry.destination.table.clone(),
                db_field: entry.destination.field.clone(),
                value,
            }],
        );
    }

    Ok(converted)
}
