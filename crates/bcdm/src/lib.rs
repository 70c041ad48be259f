//! bcdm: field mapping and validation engine for BCDM specimen
//! submission pipelines.
//!
//! BCDM (the Barcode Core Data Model) is the canonical vocabulary for
//! biodiversity specimen records. This crate implements the pure
//! transformation and validation logic behind a set of stdin/stdout
//! pipeline filters:
//!
//! - **validate**: check field presence, datatype, and format against a
//!   BCDM definition table
//! - **convert**: resolve canonical fields to database destinations,
//!   including the foreign-key double-underscore naming convention
//! - **verbatim**: duplicate primary destinations into display-oriented
//!   verbatim fields
//!
//! # Example
//!
//! ```no_run
//! use bcdm::mapping::{EXCLUDED_FIELDS, load_field_map};
//! use bcdm::record::SubmissionRecord;
//! use bcdm::transform::convert_record;
//!
//! let mapping = load_field_map("bcdm_to_db.tsv", EXCLUDED_FIELDS).unwrap();
//! let record: SubmissionRecord =
//!     serde_json::from_str(r#"{"id":"1","submission_packet":{"sampleid":"S1"}}"#).unwrap();
//! let converted = convert_record(&record, &mapping).unwrap();
//! println!("{}", serde_json::to_string(&converted).unwrap());
//! ```

pub mod error;
pub mod mapping;
pub mod pipeline;
pub mod record;
pub mod transform;
pub mod validate;

pub use error::{BcdmError, Result};
pub use mapping::{DataType, DefinitionTable, Destination, FieldMap, MappingEntry, VerbatimMap};
pub use pipeline::{BatchMode, Diagnostic, FilterResult, PipelineSummary, Severity, run_pipeline};
pub use record::{SubmissionMode, SubmissionRecord, SubmissionType};
pub use transform::{ConvertedRecord, FieldWrite, VerbatimMode, apply_verbatim, convert_record};
pub use validate::{RecordValidator, ValidationReport, ValueValidator};
