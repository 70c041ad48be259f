//! Integration tests for the bcdm submission pipeline.

use std::io::Write;

use tempfile::NamedTempFile;

use bcdm::mapping::{EXCLUDED_FIELDS, load_definition_table, load_field_map, load_verbatim_map};
use bcdm::transform::{ConvertedRecord, VerbatimMode, apply_verbatim, convert_record};
use bcdm::validate::RecordValidator;
use bcdm::{
    BatchMode, BcdmError, Diagnostic, FilterResult, SubmissionMode, SubmissionRecord,
    run_pipeline,
};

/// Helper to create a temporary TSV file with given content.
fn create_tsv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn definition_file() -> NamedTempFile {
    create_tsv(
        "field\tdata_type\tdata_format\n\
         sampleid\tstring\tdefault\n\
         processid\tstring\tBOLD%d\n\
         bold_recordset_code_arr\tarray\tdefault\n\
         taxid\tint\tdefault\n\
         coord\tgeopoint\tdefault\n\
         collection_date\tstring:date\t%Y-%m-%d\n",
    )
}

fn mapping_file() -> NamedTempFile {
    create_tsv(
        "bcdm_field\tbold_field\n\
         record_id\tspecimen.record_id\n\
         sampleid\tspecimen.sampleid\n\
         taxid\tspecimen.taxid\n\
         kingdom\tanimal__taxon.classification.kingdom\n",
    )
}

fn verbatim_file() -> NamedTempFile {
    create_tsv(
        "bold_field\tverbatim_field\n\
         specimen.taxid\tspecimen_verbatim.taxid_verbatim\n",
    )
}

/// Build the validate-step filter over a definition table.
fn validate_filter<'a>(
    validator: &'a RecordValidator<'a>,
) -> impl FnMut(&str) -> FilterResult + 'a {
    move |line: &str| {
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
            output: report.is_valid().then(|| line.to_string()),
            diagnostics,
        }
    }
}

// =============================================================================
// Validate Step
// =============================================================================

#[test]
fn test_validate_streaming_passes_valid_records_through() {
    let defs = load_definition_table(definition_file().path()).unwrap();
    let validator = RecordValidator::new(&defs, SubmissionMode::Update);

    let input = concat!(
        r#"{"id":"1","submission_type":"specimen","submission_packet":{"sampleid":"S1","taxid":"9606"}}"#,
        "\n",
        r#"{"id":"2","submission_type":"specimen","submission_packet":{"taxid":"9606"}}"#,
        "\n",
        r#"{"id":"3","submission_type":"specimen","submission_packet":{"processid":"BOLD42"}}"#,
        "\n",
    );
    let mut out = Vec::new();
    let mut err = Vec::new();

    let summary = run_pipeline(
        input.as_bytes(),
        &mut out,
        &mut err,
        BatchMode::Streaming,
        validate_filter(&validator),
    )
    .unwrap();

    assert_eq!(summary.read, 3);
    assert_eq!(summary.emitted, 2);
    assert_eq!(summary.rejected, 1);

    let out = String::from_utf8(out).unwrap();
    assert!(out.contains(r#""id":"1""#));
    assert!(!out.contains(r#""id":"2""#));
    assert!(out.contains(r#""id":"3""#));

    let err = String::from_utf8(err).unwrap();
    assert!(err.contains("[ERROR][Request 2]"));
    assert!(err.contains("sampleid,processid"));
}

#[test]
fn test_validate_all_or_nothing_aborts_on_middle_record() {
    let defs = load_definition_table(definition_file().path()).unwrap();
    let validator = RecordValidator::new(&defs, SubmissionMode::Update);

    let input = concat!(
        r#"{"id":"1","submission_type":"specimen","submission_packet":{"sampleid":"S1"}}"#,
        "\n",
        r#"{"id":"2","submission_type":"specimen","submission_packet":{"taxid":"x"}}"#,
        "\n",
        r#"{"id":"3","submission_type":"specimen","submission_packet":{"sampleid":"S3"}}"#,
        "\n",
    );
    let mut out = Vec::new();
    let mut err = Vec::new();

    let result = run_pipeline(
        input.as_bytes(),
        &mut out,
        &mut err,
        BatchMode::AllOrNothing,
        validate_filter(&validator),
    );

    assert!(matches!(result, Err(BcdmError::BatchAborted)));
    // Nothing from the batch may leak out, not even record 1.
    assert!(out.is_empty());
    let err = String::from_utf8(err).unwrap();
    assert!(err.contains("[ERROR][Request 2]"));
    assert!(err.contains("[ABORT] all-or-nothing"));
}

#[test]
fn test_validate_warnings_are_reported_but_not_fatal() {
    let defs = load_definition_table(definition_file().path()).unwrap();
    let validator = RecordValidator::new(&defs, SubmissionMode::Update);

    let input = concat!(
        r#"{"id":"1","submission_type":"specimen","submission_packet":{"sampleid":"S1","mystery":"x"}}"#,
        "\n",
    );
    let mut out = Vec::new();
    let mut err = Vec::new();

    let summary = run_pipeline(
        input.as_bytes(),
        &mut out,
        &mut err,
        BatchMode::Streaming,
        validate_filter(&validator),
    )
    .unwrap();

    assert_eq!(summary.emitted, 1);
    let err = String::from_utf8(err).unwrap();
    assert!(err.contains("[WARNING][Request 1]"));
    assert!(err.contains("mystery"));
}

#[test]
fn test_validate_malformed_json_is_per_record_failure() {
    let defs = load_definition_table(definition_file().path()).unwrap();
    let validator = RecordValidator::new(&defs, SubmissionMode::Update);

    let input = concat!(
        "{not json}\n",
        r#"{"id":"2","submission_type":"specimen","submission_packet":{"sampleid":"S2"}}"#,
        "\n",
    );
    let mut out = Vec::new();
    let mut err = Vec::new();

    let summary = run_pipeline(
        input.as_bytes(),
        &mut out,
        &mut err,
        BatchMode::Streaming,
        validate_filter(&validator),
    )
    .unwrap();

    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.emitted, 1);
    assert!(String::from_utf8(err).unwrap().contains("Malformed input line"));
}

// =============================================================================
// Convert Step
// =============================================================================

#[test]
fn test_convert_end_to_end() {
    let map = load_field_map(mapping_file().path(), EXCLUDED_FIELDS).unwrap();

    let record: SubmissionRecord = serde_json::from_str(
        r#"{"id":"1","submission_packet":{"sampleid":"S1","taxid":"","kingdom":"Animalia","record_id":"x"}}"#,
    )
    .unwrap();
    let converted = convert_record(&record, &map).unwrap();
    let line = serde_json::to_string(&converted).unwrap();

    // Empty taxid became null, record_id was excluded, kingdom went
    // through the foreign-key decomposition.
    assert!(line.contains(r#""sampleid":[{"db_table":"specimen","db_field":"sampleid","value":"S1"}]"#));
    assert!(line.contains(r#""taxid":[{"db_table":"specimen","db_field":"taxid","value":null}]"#));
    assert!(line.contains(r#""db_table":"animal__classification""#));
    assert!(line.contains(r#""db_field":"taxon__kingdom""#));
    assert!(!line.contains("record_id"));
}

#[test]
fn test_convert_missing_identifier_reports_request_id() {
    let map = load_field_map(mapping_file().path(), EXCLUDED_FIELDS).unwrap();
    let record: SubmissionRecord =
        serde_json::from_str(r#"{"id":"REQ-77","submission_packet":{"taxid":"1"}}"#).unwrap();

    let err = convert_record(&record, &map).unwrap_err();
    match err {
        BcdmError::MissingIdentifier { request_id, .. } => assert_eq!(request_id, "REQ-77"),
        other => panic!("unexpected error: {other:?}"),
    }
}

// =============================================================================
// Verbatim Step
// =============================================================================

#[test]
fn test_convert_then_verbatim_add() {
    let map = load_field_map(mapping_file().path(), EXCLUDED_FIELDS).unwrap();
    let verbatim = load_verbatim_map(verbatim_file().path()).unwrap();

    let record: SubmissionRecord = serde_json::from_str(
        r#"{"id":"1","submission_packet":{"sampleid":"S1","taxid":"9606"}}"#,
    )
    .unwrap();
    let mut converted = convert_record(&record, &map).unwrap();

    // Round-trip through JSON the way the pipeline does between tools.
    let line = serde_json::to_string(&converted).unwrap();
    converted = serde_json::from_str::<ConvertedRecord>(&line).unwrap();

    apply_verbatim(&mut converted, &verbatim, VerbatimMode::Add);

    assert_eq!(converted["sampleid"].len(), 1);
    assert_eq!(converted["taxid"].len(), 2);
    assert_eq!(converted["taxid"][1].db_table, "specimen_verbatim");
    assert_eq!(converted["taxid"][1].value, Some("9606".to_string()));
}

#[test]
fn test_verbatim_replace_keeps_single_destination() {
    let map = load_field_map(mapping_file().path(), EXCLUDED_FIELDS).unwrap();
    let verbatim = load_verbatim_map(verbatim_file().path()).unwrap();

    let record: SubmissionRecord =
        serde_json::from_str(r#"{"id":"1","submission_packet":{"sampleid":"S1","taxid":"9606"}}"#)
            .unwrap();
    let mut converted = convert_record(&record, &map).unwrap();
    apply_verbatim(&mut converted, &verbatim, VerbatimMode::Replace);

    assert_eq!(converted["taxid"].len(), 1);
    assert_eq!(converted["taxid"][0].db_table, "specimen_verbatim");
    assert_eq!(converted["taxid"][0].db_field, "taxid_verbatim");
}

// =============================================================================
// Configuration Errors
// =============================================================================

#[test]
fn test_missing_mapping_file_fails_before_reading_input() {
    let result = load_field_map("/no/such/mapping.tsv", EXCLUDED_FIELDS);
    assert!(matches!(result, Err(BcdmError::MappingNotFound(_))));

    let result = load_definition_table("/no/such/defs.tsv");
    assert!(matches!(result, Err(BcdmError::MappingNotFound(_))));

    let result = load_verbatim_map("/no/such/verbatim.tsv");
    assert!(matches!(result, Err(BcdmError::MappingNotFound(_))));
}

#[test]
fn test_mapping_error_message_names_the_path() {
    let err = load_field_map("/no/such/mapping.tsv", EXCLUDED_FIELDS).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Mapping file path not found: /no/such/mapping.tsv"
    );
}
