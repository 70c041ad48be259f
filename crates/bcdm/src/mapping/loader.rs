//! TSV loaders for the three mapping table variants.
//!
//! Column names are an external contract shared with the schema
//! publisher: the conversion map carries `bcdm_field`/`bold_field`, the
//! definition table `field`/`data_type`/`data_format`, and the verbatim
//! map `bold_field`/`verbatim_field`. Duplicate keys are tolerated with
//! last-row-wins semantics.

use std::fs::File;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{BcdmError, Result};

use super::entry::{DataType, Destination, FieldDefinition, MappingEntry};
use super::resolver::resolve_destination;

/// Fields that are internal to the pipeline and never resolve to a
/// database destination.
pub const EXCLUDED_FIELDS: &[&str] = &["record_id"];

/// Conversion mapping: canonical BCDM field to database destination.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    entries: IndexMap<String, MappingEntry>,
}

impl FieldMap {
    /// Resolve a canonical field to its destination entry, if mapped.
    pub fn resolve(&self, canonical_field: &str) -> Option<&MappingEntry> {
        self.entries.get(canonical_field)
    }

    pub fn contains(&self, canonical_field: &str) -> bool {
        self.entries.contains_key(canonical_field)
    }

    /// Entries in mapping-table order.
    pub fn iter(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Definition table: canonical BCDM field to datatype and format.
#[derive(Debug, Clone, Default)]
pub struct DefinitionTable {
    definitions: IndexMap<String, FieldDefinition>,
}

impl DefinitionTable {
    pub fn definition(&self, field: &str) -> Option<&FieldDefinition> {
        self.definitions.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.definitions.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Verbatim mapping: live `table.field` path to its verbatim destination.
#[derive(Debug, Clone, Default)]
pub struct VerbatimMap {
    entries: IndexMap<String, Destination>,
}

impl VerbatimMap {
    /// Look up the verbatim destination for a live `table.field` path.
    pub fn lookup(&self, bold_field: &str) -> Option<&Destination> {
        self.entries.get(bold_field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load the BCDM-to-database conversion mapping.
///
/// Fields listed in `excluded` are dropped at load time and can never
/// resolve.
pub fn load_field_map(path: impl AsRef<Path>, excluded: &[&str]) -> Result<FieldMap> {
    let mut entries = IndexMap::new();
    let (headers, rows) = read_table(path.as_ref())?;

    for row in &rows {
        let canonical = column(&headers, row, "bcdm_field")?;
        if canonical.is_empty() || excluded.contains(&canonical.as_str()) {
            continue;
        }
        let bold_field = column(&headers, row, "bold_field")?;
        let (destination, is_foreign_key) = resolve_destination(&bold_field)?;
        entries.insert(
            canonical.clone(),
            MappingEntry {
                canonical_field: canonical,
                destination,
                is_foreign_key,
            },
        );
    }

    Ok(FieldMap { entries })
}

/// Load the BCDM field definition table used by the validator.
pub fn load_definition_table(path: impl AsRef<Path>) -> Result<DefinitionTable> {
    let mut definitions = IndexMap::new();
    let (headers, rows) = read_table(path.as_ref())?;

    for row in &rows {
        let field = column(&headers, row, "field")?;
        if field.is_empty() {
            continue;
        }
        let data_type = DataType::parse(&column(&headers, row, "data_type")?);
        let format = column(&headers, row, "data_format")?;
        definitions.insert(
            field.clone(),
            FieldDefinition {
                field,
                data_type,
                format,
            },
        );
    }

    Ok(DefinitionTable { definitions })
}

/// Load the verbatim mapping used by the verbatim duplication step.
pub fn load_verbatim_map(path: impl AsRef<Path>) -> Result<VerbatimMap> {
    let mut entries = IndexMap::new();
    let (headers, rows) = read_table(path.as_ref())?;

    for row in &rows {
        let bold_field = column(&headers, row, "bold_field")?;
        if bold_field.is_empty() {
            continue;
        }
        let verbatim_field = column(&headers, row, "verbatim_field")?;
        let (destination, _) = resolve_destination(&verbatim_field)?;
        entries.insert(bold_field, destination);
    }

    Ok(VerbatimMap { entries })
}

/// Read a TSV file into its header record and data rows.
///
/// The existence check runs before any row (or any stdin) is consumed;
/// a missing file is a configuration error that aborts the run.
fn read_table(path: &Path) -> Result<(csv::StringRecord, Vec<csv::StringRecord>)> {
    if !path.exists() {
        return Err(BcdmError::MappingNotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|e| BcdmError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    let rows = reader.into_records().collect::<std::result::Result<_, _>>()?;

    Ok((headers, rows))
}

/// Fetch a named column from a row, trimmed.
fn column(headers: &csv::StringRecord, row: &csv::StringRecord, name: &str) -> Result<String> {
    let index = headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| BcdmError::Config(format!("Missing required column: '{}'", name)))?;
    Ok(row.get(index).unwrap_or_default().trim().to_string())
}
