//! Verbatim field duplication over already-converted records.

use serde::{Deserialize, Serialize};

use crate::mapping::VerbatimMap;

use super::convert::{ConvertedRecord, FieldWrite};

/// How a verbatim destination is applied to a converted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerbatimMode {
    /// Append a second write carrying the same value.
    Add,
    /// Overwrite the primary destination in place.
    Replace,
}

/// Apply verbatim duplication to every field of a converted record.
///
/// The reverse-lookup key is the primary write's `table.field` with any
/// foreign-key qualifier after `__` stripped from both parts; the
/// verbatim table addresses live tables only. Fields without a verbatim
/// counterpart are left untouched.
pub fn apply_verbatim(record: &mut ConvertedRecord, verbatim: &VerbatimMap, mode: VerbatimMode) {
    for writes in record.values_mut() {
        let Some(primary) = writes.first() else {
            continue;
        };

        let live_table = strip_fk_qualifier(&primary.db_table);
        let live_field = strip_fk_qualifier(&primary.db_field);
        let Some(destination) = verbatim.lookup(&format!("{}.{}", live_table, live_field)) else {
            continue;
        };

        match mode {
            VerbatimMode::Add => {
                let value = primary.value.clone();
                writes.push(FieldWrite {
                    db_table: destination.table.clone(),
                    db_field: destination.field.clone(),
                    value,
                });
            }
            VerbatimMode::Replace => {
                let primary = &mut writes[0];
                primary.db_table = destination.table.clone();
                primary.db_field = destination.field.clone();
            }
        }
    }
}

fn strip_fk_qualifier(name: &str) -> &str {
    name.split("__").next().unwrap_or(name)
}
