//! Destination-path resolution, including the foreign-key naming rule.

use crate::error::{BcdmError, Result};

use super::entry::Destination;

/// Delimiter separating the live-table prefix from the foreign-key
/// qualifier in destination names.
const FK_DELIMITER: &str = "__";

/// Resolve a dot-delimited `bold_field` path into a destination.
///
/// Two segments resolve verbatim: `table.field`. More than two segments
/// signal a foreign key, where the first segment carries both a table
/// prefix and a field prefix joined by `__`:
///
/// `animal__taxon.classification__kingdom.name` resolves to table
/// `animal__classification`, field `taxon__kingdom`.
///
/// Returns the destination and whether the foreign-key rule applied.
pub fn resolve_destination(bold_field: &str) -> Result<(Destination, bool)> {
    let segments: Vec<&str> = bold_field.split('.').collect();

    if segments.len() > 2 {
        // The first segment splits as prefix__suffix; anything after a
        // second delimiter is not part of the convention and is dropped.
        let mut parts = segments[0].split(FK_DELIMITER);
        let prefix = parts.next().unwrap_or_default();
        let suffix = parts.next().ok_or_else(|| bad_path(bold_field))?;
        if prefix.is_empty() || suffix.is_empty() || segments[1].is_empty() || segments[2].is_empty()
        {
            return Err(bad_path(bold_field));
        }
        let destination = Destination::new(
            format!("{}{}{}", prefix, FK_DELIMITER, segments[1]),
            format!("{}{}{}", suffix, FK_DELIMITER, segments[2]),
        );
        return Ok((destination, true));
    }

    match segments.as_slice() {
        [table, field] if !table.is_empty() && !field.is_empty() => {
            Ok((Destination::new(*table, *field), false))
        }
        _ => Err(bad_path(bold_field)),
    }
}

fn bad_path(bold_field: &str) -> BcdmError {
    BcdmError::Config(format!("Invalid destination path: '{}'", bold_field))
}
