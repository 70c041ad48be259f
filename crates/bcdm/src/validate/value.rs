//! Single-value validation against a declared datatype and format spec.

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::mapping::DataType;

/// Format spec value meaning "no format constraint".
pub const DEFAULT_FORMAT: &str = "default";

/// Placeholder tokens accepted in string format specs and their regex
/// expansions.
const PLACEHOLDERS: &[(&str, &str)] = &[
    ("%s", ".+"),
    ("%d", r"\d+"),
    ("%f", r"[-+]?\d*\.?\d+"),
];

/// Formats tried when accepting a date value without a declared format.
const LOOSE_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d %b %Y",
    "%d-%b-%Y",
    "%b %d %Y",
    "%B %d, %Y",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Validates raw string values against the datatype and format declared
/// in the definition table.
///
/// The empty-string policy (`match_empty`) is an explicit construction
/// parameter: when set, `%s` placeholders also match the empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueValidator {
    match_empty: bool,
}

impl ValueValidator {
    pub fn new() -> Self {
        Self { match_empty: false }
    }

    /// Widen `%s` placeholders to also match the empty string.
    pub fn with_match_empty(match_empty: bool) -> Self {
        Self { match_empty }
    }

    /// Decide whether a raw value is acceptable for the declared
    /// datatype and format spec.
    ///
    /// An empty value is always acceptable at this layer; required-ness
    /// is enforced by the record-level rules. Any parse failure along
    /// the way is a plain rejection, never a propagated error.
    pub fn is_valid(&self, value: &str, data_type: DataType, format: &str) -> bool {
        if value.is_empty() {
            return true;
        }

        if !self.type_check(value, data_type) {
            return false;
        }

        if format == DEFAULT_FORMAT {
            return true;
        }
        self.format_check(value, data_type, format)
    }

    fn type_check(&self, value: &str, data_type: DataType) -> bool {
        match data_type {
            DataType::String => true,
            DataType::Integer => value.trim().parse::<i64>().is_ok(),
            DataType::Float => value.trim().parse::<f64>().is_ok(),
            DataType::Date => parse_loose_date(value),
            DataType::Char => value.chars().count() == 1,
            DataType::GeoPoint => value.split(',').count() == 2,
            // Splitting on comma always succeeds, and every part of a
            // string array is trivially a string.
            DataType::Array | DataType::StringArray => true,
            DataType::Json => serde_json::from_str::<serde_json::Value>(value).is_ok(),
        }
    }

    fn format_check(&self, value: &str, data_type: DataType, format: &str) -> bool {
        match data_type {
            DataType::Date => date_roundtrip(value, format),
            DataType::String => match placeholder_regex(format, self.match_empty) {
                Some(pattern) => pattern.is_match(value),
                None => false,
            },
            // Format specs only constrain date and string fields.
            _ => true,
        }
    }
}

/// Compile a placeholder format spec into an anchored regex.
///
/// `%s` matches one-or-more of any character (`.*` when `match_empty`),
/// `%d` one-or-more digits, `%f` an optionally signed decimal number.
/// Everything else matches literally.
pub fn placeholder_regex(format: &str, match_empty: bool) -> Option<Regex> {
    let mut pattern = regex::escape(format);
    for (token, expansion) in PLACEHOLDERS {
        let expansion = if match_empty && *token == "%s" {
            ".*"
        } else {
            expansion
        };
        pattern = pattern.replace(&regex::escape(token), expansion);
    }
    Regex::new(&format!("^(?:{})$", pattern)).ok()
}

/// Accept a date value in any of the common interchange formats.
fn parse_loose_date(value: &str) -> bool {
    let trimmed = value.trim();

    // Bare year.
    if trimmed.len() == 4 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }

    LOOSE_DATE_FORMATS.iter().any(|fmt| {
        NaiveDate::parse_from_str(trimmed, fmt).is_ok()
            || NaiveDateTime::parse_from_str(trimmed, fmt).is_ok()
    })
}

/// Strict format acceptance for dates: the value must parse under the
/// declared strftime pattern, and re-formatting the parsed date must
/// reproduce the original string byte-for-byte. A value that parses
/// loosely (e.g. `2024-3-5` under `%Y-%m-%d`) but does not round-trip
/// is rejected.
fn date_roundtrip(value: &str, pattern: &str) -> bool {
    let items: Vec<Item> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return false;
    }

    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, pattern) {
        return render(datetime.format_with_items(items.iter())) == Some(value.to_string());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, pattern) {
        return render(date.format_with_items(items.iter())) == Some(value.to_string());
    }
    false
}

/// Render a chrono delayed format, turning formatting failures into
/// `None` instead of a panic.
fn render(formatted: impl std::fmt::Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", formatted).ok()?;
    Some(out)
}
