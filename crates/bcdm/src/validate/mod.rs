//! Validation: value-level datatype/format checks and record-level rules.

mod record;
mod rules;
mod value;

pub use record::{RecordValidator, ValidationReport};
pub use rules::{RequiredRule, required_rules};
pub use value::{DEFAULT_FORMAT, ValueValidator, placeholder_regex};
