//! Record transformation: BCDM packets to database-write instructions,
//! plus verbatim field duplication.

mod convert;
mod verbatim;

pub use convert::{ConvertedRecord, FieldWrite, convert_record};
pub use verbatim::{VerbatimMode, apply_verbatim};
