//! Mapping tables: BCDM field definitions and destination descriptors.

mod entry;
mod loader;
mod resolver;

pub use entry::{DataType, Destination, FieldDefinition, MappingEntry};
pub use loader::{
    DefinitionTable, FieldMap, VerbatimMap, load_definition_table, load_field_map,
    load_verbatim_map, EXCLUDED_FIELDS,
};
pub use resolver::resolve_destination;
