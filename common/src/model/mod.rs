pub mod digit;
pub mod field;
pub mod location;
pub mod merge;
pub mod pattern;
pub mod radio;
pub mod rule;

use std::collections::BTreeMap;

pub use field::{DataType, FieldDefinition, HiddenKind, InputType, Validation};

/// Flat `placeholder -> raw value` map handed to the document generator.
///
/// Ordered so that every pass over it (preview substitution, submission
/// assembly) visits keys in the same sequence for the same input.
pub type FormData = BTreeMap<String, String>;

/// Every field definition of a template, keyed by placeholder.
pub type FieldMap = BTreeMap<String, FieldDefinition>;

/// Display colour (any CSS colour) per visible field key.
pub type ColorAssignment = BTreeMap<String, String>;
