use serde::{Deserialize, Serialize};

use crate::model::field::{DataType, InputType};

/// Assigns an input widget (and optionally a data type) to matching placeholder names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRule {
    pub name: String,
    /// Regex evaluated against the placeholder name.
    pub pattern: String,
    pub input_type: InputType,
    #[serde(default)]
    pub data_type: Option<DataType>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

/// Tags matching placeholder names with a business entity (person, vehicle, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRule {
    pub name: String,
    pub pattern: String,
    pub entity: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

/// User-defined data type recognised by its placeholder-name pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurableDataType {
    pub name: String,
    pub pattern: String,
    pub data_type: DataType,
    #[serde(default)]
    pub default_input_type: Option<InputType>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}
