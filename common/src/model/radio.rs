use serde::{Deserialize, Serialize};

/// Value written to the selected option's placeholder unless the option says otherwise.
pub const DEFAULT_CHECKMARK: &str = "/";

/// One choice of a mutually exclusive radio group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RadioOption {
    /// Placeholder that receives `value` while this option is selected.
    pub placeholder: String,
    pub label: String,
    /// Written to `placeholder` when selected; conventionally a checkmark.
    pub value: String,
    /// Keys of `radio_child_<id>` definitions surfaced while this option is selected.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub child_fields: Vec<String>,
}

impl RadioOption {
    pub fn new(placeholder: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            label: label.into(),
            value: DEFAULT_CHECKMARK.to_string(),
            child_fields: Vec::new(),
        }
    }
}
