use serde::{Deserialize, Serialize};

use crate::model::location::LocationOutputFormat;
use crate::model::radio::RadioOption;

/// Group prefix marking a constituent placeholder of a merged field.
pub const MERGED_HIDDEN_PREFIX: &str = "merged_hidden_";
/// Group prefix marking a non-primary option placeholder of a radio group.
pub const RADIO_HIDDEN_PREFIX: &str = "radio_hidden_";
/// Group prefix marking a field surfaced only while its radio option is selected.
pub const RADIO_CHILD_PREFIX: &str = "radio_child_";

/// Semantic classification of a field. Only `Date` changes how the engine
/// treats a value; the rest is carried for the editor and the rule classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    #[default]
    Text,
    Number,
    Date,
    Currency,
    Email,
    Phone,
    IdCard,
    Address,
    Name,
    #[serde(other)]
    Other,
}

/// Widget family of a field; selects which codec applies to its value.
///
/// Unknown strings coming from stored JSON fall back to `Text`, so a
/// definition written by a newer editor still renders as a plain field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Textarea,
    Number,
    Date,
    Select,
    Checkbox,
    Merged,
    Radio,
    Digit,
    Location,
    #[serde(other)]
    #[default]
    Text,
}

/// Optional constraints attached to a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Validation {
    pub pattern: Option<String>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub options: Vec<String>,
    pub required: bool,
}

/// What a hidden definition is hidden *for*, decoded from its `group` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HiddenKind {
    /// Constituent of the merged field whose merge pattern is carried.
    Merged(String),
    /// Non-primary option placeholder of the radio group with this id.
    RadioOption(String),
    /// Conditional child of an option in the radio group with this id.
    RadioChild(String),
}

/// Which codec governs a field's stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Merged,
    Radio,
    Digit,
    Location,
    Date,
    Plain,
}

/// The unit of a form field.
///
/// A definition is keyed by `placeholder`. Merged and radio definitions
/// additionally cover the placeholders listed in `merged_fields` /
/// `radio_options`; those constituents exist in the field map only as
/// hidden definitions (see [`FieldDefinition::is_hidden`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldDefinition {
    pub placeholder: String,
    pub label: String,
    pub data_type: DataType,
    pub entity: Option<String>,
    pub input_type: InputType,
    pub validation: Option<Validation>,
    pub group: Option<String>,
    pub order: u32,

    pub is_merged: bool,
    pub merged_fields: Vec<String>,
    pub separator: String,
    pub merge_pattern: Option<String>,

    pub is_radio_group: bool,
    pub radio_group_id: Option<String>,
    pub radio_options: Vec<RadioOption>,

    pub digit_format: Option<String>,
    pub date_format: Option<String>,
    pub location_output_format: Option<LocationOutputFormat>,
    pub default_value: Option<String>,
}

impl FieldDefinition {
    /// Creates a visible plain-text definition for `placeholder`.
    pub fn new(placeholder: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// True when the `group` marker excludes this definition from direct rendering.
    pub fn is_hidden(&self) -> bool {
        self.hidden_kind().is_some()
    }

    /// Decodes the `group` marker, if it is one of the hidden prefixes.
    pub fn hidden_kind(&self) -> Option<HiddenKind> {
        let group = self.group.as_deref()?;
        if let Some(pattern) = group.strip_prefix(MERGED_HIDDEN_PREFIX) {
            Some(HiddenKind::Merged(pattern.to_string()))
        } else if let Some(id) = group.strip_prefix(RADIO_HIDDEN_PREFIX) {
            Some(HiddenKind::RadioOption(id.to_string()))
        } else {
            group
                .strip_prefix(RADIO_CHILD_PREFIX)
                .map(|id| HiddenKind::RadioChild(id.to_string()))
        }
    }

    /// Resolves the codec for this definition.
    ///
    /// Structured kinds require their payload: a merged field without at
    /// least two constituents, a radio group without options or a digit
    /// block without a format all degrade to `Plain`.
    pub fn kind(&self) -> FieldKind {
        if (self.is_merged || self.input_type == InputType::Merged)
            && self.merged_fields.len() >= 2
        {
            FieldKind::Merged
        } else if (self.is_radio_group || self.input_type == InputType::Radio)
            && !self.radio_options.is_empty()
        {
            FieldKind::Radio
        } else if self.input_type == InputType::Digit
            && self.digit_format.as_deref().is_some_and(|f| !f.is_empty())
        {
            FieldKind::Digit
        } else if self.input_type == InputType::Location {
            FieldKind::Location
        } else if self.input_type == InputType::Date || self.data_type == DataType::Date {
            FieldKind::Date
        } else {
            FieldKind::Plain
        }
    }

    /// Placeholders whose tokens this definition substitutes.
    pub fn covered_placeholders(&self) -> Vec<&str> {
        match self.kind() {
            FieldKind::Merged => self.merged_fields.iter().map(String::as_str).collect(),
            FieldKind::Radio => self
                .radio_options
                .iter()
                .map(|o| o.placeholder.as_str())
                .collect(),
            _ => vec![self.placeholder.as_str()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_markers_are_decoded() {
        let mut field = FieldDefinition::new("$2", "");
        assert!(!field.is_hidden());

        field.group = Some("merged_hidden_$1-$3".to_string());
        assert_eq!(
            field.hidden_kind(),
            Some(HiddenKind::Merged("$1-$3".to_string()))
        );

        field.group = Some("radio_child_abc".to_string());
        assert_eq!(
            field.hidden_kind(),
            Some(HiddenKind::RadioChild("abc".to_string()))
        );

        field.group = Some("personal".to_string());
        assert!(!field.is_hidden());
    }

    #[test]
    fn incomplete_structured_fields_degrade_to_plain() {
        let mut field = FieldDefinition::new("$1", "Name");
        field.is_merged = true;
        field.merged_fields = vec!["$1".to_string()];
        assert_eq!(field.kind(), FieldKind::Plain);

        field.merged_fields.push("$2".to_string());
        assert_eq!(field.kind(), FieldKind::Merged);

        let mut digit = FieldDefinition::new("$9", "Plate");
        digit.input_type = InputType::Digit;
        assert_eq!(digit.kind(), FieldKind::Plain);
        digit.digit_format = Some("XX-XXXX".to_string());
        assert_eq!(digit.kind(), FieldKind::Digit);
    }

    #[test]
    fn unknown_enum_strings_fall_back() {
        let json = r#"{"placeholder":"$1","inputType":"signature","dataType":"blood_type"}"#;
        let field: FieldDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(field.input_type, InputType::Text);
        assert_eq!(field.data_type, DataType::Other);
        assert_eq!(field.kind(), FieldKind::Plain);
    }

    #[test]
    fn text_input_type_is_default_and_round_trips() {
        assert_eq!(InputType::default(), InputType::Text);
        assert_eq!(serde_json::to_string(&InputType::Text).unwrap(), r#""text""#);
        let parsed: InputType = serde_json::from_str(r#""text""#).unwrap();
        assert_eq!(parsed, InputType::Text);
        let parsed: InputType = serde_json::from_str(r#""location""#).unwrap();
        assert_eq!(parsed, InputType::Location);
    }
}
