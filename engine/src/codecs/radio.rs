//! Radio group codec.
//!
//! A radio group covers one placeholder per option; in the generated
//! document exactly the selected option's placeholder carries a value
//! (usually a checkmark) and the others are blank.
//!
//! The stored value of a radio field is the selected option's placeholder
//! key. There is no collapse step: the expanded map is never held as
//! editable state, it is produced on demand by [`expand`].

use common::model::field::{FieldDefinition, InputType, RADIO_CHILD_PREFIX, RADIO_HIDDEN_PREFIX};
use common::model::radio::{RadioOption, DEFAULT_CHECKMARK};
use common::model::FormData;
use uuid::Uuid;

/// Expands a selection into a value for every option placeholder.
///
/// The selected option's placeholder receives its `value` (the default
/// checkmark when the option has none); every other option receives `""`.
/// An empty or unknown selection yields all-empty values.
pub fn expand(selected_placeholder: &str, options: &[RadioOption]) -> FormData {
    let mut values = FormData::new();
    for option in options {
        let selected =
            !selected_placeholder.is_empty() && option.placeholder == selected_placeholder;
        let value = if selected {
            option_value(option)
        } else if values.contains_key(&option.placeholder) {
            continue;
        } else {
            ""
        };
        values.insert(option.placeholder.clone(), value.to_string());
    }
    values
}

fn option_value(option: &RadioOption) -> &str {
    if option.value.is_empty() {
        DEFAULT_CHECKMARK
    } else {
        &option.value
    }
}

/// Child field keys surfaced by the current selection.
pub fn active_child_fields<'a>(field: &'a FieldDefinition, selected: &str) -> Vec<&'a str> {
    field
        .radio_options
        .iter()
        .filter(|o| !selected.is_empty() && o.placeholder == selected)
        .flat_map(|o| o.child_fields.iter().map(String::as_str))
        .collect()
}

/// Child field keys of options that are not selected.
///
/// Their values are kept in the form data but are neither displayed nor
/// submitted until their option is selected again.
pub fn suppressed_child_fields<'a>(field: &'a FieldDefinition, selected: &str) -> Vec<&'a str> {
    let active = active_child_fields(field, selected);
    field
        .radio_options
        .iter()
        .flat_map(|o| o.child_fields.iter().map(String::as_str))
        .filter(|key| !active.contains(key))
        .collect()
}

/// Group marker for a child field of radio group `id`.
pub fn child_marker(id: &str) -> String {
    format!("{RADIO_CHILD_PREFIX}{id}")
}

/// Builds a radio group over `options` with a freshly generated group id.
///
/// Returns the visible definition, keyed by the first option's placeholder,
/// and the hidden definitions for the remaining option placeholders.
/// Child fields named by the options keep their own definitions; the caller
/// re-tags them with [`child_marker`].
pub fn create_radio_group_definition(
    options: Vec<RadioOption>,
    label: &str,
) -> (FieldDefinition, Vec<FieldDefinition>) {
    let id = Uuid::new_v4().simple().to_string();
    let marker = format!("{RADIO_HIDDEN_PREFIX}{id}");
    let primary_key = options
        .first()
        .map(|o| o.placeholder.clone())
        .unwrap_or_default();

    let hidden = options
        .iter()
        .skip(1)
        .filter(|o| o.placeholder != primary_key)
        .map(|o| FieldDefinition {
            group: Some(marker.clone()),
            ..FieldDefinition::new(o.placeholder.clone(), o.label.clone())
        })
        .collect();

    let primary = FieldDefinition {
        input_type: InputType::Radio,
        is_radio_group: true,
        radio_group_id: Some(id),
        radio_options: options,
        ..FieldDefinition::new(primary_key, label)
    };
    (primary, hidden)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<RadioOption> {
        vec![RadioOption::new("$1", "Male"), RadioOption::new("$2", "Female")]
    }

    #[test]
    fn selection_marks_only_its_placeholder() {
        let values = expand("$2", &options());
        assert_eq!(values["$1"], "");
        assert_eq!(values["$2"], "/");
    }

    #[test]
    fn unknown_or_empty_selection_is_all_empty() {
        for selected in ["", "$9"] {
            let values = expand(selected, &options());
            assert_eq!(values.len(), 2);
            assert!(values.values().all(String::is_empty));
        }
    }

    #[test]
    fn option_without_value_gets_checkmark() {
        let mut opts = options();
        opts[0].value.clear();
        opts[1].value = "X".to_string();
        assert_eq!(expand("$1", &opts)["$1"], "/");
        assert_eq!(expand("$2", &opts)["$2"], "X");
    }

    #[test]
    fn child_fields_follow_selection() {
        let mut opts = options();
        opts[0].child_fields = vec!["$10".to_string()];
        opts[1].child_fields = vec!["$11".to_string(), "$12".to_string()];
        let (field, hidden) = create_radio_group_definition(opts, "Sex");

        assert_eq!(field.placeholder, "$1");
        assert_eq!(hidden.len(), 1);
        assert!(hidden[0].is_hidden());

        assert_eq!(active_child_fields(&field, "$2"), vec!["$11", "$12"]);
        assert_eq!(suppressed_child_fields(&field, "$2"), vec!["$10"]);
        assert_eq!(suppressed_child_fields(&field, "").len(), 3);
    }
}
