//! Merged field codec.
//!
//! A merged field is one form input whose value spans several consecutive
//! placeholders, e.g. a 13-digit ID number printed one digit per box
//! (`$1..$13`, no separator) or a date typed as `"12-05-2567"` and spread
//! over three placeholders (separator `"-"`).
//!
//! The stored value is the single flat string; [`split`] is the canonical
//! decode used by both the preview and the submission payload.
//!
//! Known limitation: with a non-empty separator, a component value that
//! itself contains the separator is split at that point as well.

use common::model::field::{FieldDefinition, InputType, MERGED_HIDDEN_PREFIX};
use common::model::merge::MergeableGroup;
use common::model::FormData;

/// Spreads `flat_value` over `field_keys`.
///
/// - Non-empty `separator`: the value is split on it and parts are assigned
///   by position. Missing trailing parts become `""`, extra parts are dropped.
/// - Empty `separator`: one character per key, by position.
pub fn split(flat_value: &str, field_keys: &[String], separator: &str) -> FormData {
    let parts: Vec<String> = if separator.is_empty() {
        flat_value.chars().map(String::from).collect()
    } else {
        flat_value.split(separator).map(str::to_string).collect()
    };

    field_keys
        .iter()
        .enumerate()
        .map(|(i, key)| (key.clone(), parts.get(i).cloned().unwrap_or_default()))
        .collect()
}

/// Inverse of [`split`]: the values of `field_keys`, in order, joined by
/// `separator`. Keys without a value contribute `""`.
pub fn join(values: &FormData, field_keys: &[String], separator: &str) -> String {
    field_keys
        .iter()
        .map(|key| values.get(key).map(String::as_str).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Builds the visible definition for an accepted merge candidate.
///
/// Only the primary definition is produced; the remaining members must be
/// replaced by [`hidden_constituents`] by the caller.
pub fn create_merged_field_definition(
    group: &MergeableGroup,
    label: &str,
    separator: &str,
) -> FieldDefinition {
    FieldDefinition {
        input_type: InputType::Merged,
        is_merged: true,
        merged_fields: group.fields.clone(),
        separator: separator.to_string(),
        merge_pattern: Some(group.pattern.clone()),
        ..FieldDefinition::new(group.fields.first().cloned().unwrap_or_default(), label)
    }
}

/// Hidden definitions for every member of `group` except the primary.
pub fn hidden_constituents(group: &MergeableGroup) -> Vec<FieldDefinition> {
    let marker = format!("{MERGED_HIDDEN_PREFIX}{}", group.pattern);
    group
        .fields
        .iter()
        .skip(1)
        .map(|key| FieldDefinition {
            group: Some(marker.clone()),
            ..FieldDefinition::new(key.clone(), key.clone())
        })
        .collect()
}
