//! Submission assembly.
//!
//! Turns the editable form state into the flat placeholder → value map the
//! document generator consumes. Every structured field is decoded with the
//! same codec the preview uses, so what is previewed is what gets generated.

use common::model::field::{FieldKind, HiddenKind};
use common::model::{FieldMap, FormData};
use log::debug;

use crate::codecs::{merged, radio};
use crate::display::display_value;
use crate::preview::suppressed_children;

/// Builds the generator payload for `form_data`.
///
/// - merged fields contribute one entry per constituent placeholder;
/// - radio groups contribute one entry per option placeholder;
/// - child fields of unselected radio options are submitted empty;
/// - date and location values are formatted for display;
/// - keys without a definition pass through unchanged.
///
/// Hidden constituents never contribute on their own. When a constituent
/// also has a stale value of its own, the primary's decoded value wins.
pub fn build_submission(form_data: &FormData, fields: &FieldMap) -> FormData {
    let suppressed = suppressed_children(form_data, fields);
    let mut out = FormData::new();
    let mut decoded = FormData::new();

    for (key, raw) in form_data {
        let field = fields.get(key);
        if let Some(f) = field {
            if matches!(
                f.hidden_kind(),
                Some(HiddenKind::Merged(_) | HiddenKind::RadioOption(_))
            ) {
                debug!("skipping hidden constituent {key:?}");
                continue;
            }
        }

        match field.map(|f| (f, f.kind())) {
            Some((f, FieldKind::Merged)) => {
                decoded.extend(merged::split(raw, &f.merged_fields, &f.separator));
            }
            Some((f, FieldKind::Radio)) => {
                decoded.extend(radio::expand(raw, &f.radio_options));
            }
            _ if suppressed.contains(key.as_str()) => {
                out.insert(key.clone(), String::new());
            }
            _ => {
                out.insert(key.clone(), display_value(field, raw));
            }
        }
    }

    out.extend(decoded);
    out
}

#[cfg(test)]
mod tests {
    use common::model::field::{FieldDefinition, InputType};
    use common::model::merge::MergeableGroup;
    use common::model::radio::RadioOption;

    use super::*;

    fn id_card_fields() -> FieldMap {
        let group = MergeableGroup {
            pattern: "$1-$3".to_string(),
            prefix: "$".to_string(),
            start_num: 1,
            end_num: 3,
            fields: vec!["$1".to_string(), "$2".to_string(), "$3".to_string()],
            suggested_label: "$1–$3".to_string(),
            suggested_separator: String::new(),
        };
        let mut fields = FieldMap::new();
        let primary = merged::create_merged_field_definition(&group, "Code", "");
        fields.insert(primary.placeholder.clone(), primary);
        for hidden in merged::hidden_constituents(&group) {
            fields.insert(hidden.placeholder.clone(), hidden);
        }
        fields
    }

    #[test]
    fn merged_values_are_spread_over_constituents() {
        let fields = id_card_fields();
        let mut data = FormData::new();
        data.insert("$1".to_string(), "123".to_string());
        data.insert("$2".to_string(), "stale".to_string());
        data.insert("note".to_string(), "hello".to_string());

        let out = build_submission(&data, &fields);
        assert_eq!(out["$1"], "1");
        assert_eq!(out["$2"], "2");
        assert_eq!(out["$3"], "3");
        assert_eq!(out["note"], "hello");
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn radio_selection_and_children() {
        let mut yes = RadioOption::new("yes", "Yes");
        yes.child_fields = vec!["reason".to_string()];
        let (group, hidden) =
            radio::create_radio_group_definition(vec![yes, RadioOption::new("no", "No")], "Agree");
        let mut fields = FieldMap::new();
        fields.insert(group.placeholder.clone(), group);
        for h in hidden {
            fields.insert(h.placeholder.clone(), h);
        }

        let mut data = FormData::new();
        data.insert("yes".to_string(), "no".to_string());
        data.insert("reason".to_string(), "typed earlier".to_string());

        let out = build_submission(&data, &fields);
        assert_eq!(out["yes"], "");
        assert_eq!(out["no"], "/");
        assert_eq!(out["reason"], "");

        data.insert("yes".to_string(), "yes".to_string());
        let out = build_submission(&data, &fields);
        assert_eq!(out["yes"], "/");
        assert_eq!(out["reason"], "typed earlier");
    }

    #[test]
    fn dates_are_submitted_formatted() {
        let mut fields = FieldMap::new();
        let mut date = FieldDefinition::new("issued", "Issued");
        date.input_type = InputType::Date;
        date.date_format = Some("D MMMM BBBB".to_string());
        fields.insert("issued".to_string(), date);
        let mut data = FormData::new();
        data.insert("issued".to_string(), "2024-01-02".to_string());
        assert_eq!(build_submission(&data, &fields)["issued"], "2 มกราคม 2567");
    }
}
