//! Property-based tests for the codecs and the preview renderer.
//!
//! - digit blocks: a value that follows its digit-only format survives
//!   decode then encode unchanged
//! - merged fields: split undoes join when no value contains the separator
//! - radio groups: expand yields exactly one non-empty value for a known
//!   selection and none otherwise
//! - preview: rendering is a pure function of its inputs

use common::model::radio::RadioOption;
use common::model::{ColorAssignment, FieldDefinition, FieldMap, FormData};
use engine::codecs::{digit, merged, radio};
use engine::{render_preview, PreviewInput, RenderConfig};
use proptest::prelude::*;

/// Digit-only format plus a value that conforms to it.
fn digit_format_and_value() -> impl Strategy<Value = (String, String)> {
    (
        prop::collection::vec((1usize..6, prop_oneof![Just("-"), Just(" "), Just("/"), Just(".")]), 1..5),
        prop_oneof![Just(""), Just("("), Just("#")],
    )
        .prop_flat_map(|(parts, lead)| {
            let digits: Vec<_> = parts
                .iter()
                .map(|(len, _)| prop::collection::vec(0u8..10, *len))
                .collect();
            (Just(parts), Just(lead), digits)
        })
        .prop_map(|(parts, lead, digits)| {
            let mut format = lead.to_string();
            let mut value = lead.to_string();
            for (i, ((len, sep), cells)) in parts.iter().zip(digits).enumerate() {
                if i > 0 {
                    format.push_str(sep);
                    value.push_str(sep);
                }
                format.push_str(&"X".repeat(*len));
                value.extend(cells.iter().map(|d| char::from(b'0' + d)));
            }
            (format, value)
        })
}

fn unique_keys() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("\\$[a-z0-9]{1,4}", 1..8).prop_map(|s| s.into_iter().collect())
}

proptest! {
    #[test]
    fn digit_values_survive_decode_encode((format, value) in digit_format_and_value()) {
        let segments = digit::parse_format(&format);
        let parts = digit::decode(&value, &segments);
        prop_assert_eq!(digit::encode(&parts, &segments), value);
    }

    #[test]
    fn merged_split_undoes_join(
        keys in unique_keys(),
        separator in prop_oneof![Just("-"), Just(" "), Just("/"), Just(", ")],
        raw_values in prop::collection::vec("[a-zA-Z0-9ก-ฮ]{0,6}", 8),
    ) {
        let values: FormData = keys
            .iter()
            .cloned()
            .zip(raw_values)
            .collect();
        let flat = merged::join(&values, &keys, separator);
        prop_assert_eq!(merged::split(&flat, &keys, separator), values);
    }

    #[test]
    fn merged_single_characters_without_separator(
        keys in unique_keys(),
        chars in prop::collection::vec("[0-9A-Z]", 8),
    ) {
        let values: FormData = keys.iter().cloned().zip(chars).collect();
        let flat = merged::join(&values, &keys, "");
        prop_assert_eq!(merged::split(&flat, &keys, ""), values);
    }

    #[test]
    fn radio_expand_marks_at_most_one_option(
        keys in unique_keys(),
        values in prop::collection::vec(prop_oneof![Just(""), Just("/"), Just("X")], 8),
        pick in any::<prop::sample::Index>(),
        unknown in "[A-Z]{1,3}",
    ) {
        let options: Vec<RadioOption> = keys
            .iter()
            .zip(values)
            .map(|(key, value)| RadioOption { value: value.to_string(), ..RadioOption::new(key.clone(), key.clone()) })
            .collect();

        let selected = &options[pick.index(options.len())].placeholder;
        let expanded = radio::expand(selected, &options);
        prop_assert_eq!(expanded.len(), options.len());
        prop_assert_eq!(expanded.values().filter(|v| !v.is_empty()).count(), 1);
        prop_assert!(!expanded[selected].is_empty());

        let expanded = radio::expand(&unknown, &options);
        prop_assert!(expanded.values().all(String::is_empty));
    }

    #[test]
    fn preview_is_deterministic(
        keys in unique_keys(),
        raw_values in prop::collection::vec("[a-z<&]{0,5}", 8),
        active in any::<prop::sample::Index>(),
    ) {
        let template: String = keys.iter().map(|k| format!("<p>{{{{{k}}}}}</p>")).collect();
        let form_data: FormData = keys.iter().cloned().zip(raw_values).collect();
        let fields: FieldMap = keys
            .iter()
            .map(|k| (k.clone(), FieldDefinition::new(k.clone(), k.clone())))
            .collect();
        let colors = ColorAssignment::new();
        let active_key = keys[active.index(keys.len())].clone();
        let input = PreviewInput {
            template: &template,
            form_data: &form_data,
            fields: &fields,
            active_field: Some(active_key.as_str()),
            colors: &colors,
        };
        let config = RenderConfig::default();

        let first = render_preview(&input, &config);
        prop_assert_eq!(&first, &render_preview(&input, &config));
        prop_assert!(!first.contains("{{"));
    }
}
