//! # Template Preview Renderer
//!
//! Produces the HTML shown in the live preview while a user fills a form.
//! The renderer is a pure function of its inputs: the same template, values,
//! definitions, focused field and colours always give byte-identical output,
//! and it is simply re-run on every edit.
//!
//! ## Pipeline
//!
//! 1.  **Entity normalization**: entity-encoded braces (`&#123;`, `&lbrace;`,
//!     ...) are turned back into `{`/`}` so double-encoded documents still
//!     expose their `{{key}}` tokens.
//!
//! 2.  **Field substitution**: every key of the form data (plus the focused
//!     field, if it has no value yet) is resolved through its definition:
//!     - *merged* fields are split and each constituent token substituted
//!       independently;
//!     - *radio* groups are expanded and each option token substituted;
//!     - *date* and *location* fields are formatted for display;
//!     - anything else, including keys without a definition, is substituted
//!       as a plain value.
//!
//!     Tokens match case-insensitively. Hidden constituents are skipped
//!     because their primary substitutes them, and child fields of
//!     unselected radio options render empty.
//!
//! 3.  **Fallback**: tokens still left are looked up case-insensitively in
//!     the form data; anything unmatched is removed.
//!
//! The focused field's values are wrapped in a highlight span using its
//! assigned colour; an empty focused value shows the empty marker instead
//! of disappearing.

mod colors;
mod helpers;
mod substitute;

use std::collections::BTreeSet;

use common::model::field::{FieldKind, HiddenKind};
use common::model::{ColorAssignment, FieldDefinition, FieldMap, FormData};

use crate::codecs::{merged, radio};
use crate::config::RenderConfig;
use crate::display::display_value;

pub use colors::assign_colors;
pub use helpers::{escape_html, normalize_brace_entities};
use substitute::{resolve_remaining_tokens, substitute_token, Highlight};

/// Snapshot of everything one render depends on.
#[derive(Debug, Clone, Copy)]
pub struct PreviewInput<'a> {
    pub template: &'a str,
    pub form_data: &'a FormData,
    pub fields: &'a FieldMap,
    pub active_field: Option<&'a str>,
    pub colors: &'a ColorAssignment,
}

/// Renders the preview HTML for one snapshot.
///
/// # Arguments
/// * `input` - Template, current values, definitions, focused field and colours.
/// * `config` - Empty marker, default colour and highlight style.
///
/// # Returns
/// The substituted HTML. Never fails: unknown or malformed definitions are
/// treated as plain fields and unknown tokens are dropped.
pub fn render_preview(input: &PreviewInput<'_>, config: &RenderConfig) -> String {
    let mut html = normalize_brace_entities(input.template);
    let suppressed = suppressed_children(input.form_data, input.fields);

    for (key, raw) in entries(input) {
        let field = input.fields.get(key);
        if field.is_some_and(is_covered_by_primary) {
            continue;
        }

        let active = input.active_field == Some(key) && !suppressed.contains(key);
        let highlight = Highlight {
            field: key,
            active,
            color: input
                .colors
                .get(key)
                .map(String::as_str)
                .unwrap_or(&config.default_color),
        };

        match field.map(|f| (f, f.kind())) {
            Some((field, FieldKind::Merged)) => {
                for (part_key, part) in merged::split(raw, &field.merged_fields, &field.separator) {
                    html = substitute_token(&html, &part_key, &part, &highlight, config);
                }
            }
            Some((field, FieldKind::Radio)) => {
                for (option_key, mark) in radio::expand(raw, &field.radio_options) {
                    html = substitute_token(&html, &option_key, &mark, &highlight, config);
                }
            }
            _ => {
                let value = if suppressed.contains(key) {
                    String::new()
                } else {
                    display_value(field, raw)
                };
                html = substitute_token(&html, key, &value, &highlight, config);
            }
        }
    }

    resolve_remaining_tokens(&html, input.form_data)
}

/// Form data entries in key order, followed by the focused field when it
/// has a definition but no value yet.
fn entries<'a>(input: &PreviewInput<'a>) -> Vec<(&'a str, &'a str)> {
    let mut entries: Vec<(&str, &str)> = input
        .form_data
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    if let Some(active) = input.active_field {
        if !input.form_data.contains_key(active) && input.fields.contains_key(active) {
            entries.push((active, ""));
        }
    }
    entries
}

fn is_covered_by_primary(field: &FieldDefinition) -> bool {
    matches!(
        field.hidden_kind(),
        Some(HiddenKind::Merged(_) | HiddenKind::RadioOption(_))
    )
}

/// Child fields of radio options that are not currently selected.
pub(crate) fn suppressed_children<'a>(
    form_data: &'a FormData,
    fields: &'a FieldMap,
) -> BTreeSet<&'a str> {
    fields
        .values()
        .filter(|f| f.kind() == FieldKind::Radio)
        .flat_map(|f| {
            let selected = form_data.get(&f.placeholder).map_or("", String::as_str);
            radio::suppressed_child_fields(f, selected)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use common::model::field::InputType;
    use common::model::radio::RadioOption;

    use super::*;

    fn render(template: &str, data: &FormData, fields: &FieldMap, active: Option<&str>) -> String {
        let colors = ColorAssignment::new();
        render_preview(
            &PreviewInput {
                template,
                form_data: data,
                fields,
                active_field: active,
                colors: &colors,
            },
            &RenderConfig::default(),
        )
    }

    fn data(pairs: &[(&str, &str)]) -> FormData {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn plain_values_and_unknown_tokens() {
        let html = render(
            "Dear {{name}}, ref {{REF}} {{unused}}",
            &data(&[("name", "Ann <3"), ("ref", "A-1")]),
            &FieldMap::new(),
            None,
        );
        assert_eq!(html, "Dear Ann &lt;3, ref A-1 ");
    }

    #[test]
    fn encoded_braces_are_resolved() {
        let html = render(
            "&#123;&#123;name&#125;&#125;",
            &data(&[("name", "Ann")]),
            &FieldMap::new(),
            None,
        );
        assert_eq!(html, "Ann");
    }

    #[test]
    fn typed_tokens_stay_literal_text() {
        let html = render(
            "[{{a}}][{{c}}]",
            &data(&[("a", "see {{b}}"), ("b", "SECRET"), ("c", "literal {{zzz}} text")]),
            &FieldMap::new(),
            None,
        );
        assert_eq!(
            html,
            "[see &#123;&#123;b&#125;&#125;][literal &#123;&#123;zzz&#125;&#125; text]"
        );
        assert!(!html.contains("SECRET"));
    }

    #[test]
    fn date_fields_are_formatted() {
        let mut fields = FieldMap::new();
        let mut date = FieldDefinition::new("d", "Date");
        date.input_type = InputType::Date;
        date.date_format = Some("DD/MM/BBBB".to_string());
        fields.insert("d".to_string(), date);
        let html = render("{{d}}", &data(&[("d", "2024-01-31")]), &fields, None);
        assert_eq!(html, "31/01/2567");
    }

    #[test]
    fn focused_field_without_value_shows_marker() {
        let mut fields = FieldMap::new();
        fields.insert("name".to_string(), FieldDefinition::new("name", "Name"));
        let html = render("[{{name}}]", &FormData::new(), &fields, Some("name"));
        assert!(html.contains(">___</span>"));
        assert_eq!(render("[{{name}}]", &FormData::new(), &fields, None), "[]");
    }

    #[test]
    fn unselected_radio_children_are_not_shown() {
        let mut fields = FieldMap::new();
        let mut yes = RadioOption::new("$1", "Yes");
        yes.child_fields = vec!["detail".to_string()];
        let (group, hidden) =
            radio::create_radio_group_definition(vec![yes, RadioOption::new("$2", "No")], "Q");
        fields.insert(group.placeholder.clone(), group);
        for h in hidden {
            fields.insert(h.placeholder.clone(), h);
        }
        fields.insert("detail".to_string(), FieldDefinition::new("detail", "Detail"));

        let template = "[{{$1}}][{{$2}}] {{detail}}";
        let html = render(template, &data(&[("$1", "$2"), ("detail", "kept")]), &fields, None);
        assert_eq!(html, "[][/] ");
        let html = render(template, &data(&[("$1", "$1"), ("detail", "kept")]), &fields, None);
        assert_eq!(html, "[/][] kept");
    }
}
