//! Fill session: one user entering values into a finished form.
//!
//! Values are stored exactly as typed (merged fields as one flat string,
//! radio groups as the selected option's placeholder, digit blocks with
//! their separators). Decoding into per-placeholder values happens only
//! when the preview or the submission is produced.

use common::model::field::FieldKind;
use common::model::{ColorAssignment, FieldDefinition, FieldMap, FormData};
use log::debug;

use crate::codecs::digit_input::DigitInput;
use crate::config::RenderConfig;
use crate::error::{EngineError, Result};
use crate::preview::{assign_colors, render_preview, PreviewInput};
use crate::submission::build_submission;
use crate::validation::{validate_form, ValidationIssue};

#[derive(Debug, Clone)]
pub struct FormFill {
    fields: FieldMap,
    values: FormData,
    active_field: Option<String>,
    colors: ColorAssignment,
    config: RenderConfig,
}

impl FormFill {
    /// Starts a session with every field's `defaultValue` filled in.
    pub fn new(fields: FieldMap, config: RenderConfig) -> Self {
        let values = fields
            .values()
            .filter_map(|f| {
                f.default_value
                    .as_ref()
                    .map(|v| (f.placeholder.clone(), v.clone()))
            })
            .collect();
        let colors = assign_colors(&fields, &config.palette);
        Self {
            fields,
            values,
            active_field: None,
            colors,
            config,
        }
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn values(&self) -> &FormData {
        &self.values
    }

    pub fn value(&self, key: &str) -> &str {
        self.values.get(key).map_or("", String::as_str)
    }

    pub fn colors(&self) -> &ColorAssignment {
        &self.colors
    }

    pub fn active_field(&self) -> Option<&str> {
        self.active_field.as_deref()
    }

    /// Stores `value` for `key` as typed. Keys without a definition are
    /// accepted; they still resolve template tokens of the same name.
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn focus(&mut self, key: &str) {
        self.active_field = Some(key.to_string());
    }

    pub fn blur(&mut self) {
        self.active_field = None;
    }

    /// Selects `option` in the radio group stored under `group_key`.
    pub fn select_radio(&mut self, group_key: &str, option: &str) -> Result<()> {
        let field = self.field_of_kind(group_key, FieldKind::Radio, "radio")?;
        if !field.radio_options.iter().any(|o| o.placeholder == option) {
            return Err(EngineError::UnknownField(option.to_string()));
        }
        debug!("{group_key}: selected {option}");
        self.values.insert(group_key.to_string(), option.to_string());
        Ok(())
    }

    /// Cell editor for a digit field, seeded from its stored value.
    pub fn digit_input(&self, key: &str) -> Result<DigitInput> {
        let field = self.field_of_kind(key, FieldKind::Digit, "digit")?;
        let format = field.digit_format.as_deref().unwrap_or_default();
        Ok(DigitInput::from_value(format, self.value(key)))
    }

    /// Stores the value of an edited digit block.
    pub fn commit_digit(&mut self, key: &str, input: &DigitInput) -> Result<()> {
        self.field_of_kind(key, FieldKind::Digit, "digit")?;
        self.values.insert(key.to_string(), input.value());
        Ok(())
    }

    /// Renders `template` with the current values and focus.
    pub fn preview(&self, template: &str) -> String {
        render_preview(
            &PreviewInput {
                template,
                form_data: &self.values,
                fields: &self.fields,
                active_field: self.active_field.as_deref(),
                colors: &self.colors,
            },
            &self.config,
        )
    }

    /// Flat payload for the document generator.
    pub fn submission(&self) -> FormData {
        build_submission(&self.values, &self.fields)
    }

    pub fn validate(&self) -> Vec<(String, Vec<ValidationIssue>)> {
        validate_form(&self.values, &self.fields)
    }

    fn field_of_kind(
        &self,
        key: &str,
        kind: FieldKind,
        expected: &'static str,
    ) -> Result<&FieldDefinition> {
        let field = self
            .fields
            .get(key)
            .ok_or_else(|| EngineError::UnknownField(key.to_string()))?;
        if field.kind() != kind {
            return Err(EngineError::WrongKind {
                key: key.to_string(),
                expected,
            });
        }
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use common::model::field::InputType;
    use common::model::radio::RadioOption;

    use super::*;
    use crate::codecs::radio::create_radio_group_definition;

    fn fields() -> FieldMap {
        let mut fields = FieldMap::new();
        let mut country = FieldDefinition::new("country", "Country");
        country.default_value = Some("Thailand".to_string());
        fields.insert("country".to_string(), country);

        let mut plate = FieldDefinition::new("plate", "Plate");
        plate.input_type = InputType::Digit;
        plate.digit_format = Some("AA-XXXX".to_string());
        fields.insert("plate".to_string(), plate);

        let (group, hidden) = create_radio_group_definition(
            vec![RadioOption::new("m", "Male"), RadioOption::new("f", "Female")],
            "Sex",
        );
        fields.insert(group.placeholder.clone(), group);
        for h in hidden {
            fields.insert(h.placeholder.clone(), h);
        }
        fields
    }

    #[test]
    fn defaults_seed_the_values() {
        let fill = FormFill::new(fields(), RenderConfig::default());
        assert_eq!(fill.value("country"), "Thailand");
        assert_eq!(fill.value("plate"), "");
        assert_eq!(fill.preview("{{country}}"), "Thailand");
    }

    #[test]
    fn digit_blocks_edit_through_cells() {
        let mut fill = FormFill::new(fields(), RenderConfig::default());
        let mut input = fill.digit_input("plate").unwrap();
        let focus = input.paste(0, "kb1234");
        assert_eq!(focus, input.len() - 1);
        fill.commit_digit("plate", &input).unwrap();
        assert_eq!(fill.value("plate"), "KB-1234");

        let reopened = fill.digit_input("plate").unwrap();
        assert_eq!(reopened.value(), "KB-1234");
        assert!(matches!(fill.digit_input("country"), Err(EngineError::WrongKind { .. })));
    }

    #[test]
    fn radio_selection_drives_preview_and_submission() {
        let mut fill = FormFill::new(fields(), RenderConfig::default());
        assert!(matches!(
            fill.select_radio("m", "x"),
            Err(EngineError::UnknownField(_))
        ));
        fill.select_radio("m", "f").unwrap();
        assert_eq!(fill.preview("M[{{m}}] F[{{f}}]"), "M[] F[/]");

        let submitted = fill.submission();
        assert_eq!(submitted["m"], "");
        assert_eq!(submitted["f"], "/");
        assert_eq!(submitted["country"], "Thailand");
    }

    #[test]
    fn focus_highlights_with_assigned_colour() {
        let mut fill = FormFill::new(fields(), RenderConfig::default());
        fill.focus("country");
        let color = fill.colors()["country"].clone();
        let html = fill.preview("{{country}}");
        assert!(html.contains(&format!("background-color: {color};")));
        assert!(html.contains(">Thailand</span>"));
        fill.blur();
        assert_eq!(fill.preview("{{country}}"), "Thailand");
    }
}
