//! Field validation.
//!
//! Validation settings and select options are stored as opaque JSON next to
//! each field. Broken JSON is never fatal: it is logged and treated as "no
//! extra validation" / "no options", so one bad record cannot block a form.

use common::model::field::{FieldDefinition, FieldKind, HiddenKind, Validation};
use common::model::{FieldMap, FormData};
use log::warn;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::preview::suppressed_children;

/// A constraint a value does not meet. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("{label} is required")]
    Required { label: String },
    #[error("{label} must be at least {min} characters")]
    TooShort { label: String, min: usize },
    #[error("{label} must be at most {max} characters")]
    TooLong { label: String, max: usize },
    #[error("{label} must be a number")]
    NotANumber { label: String },
    #[error("{label} must be at least {min}")]
    BelowMinimum { label: String, min: f64 },
    #[error("{label} must be at most {max}")]
    AboveMaximum { label: String, max: f64 },
    #[error("{label} has an invalid format")]
    PatternMismatch { label: String },
    #[error("{label} must be one of the listed options")]
    NotAnOption { label: String },
}

/// Parses stored validation JSON, or `None` when absent or malformed.
pub fn parse_validation_lenient(json: &str) -> Option<Validation> {
    if json.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(json) {
        Ok(validation) => Some(validation),
        Err(e) => {
            warn!("ignoring malformed validation {json:?}: {e}");
            None
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredOptions {
    List(Vec<String>),
    Csv(String),
}

/// Parses stored select options: a JSON array of strings or a JSON string
/// of comma-separated values. Anything else yields no options.
pub fn parse_options_lenient(json: &str) -> Vec<String> {
    if json.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<StoredOptions>(json) {
        Ok(StoredOptions::List(options)) => options
            .into_iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect(),
        Ok(StoredOptions::Csv(csv)) => csv
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect(),
        Err(e) => {
            warn!("ignoring malformed options {json:?}: {e}");
            Vec::new()
        }
    }
}

/// Checks `value` against the constraints of `field`.
///
/// An empty value only fails `required`; the other constraints apply to
/// what the user actually typed. A pattern that does not compile is skipped
/// with a warning.
pub fn validate_value(field: &FieldDefinition, value: &str) -> Vec<ValidationIssue> {
    let Some(rules) = field.validation.as_ref() else {
        return Vec::new();
    };
    let label = if field.label.is_empty() {
        field.placeholder.clone()
    } else {
        field.label.clone()
    };

    let value = value.trim();
    if value.is_empty() {
        return if rules.required {
            vec![ValidationIssue::Required { label }]
        } else {
            Vec::new()
        };
    }

    let mut issues = Vec::new();
    let length = value.chars().count();
    if let Some(min) = rules.min_length.filter(|min| length < *min) {
        issues.push(ValidationIssue::TooShort { label: label.clone(), min });
    }
    if let Some(max) = rules.max_length.filter(|max| length > *max) {
        issues.push(ValidationIssue::TooLong { label: label.clone(), max });
    }

    if rules.min.is_some() || rules.max.is_some() {
        match value.replace(',', "").parse::<f64>() {
            Ok(number) => {
                if let Some(min) = rules.min.filter(|min| number < *min) {
                    issues.push(ValidationIssue::BelowMinimum { label: label.clone(), min });
                }
                if let Some(max) = rules.max.filter(|max| number > *max) {
                    issues.push(ValidationIssue::AboveMaximum { label: label.clone(), max });
                }
            }
            Err(_) => issues.push(ValidationIssue::NotANumber { label: label.clone() }),
        }
    }

    if let Some(pattern) = rules.pattern.as_deref().filter(|p| !p.is_empty()) {
        match Regex::new(pattern) {
            Ok(re) if !re.is_match(value) => {
                issues.push(ValidationIssue::PatternMismatch { label: label.clone() })
            }
            Ok(_) => {}
            Err(e) => warn!("skipping invalid pattern on {}: {e}", field.placeholder),
        }
    }

    if !rules.options.is_empty() && !rules.options.iter().any(|o| o == value) {
        issues.push(ValidationIssue::NotAnOption { label });
    }
    issues
}

/// Validates every field the user can currently see, keyed by placeholder.
///
/// Radio groups validate their selection; merged fields their flat value.
/// Constituents are covered by their primary, and children of unselected
/// radio options are not checked. Fields with no issues are left out.
pub fn validate_form(form_data: &FormData, fields: &FieldMap) -> Vec<(String, Vec<ValidationIssue>)> {
    let suppressed = suppressed_children(form_data, fields);
    fields
        .values()
        .filter(|f| {
            !matches!(
                f.hidden_kind(),
                Some(HiddenKind::Merged(_) | HiddenKind::RadioOption(_))
            )
        })
        .filter(|f| !suppressed.contains(f.placeholder.as_str()))
        .filter_map(|f| {
            let value = form_data.get(&f.placeholder).map_or("", String::as_str);
            let issues = match f.kind() {
                FieldKind::Radio => {
                    let known = f.radio_options.iter().any(|o| o.placeholder == value);
                    let rules_required = f.validation.as_ref().is_some_and(|v| v.required);
                    if rules_required && !known {
                        vec![ValidationIssue::Required { label: f.label.clone() }]
                    } else {
                        Vec::new()
                    }
                }
                _ => validate_value(f, value),
            };
            (!issues.is_empty()).then(|| (f.placeholder.clone(), issues))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_with(validation: Validation) -> FieldDefinition {
        FieldDefinition {
            validation: Some(validation),
            ..FieldDefinition::new("age", "Age")
        }
    }

    #[test]
    fn malformed_json_means_no_constraints() {
        assert_eq!(parse_validation_lenient("{not json"), None);
        assert_eq!(parse_validation_lenient(""), None);
        let parsed = parse_validation_lenient(r#"{"required":true,"maxLength":3}"#).unwrap();
        assert!(parsed.required);
        assert_eq!(parsed.max_length, Some(3));
    }

    #[test]
    fn options_accept_array_or_csv() {
        assert_eq!(parse_options_lenient(r#"["a", " b ", ""]"#), vec!["a", "b"]);
        assert_eq!(parse_options_lenient(r#""x, y,,z""#), vec!["x", "y", "z"]);
        assert!(parse_options_lenient("[1, 2").is_empty());
        assert!(parse_options_lenient("42").is_empty());
    }

    #[test]
    fn empty_value_only_fails_required() {
        let field = field_with(Validation {
            required: true,
            min_length: Some(2),
            ..Validation::default()
        });
        assert_eq!(
            validate_value(&field, "  "),
            vec![ValidationIssue::Required { label: "Age".to_string() }]
        );
        let optional = field_with(Validation {
            min_length: Some(2),
            ..Validation::default()
        });
        assert!(validate_value(&optional, "").is_empty());
    }

    #[test]
    fn numeric_and_length_bounds() {
        let field = field_with(Validation {
            min: Some(18.0),
            max: Some(99.0),
            max_length: Some(2),
            ..Validation::default()
        });
        assert!(validate_value(&field, "42").is_empty());
        assert_eq!(validate_value(&field, "7").len(), 1);
        let issues = validate_value(&field, "120");
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[1].to_string(), "Age must be at most 99");
        assert_eq!(
            validate_value(&field, "ab"),
            vec![ValidationIssue::NotANumber { label: "Age".to_string() }]
        );
    }

    #[test]
    fn thai_text_length_counts_characters() {
        let field = field_with(Validation {
            max_length: Some(5),
            ..Validation::default()
        });
        assert!(validate_value(&field, "สวัสดี").len() == 1);
        assert!(validate_value(&field, "กขคงจ").is_empty());
    }

    #[test]
    fn broken_pattern_is_ignored() {
        let field = field_with(Validation {
            pattern: Some("(".to_string()),
            ..Validation::default()
        });
        assert!(validate_value(&field, "anything").is_empty());
        let field = field_with(Validation {
            pattern: Some(r"^\d{5}$".to_string()),
            ..Validation::default()
        });
        assert_eq!(validate_value(&field, "1234").len(), 1);
    }

    #[test]
    fn form_validation_skips_hidden_fields() {
        let mut fields = FieldMap::new();
        fields.insert(
            "name".to_string(),
            FieldDefinition {
                validation: Some(Validation {
                    required: true,
                    ..Validation::default()
                }),
                ..FieldDefinition::new("name", "Name")
            },
        );
        fields.insert(
            "$2".to_string(),
            FieldDefinition {
                group: Some("merged_hidden_$1-$2".to_string()),
                validation: Some(Validation {
                    required: true,
                    ..Validation::default()
                }),
                ..FieldDefinition::new("$2", "$2")
            },
        );
        let report = validate_form(&FormData::new(), &fields);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].0, "name");
    }
}
