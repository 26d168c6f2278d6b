use std::cmp::Reverse;

use common::model::field::{DataType, FieldDefinition, InputType};
use common::model::rule::{ConfigurableDataType, EntityRule, FieldRule};
use log::warn;
use regex::Regex;

use crate::error::{EngineError, Result};

/// Compiles a persisted rule pattern.
///
/// An empty pattern is an unfinished rule and is rejected rather than
/// treated as "match everything".
pub fn validate_pattern(pattern: &str) -> Result<Regex> {
    if pattern.is_empty() {
        return Err(EngineError::EmptyPattern);
    }
    Regex::new(pattern).map_err(|source| EngineError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Outcome of matching one placeholder name against all rule sets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub data_type: Option<DataType>,
    pub input_type: Option<InputType>,
    pub entity: Option<String>,
    /// Names of the rules that matched, data type first, then field, then entity.
    pub matched_rules: Vec<String>,
}

struct CompiledRule<T> {
    name: String,
    regex: Regex,
    priority: i32,
    target: T,
}

/// Auto-classifies placeholder names with the configured rules.
///
/// Each rule list is ordered by descending priority (declaration order
/// breaks ties) and the first matching rule of each list wins. Disabled
/// rules, empty patterns and patterns that do not compile are skipped.
pub struct RuleClassifier {
    data_types: Vec<CompiledRule<(DataType, Option<InputType>)>>,
    fields: Vec<CompiledRule<(InputType, Option<DataType>)>>,
    entities: Vec<CompiledRule<String>>,
}

impl RuleClassifier {
    pub fn new(
        field_rules: &[FieldRule],
        entity_rules: &[EntityRule],
        data_types: &[ConfigurableDataType],
    ) -> Self {
        Self {
            data_types: compile_all(data_types.iter().filter(|d| d.enabled).map(|d| {
                (
                    &d.name,
                    &d.pattern,
                    d.priority,
                    (d.data_type, d.default_input_type),
                )
            })),
            fields: compile_all(
                field_rules
                    .iter()
                    .filter(|r| r.enabled)
                    .map(|r| (&r.name, &r.pattern, r.priority, (r.input_type, r.data_type))),
            ),
            entities: compile_all(
                entity_rules
                    .iter()
                    .filter(|r| r.enabled)
                    .map(|r| (&r.name, &r.pattern, r.priority, r.entity.clone())),
            ),
        }
    }

    /// Number of rules that compiled and take part in classification.
    pub fn rule_count(&self) -> usize {
        self.data_types.len() + self.fields.len() + self.entities.len()
    }

    pub fn classify(&self, placeholder: &str) -> Classification {
        let mut result = Classification::default();

        if let Some(rule) = first_match(&self.data_types, placeholder) {
            let (data_type, input_type) = rule.target;
            result.data_type = Some(data_type);
            result.input_type = input_type;
            result.matched_rules.push(rule.name.clone());
        }
        if let Some(rule) = first_match(&self.fields, placeholder) {
            let (input_type, data_type) = rule.target;
            result.input_type = Some(input_type);
            result.data_type = result.data_type.or(data_type);
            result.matched_rules.push(rule.name.clone());
        }
        if let Some(rule) = first_match(&self.entities, placeholder) {
            result.entity = Some(rule.target.clone());
            result.matched_rules.push(rule.name.clone());
        }
        result
    }

    /// Returns `field` with the classification of its placeholder applied.
    /// Unmatched aspects keep their current values.
    pub fn apply(&self, field: &FieldDefinition) -> FieldDefinition {
        let found = self.classify(&field.placeholder);
        FieldDefinition {
            data_type: found.data_type.unwrap_or(field.data_type),
            input_type: found.input_type.unwrap_or(field.input_type),
            entity: found.entity.or_else(|| field.entity.clone()),
            ..field.clone()
        }
    }
}

fn compile_all<'a, T>(
    rules: impl Iterator<Item = (&'a String, &'a String, i32, T)>,
) -> Vec<CompiledRule<T>> {
    let mut compiled: Vec<CompiledRule<T>> = rules
        .filter_map(|(name, pattern, priority, target)| match validate_pattern(pattern) {
            Ok(regex) => Some(CompiledRule {
                name: name.clone(),
                regex,
                priority,
                target,
            }),
            Err(e) => {
                warn!("skipping rule {name:?}: {e}");
                None
            }
        })
        .collect();
    compiled.sort_by_key(|r| Reverse(r.priority));
    compiled
}

fn first_match<'r, T>(rules: &'r [CompiledRule<T>], placeholder: &str) -> Option<&'r CompiledRule<T>> {
    rules.iter().find(|r| r.regex.is_match(placeholder))
}
