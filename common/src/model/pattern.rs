use serde::{Deserialize, Serialize};

/// How a pattern-builder value matches a placeholder name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    StartsWith,
    EndsWith,
    #[default]
    Contains,
    Exact,
    Regex,
}

/// Structured editor state for a rule pattern.
///
/// Only its regex projection is ever persisted; this state is rebuilt from
/// the stored regex on a best-effort basis when a rule is reopened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternBuilderState {
    pub match_type: MatchType,
    /// Comma-separated alternatives, or the raw regex in `Regex` mode.
    pub value: String,
    pub case_sensitive: bool,
}

impl PatternBuilderState {
    pub fn new(match_type: MatchType, value: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            match_type,
            value: value.into(),
            case_sensitive,
        }
    }
}

impl Default for PatternBuilderState {
    fn default() -> Self {
        Self {
            match_type: MatchType::Contains,
            value: String::new(),
            case_sensitive: false,
        }
    }
}
