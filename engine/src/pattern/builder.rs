use common::model::pattern::{MatchType, PatternBuilderState};

/// Inline flag prepended to case-insensitive patterns.
pub const CASE_INSENSITIVE_FLAG: &str = "(?i)";

/// Serializes builder state into the regex that gets persisted.
///
/// `Regex` mode returns the value verbatim. Every other mode splits the
/// value on commas, trims and escapes each alternative, anchors it for the
/// match type and ORs the alternatives inside one group when there is more
/// than one. Case-insensitive patterns are prefixed with `(?i)`.
///
/// Returns `""` when no alternative survives trimming; callers treat that
/// as an unfinished rule and must not persist it.
pub fn build(state: &PatternBuilderState) -> String {
    if state.match_type == MatchType::Regex {
        return state.value.clone();
    }

    let mut alternatives: Vec<String> = state
        .value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| anchor(state.match_type, &regex::escape(v)))
        .collect();

    let body = match alternatives.len() {
        0 => return String::new(),
        1 => alternatives.remove(0),
        _ => format!("({})", alternatives.join("|")),
    };

    if state.case_sensitive {
        body
    } else {
        format!("{CASE_INSENSITIVE_FLAG}{body}")
    }
}

fn anchor(match_type: MatchType, escaped: &str) -> String {
    match match_type {
        MatchType::StartsWith => format!("^{escaped}"),
        MatchType::EndsWith => format!("{escaped}$"),
        MatchType::Exact => format!("^{escaped}$"),
        MatchType::Contains | MatchType::Regex => escaped.to_string(),
    }
}
