use common::model::pattern::{MatchType, PatternBuilderState};

use super::builder::CASE_INSENSITIVE_FLAG;

/// Characters that keep an anchored pattern out of the simple modes.
const ANCHORED_EXCLUDED: &[char] = &['(', '[', '*', '+'];

/// Escape classes that additionally keep an unanchored pattern out of `Contains`.
const CONTAINS_EXCLUDED_CLASSES: &[&str] = &[r"\d", r"\w"];

/// Best-effort reconstruction of builder state from a stored regex.
///
/// Used only to pre-populate the editor. A leading `(?i)` clears
/// `case_sensitive`. The remainder is classified by its anchors:
///
/// - `^…$` with no other `^`/`$` inside is `Exact`;
/// - `^…` alone or `…$` alone is `StartsWith` / `EndsWith` when the
///   interior has none of `( [ * +`;
/// - no anchor is `Contains` when the interior additionally has no `\d`
///   or `\w`.
///
/// The value of those modes is the unescaped interior. Everything else,
/// including the grouped alternatives that [`build`](super::build) emits
/// for several values, opens in `Regex` mode with the original string as
/// value and `case_sensitive = true` (any flag stays inside the value).
///
/// Returns `None` only for the empty string.
pub fn parse(regex: &str) -> Option<PatternBuilderState> {
    if regex.is_empty() {
        return None;
    }

    let (rest, case_sensitive) = match regex.strip_prefix(CASE_INSENSITIVE_FLAG) {
        Some(rest) => (rest, false),
        None => (regex, true),
    };

    let starts = rest.starts_with('^');
    let ends = ends_with_anchor(rest);
    let mut interior = rest;
    if starts {
        interior = &interior[1..];
    }
    if ends && !interior.is_empty() {
        interior = &interior[..interior.len() - 1];
    }

    let match_type = match (starts, ends) {
        (true, true) if !interior.contains(['^', '$']) => Some(MatchType::Exact),
        (true, false) if !interior.contains(ANCHORED_EXCLUDED) => Some(MatchType::StartsWith),
        (false, true) if !interior.contains(ANCHORED_EXCLUDED) => Some(MatchType::EndsWith),
        (false, false)
            if !interior.contains(ANCHORED_EXCLUDED)
                && !CONTAINS_EXCLUDED_CLASSES.iter().any(|c| interior.contains(c)) =>
        {
            Some(MatchType::Contains)
        }
        _ => None,
    };

    Some(match match_type {
        Some(match_type) => {
            PatternBuilderState::new(match_type, unescape(interior), case_sensitive)
        }
        None => PatternBuilderState::new(MatchType::Regex, regex, true),
    })
}

/// A trailing `$` anchors unless it is itself escaped.
fn ends_with_anchor(s: &str) -> bool {
    let Some(body) = s.strip_suffix('$') else {
        return false;
    };
    let backslashes = body.chars().rev().take_while(|&c| c == '\\').count();
    backslashes % 2 == 0
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    out
}
