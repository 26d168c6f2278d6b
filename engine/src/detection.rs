//! Detection of merge candidates among placeholder names.
//!
//! Documents produced by OCR or form designers number their boxes
//! sequentially (`$1`, `$2`, ... `$13` for the thirteen digits of an ID card).
//! This module scans a placeholder list for such runs and proposes each one
//! as a [`MergeableGroup`]. It only reads names; accepting a proposal is the
//! authoring session's job.

use std::collections::BTreeMap;

use common::model::merge::MergeableGroup;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static NUMBERED_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)(\d+)$").expect("valid numbered placeholder regex"));

/// Runs at least this long suggest one character per placeholder.
const FIXED_WIDTH_MIN_RUN: usize = 4;

/// Finds every maximal run of two or more placeholders sharing a prefix
/// with consecutive numeric suffixes.
///
/// # Arguments
/// * `placeholders` - All placeholder names of the template, in any order.
///
/// # Returns
/// Groups sorted by prefix, then by starting number. A name listed twice is
/// counted once; names without a numeric suffix are ignored.
pub fn detect_mergeable_groups<S: AsRef<str>>(placeholders: &[S]) -> Vec<MergeableGroup> {
    let mut by_prefix: BTreeMap<String, BTreeMap<u64, String>> = BTreeMap::new();
    for name in placeholders {
        let name = name.as_ref();
        let Some(caps) = NUMBERED_NAME.captures(name) else {
            continue;
        };
        let Ok(number) = caps[2].parse::<u64>() else {
            debug!("placeholder {name:?} has an out-of-range suffix");
            continue;
        };
        by_prefix
            .entry(caps[1].to_string())
            .or_default()
            .entry(number)
            .or_insert_with(|| name.to_string());
    }

    let mut groups = Vec::new();
    for (prefix, numbered) in by_prefix {
        let mut run: Vec<(u64, String)> = Vec::new();
        for (number, name) in numbered {
            if run.last().is_some_and(|(last, _)| last + 1 != number) {
                groups.extend(close_run(&prefix, std::mem::take(&mut run)));
            }
            run.push((number, name));
        }
        groups.extend(close_run(&prefix, run));
    }
    groups
}

fn close_run(prefix: &str, run: Vec<(u64, String)>) -> Option<MergeableGroup> {
    if run.len() < 2 {
        return None;
    }
    let (start_num, first) = run.first()?.clone();
    let (end_num, last) = run.last()?.clone();
    let suggested_separator = if run.len() >= FIXED_WIDTH_MIN_RUN {
        String::new()
    } else {
        " ".to_string()
    };
    Some(MergeableGroup {
        pattern: format!("{first}-{last}"),
        prefix: prefix.to_string(),
        start_num,
        end_num,
        suggested_label: format!("{first}–{last}"),
        suggested_separator,
        fields: run.into_iter().map(|(_, name)| name).collect(),
    })
}
