//! Digit format codec.
//!
//! A digit format is a compact pattern such as `"XX-X-XXX"` (license plate) or
//! `"AA-XXXX"`: `X`/`x` is a digit cell, `A`/`a` a letter cell, `*` a cell that
//! takes any character, and every other character is literal separator text.
//! The format is parsed once into [`DigitSegment`]s; values then move between
//! the flat stored string and one string per input segment.

use common::model::digit::{CharType, DigitSegment};
use log::{debug, warn};
use regex::Regex;

/// Parses a digit format into its ordered segments.
///
/// Consecutive characters of the same class accumulate into one segment and
/// a change of class flushes it. The empty format yields no segments; a
/// format without any cell characters yields a single separator.
pub fn parse_format(format: &str) -> Vec<DigitSegment> {
    let mut segments = Vec::new();
    let mut current: Option<DigitSegment> = None;

    for ch in format.chars() {
        match (cell_class(ch), current.as_mut()) {
            (Some(class), Some(DigitSegment::Input { char_type, length })) if *char_type == class => {
                *length += 1;
            }
            (None, Some(DigitSegment::Separator { text })) => text.push(ch),
            (class, _) => {
                segments.extend(current.take());
                current = Some(match class {
                    Some(char_type) => DigitSegment::Input {
                        char_type,
                        length: 1,
                    },
                    None => DigitSegment::Separator {
                        text: ch.to_string(),
                    },
                });
            }
        }
    }
    segments.extend(current);
    segments
}

fn cell_class(ch: char) -> Option<CharType> {
    match ch {
        'X' | 'x' => Some(CharType::Digit),
        'A' | 'a' => Some(CharType::Letter),
        '*' => Some(CharType::Any),
        _ => None,
    }
}

/// Total number of input cells across all segments.
pub fn cell_count(segments: &[DigitSegment]) -> usize {
    segments
        .iter()
        .filter(|s| s.is_input())
        .map(DigitSegment::length)
        .sum()
}

/// Splits a stored value into one string per input segment.
///
/// A value that reproduces the format's separators is captured structurally,
/// keeping exactly what the user typed in each part. Anything else (digits
/// pasted without separators, stray punctuation) is reduced to its
/// alphanumeric characters and sliced into consecutive runs of each
/// segment's length.
///
/// Always returns one entry per input segment; entries may be shorter than
/// their segment.
pub fn decode(value: &str, segments: &[DigitSegment]) -> Vec<String> {
    if !segments.iter().any(DigitSegment::is_input) {
        return Vec::new();
    }
    match decode_structural(value, segments) {
        Some(parts) => parts,
        None => {
            debug!("digit value {value:?} does not follow its format, slicing");
            decode_by_slicing(value, segments)
        }
    }
}

fn decode_structural(value: &str, segments: &[DigitSegment]) -> Option<Vec<String>> {
    let pattern = structural_pattern(segments);
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            warn!("digit format produced an invalid pattern {pattern:?}: {e}");
            return None;
        }
    };
    let caps = re.captures(value)?;
    Some(
        caps.iter()
            .skip(1)
            .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
            .collect(),
    )
}

fn structural_pattern(segments: &[DigitSegment]) -> String {
    let mut pattern = String::from("^");
    for segment in segments {
        match segment {
            DigitSegment::Input { char_type, length } => {
                let class = match char_type {
                    CharType::Digit => "[0-9]",
                    CharType::Letter => "[A-Za-z]",
                    CharType::Any => ".",
                };
                pattern.push_str(&format!("({class}{{0,{length}}})"));
            }
            DigitSegment::Separator { text } => pattern.push_str(&regex::escape(text)),
        }
    }
    pattern.push('$');
    pattern
}

fn decode_by_slicing(value: &str, segments: &[DigitSegment]) -> Vec<String> {
    let mut chars = value.chars().filter(|c| c.is_alphanumeric());
    segments
        .iter()
        .filter_map(|segment| match segment {
            DigitSegment::Input { length, .. } => Some(chars.by_ref().take(*length).collect()),
            DigitSegment::Separator { .. } => None,
        })
        .collect()
}

/// Joins per-segment values back into the stored string, inserting each
/// separator's literal text between and around them.
///
/// Values are emitted as-is (no padding). Missing values count as empty,
/// and when every value is empty the result is the empty string so an
/// untouched block never stores bare separators.
pub fn encode<S: AsRef<str>>(values: &[S], segments: &[DigitSegment]) -> String {
    if values.iter().all(|v| v.as_ref().is_empty()) {
        return String::new();
    }
    let mut out = String::new();
    let mut inputs = values.iter().map(AsRef::as_ref);
    for segment in segments {
        match segment {
            DigitSegment::Input { .. } => out.push_str(inputs.next().unwrap_or("")),
            DigitSegment::Separator { text } => out.push_str(text),
        }
    }
    out
}

/// Re-formats a raw value through its format: decode, then encode.
pub fn normalize(value: &str, format: &str) -> String {
    let segments = parse_format(format);
    encode(&decode(value, &segments), &segments)
}
