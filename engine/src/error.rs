//! Error types for the form engine.
//!
//! Only the operations that can genuinely refuse an input return these: the
//! pattern validator and the authoring session. Codecs and the preview
//! renderer degrade instead of failing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A pattern with no alternatives is an unfinished rule, not a match-all.
    #[error("pattern is empty")]
    EmptyPattern,
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("a group needs at least two placeholders, got {0}")]
    GroupTooSmall(usize),
    #[error("placeholder {placeholder} already belongs to group {group}")]
    AlreadyGrouped { placeholder: String, group: String },
    #[error("field {0} is not a merged field or radio group")]
    NotAGroup(String),
    #[error("field {key} is not a {expected} field")]
    WrongKind { key: String, expected: &'static str },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
