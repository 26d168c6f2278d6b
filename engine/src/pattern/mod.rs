//! Pattern rule compiler.
//!
//! Editors describe how a rule recognises placeholder names with a small
//! structured form (match type, comma-separated values, case sensitivity).
//! This module turns that form into the regex that is actually stored on
//! the rule, reconstructs the form from a stored regex when a rule is
//! reopened, and evaluates stored rules against placeholder names.
//!
//! The round trip is deliberately lossy: grouped alternatives come back in
//! raw regex mode instead of as a comma-separated list. [`build`] is the
//! source of truth for what gets persisted.

mod builder;
mod classify;
mod parser;

pub use builder::{build, CASE_INSENSITIVE_FLAG};
pub use classify::{validate_pattern, Classification, RuleClassifier};
pub use parser::parse;
