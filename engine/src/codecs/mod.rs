//! Codecs between structured field values and flat placeholder values.
//!
//! - `digit` / `digit_input`: fixed-pattern character blocks.
//! - `merged`: one value spread over several placeholders.
//! - `radio`: one selection expanded over an option group.

pub mod digit;
pub mod digit_input;
pub mod merged;
pub mod radio;
