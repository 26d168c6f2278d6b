//! Data contracts shared by the form engine and its consumers.
//!
//! - `model`: field definitions, codec descriptors, rules and the ordered maps
//!   the engine passes around.
//! - `requests`: JSON payloads accepted by the preview harness.

pub mod model;
pub mod requests;
