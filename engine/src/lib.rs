//! Form engine: structured fields over flat document placeholders.
//!
//! A document template carries `{{placeholder}}` tokens. This crate maps
//! the fields a user fills (digit blocks, merged composites, radio groups,
//! dates, locations) onto those placeholders and back:
//!
//! - [`codecs`]: encode/decode between structured values and placeholder values.
//! - [`pattern`]: the "match a field name" rule language and the classifier.
//! - [`detection`]: proposes numbered placeholder runs as merge candidates.
//! - [`preview`]: live HTML preview with the focused field highlighted.
//! - [`submission`]: the flat payload handed to the document generator.
//! - [`validation`]: per-field constraints.
//! - [`session`]: authoring and filling state built on the above.
//!
//! Everything except the sessions is a pure function of its arguments.

pub mod codecs;
pub mod config;
pub mod detection;
pub mod display;
pub mod error;
pub mod pattern;
pub mod preview;
pub mod session;
pub mod submission;
pub mod validation;

pub use config::RenderConfig;
pub use error::{EngineError, Result};
pub use preview::{render_preview, PreviewInput};
pub use session::{FormEditor, FormFill};
pub use submission::build_submission;
