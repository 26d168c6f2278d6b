//! Stateful wrappers around the pure codecs.
//!
//! - [`FormEditor`]: a form author turning raw placeholders into structured
//!   fields, with undo/redo and unsaved-change tracking.
//! - [`FormFill`]: one user filling a form, with focus tracking, preview
//!   and submission.

pub mod authoring;
pub mod fill;

pub use authoring::FormEditor;
pub use fill::FormFill;

/// Hex md5 digest, used to tell whether state differs from what was saved.
pub(crate) fn compute_md5(input: &str) -> String {
    format!("{:x}", md5::compute(input))
}
