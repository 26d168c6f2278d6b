use serde::Deserialize;

use crate::model::{ColorAssignment, FieldMap, FormData};

/// Everything the preview renderer needs for one render.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub template: String,
    #[serde(default)]
    pub form_data: FormData,
    #[serde(default)]
    pub fields: FieldMap,
    #[serde(default)]
    pub active_field: Option<String>,
    /// Explicit colours; when absent they are assigned from the palette.
    #[serde(default)]
    pub colors: Option<ColorAssignment>,
}

/// Structured values to flatten into the document generator payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    #[serde(default)]
    pub form_data: FormData,
    #[serde(default)]
    pub fields: FieldMap,
}
