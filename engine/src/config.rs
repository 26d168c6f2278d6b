//! Render configuration.
//!
//! Defaults reproduce the editor's built-in look; the preview harness can
//! override any of them from a JSON file.

use serde::{Deserialize, Serialize};

/// Placeholder shown for the focused field while it is still empty.
pub const EMPTY_ACTIVE_MARKER: &str = "___";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    /// Shown in place of an empty value of the active field.
    pub empty_marker: String,
    /// Used when the colour assignment has no entry for the active field.
    pub default_color: String,
    /// Inline style of the highlight wrapper; `{color}` is replaced by the field colour.
    pub highlight_style: String,
    /// Colours handed out to visible fields in display order.
    pub palette: Vec<String>,
}

impl RenderConfig {
    pub fn highlight_style_for(&self, color: &str) -> String {
        self.highlight_style.replace("{color}", color)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            empty_marker: EMPTY_ACTIVE_MARKER.to_string(),
            default_color: "#fde68a".to_string(),
            highlight_style:
                "background-color: {color}; border-radius: 2px; padding: 0 2px;".to_string(),
            palette: [
                "#fde68a", "#bfdbfe", "#bbf7d0", "#fecaca", "#ddd6fe", "#fbcfe8", "#a5f3fc",
                "#fed7aa",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config: RenderConfig = serde_json::from_str(r#"{"emptyMarker":"..."}"#).unwrap();
        assert_eq!(config.empty_marker, "...");
        assert_eq!(config.palette.len(), 8);
        assert_eq!(
            config.highlight_style_for("red"),
            "background-color: red; border-radius: 2px; padding: 0 2px;"
        );
    }
}
