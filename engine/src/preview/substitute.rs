use common::model::FormData;
use log::warn;
use once_cell::sync::Lazy;
use regex::{Captures, NoExpand, Regex, RegexBuilder};

use super::helpers::escape_html;
use crate::config::RenderConfig;

static ANY_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^{}]*)\}\}").expect("valid template token regex"));

/// How one field's values are wrapped when substituted.
pub(crate) struct Highlight<'a> {
    /// Key of the field the value belongs to (the primary key for groups).
    pub field: &'a str,
    pub active: bool,
    pub color: &'a str,
}

/// Replaces every `{{key}}` token, in any letter case, with `value`.
///
/// A non-empty value is HTML-escaped and, for the active field, wrapped in
/// the highlight span. An empty value becomes the empty marker for the
/// active field and disappears otherwise.
pub(crate) fn substitute_token(
    html: &str,
    key: &str,
    value: &str,
    highlight: &Highlight<'_>,
    config: &RenderConfig,
) -> String {
    let token = regex::escape(&format!("{{{{{key}}}}}"));
    let re = match RegexBuilder::new(&token).case_insensitive(true).build() {
        Ok(re) => re,
        Err(e) => {
            warn!("cannot build token matcher for {key:?}: {e}");
            return html.to_string();
        }
    };
    if !re.is_match(html) {
        return html.to_string();
    }
    let replacement = render_value(value, highlight, config);
    re.replace_all(html, NoExpand(&replacement)).into_owned()
}

fn render_value(value: &str, highlight: &Highlight<'_>, config: &RenderConfig) -> String {
    let shown = if value.is_empty() {
        if !highlight.active {
            return String::new();
        }
        escape_html(&config.empty_marker)
    } else {
        escape_html(value)
    };
    if highlight.active {
        format!(
            r#"<span class="field-highlight" data-field="{}" style="{}">{}</span>"#,
            escape_html(highlight.field),
            escape_html(&config.highlight_style_for(highlight.color)),
            shown
        )
    } else {
        shown
    }
}

/// Final pass over tokens no field definition resolved.
///
/// The trimmed token name is looked up in `form_data`, exact case first,
/// then case-insensitively; unmatched tokens are removed.
pub(crate) fn resolve_remaining_tokens(html: &str, form_data: &FormData) -> String {
    ANY_TOKEN
        .replace_all(html, |caps: &Captures<'_>| {
            let name = caps[1].trim();
            lookup_case_insensitive(form_data, name)
                .map(escape_html)
                .unwrap_or_default()
        })
        .into_owned()
}

fn lookup_case_insensitive<'a>(form_data: &'a FormData, name: &str) -> Option<&'a str> {
    if let Some(value) = form_data.get(name) {
        return Some(value);
    }
    let wanted = name.to_lowercase();
    form_data
        .iter()
        .find(|(key, _)| key.to_lowercase() == wanted)
        .map(|(_, value)| value.as_str())
}
