//! String helpers for the preview pipeline.

use once_cell::sync::Lazy;
use regex::Regex;

static OPEN_BRACE_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)&(?:#123|#x7b|lbrace);").expect("valid open brace entity regex"));

static CLOSE_BRACE_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)&(?:#125|#x7d|rbrace);").expect("valid close brace entity regex"));

/// Encodes a user value for insertion into the preview markup.
///
/// Markup characters become entities, and so do `{` and `}`: later token
/// passes run over the partially rendered document and must never see a
/// `{{key}}` that came from a value.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(c),
        }
    }
    out
}

/// Turns entity-encoded braces back into `{` and `}` so double-encoded
/// source documents still expose their `{{key}}` tokens.
pub fn normalize_brace_entities(template: &str) -> String {
    if !template.contains('&') {
        return template.to_string();
    }
    let opened = OPEN_BRACE_ENTITY.replace_all(template, "{");
    CLOSE_BRACE_ENTITY.replace_all(&opened, "}").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"A" & 'B'</b>"#),
            "&lt;b&gt;&quot;A&quot; &amp; &#39;B&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn braces_in_values_are_encoded() {
        assert_eq!(escape_html("{{id}}"), "&#123;&#123;id&#125;&#125;");
        assert_eq!(escape_html("a{b"), "a&#123;b");
    }

    #[test]
    fn decodes_every_brace_entity_spelling() {
        assert_eq!(
            normalize_brace_entities("&#123;&#123;$1&#125;&#125; &#X7B;&#x7b;a&RBRACE;&rbrace;"),
            "{{$1}} {{a}}"
        );
        assert_eq!(normalize_brace_entities("a &amp; b"), "a &amp; b");
    }
}
