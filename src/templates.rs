//! HTML templates for the single-page UI.
//!
//! Templates live under `templates/` and are filled in with a small
//! `{{key}}` placeholder substitution. Anything user- or model-provided
//! must go through [`escape`] before substitution.

pub const PAGE: &str = include_str!("../templates/page.html");
pub const RESULT_IMAGE: &str = include_str!("../templates/result_image.html");
pub const RESULT_TEXT: &str = include_str!("../templates/result_text.html");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Escape a string for interpolation into HTML text content or attributes.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
