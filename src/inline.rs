use crate::stylesheet::ColorMap;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

/// Inline tags that survive into block markup; the renderer understands these natively.
pub const ALLOWED_INLINE_TAGS: &[&str] = &["font", "b", "i", "u", "br", "a"];

/// Rewrite classed spans into `<font color>` using the document's class colors.
///
/// A span takes the color of the first class in its list that has one; a span with no
/// colored class loses its markers and keeps its content. A match runs from an opening
/// span to the first `</span>` after it, so an outer span swallows an inner span's
/// closing tag. The inner opening tag is then left paired with the outer `</span>`,
/// and the next pass rewrites that pair, which restores the nesting. Passes stop once
/// nothing changes or after `max_passes`; whatever is left stays as written.
pub fn apply_class_colors(text: &str, colors: &ColorMap, max_passes: usize) -> String {
    static SPAN_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = SPAN_REGEX.get_or_init(|| {
        Regex::new(r#"(?is)<span\s+class\s*=\s*"([^"]*)"[^>]*>(.*?)</span\s*>"#).unwrap()
    });

    let mut current = text.to_string();
    for _ in 0..max_passes {
        let next = match re.replace_all(&current, |caps: &Captures| {
            match colors.first_class_color(&caps[1]) {
                Some(color) => format!(r#"<font color="{}">{}</font>"#, color, &caps[2]),
                None => caps[2].to_string(),
            }
        }) {
            Cow::Borrowed(_) => break,
            Cow::Owned(next) => next,
        };
        current = next;
    }
    current
}

/// Drop every tag not in [`ALLOWED_INLINE_TAGS`] (markers only, content stays), then
/// collapse whitespace runs and trim.
pub fn filter_inline_tags(text: &str) -> String {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();
    let tag_re =
        TAG_REGEX.get_or_init(|| Regex::new(r"</?([a-zA-Z][a-zA-Z0-9]*)\b[^>]*>").unwrap());
    let ws_re = WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").unwrap());

    let filtered = tag_re.replace_all(text, |caps: &Captures| {
        let name = caps[1].to_ascii_lowercase();
        if ALLOWED_INLINE_TAGS.contains(&name.as_str()) {
            caps[0].to_string()
        } else {
            String::new()
        }
    });

    ws_re.replace_all(&filtered, " ").trim().to_string()
}
