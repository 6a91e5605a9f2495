use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Text colors declared by the document's `<style>` blocks.
///
/// Built once per document by [`resolve`] and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorMap {
    /// Lowercased tag selector → color
    pub tag_colors: HashMap<String, String>,
    /// Lowercased class name (no leading dot) → color
    pub class_colors: HashMap<String, String>,
}

impl ColorMap {
    pub fn tag_color(&self, tag: &str) -> Option<&str> {
        self.tag_colors
            .get(&tag.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn class_color(&self, class: &str) -> Option<&str> {
        self.class_colors
            .get(&class.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Color of the first class in `class_list` (space separated, declaration order)
    /// that has one. First match wins, not last.
    pub fn first_class_color(&self, class_list: &str) -> Option<&str> {
        class_list
            .split_whitespace()
            .find_map(|class| self.class_color(class))
    }

    pub fn is_empty(&self) -> bool {
        self.tag_colors.is_empty() && self.class_colors.is_empty()
    }
}

/// Collect `selector { color: #hex }` rules from every `<style>` region of `html`.
///
/// Other properties are ignored. Selectors starting with `.` land in the class map,
/// everything else in the tag map. Later rules overwrite earlier ones per key.
pub fn resolve(html: &str) -> ColorMap {
    static STYLE_BLOCK_REGEX: OnceLock<Regex> = OnceLock::new();
    static RULE_REGEX: OnceLock<Regex> = OnceLock::new();

    let style_re =
        STYLE_BLOCK_REGEX.get_or_init(|| Regex::new(r"(?is)<style[^>]*>(.*?)</style\s*>").unwrap());
    let rule_re = RULE_REGEX.get_or_init(|| Regex::new(r"([^{}]+)\{([^{}]*)\}").unwrap());

    let mut colors = ColorMap::default();

    for block in style_re.captures_iter(html) {
        for rule in rule_re.captures_iter(&block[1]) {
            let Some(color) = declared_color(&rule[2]) else {
                continue;
            };
            // At-rules like `@import url(...);` run straight into the next selector.
            let selector_text = rule[1].rsplit(';').next().unwrap_or_default();

            for selector in selector_text.split(',') {
                let selector = selector.trim();
                if selector.is_empty() {
                    continue;
                }
                if let Some(class) = selector.strip_prefix('.') {
                    colors
                        .class_colors
                        .insert(class.to_ascii_lowercase(), color.to_string());
                } else {
                    colors
                        .tag_colors
                        .insert(selector.to_ascii_lowercase(), color.to_string());
                }
            }
        }
    }

    log::debug!(
        "stylesheet: {} tag colors, {} class colors",
        colors.tag_colors.len(),
        colors.class_colors.len()
    );
    colors
}

/// The last `color: #hex` declaration in a rule body. `background-color` does not count.
fn declared_color(declarations: &str) -> Option<&str> {
    static COLOR_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = COLOR_REGEX
        .get_or_init(|| Regex::new(r"(?i)(?:^|[;\s])color\s*:\s*(#[0-9a-f]{3,8})\b").unwrap());

    re.captures_iter(declarations)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_tag_and_class_rules() {
        let html = r#"<html><head><style type="text/css">
            .C1{color:#FF0000;font-weight:700}
            p{margin:0;color:#111111}
            h2{font-size:16pt}
        </style></head><body></body></html>"#;
        let colors = resolve(html);

        assert_eq!(colors.class_color("c1"), Some("#FF0000"));
        assert_eq!(colors.tag_color("p"), Some("#111111"));
        assert_eq!(colors.tag_color("h2"), None);
    }

    #[test]
    fn background_color_is_not_color() {
        let html = "<style>.hl{background-color:#ffff00}.t{background-color:#000000;color:#333333}</style>";
        let colors = resolve(html);

        assert_eq!(colors.class_color("hl"), None);
        assert_eq!(colors.class_color("t"), Some("#333333"));
    }

    #[test]
    fn last_rule_wins_and_blocks_accumulate() {
        let html = "<style>.a{color:#000001}</style><style>.a{color:#000002} li{color:#abc}</style>";
        let colors = resolve(html);

        assert_eq!(colors.class_color("a"), Some("#000002"));
        assert_eq!(colors.tag_color("LI"), Some("#abc"));
    }

    #[test]
    fn selector_lists_and_import_prefix() {
        let html = r#"<style>@import url('https://fonts.example/css?family=Roboto');.x, .y{color:#123456}</style>"#;
        let colors = resolve(html);

        assert_eq!(colors.class_color("x"), Some("#123456"));
        assert_eq!(colors.class_color("y"), Some("#123456"));
        assert!(colors.tag_colors.is_empty());
    }

    #[test]
    fn no_style_block_gives_empty_maps() {
        let colors = resolve("<body><p>hi</p></body>");
        assert!(colors.is_empty());
    }

    #[test]
    fn first_class_in_declaration_order_wins() {
        let colors = resolve("<style>.b{color:#00000b}.a{color:#00000a}</style>");
        assert_eq!(colors.first_class_color("z a b"), Some("#00000a"));
        assert_eq!(colors.first_class_color("z"), None);
    }
}
