//! Flat element scanning over the `<body>` slice.
//!
//! Three independent passes (blocks, images, dividers) each record the byte offset at
//! which their match starts. Merging the passes and sorting by that offset restores
//! source order, which downstream treats as layout order.
//!
//! Matching is non-recursive: a block ends at the nearest closing tag of the same
//! name, so `<div><div>x</div></div>` yields an outer `div` whose content is `<div>x`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Tags whose children are scanned as elements of their own.
pub const LIST_CONTAINER_TAGS: &[&str] = &["ul", "ol"];

/// One element as found in the source, before any styling is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawElement {
    /// Lowercased tag name
    pub tag: String,
    /// Unparsed attribute text of the opening tag
    pub attributes: String,
    /// Everything between the opening and the closing tag
    pub content: String,
    /// Byte offset of the opening `<` within the body slice
    pub source_offset: usize,
    /// `src` of an `img`, empty when the attribute is missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

impl RawElement {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        attribute(&self.attributes, name)
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute("id").filter(|id| !id.is_empty())
    }

    /// Raw `class` attribute value, empty if absent
    pub fn class_list(&self) -> &str {
        self.attribute("class").unwrap_or("")
    }

    pub fn is_list_container(&self) -> bool {
        LIST_CONTAINER_TAGS.contains(&self.tag.as_str())
    }
}

/// Run all three scans and merge them into source order.
pub fn scan(body: &str) -> Vec<RawElement> {
    let mut elements = scan_blocks(body);
    let blocks = elements.len();
    elements.extend(scan_images(body));
    let images = elements.len() - blocks;
    elements.extend(scan_dividers(body));
    let dividers = elements.len() - blocks - images;

    // Stable: equal offsets keep scan order.
    elements.sort_by_key(|e| e.source_offset);

    log::debug!(
        "scanner: {} blocks, {} images, {} dividers",
        blocks,
        images,
        dividers
    );
    elements
}

/// Generic `<tag attrs>content</tag>` scan. `img` is left to [`scan_images`], opening
/// tags without a matching close are skipped.
pub fn scan_blocks(body: &str) -> Vec<RawElement> {
    static OPEN_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    let open_re =
        OPEN_TAG_REGEX.get_or_init(|| Regex::new(r"<([a-zA-Z][a-zA-Z0-9]*)(\s[^>]*)?>").unwrap());

    // ASCII lowercasing keeps byte offsets and char boundaries identical to `body`.
    let lower = body.to_ascii_lowercase();
    let mut elements = Vec::new();
    let mut pos = 0;

    while let Some(caps) = open_re.captures_at(body, pos) {
        let Some(open) = caps.get(0) else {
            break;
        };
        let tag = caps[1].to_ascii_lowercase();

        if tag == "img" {
            pos = open.end();
            continue;
        }

        match find_closing_tag(&lower, open.end(), &tag) {
            Some((close_start, close_end)) => {
                let element = RawElement {
                    attributes: caps
                        .get(2)
                        .map(|m| m.as_str().trim().trim_end_matches('/').trim_end())
                        .unwrap_or_default()
                        .to_string(),
                    content: body[open.end()..close_start].to_string(),
                    source_offset: open.start(),
                    src: None,
                    tag,
                };
                pos = if element.is_list_container() {
                    open.end()
                } else {
                    close_end
                };
                elements.push(element);
            }
            None => pos = open.end(),
        }
    }

    elements
}

/// `<img ...>` and `<img .../>`.
pub fn scan_images(body: &str) -> Vec<RawElement> {
    static IMG_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = IMG_REGEX.get_or_init(|| Regex::new(r"(?i)<img\b([^>]*?)\s*/?>").unwrap());

    re.captures_iter(body)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let attributes = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
            Some(RawElement {
                tag: "img".to_string(),
                attributes: attributes.to_string(),
                content: String::new(),
                source_offset: whole.start(),
                // Only `&amp;` shows up in exported URLs; the renderer needs the real one.
                src: Some(attribute(attributes, "src").unwrap_or_default().replace("&amp;", "&")),
            })
        })
        .collect()
}

/// Bare `<hr>` / `<hr/>` with optional whitespace.
pub fn scan_dividers(body: &str) -> Vec<RawElement> {
    static HR_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = HR_REGEX.get_or_init(|| Regex::new(r"(?i)<hr\s*/?\s*>").unwrap());

    re.find_iter(body)
        .map(|m| RawElement {
            tag: "hr".to_string(),
            attributes: String::new(),
            content: String::new(),
            source_offset: m.start(),
            src: None,
        })
        .collect()
}

/// Nearest `</tag>` at or after `from`, as `(start, end)` byte offsets. `lower` must be
/// the lowercased body.
fn find_closing_tag(lower: &str, from: usize, tag: &str) -> Option<(usize, usize)> {
    let needle = format!("</{}", tag);
    let bytes = lower.as_bytes();
    let mut search = from;

    while let Some(rel) = lower[search..].find(&needle) {
        let start = search + rel;
        let mut j = start + needle.len();
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        // `</b` must not match `</br>` or `</body>`
        if j < bytes.len() && bytes[j] == b'>' {
            return Some((start, j + 1));
        }
        search = start + needle.len();
    }
    None
}

/// Value of attribute `name` in unparsed attribute text.
///
/// Accepts double quotes, single quotes and bare values. The name must start the text
/// or follow whitespace, so `data-id` never answers for `id`.
pub fn attribute<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    let bytes = attrs.as_bytes();
    let len = bytes.len();
    let name_len = name.len();
    let mut i = 0;

    while i + name_len <= len {
        // Quoted values belong to some other attribute; `title="id=x"` declares no id.
        if bytes[i] == b'"' || bytes[i] == b'\'' {
            let quote = bytes[i];
            i += 1;
            while i < len && bytes[i] != quote {
                i += 1;
            }
            i += 1;
            continue;
        }
        let at_boundary = i == 0 || bytes[i - 1].is_ascii_whitespace();
        if at_boundary && bytes[i..i + name_len].eq_ignore_ascii_case(name.as_bytes()) {
            let mut j = i + name_len;
            while j < len && bytes[j] == b' ' {
                j += 1;
            }
            if j < len && bytes[j] == b'=' {
                j += 1;
                while j < len && bytes[j] == b' ' {
                    j += 1;
                }
                if j < len && (bytes[j] == b'"' || bytes[j] == b'\'') {
                    let quote = bytes[j];
                    let start = j + 1;
                    let mut end = start;
                    while end < len && bytes[end] != quote {
                        end += 1;
                    }
                    return Some(&attrs[start..end]);
                }
                let start = j;
                let mut end = start;
                while end < len && !bytes[end].is_ascii_whitespace() && bytes[end] != b'/' {
                    end += 1;
                }
                return Some(&attrs[start..end]);
            }
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(elements: &[RawElement]) -> Vec<&str> {
        elements.iter().map(|e| e.tag.as_str()).collect()
    }

    #[test]
    fn merges_scans_in_source_order() {
        let body = r#"<h1 id="t">Title</h1><hr/><p>one</p><img src="a.png"><p>two</p><hr>"#;
        let elements = scan(body);

        assert_eq!(tags(&elements), vec!["h1", "hr", "p", "img", "p", "hr"]);
        assert!(elements
            .windows(2)
            .all(|w| w[0].source_offset < w[1].source_offset));
        assert_eq!(elements[3].src.as_deref(), Some("a.png"));
    }

    #[test]
    fn block_scan_is_case_insensitive_and_keeps_content() {
        let elements = scan_blocks(r#"<P class="c1">Hello <b>world</b></P>"#);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].tag, "p");
        assert_eq!(elements[0].attributes, r#"class="c1""#);
        assert_eq!(elements[0].content, "Hello <b>world</b>");
        assert_eq!(elements[0].source_offset, 0);
    }

    #[test]
    fn list_containers_expose_their_items() {
        let elements = scan_blocks("<ol><li>a</li><li>b</li></ol><p>after</p>");
        assert_eq!(tags(&elements), vec!["ol", "li", "li", "p"]);
        assert_eq!(elements[1].content, "a");
        assert_eq!(elements[2].content, "b");
    }

    #[test]
    fn same_tag_nesting_ends_at_nearest_close() {
        let elements = scan_blocks("<div><div>x</div></div>");
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].content, "<div>x");
    }

    #[test]
    fn unclosed_tags_are_skipped() {
        let elements = scan_blocks("<br><p>kept</p><span>dangling");
        assert_eq!(tags(&elements), vec!["p"]);
    }

    #[test]
    fn short_tag_does_not_close_on_longer_name() {
        let elements = scan_blocks("<b>bold<br></b>");
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].content, "bold<br>");
    }

    #[test]
    fn images_without_src_default_to_empty() {
        let elements = scan_images(r#"<img alt="x"/><IMG SRC='b.png' />"#);
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].src.as_deref(), Some(""));
        assert_eq!(elements[1].src.as_deref(), Some("b.png"));
    }

    #[test]
    fn dividers_accept_whitespace_variants() {
        assert_eq!(scan_dividers("<hr><hr/><hr />< hr><HR  >").len(), 4);
        assert!(scan_dividers(r#"<hr style="page-break-before:always">"#).is_empty());
    }

    #[test]
    fn attribute_lookup() {
        let attrs = r#"data-id="no" id="sec1" class='c1 c2' width=120"#;
        assert_eq!(attribute(attrs, "id"), Some("sec1"));
        assert_eq!(attribute(attrs, "class"), Some("c1 c2"));
        assert_eq!(attribute(attrs, "width"), Some("120"));
        assert_eq!(attribute(attrs, "height"), None);
    }

    #[test]
    fn attribute_text_inside_quoted_values_is_ignored() {
        assert_eq!(attribute(r#"title="see id=bogus""#, "id"), None);
        assert_eq!(attribute(r#"alt='class="x"' class="real""#, "class"), Some("real"));
        assert_eq!(attribute(r#"title="a width=9" width="40""#, "width"), Some("40"));
    }

    #[test]
    fn image_src_ampersands_are_decoded() {
        let elements = scan_images(r#"<img src="https://x/a?w=1&amp;h=2">"#);
        assert_eq!(elements[0].src.as_deref(), Some("https://x/a?w=1&h=2"));
    }
}
