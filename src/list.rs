use crate::scanner::RawElement;
use serde::{Deserialize, Serialize};

pub const BULLET: &str = "\u{2022}";

/// Prefix of a list item: a bullet, or an ordinal with its number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMarker {
    pub label: String,
    /// 0 for bullets
    pub ordinal: usize,
}

impl ListMarker {
    pub fn bullet() -> Self {
        ListMarker {
            label: BULLET.to_string(),
            ordinal: 0,
        }
    }

    pub fn ordinal(n: usize) -> Self {
        ListMarker {
            label: format!("{}.", n),
            ordinal: n,
        }
    }

    pub fn is_bullet(&self) -> bool {
        self.ordinal == 0
    }
}

/// Marker for the list item at `index`, found by walking back from `index - 1` to the
/// nearest `ul` or `ol`.
///
/// Only elements before `index` are consulted. An `ol` numbers its items by counting
/// the `li` elements between it and `index` (inclusive), starting from its `start`
/// attribute when present. No enclosing container means a bullet. One nesting level.
pub fn list_marker(elements: &[RawElement], index: usize) -> ListMarker {
    let mut items = 1;

    for element in elements[..index.min(elements.len())].iter().rev() {
        match element.tag.as_str() {
            "ul" => return ListMarker::bullet(),
            "ol" => {
                let start = element
                    .attribute("start")
                    .and_then(|s| s.trim().parse::<usize>().ok())
                    .filter(|&s| s > 0)
                    .unwrap_or(1);
                return ListMarker::ordinal(start.saturating_add(items - 1));
            }
            "li" => items += 1,
            _ => {}
        }
    }

    ListMarker::bullet()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan;

    #[test]
    fn unordered_items_get_bullets() {
        let elements = scan("<ul><li>a</li><li>b</li></ul>");
        assert_eq!(list_marker(&elements, 1), ListMarker::bullet());
        assert_eq!(list_marker(&elements, 2).label, "\u{2022}");
    }

    #[test]
    fn ordered_items_count_up() {
        let elements = scan("<ol><li>a</li><li>b</li><li>c</li></ol>");
        assert_eq!(list_marker(&elements, 1), ListMarker::ordinal(1));
        assert_eq!(list_marker(&elements, 2), ListMarker::ordinal(2));
        assert_eq!(list_marker(&elements, 3).label, "3.");
    }

    #[test]
    fn images_inside_items_do_not_shift_numbering() {
        let elements = scan(r#"<ol><li><img src="x.png">a</li><li>b</li></ol>"#);
        let tags: Vec<_> = elements.iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["ol", "li", "img", "li"]);
        assert_eq!(list_marker(&elements, 3), ListMarker::ordinal(2));
    }

    #[test]
    fn start_attribute_offsets_ordinals() {
        let elements = scan(r#"<ol start="4"><li>d</li><li>e</li></ol>"#);
        assert_eq!(list_marker(&elements, 1), ListMarker::ordinal(4));
        assert_eq!(list_marker(&elements, 2), ListMarker::ordinal(5));
    }

    #[test]
    fn huge_start_saturates() {
        let elements = scan(r#"<ol start="18446744073709551615"><li>a</li><li>b</li></ol>"#);
        assert_eq!(list_marker(&elements, 1), ListMarker::ordinal(usize::MAX));
        assert_eq!(list_marker(&elements, 2), ListMarker::ordinal(usize::MAX));
    }

    #[test]
    fn nearest_container_wins() {
        let elements = scan("<ol><li>1</li></ol><ul><li>x</li></ul>");
        assert_eq!(list_marker(&elements, 1), ListMarker::ordinal(1));
        assert_eq!(list_marker(&elements, 3), ListMarker::bullet());
    }

    #[test]
    fn orphan_item_defaults_to_bullet() {
        let elements = scan("<p>intro</p><li>stray</li>");
        assert!(list_marker(&elements, 1).is_bullet());
        assert!(list_marker(&elements, 0).is_bullet());
    }

    #[test]
    fn never_looks_ahead() {
        let elements = scan("<li>first</li><ol><li>second</li></ol>");
        assert!(list_marker(&elements, 0).is_bullet());
    }
}
