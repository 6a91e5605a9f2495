use crate::error::{DocError, DocResult};
use regex::Regex;
use std::sync::OnceLock;

/// Slice between the first `<body ...>` and the first `</body>` after it.
pub fn extract_body(html: &str) -> DocResult<&str> {
    static BODY_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = BODY_REGEX.get_or_init(|| Regex::new(r"(?is)<body(?:\s[^>]*)?>(.*?)</body\s*>").unwrap());

    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(DocError::MissingBody)
}
