/// Literal entity substitutions, applied in order. `&lspquo;` is a misspelling the
/// exporter actually emits.
const ENTITY_TABLE: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lsquo;", "\u{2018}"),
    ("&lspquo;", "\u{2018}"),
    ("&rsquo;", "\u{2019}"),
    ("&ldquo;", "\u{201C}"),
    ("&rdquo;", "\u{201D}"),
    ("&hellip;", "\u{2026}"),
];

/// Replace the known entities with plain characters. Anything else, `&amp;` included,
/// passes through untouched.
pub fn normalize(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITY_TABLE
        .iter()
        .fold(text.to_string(), |acc, (entity, plain)| acc.replace(entity, plain))
}
