use std::sync::LazyLock;

use regex::Regex;

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static WHITESPACE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip markup tags, collapse whitespace runs to one space and trim.
///
/// `None` is treated as the empty string.
pub fn clean_markup(raw: Option<&str>) -> String {
    let text = raw.unwrap_or("");
    let without_tags = TAG_PATTERN.replace_all(text, "");
    let collapsed = WHITESPACE_PATTERN.replace_all(&without_tags, " ");
    collapsed.trim().to_string()
}
