use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static LI_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<li[^>]*>(.*?)</li>").unwrap());

/// One candidate pattern for a field.
pub type Extractor<T> = fn(&str) -> Option<T>;

/// Try `extractors` in order; the first hit wins.
pub fn first_match<T>(html: &str, extractors: &[Extractor<T>]) -> Option<T> {
    extractors.iter().find_map(|f| f(html))
}

/// First capture group of `re`, trimmed, if non-empty.
pub fn capture(re: &Regex, html: &str) -> Option<String> {
    let caps = re.captures(html)?;
    let text = caps.get(1)?.as_str().trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

pub fn strip_tags(s: &str) -> String {
    TAG_RE.replace_all(s, "").to_string()
}

pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of every `<li>` in `block`, markup stripped; blank items dropped.
pub fn list_items(block: &str) -> Vec<String> {
    LI_RE
        .captures_iter(block)
        .map(|c| strip_tags(&c[1]).trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
