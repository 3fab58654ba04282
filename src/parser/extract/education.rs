use std::sync::LazyLock;

use regex::Regex;

use crate::parser::patterns::{capture, first_match};

static STRONG_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Typical education:?</strong>\s*([^<]+)<").unwrap()
});
// Lazy gap: the capture starts at the first run of words after the label.
static NEAR_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Typical education[^<]{0,60}?([A-Za-z'\-\s]+)").unwrap()
});

pub fn extract(html: &str) -> Option<String> {
    first_match(html, &[strong_label, near_label])
}

fn strong_label(html: &str) -> Option<String> {
    capture(&STRONG_LABEL_RE, html)
}

fn near_label(html: &str) -> Option<String> {
    capture(&NEAR_LABEL_RE, html)
}
