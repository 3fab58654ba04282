use std::sync::LazyLock;

use regex::Regex;

use crate::parser::patterns::{capture, first_match};

static OG_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+property=["']og:title["'][^>]+content=["']([^"']+)["']"#).unwrap()
});
static RESULT_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<div[^>]+id=["']resulttabletitle["'][^>]*>([^<]+)<"#).unwrap()
});
static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<h1[^>]*>([^<]+)</h1>").unwrap());

pub fn extract(html: &str) -> Option<String> {
    first_match(html, &[og_title, result_title, first_heading])
}

fn og_title(html: &str) -> Option<String> {
    capture(&OG_TITLE_RE, html)
}

fn result_title(html: &str) -> Option<String> {
    capture(&RESULT_TITLE_RE, html)
}

fn first_heading(html: &str) -> Option<String> {
    capture(&H1_RE, html)
}
