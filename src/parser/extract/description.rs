use std::sync::LazyLock;

use regex::Regex;

use crate::parser::patterns::{capture, collapse_whitespace, first_match, strip_tags};

/// Shorter intro blocks are navigation noise.
const MIN_INTRO_CHARS: usize = 30;

static META_DESC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+name=["']description["'][^>]+content=["']([^"']+)["']"#).unwrap()
});
static OG_DESC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+property=["']og:description["'][^>]+content=["']([^"']+)["']"#)
        .unwrap()
});
static INTRO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<div[^>]+id=["']resulttabletitle["'].*?</div>(.{0,500})<"#).unwrap()
});
static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p[^>]*>(.{80,400}?)</p>").unwrap());

pub fn extract(html: &str) -> Option<String> {
    first_match(html, &[meta_description, og_description, intro_block, long_paragraph])
}

fn meta_description(html: &str) -> Option<String> {
    capture(&META_DESC_RE, html)
}

fn og_description(html: &str) -> Option<String> {
    capture(&OG_DESC_RE, html)
}

/// Text right after the result title container.
fn intro_block(html: &str) -> Option<String> {
    let caps = INTRO_RE.captures(html)?;
    let text = strip_tags(&caps[1]);
    let text = text.trim();
    if text.chars().count() > MIN_INTRO_CHARS {
        Some(collapse_whitespace(text))
    } else {
        None
    }
}

fn long_paragraph(html: &str) -> Option<String> {
    let caps = PARAGRAPH_RE.captures(html)?;
    let text = strip_tags(&caps[1]).trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
