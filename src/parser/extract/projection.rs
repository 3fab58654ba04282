use std::sync::LazyLock;

use regex::Regex;

use crate::parser::patterns::{capture, first_match};

static PROJECTIONS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Employment projections.{0,200}?([0-9]{1,3}%|[+-]?[0-9]{1,3}\.?[0-9]?%?)")
        .unwrap()
});
static PROJECTED_CHANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Projected change.{0,120}?([0-9]{1,3}%|[+-]?[0-9]{1,3}%?)").unwrap()
});

/// Growth token as it appears on the page ("7%", "+12%", "3.5"); not normalized.
pub fn extract(html: &str) -> Option<String> {
    first_match(html, &[projections, projected_change])
}

fn projections(html: &str) -> Option<String> {
    capture(&PROJECTIONS_RE, html)
}

fn projected_change(html: &str) -> Option<String> {
    capture(&PROJECTED_CHANGE_RE, html)
}
