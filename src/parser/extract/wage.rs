use std::sync::LazyLock;

use regex::Regex;

use crate::parser::patterns::{capture, first_match};

static ANNUAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)Annual wages.{0,200}?\$([0-9,]{2,7})").unwrap());
static MEDIAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Median[^$\d]{0,40}\$([0-9,]+)").unwrap());
static DOLLAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$([0-9,]{2,7})").unwrap());

/// Median annual wage. The first pattern that matches decides; a match that
/// does not parse gives `None` instead of trying the next pattern.
pub fn extract(html: &str) -> Option<i64> {
    let raw = first_match(html, &[annual, median, any_dollar])?;
    parse_amount(&raw)
}

fn annual(html: &str) -> Option<String> {
    capture(&ANNUAL_RE, html)
}

fn median(html: &str) -> Option<String> {
    capture(&MEDIAN_RE, html)
}

fn any_dollar(html: &str) -> Option<String> {
    capture(&DOLLAR_RE, html)
}

fn parse_amount(raw: &str) -> Option<i64> {
    raw.replace(',', "").parse().ok()
}
