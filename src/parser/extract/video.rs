use std::sync::LazyLock;

use regex::Regex;

use crate::parser::patterns::{capture, first_match};

const VIDEO_HOSTS: &[&str] = &["youtube.com", "youtube-nocookie.com", "youtu.be"];

static COS_VIDEO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)href=["']([^"']*COSVideo[^"']*)["']"#).unwrap()
});
static IFRAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<iframe[^>]+src=["']([^"']+)["']"#).unwrap()
});

pub fn extract(html: &str) -> Option<String> {
    first_match(html, &[cos_video_link, embedded_video])
}

fn cos_video_link(html: &str) -> Option<String> {
    capture(&COS_VIDEO_RE, html)
}

fn embedded_video(html: &str) -> Option<String> {
    IFRAME_RE
        .captures_iter(html)
        .map(|c| c[1].trim().to_string())
        .find(|src| {
            let src = src.to_lowercase();
            VIDEO_HOSTS.iter().any(|h| src.contains(h))
        })
}
