use std::sync::LazyLock;

use regex::Regex;

use crate::entry::non_empty;
use crate::parser::patterns::{first_match, list_items, strip_tags};

const MAX_RELATED: usize = 8;

static RELATED_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(?:Related occupations|Similar occupations).{0,300}<ul[^>]*>(.*?)</ul>")
        .unwrap()
});
static ALT_TITLES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)id=["']ctl40_ctl00_lbltitles["'][^>]*>(.*?)<"#).unwrap()
});
static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,;()]").unwrap());

/// Up to eight related titles, from a labelled list or the alternate-titles
/// element.
pub fn extract(html: &str) -> Option<Vec<String>> {
    let mut titles = first_match(html, &[related_list, alternate_titles])?;
    titles.truncate(MAX_RELATED);
    Some(titles)
}

fn related_list(html: &str) -> Option<Vec<String>> {
    let caps = RELATED_LIST_RE.captures(html)?;
    non_empty(list_items(&caps[1]))
}

fn alternate_titles(html: &str) -> Option<Vec<String>> {
    let caps = ALT_TITLES_RE.captures(html)?;
    non_empty(split_titles(&strip_tags(&caps[1])))
}

/// "Nurse, RN (Registered Nurse); Staff Nurse" → four titles, in order.
pub fn split_titles(text: &str) -> Vec<String> {
    SEPARATOR_RE
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_alternate_titles() {
        assert_eq!(
            split_titles("Nurse, RN (Registered Nurse); Staff Nurse"),
            vec!["Nurse", "RN", "Registered Nurse", "Staff Nurse"]
        );
    }

    #[test]
    fn alternate_titles_element() {
        let html = concat!(
            r#"<span id="ctl40_ctl00_lbltitles" class="t">"#,
            "Nurse, RN (Registered Nurse); Staff Nurse</span>"
        );
        assert_eq!(
            extract(html),
            Some(vec![
                "Nurse".to_string(),
                "RN".to_string(),
                "Registered Nurse".to_string(),
                "Staff Nurse".to_string()
            ])
        );
    }

    #[test]
    fn truncates_to_eight() {
        let html = r#"<span id='ctl40_ctl00_lbltitles'>a, b, c, d, e, f, g, h, i, j</span>"#;
        assert_eq!(extract(html).unwrap().len(), 8);

        let items: String = (0..12).map(|i| format!("<li>Job {}</li>", i)).collect();
        let html = format!("<h3>Related occupations</h3><ul>{}</ul>", items);
        let titles = extract(&html).unwrap();
        assert_eq!(titles.len(), 8);
        assert_eq!(titles[0], "Job 0");
    }

    #[test]
    fn labelled_list_beats_alternate_titles() {
        let html = r#"<h3>Similar occupations</h3><ul><li><a href="/a">Paralegals</a></li></ul>
            <span id="ctl40_ctl00_lbltitles">Other</span>"#;
        assert_eq!(extract(html), Some(vec!["Paralegals".to_string()]));
    }

    #[test]
    fn nothing_found() {
        assert_eq!(extract("<p>Related links</p>"), None);
    }
}
