pub mod activities;
pub mod description;
pub mod education;
pub mod projection;
pub mod related;
pub mod title;
pub mod video;
pub mod wage;

use crate::entry::CareerEntry;

pub fn extract_all(keyword: &str, url: &str, html: &str) -> CareerEntry {
    let mut entry = CareerEntry::new(keyword, title::extract(html));
    entry.source_url = Some(url.to_string());
    entry.description = description::extract(html);
    entry.median_wage = wage::extract(html);
    entry.education = education::extract(html);
    entry.projected_employment = projection::extract(html);
    entry.career_video_url = video::extract(html);
    entry.activities = activities::extract(html);
    entry.related_occupations = related::extract(html);
    entry
}

// ── Tests ──
