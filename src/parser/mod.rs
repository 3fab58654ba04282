pub mod extract;
pub mod patterns;

use crate::entry::CareerEntry;

/// Raw profile-page HTML → entry. Fields that no pattern matches stay null.
pub fn process_page(keyword: &str, url: &str, html: &str) -> CareerEntry {
    extract::extract_all(keyword, url, html)
}
