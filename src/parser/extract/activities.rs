use std::sync::LazyLock;

use regex::Regex;

use crate::entry::non_empty;
use crate::parser::patterns::list_items;

static TASKS_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(?:Tasks|Typical tasks|Important tasks).{0,400}<ul[^>]*>(.*?)</ul>").unwrap()
});

/// Items of the list under a "Tasks" label; `None` when there is no such
/// list or every item is blank.
pub fn extract(html: &str) -> Option<Vec<String>> {
    let caps = TASKS_LIST_RE.captures(html)?;
    non_empty(list_items(&caps[1]))
}
