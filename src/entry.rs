use serde::{Deserialize, Serialize};

/// Provider tag stamped on every entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    #[default]
    CareerOneStop,
}

/// One career profile in the prepopulated dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerEntry {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onet_code: Option<String>,
    pub keyword: String,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub median_wage: Option<i64>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub projected_employment: Option<String>,
    #[serde(default)]
    pub career_video_url: Option<String>,
    #[serde(default)]
    pub activities: Option<Vec<String>>,
    #[serde(default)]
    pub related_occupations: Option<Vec<String>>,
    #[serde(default)]
    pub data_source: DataSource,
}

impl CareerEntry {
    /// Empty entry for `keyword`; the title falls back to the keyword when
    /// `title` is missing or blank.
    pub fn new(keyword: &str, title: Option<String>) -> Self {
        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| keyword.to_string());
        Self {
            title,
            onet_code: None,
            keyword: keyword.to_string(),
            source_url: None,
            description: None,
            median_wage: None,
            education: None,
            projected_employment: None,
            career_video_url: None,
            activities: None,
            related_occupations: None,
            data_source: DataSource::CareerOneStop,
        }
    }

    /// Compact one-line summary of the core fields that were found.
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("title={:?}", self.title)];
        if let Some(w) = self.median_wage {
            parts.push(format!("medianWage={}", w));
        }
        if let Some(e) = &self.education {
            parts.push(format!("education={:?}", e));
        }
        parts.join(" ")
    }
}

/// Collapse an empty list to `None`.
pub fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
