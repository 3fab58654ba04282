use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;
use tracing::{info, warn};

pub const USER_ID_KEY: &str = "CAREERONESTOP_USER_ID";
pub const TOKEN_KEY: &str = "CAREERONESTOP_TOKEN";

const DEFAULT_API_BASE: &str = "https://api.careeronestop.org/v1";
const DEFAULT_PROFILE_URL: &str =
    "https://www.careeronestop.org/Toolkit/Careers/Occupations/occupation-profile.aspx";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; PrepopBot/1.0; +https://example.org)";

/// Career fields collected into the dataset, in output order.
pub const KEYWORDS: &[&str] = &[
    "Business",
    "Psychology",
    "Biology",
    "Marketing",
    "Information Science",
    "Nursing",
    "Criminal Justice",
    "Education",
    "Liberal Arts",
    "Engineering",
    "Interdisciplinary Studies",
    "Communications",
    "Exercise Science",
    "Biotechnology",
    "Mechanic Repair",
    "Computer Science",
    "Hospitality",
    "Music",
    "Architecture",
    "Radiologic Technology",
    "Diagnostic Medical Sonography",
];

/// Runtime settings, built once at startup and passed down explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_base: String,
    pub profile_url: String,
    /// State code for detail records (wages are regional).
    pub region: String,
    /// Location parameter of the public profile page.
    pub location: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub delay_ms: u64,
    pub search_limit: u32,
    pub env_file: PathBuf,
    pub output: PathBuf,
}

impl Settings {
    /// Defaults, overlaid with `PREPOP_*` environment variables.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("api_base", DEFAULT_API_BASE)?
            .set_default("profile_url", DEFAULT_PROFILE_URL)?
            .set_default("region", "TX")?
            .set_default("location", "texas")?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .set_default("timeout_secs", 15_i64)?
            .set_default("delay_ms", 1200_i64)?
            .set_default("search_limit", 50_i64)?
            .set_default("env_file", ".env")?
            .set_default("output", "data/prepopulated-careers.json")?
            .add_source(Environment::with_prefix("PREPOP").try_parsing(true))
            .build()
            .context("Failed to build settings")?;
        settings
            .try_deserialize()
            .context("Invalid PREPOP_* settings")
    }
}

/// CareerOneStop API credentials. Either half may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: Option<String>,
    pub token: Option<String>,
}

impl Credentials {
    /// Read `KEY=value` lines from `path`. Any read failure yields empty
    /// credentials.
    pub fn from_file(path: &Path) -> Self {
        let Ok(text) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        Self::parse(&text)
    }

    fn parse(text: &str) -> Self {
        let mut creds = Self::default();
        for line in text.lines() {
            let Some((key, value)) = line.trim().split_once('=') else {
                continue;
            };
            let value = Some(value.trim().to_string()).filter(|v| !v.is_empty());
            match key.trim() {
                USER_ID_KEY => creds.user_id = value,
                TOKEN_KEY => creds.token = value,
                _ => {}
            }
        }
        creds
    }

    /// File values, overridden by non-empty process environment variables.
    pub fn load(path: &Path) -> Self {
        let mut creds = Self::from_file(path);
        if let Some(v) = env_value(USER_ID_KEY) {
            creds.user_id = Some(v);
        }
        if let Some(v) = env_value(TOKEN_KEY) {
            creds.token = Some(v);
        }

        info!(
            "CareerOneStop user id: {}, token loaded: {} (hint {})",
            creds.user_id.as_deref().unwrap_or("MISSING"),
            creds.token.is_some(),
            creds.token.as_deref().map(mask_token).unwrap_or_default(),
        );
        if !creds.is_complete() {
            warn!(
                "{} or {} not found in {}; API calls skipped, scraping profile pages only",
                USER_ID_KEY,
                TOKEN_KEY,
                path.display()
            );
        }
        creds
    }

    pub fn is_complete(&self) -> bool {
        self.user_id.is_some() && self.token.is_some()
    }

    /// Both halves, when present.
    pub fn pair(&self) -> Option<(&str, &str)> {
        Some((self.user_id.as_deref()?, self.token.as_deref()?))
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Loggable token hint: first and last four characters.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
