use reqwest::{Client, Url};

use crate::entry::CareerEntry;
use crate::error::{FetchError, FetchResult};
use crate::http::fetch_text;
use crate::parser;
use crate::settings::Settings;

/// Public occupation-profile search URL for `keyword`.
pub fn profile_url(settings: &Settings, keyword: &str) -> FetchResult<Url> {
    Url::parse_with_params(
        &settings.profile_url,
        &[("keyword", keyword), ("location", settings.location.as_str())],
    )
    .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", settings.profile_url, e)))
}

/// Fetch the profile page for `keyword` and mine it for an entry.
pub async fn fetch_entry(
    client: &Client,
    settings: &Settings,
    keyword: &str,
) -> FetchResult<CareerEntry> {
    let url = profile_url(settings, keyword)?;
    let html = fetch_text(client.get(url.clone())).await?;
    Ok(parser::process_page(keyword, url.as_str(), &html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_form_encoded() {
        let settings = Settings::load().unwrap();
        let url = profile_url(&settings, "Criminal Justice & Law").unwrap();
        let query = url.query().unwrap();
        assert!(query.starts_with("keyword=Criminal+Justice+%26+Law&location="));
    }
}
