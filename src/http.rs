use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::debug;

use crate::error::{FetchError, FetchResult};
use crate::settings::Settings;

pub fn build_client(settings: &Settings) -> Result<Client> {
    Client::builder()
        .user_agent(&settings.user_agent)
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()
        .context("Failed to create HTTP client")
}

/// Send `request` and return the body, decoded leniently (invalid UTF-8
/// sequences are dropped). Non-2xx statuses are errors.
pub async fn fetch_text(request: RequestBuilder) -> FetchResult<String> {
    let response = request.send().await?;
    let url = response.url().to_string();
    let status = response.status();
    debug!("GET {} -> {}", url, status);

    if status == StatusCode::UNAUTHORIZED {
        return Err(FetchError::Unauthorized { url });
    }
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url,
        });
    }

    let bytes = response.bytes().await?;
    Ok(decode_lossy(&bytes))
}

/// UTF-8 text of `bytes` with invalid sequences skipped.
fn decode_lossy(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}
