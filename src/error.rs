use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("unauthorized (401) for {url}; check CAREERONESTOP_USER_ID and CAREERONESTOP_TOKEN")]
    Unauthorized { url: String },
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("API credentials missing")]
    MissingCredentials,
    #[error("no occupations matched {0:?}")]
    NoMatch(String),
    #[error("first match for {0:?} has no occupation code")]
    MissingCode(String),
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;
