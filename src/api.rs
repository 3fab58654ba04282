use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::entry::{non_empty, CareerEntry};
use crate::error::{FetchError, FetchResult};
use crate::http::fetch_text;
use crate::settings::{Credentials, Settings};

const MAX_RELATED: usize = 8;

/// Detail sections requested alongside the base record.
const DETAIL_SECTIONS: &[(&str, &str)] = &[
    ("wages", "true"),
    ("skills", "true"),
    ("tasks", "true"),
    ("altTitles", "true"),
    ("knowledge", "true"),
    ("ability", "true"),
    ("training", "true"),
];

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "OccupationList", default)]
    occupation_list: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(rename = "OnetCode", default)]
    onet_code: Option<String>,
    #[serde(rename = "OnetTitle", default)]
    onet_title: Option<String>,
    #[serde(rename = "Onet", default)]
    onet: Option<String>,
}

/// Search by title, take the provider's top match and build an entry from
/// its detail record.
pub async fn fetch_entry(
    client: &Client,
    settings: &Settings,
    creds: &Credentials,
    keyword: &str,
) -> FetchResult<CareerEntry> {
    let (user_id, token) = creds.pair().ok_or(FetchError::MissingCredentials)?;

    let limit = settings.search_limit.to_string();
    let search_url = api_url(
        &settings.api_base,
        &["occupation", user_id, keyword, "N", "0", &limit],
    )?;
    let request = client
        .get(search_url)
        .bearer_auth(token)
        .header(reqwest::header::ACCEPT, "application/json")
        .query(&[("datasettype", "onet"), ("searchby", "title")]);
    let body = fetch_text(request).await?;
    let (code, title) = parse_search(&body, keyword)?;
    info!("{}: top match {} ({})", keyword, code, title.as_deref().unwrap_or("-"));

    let detail_url = api_url(
        &settings.api_base,
        &["occupation", user_id, &code, &settings.region],
    )?;
    let request = client
        .get(detail_url)
        .bearer_auth(token)
        .header(reqwest::header::ACCEPT, "application/json")
        .query(DETAIL_SECTIONS);
    let body = fetch_text(request).await?;

    entry_from_detail(keyword, code, title, &body)
}

fn api_url(base: &str, segments: &[&str]) -> FetchResult<Url> {
    let mut url = Url::parse(base).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// First candidate's (code, title).
fn parse_search(body: &str, keyword: &str) -> FetchResult<(String, Option<String>)> {
    let response: SearchResponse = serde_json::from_str(body)?;
    let best = response
        .occupation_list
        .and_then(|list| list.into_iter().next())
        .ok_or_else(|| FetchError::NoMatch(keyword.to_string()))?;

    let code = best
        .onet_code
        .clone()
        .or_else(|| best.onet.clone())
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| FetchError::MissingCode(keyword.to_string()))?;
    let title = best.onet_title.or(best.onet);
    Ok((code, title))
}

/// Build an entry from a detail payload. Missing sections become nulls.
pub fn entry_from_detail(
    keyword: &str,
    code: String,
    title: Option<String>,
    body: &str,
) -> FetchResult<CareerEntry> {
    let doc: Value = serde_json::from_str(body)?;
    let detail = detail_record(&doc);

    let mut entry = CareerEntry::new(keyword, title);
    entry.onet_code = Some(code);
    entry.source_url = text(detail, &["DataSourceUrl"]);
    entry.description = text(detail, &["OnetDescription", "OccupationDescription"]);
    entry.median_wage = median_wage(detail);
    entry.education = text(detail, &["TypicalEducation"]);
    entry.projected_employment = projection(detail);
    entry.career_video_url = text(detail, &["COSVideoURL"]);
    entry.activities = non_empty(tasks(detail));
    entry.related_occupations = non_empty(alternate_titles(detail));
    Ok(entry)
}

/// `OccupationDetail` is usually a one-element list; older payloads inline it.
fn detail_record(doc: &Value) -> &Value {
    match doc.get("OccupationDetail") {
        Some(Value::Array(items)) if !items.is_empty() => &items[0],
        Some(obj @ Value::Object(_)) => obj,
        _ => doc,
    }
}

/// First non-empty string among `keys`.
fn text(obj: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn median_wage(detail: &Value) -> Option<i64> {
    let wages = detail.get("Wages")?;
    let national = wages
        .get("NationalWagesList")
        .filter(|v| !is_blank(v))
        .or_else(|| wages.get("NationalWages"))?;
    let first = national.as_array()?.first()?;
    if !first.is_object() {
        return None;
    }
    first
        .get("Median")
        .and_then(wage_value)
        .or_else(|| first.get("MedianHourly").and_then(wage_value))
}

/// Null, empty list or empty object.
fn is_blank(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Integer wage from a number or numeric string ("54,320", "26.12").
pub fn wage_value(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => {
            let digits: String = s
                .trim()
                .trim_start_matches('$')
                .chars()
                .filter(|c| *c != ',')
                .collect();
            digits.parse::<i64>().ok().or_else(|| {
                digits
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.round() as i64)
            })
        }
        _ => None,
    }
}

/// Kept as the provider returns it: strings verbatim, structures as JSON text.
fn projection(detail: &Value) -> Option<String> {
    match detail.get("EmploymentProjection")? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn tasks(detail: &Value) -> Vec<String> {
    list_texts(detail.get("Tasks"), &["TaskDescription"], usize::MAX)
}

fn alternate_titles(detail: &Value) -> Vec<String> {
    list_texts(
        detail.get("AlternateTitles"),
        &["Title", "AlternateTitle"],
        MAX_RELATED,
    )
}

/// Flatten a list of strings or objects (text under one of `keys`).
fn list_texts(list: Option<&Value>, keys: &[&str], limit: usize) -> Vec<String> {
    let Some(items) = list.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .take(limit)
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            Value::Object(_) => text(item, keys),
            _ => None,
        })
        .collect()
}
