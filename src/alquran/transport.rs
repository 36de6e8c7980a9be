//! HTTP transport for the alquran.cloud API.
//!
//! The client talks to the API through the `Transport` trait so tests can
//! substitute canned responses and count requests.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};

/// Fetches a JSON document relative to the API base URL.
///
/// Implementations return the `data` member of the response envelope and map
/// "no such resource" answers to `Error::NotFound`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `path` (e.g. `/surah/2/editions/en.asad,quran-uthmani`).
    async fn get_data(&self, path: &str) -> Result<Value>;
}

/// reqwest-backed transport
#[derive(Clone)]
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    /// Create a transport from config
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            client: Client::builder()
                .timeout(config.timeout)
                .build()
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_data(&self, path: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {path} failed: {e}")))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(path.to_string()));
        }
        // Out-of-range references come back as 400 with an envelope explaining why
        if status == StatusCode::BAD_REQUEST {
            if let Ok(json) = resp.json::<Value>().await {
                return unwrap_envelope(path, json);
            }
            return Err(Error::api_status(format!("Request to {path} returned {status}"), 400));
        }
        if !status.is_success() {
            return Err(Error::api_status(
                format!("Request to {path} returned {status}"),
                status.as_u16(),
            ));
        }

        let json: Value = resp.json().await
            .map_err(|e| Error::parse(format!("Invalid JSON from {path}: {e}"), None))?;

        unwrap_envelope(path, json)
    }
}

/// Check the envelope `code` and return its `data` member.
pub fn unwrap_envelope(path: &str, mut json: Value) -> Result<Value> {
    let code = json["code"].as_u64().unwrap_or(200);
    match code {
        200 => {}
        404 => return Err(Error::NotFound(path.to_string())),
        400 if is_missing_resource(path, json["data"].as_str()) => {
            return Err(Error::NotFound(path.to_string()));
        }
        other => {
            let status = u16::try_from(other).unwrap_or(500);
            let message = json["data"].as_str().unwrap_or("unexpected response code");
            return Err(Error::api_status(format!("{path}: {message}"), status));
        }
    }

    match json.get_mut("data") {
        Some(data) => Ok(data.take()),
        None => Err(Error::parse(format!("Missing 'data' in response from {path}"), None)),
    }
}

/// Whether a 400 answer means the requested surah, ayah or edition does not exist.
///
/// The API rejects out-of-range numbers and unknown editions with 400 and a
/// message naming the offending part, rather than with 404.
fn is_missing_resource(path: &str, message: Option<&str>) -> bool {
    if !(path.starts_with("/ayah/") || path.starts_with("/surah/")) {
        return false;
    }
    let Some(message) = message else { return false };
    let message = message.to_lowercase();
    ["ayah", "surah", "edition", "not found"]
        .iter()
        .any(|word| message.contains(word))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_returns_data() {
        let data = unwrap_envelope("/surah", json!({"code": 200, "status": "OK", "data": [1, 2]})).unwrap();
        assert_eq!(data, json!([1, 2]));
    }

    #[test]
    fn envelope_not_found() {
        let err = unwrap_envelope("/ayah/2:999", json!({"code": 404, "status": "NOT FOUND", "data": "Not found."}))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn envelope_invalid_reference_is_not_found() {
        let err = unwrap_envelope(
            "/ayah/1:8/editions/en.asad,quran-uthmani",
            json!({"code": 400, "status": "Bad Request", "data": "Please specify a valid surah and ayah reference."}),
        )
        .unwrap_err();
        assert!(err.is_not_found());

        let err = unwrap_envelope(
            "/surah/115/editions/en.asad,quran-uthmani",
            json!({"code": 400, "data": "Surah number should be between 1 and 114."}),
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn bad_request_without_resource_message_stays_api_error() {
        let err = unwrap_envelope("/ayah/2:255/en.asad", json!({"code": 400, "data": "Rate limit"})).unwrap_err();
        assert!(matches!(err, Error::Api { status: Some(400), .. }));
        let err = unwrap_envelope("/meta", json!({"code": 400, "data": "Invalid surah"})).unwrap_err();
        assert!(matches!(err, Error::Api { status: Some(400), .. }));
    }

    #[test]
    fn envelope_other_code_is_api_error() {
        let err = unwrap_envelope("/surah", json!({"code": 400, "data": "Bad edition"})).unwrap_err();
        assert!(matches!(err, Error::Api { status: Some(400), .. }));
    }

    #[test]
    fn envelope_without_data_is_parse_error() {
        let err = unwrap_envelope("/surah", json!({"code": 200})).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }
}
