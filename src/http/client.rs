use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Url};
use std::time::Instant;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};

use super::request::RequestInput;
use super::response::HttpResponse;

/// Thin wrapper around a shared `reqwest::Client` bound to one base URL.
///
/// Every status code is a response; only transport failures and malformed
/// requests come back as errors.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: &Config) -> Result<Self> {
        Url::parse(&config.base_url).map_err(|e| Error::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, path_segments: &[String]) -> Result<Url> {
        let mut raw = self.base_url.clone();
        for segment in path_segments {
            raw.push('/');
            raw.push_str(&urlencoding::encode(segment));
        }

        Url::parse(&raw).map_err(|e| Error::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })
    }

    pub async fn send(&self, request: RequestInput) -> Result<HttpResponse> {
        let url = self.url_for(&request.path_segments)?;
        let mut headers = build_headers(&request.headers)?;

        let mut req_builder = self.client.request(request.method.into(), url.clone());

        if let Some(body) = &request.body {
            if !request.method.is_bodyless() {
                if !headers.contains_key(CONTENT_TYPE) {
                    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                }
                req_builder = req_builder.body(serde_json::to_vec(body)?);
            }
        }
        req_builder = req_builder.headers(headers);

        let started = Instant::now();
        let response = req_builder.send().await?;
        let elapsed = started.elapsed().as_millis();

        let status = response.status();

        let bytes = response.bytes().await?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        debug!(
            method = %request.method,
            url = %url,
            status = status.as_u16(),
            duration_ms = elapsed as u64,
            "exchange complete"
        );

        Ok(HttpResponse {
            status: status.as_u16(),
            duration_ms: elapsed,
            body,
        })
    }
}

pub fn build_headers(input: &[(String, String)]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    for (key, value) in input {
        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| Error::InvalidHeader {
            name: key.to_string(),
            reason: e.to_string(),
        })?;
        let header_value = HeaderValue::from_str(value.trim()).map_err(|e| Error::InvalidHeader {
            name: key.to_string(),
            reason: e.to_string(),
        })?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}
