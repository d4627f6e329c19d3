//! HTTP client for the hosted database's REST endpoint.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{Query, TableQuery},
    Error,
};

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for a Supabase project's PostgREST endpoint.
///
/// Every request carries the project API key both as the `apikey` header and
/// as a bearer token. Each request builds a fresh `reqwest::Client` with the
/// configured timeout.
pub struct Client {
    /// Project URL, e.g. `https://abc.supabase.co`.
    base_api_url: String,
    api_key: String,
    timeout: Duration,
}

impl Client {
    /// Creates a new client for the given project URL and API key.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn get_url(&self, query: &TableQuery) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, query.path()).as_str())
            .map_err(|e| {
                tracing::error!("Invalid URL constructed: {}", e);
                Error::RequestFailed
            })?;
        Ok(query.add_to_url(&url))
    }

    /// Runs a read query and deserializes every returned row as `T`.
    pub async fn get_rows<T>(&self, query: &TableQuery) -> Result<Vec<T>, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.get_url(query)?;
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("apikey", &self.api_key)
            .header("authorization", format!("Bearer {}", self.api_key))
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to read {}: {}", query.table, e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<Vec<T>>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse {} rows: {} | body: {}", query.table, e, snippet);
            Error::RequestFailed
        })?;

        tracing::debug!("Fetched {} rows from {}", parsed.len(), query.table);
        Ok(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
