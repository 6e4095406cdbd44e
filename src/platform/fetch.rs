//! JSON resource fetching.

use std::collections::HashMap;
use std::sync::{
    Arc,
    Mutex,
    PoisonError,
};

use serde_json::Value;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("HTTP error for {url}: status {status}")]
    Status { url: String, status: u16 },
    /// Connection, TLS or body transfer failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Local resource could not be read
    #[error("Failed to read resource: {0}")]
    Io(#[from] std::io::Error),
    /// Body is not valid JSON
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unsupported URL scheme '{0}'")]
    UnsupportedScheme(String),
}

/// Retrieves JSON documents by URL.
pub trait Fetcher {
    fn fetch_json(&self, url: &Url) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// Fetches `http(s)` URLs with `reqwest` and `file` URLs from disk.
#[derive(Debug, Clone, Default)]
pub struct ResourceFetcher {
    client: reqwest::Client,
}

impl ResourceFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }
}

impl Fetcher for ResourceFetcher {
    async fn fetch_json(&self, url: &Url) -> Result<Value, FetchError> {
        tracing::debug!(%url, "Fetching resource");
        match url.scheme() {
            "http" | "https" => {
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }
                Ok(response.json().await?)
            }
            "file" => {
                let Ok(path) = url.to_file_path() else {
                    return Err(FetchError::UnsupportedScheme(url.to_string()));
                };
                let content = tokio::fs::read_to_string(&path).await?;
                Ok(serde_json::from_str(&content)?)
            }
            other => Err(FetchError::UnsupportedScheme(other.to_string())),
        }
    }
}

/// Canned answer of a [`StaticFetcher`].
#[derive(Debug, Clone, PartialEq)]
enum StaticResponse {
    Json(Value),
    Status(u16),
    RawBody(String),
}

/// Serves canned responses and records every request.
///
/// Clones share the request log, so a test can keep one handle while the
/// services own the others. Unknown URLs answer 404.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    responses: HashMap<String, StaticResponse>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StaticFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_json(mut self, url: impl AsRef<str>, body: Value) -> Self {
        self.responses.insert(url.as_ref().to_string(), StaticResponse::Json(body));
        self
    }

    #[must_use]
    pub fn with_status(mut self, url: impl AsRef<str>, status: u16) -> Self {
        self.responses.insert(url.as_ref().to_string(), StaticResponse::Status(status));
        self
    }

    /// Answers with `body` verbatim, which need not be valid JSON.
    #[must_use]
    pub fn with_raw_body(mut self, url: impl AsRef<str>, body: impl Into<String>) -> Self {
        self.responses.insert(url.as_ref().to_string(), StaticResponse::RawBody(body.into()));
        self
    }

    /// URLs requested so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn request_count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|requested| *requested == url)
            .count()
    }
}

impl Fetcher for StaticFetcher {
    async fn fetch_json(&self, url: &Url) -> Result<Value, FetchError> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(url.to_string());

        match self.responses.get(url.as_str()) {
            Some(StaticResponse::Json(value)) => Ok(value.clone()),
            Some(StaticResponse::RawBody(body)) => Ok(serde_json::from_str(body)?),
            Some(StaticResponse::Status(status)) => {
                Err(FetchError::Status { url: url.to_string(), status: *status })
            }
            None => Err(FetchError::Status { url: url.to_string(), status: 404 }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[tokio::test]
    async fn static_fetcher_serves_json_and_logs() {
        let fetcher = StaticFetcher::new().with_json("https://x.test/a", json!({"k": "v"}));
        let handle = fetcher.clone();

        let value = fetcher.fetch_json(&url("https://x.test/a")).await.unwrap();

        assert_eq!(value, json!({"k": "v"}));
        assert_eq!(handle.request_count("https://x.test/a"), 1);
        assert_eq!(handle.requests(), vec!["https://x.test/a".to_string()]);
    }

    #[tokio::test]
    async fn static_fetcher_unknown_url_is_not_found() {
        let fetcher = StaticFetcher::new();

        let result = fetcher.fetch_json(&url("https://x.test/missing")).await;

        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn static_fetcher_raw_body_parse_error() {
        let fetcher = StaticFetcher::new().with_raw_body("https://x.test/bad", "{not json");

        let result = fetcher.fetch_json(&url("https://x.test/bad")).await;

        assert!(matches!(result, Err(FetchError::Parse(_))));
    }

    #[tokio::test]
    async fn resource_fetcher_reads_file_urls() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("en.json");
        std::fs::write(&path, r#"{"hello": "Hello"}"#).unwrap();

        let fetcher = ResourceFetcher::new();
        let value = fetcher.fetch_json(&Url::from_file_path(&path).unwrap()).await.unwrap();

        assert_eq!(value, json!({"hello": "Hello"}));
    }

    #[tokio::test]
    async fn resource_fetcher_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        let fetcher = ResourceFetcher::new();
        let result = fetcher.fetch_json(&Url::from_file_path(&path).unwrap()).await;

        assert!(matches!(result, Err(FetchError::Io(_))));
    }

    #[rstest]
    fn resource_fetcher_rejects_unknown_scheme() {
        let fetcher = ResourceFetcher::new();

        let result = tokio_test::block_on(fetcher.fetch_json(&url("ftp://x.test/a.json")));

        assert_that!(
            result.unwrap_err().to_string(),
            contains_substring("Unsupported URL scheme 'ftp'")
        );
    }
}
