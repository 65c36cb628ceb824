use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::fmt;

/// Base URL used when `LEAGUE_API_BASE` is not set.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

/// The one failure kind loaders care about: the fetch did not produce usable
/// JSON. Every response status is checked, regardless of endpoint.
#[derive(Debug)]
pub enum FetchError {
    /// The upstream answered with a non-success status.
    Status(StatusCode),
    /// Connection, timeout, or body/JSON decode failure.
    Transport(reqwest::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Status(status) => write!(f, "upstream returned {status}"),
            FetchError::Transport(err) => write!(f, "upstream request failed: {err}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err)
    }
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status(status) if *status == StatusCode::NOT_FOUND)
    }
}

#[derive(Debug)]
pub struct InvalidApiBase(pub Url);

impl fmt::Display for InvalidApiBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API base URL cannot hold path segments: {}", self.0)
    }
}

impl std::error::Error for InvalidApiBase {}

/// Shared client for the league stats API. Cheap to clone; one per app.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    /// `base` keeps any path prefix it carries (e.g. `/api`). Rejects URLs
    /// that cannot take path segments (`mailto:` and friends).
    pub fn new(base: Url) -> Result<Self, InvalidApiBase> {
        if base.cannot_be_a_base() {
            return Err(InvalidApiBase(base));
        }
        Ok(Self {
            http: Client::new(),
            base,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Append `segments` to the base path. Each segment is percent-encoded,
    /// so route parameters with spaces or slashes stay one segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            // `new` rejected cannot-be-a-base URLs, so this branch always runs.
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// One GET, one JSON body. Non-2xx statuses are errors.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let mut request = self.http.get(self.endpoint(segments));
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.json::<T>().await?)
    }

    /// Reachability probe against the upstream health endpoint.
    pub async fn ping(&self) -> Result<(), FetchError> {
        self.get_json::<serde_json::Value>(&["health"], &[])
            .await
            .map(|_| ())
    }
}
