// GitHub API HTTP client.
// Handles optional authentication, rate limit tracking, and status mapping.

use std::sync::{Mutex, PoisonError};

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{LensError, Result};

use super::types::RateLimit;

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Repository whose contributors are credited by default.
pub const DEFAULT_OWNER: &str = "Androz2091";
pub const DEFAULT_REPO: &str = "discord-data-package-explorer";

/// GitHub API client bound to one repository.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    owner: String,
    repo: String,
    rate_limit: Mutex<RateLimit>,
}

impl GitHubClient {
    /// Create an unauthenticated client for the default repository.
    pub fn new() -> Result<Self> {
        Self::build(None)
    }

    /// Create a client that authenticates with the given token.
    pub fn with_token(token: &str) -> Result<Self> {
        Self::build(Some(token))
    }

    /// Create a client, authenticating when GITHUB_TOKEN is set.
    pub fn from_env() -> Result<Self> {
        match std::env::var("GITHUB_TOKEN") {
            Ok(token) if !token.is_empty() => Self::with_token(&token),
            _ => Self::new(),
        }
    }

    fn build(token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| LensError::Other(e.to_string()))?,
            );
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("package-lens"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(LensError::Api)?;

        Ok(Self {
            client,
            base_url: GITHUB_API_BASE.to_string(),
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            rate_limit: Mutex::new(RateLimit::default()),
        })
    }

    /// Point the client at another repository.
    pub fn for_repository(mut self, owner: &str, repo: &str) -> Self {
        self.owner = owner.to_string();
        self.repo = repo.to_string();
        self
    }

    /// Use a different API base URL (GitHub Enterprise, local mirrors).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Repository the client is bound to, as `(owner, repo)`.
    pub fn repository(&self) -> (&str, &str) {
        (self.owner.as_str(), self.repo.as_str())
    }

    /// Get the most recent rate limit information.
    pub fn rate_limit(&self) -> RateLimit {
        self.rate_limit
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Full URL for an API endpoint path.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Make a GET request to the GitHub API.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = self.url(endpoint);
        let response = self.client.get(&url).send().await.map_err(LensError::Api)?;

        self.update_rate_limit(&response);
        self.check_response(response).await
    }

    /// Update rate limit from response headers.
    fn update_rate_limit(&self, response: &Response) {
        let mut rate_limit = self
            .rate_limit
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(limit) = header_u64(response, "x-ratelimit-limit") {
            rate_limit.limit = limit;
        }
        if let Some(remaining) = header_u64(response, "x-ratelimit-remaining") {
            rate_limit.remaining = remaining;
        }
        if let Some(reset) = header_u64(response, "x-ratelimit-reset") {
            rate_limit.reset = reset;
        }
    }

    /// Check response status and convert errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(LensError::Other(
                "Authentication failed: invalid or expired token".to_string(),
            )),
            StatusCode::NOT_FOUND => {
                let url = response.url().to_string();
                Err(LensError::NotFound(url))
            }
            // Only this response's own headers prove the limit is exhausted.
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
                if header_u64(&response, "x-ratelimit-remaining") == Some(0) =>
            {
                let reset = header_u64(&response, "x-ratelimit-reset")
                    .unwrap_or_else(|| self.rate_limit().reset);
                Err(LensError::RateLimited {
                    reset_at: reset_time(reset),
                })
            }
            status => Err(LensError::Other(format!(
                "HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            ))),
        }
    }
}

/// Numeric header value, if present and well formed.
fn header_u64(response: &Response, name: &str) -> Option<u64> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

/// Format a rate limit reset epoch as wall-clock time.
fn reset_time(reset: u64) -> String {
    chrono::DateTime::from_timestamp(reset as i64, 0)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
