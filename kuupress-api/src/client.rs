use std::future::Future;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{StatusCode, Url};
use tracing::{debug, warn};

use crate::cache::PageCache;
use crate::error::ApiError;
use crate::model::{LeaderboardPage, Profile, decode_leaderboard, decode_profile};
use crate::url::{leaderboard_url, parse_base_url, profile_url};

pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_RETRIES: u32 = 2;
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(250);
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(15);

/// Read access to the Kuupress leaderboard and profiles.
pub trait LeaderboardSource: Send + Sync {
    fn fetch_leaderboard(
        &self,
        page: u32,
    ) -> impl Future<Output = Result<LeaderboardPage, ApiError>> + Send;

    fn fetch_profile(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Profile, ApiError>> + Send;
}

#[derive(Clone, Debug)]
pub struct ClientOptions {
    pub timeout: Duration,
    pub retries: u32,
    pub retry_backoff: Duration,
    pub cache_ttl: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_HTTP_TIMEOUT,
            retries: DEFAULT_RETRIES,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// HTTP client for the public Kuupress API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Option<Url>,
    options: ClientOptions,
    cache: PageCache,
}

impl ApiClient {
    /// A missing base URL is accepted here; every request then fails with
    /// [`ApiError::Config`]. A malformed one is rejected immediately.
    pub fn new(base_url: Option<&str>, options: ClientOptions) -> Result<Self, ApiError> {
        let base_url = match base_url {
            Some(raw) => parse_base_url(raw)?,
            None => None,
        };

        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent(concat!("kuupress-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| ApiError::Config(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url,
            cache: PageCache::with_ttl(options.cache_ttl),
            options,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    fn base_url(&self) -> Result<&Url, ApiError> {
        self.base_url
            .as_ref()
            .ok_or_else(|| ApiError::Config("KUUPRESS_API_BASE is not set".to_owned()))
    }

    async fn get_once(&self, url: &Url) -> Result<Vec<u8>, ApiError> {
        let response = self
            .http
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(remote_error(status));
        }

        let body = response.bytes().await.map_err(ApiError::Network)?;
        Ok(body.to_vec())
    }

    async fn get_with_retry(&self, url: &Url) -> Result<Vec<u8>, ApiError> {
        let mut attempt = 0_u32;
        loop {
            match self.get_once(url).await {
                Ok(body) => return Ok(body),
                Err(err) if err.is_retryable() && attempt < self.options.retries => {
                    let delay = self
                        .options
                        .retry_backoff
                        .saturating_mul(2_u32.saturating_pow(attempt));
                    attempt += 1;
                    warn!(
                        ?err,
                        %url,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Kuupress API request failed; retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn load_leaderboard(&self, page: u32) -> Result<LeaderboardPage, ApiError> {
        let url = leaderboard_url(self.base_url()?, page)?;
        debug!(%url, "fetching leaderboard page");
        let body = self.get_with_retry(&url).await?;
        decode_leaderboard(&body)
    }
}

impl LeaderboardSource for ApiClient {
    async fn fetch_leaderboard(&self, page: u32) -> Result<LeaderboardPage, ApiError> {
        let page = page.max(1);
        self.cache
            .get_or_load(page, || self.load_leaderboard(page))
            .await
    }

    async fn fetch_profile(&self, username: &str) -> Result<Profile, ApiError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ApiError::NotFound {
                username: String::new(),
            });
        }

        let url = profile_url(self.base_url()?, username)?;
        debug!(%url, "fetching profile");

        match self.get_with_retry(&url).await {
            Ok(body) => decode_profile(&body),
            Err(ApiError::Remote { status: 404, .. }) => Err(ApiError::NotFound {
                username: username.to_owned(),
            }),
            Err(err) => Err(err),
        }
    }
}

fn remote_error(status: StatusCode) -> ApiError {
    ApiError::Remote {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_owned(),
    }
}
