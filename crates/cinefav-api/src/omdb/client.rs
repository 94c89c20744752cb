//! `OmdbClient` - OMDb API client implementation.

use anyhow::{Context, Result, bail};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::MovieApi;
use super::types::{Lookup, OmdbResponse};

/// Default base URL of the OMDb API.
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// OMDb API client.
///
/// The API key is sent as the `apikey` query parameter and is never logged.
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key.
    api_key: String,
}

impl std::fmt::Debug for OmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmdbClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Builder for `OmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
}

impl OmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (config override, wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set or empty.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<OmdbClient> {
        let api_key = self.api_key.context("api_key is required")?;
        if api_key.trim().is_empty() {
            bail!("api_key must not be empty");
        }
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(OmdbClient {
            http_client,
            base_url,
            api_key,
        })
    }
}

impl OmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> OmdbClientBuilder {
        OmdbClientBuilder::new()
    }

    /// Sends a single GET with the API key and query params. No retries.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(&self, query: &[(&str, &str)]) -> Result<T> {
        let request = self
            .http_client
            .get(self.base_url.clone())
            .query(query)
            .query(&[("apikey", self.api_key.as_str())])
            .build()
            .context("failed to build OMDb request")?;

        tracing::debug!(base_url = %self.base_url, ?query, "OMDb API request");

        let result = self.http_client.execute(request).await;
        let response = result.context("OMDb request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            if let Ok(error_response) = serde_json::from_str::<OmdbResponse>(&body)
                && let Some(message) = error_response.error
            {
                bail!("OMDb API error (HTTP {status}): {message}");
            }
            bail!("OMDb API error (HTTP {status}): {body}");
        }

        let body = response
            .text()
            .await
            .context("failed to read OMDb response body")?;
        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        let parsed = raw_result.context("failed to decode OMDb JSON response")?;
        Ok(parsed)
    }
}

impl MovieApi for OmdbClient {
    #[instrument(skip_all, fields(title = %title))]
    async fn lookup_title(&self, title: &str) -> Result<Lookup> {
        let response: OmdbResponse = self.get_json(&[("t", title)]).await?;
        let lookup = response.into_lookup();
        match &lookup {
            Lookup::Found(record) => {
                tracing::debug!(year = %record.year, "OMDb match");
            }
            Lookup::NotFound { reason } => {
                tracing::debug!(%reason, "OMDb returned no match");
            }
        }
        Ok(lookup)
    }
}
