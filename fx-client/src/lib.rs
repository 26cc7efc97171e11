//! # FX Client
//!
//! A typed client for the ExchangeRate-API v6 HTTP API, implementing the
//! `RateProvider` port.
//!
//! The API key travels as a path segment, so it is kept out of logs and
//! error messages.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use fx_types::{
    ConfigError, Currency, CurrencyCode, FetchError, LatestRatesResponse, RateProvider, RateTable,
    SupportedCodesResponse,
};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Public endpoint of the provider.
pub const DEFAULT_BASE_URL: &str = "https://v6.exchangerate-api.com/v6";

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// ExchangeRate-API client.
pub struct ExchangeRateClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl ExchangeRateClient {
    /// Creates a client against the public endpoint.
    ///
    /// Fails with `ConfigError::MissingApiKey` when the key is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            http: build_http(DEFAULT_TIMEOUT)?,
        })
    }

    /// Points the client at another base URL (a mirror or a test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');

        let parsed =
            Url::parse(trimmed).map_err(|_| ConfigError::InvalidBaseUrl(base_url.clone()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }

        self.base_url = trimmed.to_string();
        Ok(self)
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        self.http = build_http(timeout)?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.api_key, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        debug!(endpoint = path, "Requesting provider");
        let resp = self
            .http
            .get(self.endpoint(path))
            .send()
            .await
            .map_err(transport_error)?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, FetchError> {
        let status = resp.status();
        let body = resp.text().await.map_err(transport_error)?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        // error bodies still carry the provider's "error-type" when it answered
        let error_type = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("error-type")
                    .and_then(|e| e.as_str())
                    .map(String::from)
            });
        Err(match error_type {
            Some(error_type) => FetchError::Provider { error_type },
            None => FetchError::Status {
                status: status.as_u16(),
            },
        })
    }
}

impl fmt::Debug for ExchangeRateClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeRateClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl RateProvider for ExchangeRateClient {
    async fn supported_currencies(&self) -> Result<Vec<Currency>, FetchError> {
        let resp: SupportedCodesResponse = self.get("codes").await?;
        let currencies = resp.into_currencies()?;
        info!(count = currencies.len(), "Fetched supported currencies");
        Ok(currencies)
    }

    async fn latest_rates(&self, base: &CurrencyCode) -> Result<RateTable, FetchError> {
        let resp: LatestRatesResponse = self.get(&format!("latest/{}", base)).await?;
        let table = resp.into_rate_table(base)?;
        info!(base = %base, count = table.len(), "Fetched latest rates");
        Ok(table)
    }
}

fn build_http(timeout: Duration) -> Result<Client, ConfigError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}

/// Drops the request URL, which embeds the API key.
fn transport_error(err: reqwest::Error) -> FetchError {
    FetchError::Transport(err.without_url().to_string())
}
