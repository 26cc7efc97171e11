//! Error types for the currency converter.

/// Construction-time configuration errors. Always fatal.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("API key missing")]
    MissingApiKey,

    #[error("Invalid provider base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("HTTP client setup failed: {0}")]
    HttpClient(String),
}

/// Failures talking to the rate provider (transport, status, payload).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Provider returned HTTP {status}")]
    Status { status: u16 },

    #[error("Provider reported failure: {error_type}")]
    Provider { error_type: String },

    #[error("Malformed provider response: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

/// Errors returned by conversion operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    #[error("Rate not found for {from} -> {to}")]
    RateNotFound { from: String, to: String },

    /// NaN or infinite amount.
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    /// The provider could not be reached or answered with a failure.
    #[error("Conversion unavailable: {0}")]
    Unavailable(#[from] FetchError),
}

impl ConvertError {
    /// True when the failure came from the provider rather than the input.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ConvertError::Unavailable(_))
    }
}
