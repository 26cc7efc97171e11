//! Exchange rate provider port.
//!
//! Implementations can be HTTP clients, mock providers, etc.

use crate::domain::{Currency, CurrencyCode, RateTable};
use crate::error::FetchError;

/// Port trait for exchange rate providers.
///
/// Each call is exactly one round trip; caching belongs to the caller.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync + 'static {
    /// Fetches every currency the provider can quote.
    async fn supported_currencies(&self) -> Result<Vec<Currency>, FetchError>;

    /// Fetches the latest multipliers from `base` to every quoted currency.
    async fn latest_rates(&self, base: &CurrencyCode) -> Result<RateTable, FetchError>;
}
