//! Rate Application Service
//!
//! Mediates every call to the rate provider and keeps two caches:
//! the supported-currency list (fetched once) and one rate table per base
//! currency (refetched once its freshness window has passed).

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use fx_types::{
    Clock, Conversion, ConvertError, Currency, CurrencyCode, DEFAULT_RATE_TTL, FetchError,
    FetchState, RateCacheEntry, RateProvider, RateTable, SystemClock,
};

/// Application service for currency listing and conversion.
///
/// Lookups never hold a lock across a provider call, so two concurrent
/// first calls may both fetch. Both store an equivalent value.
pub struct RateService<P: RateProvider> {
    provider: P,
    clock: Arc<dyn Clock>,
    rate_ttl: Duration,
    currencies: RwLock<FetchState<Arc<Vec<Currency>>>>,
    rates: DashMap<CurrencyCode, RateCacheEntry>,
}

impl<P: RateProvider> RateService<P> {
    /// Creates a service with the default one-hour freshness window.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            clock: Arc::new(SystemClock),
            rate_ttl: DEFAULT_RATE_TTL,
            currencies: RwLock::new(FetchState::NotFetched),
            rates: DashMap::new(),
        }
    }

    /// Overrides how long a fetched rate table may be served.
    pub fn with_rate_ttl(mut self, ttl: Duration) -> Self {
        self.rate_ttl = ttl;
        self
    }

    /// Replaces the time source used to stamp and age cache entries.
    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Returns a reference to the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn rate_ttl(&self) -> Duration {
        self.rate_ttl
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Currency list
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists supported currencies, fetching them on first use.
    pub async fn list_currencies(&self) -> Result<Vec<Currency>, FetchError> {
        self.ensure_currencies()
            .await
            .map(|list| (*list).clone())
    }

    /// Current state of the currency list, without any I/O.
    pub async fn currency_state(&self) -> FetchState<Arc<Vec<Currency>>> {
        self.currencies.read().await.clone()
    }

    async fn ensure_currencies(&self) -> Result<Arc<Vec<Currency>>, FetchError> {
        if let FetchState::Fetched(list) = &*self.currencies.read().await {
            debug!("Currency list cache hit");
            return Ok(Arc::clone(list));
        }

        info!("Fetching supported currencies");
        let result = self.provider.supported_currencies().await.map(Arc::new);

        let mut state = self.currencies.write().await;
        match &result {
            Ok(list) => *state = FetchState::Fetched(Arc::clone(list)),
            // a concurrent caller may have succeeded meanwhile
            Err(err) if !state.is_fetched() => {
                warn!(error = %err, "Currency list fetch failed");
                *state = FetchState::Failed(err.clone());
            }
            Err(err) => warn!(error = %err, "Currency list fetch failed"),
        }
        result
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Rate tables
    // ─────────────────────────────────────────────────────────────────────────────

    /// Returns the rate table for `base`, refetching it when stale.
    pub async fn get_rates(&self, base: &CurrencyCode) -> Result<Arc<RateTable>, FetchError> {
        self.fresh_entry(base).await.map(|entry| entry.table)
    }

    /// Cached entry for `base`, fresh or not, without any I/O.
    pub fn cached_rates(&self, base: &CurrencyCode) -> Option<RateCacheEntry> {
        self.rates.get(base).map(|entry| entry.value().clone())
    }

    #[instrument(skip_all, fields(base = %base))]
    async fn fresh_entry(&self, base: &CurrencyCode) -> Result<RateCacheEntry, FetchError> {
        if let Some(entry) = self.rates.get(base) {
            if entry.is_fresh_at(self.clock.now(), self.rate_ttl) {
                debug!("Rate cache hit");
                return Ok(entry.value().clone());
            }
            debug!(fetched_at = %entry.fetched_at, "Rate cache entry stale");
        }

        info!("Fetching latest rates");
        match self.provider.latest_rates(base).await {
            Ok(table) => {
                if table.is_empty() {
                    warn!("Provider quoted no usable rates");
                }
                let entry = RateCacheEntry::new(table, self.clock.now());
                self.rates.insert(base.clone(), entry.clone());
                Ok(entry)
            }
            Err(err) => {
                warn!(error = %err, "Rate fetch failed");
                Err(err)
            }
        }
    }

    /// Drops the currency list and every cached rate table.
    pub async fn invalidate(&self) {
        *self.currencies.write().await = FetchState::NotFetched;
        self.rates.clear();
        debug!("Caches cleared");
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts `amount` from one currency to another.
    pub async fn convert(&self, from: &str, to: &str, amount: f64) -> Result<f64, ConvertError> {
        self.quote(from, to, amount).await.map(|c| c.value)
    }

    /// Multiplier from `from` to `to`.
    pub async fn rate(&self, from: &str, to: &str) -> Result<f64, ConvertError> {
        let (from, to) = self.resolve_pair(from, to).await?;
        let entry = self.fresh_entry(&from).await?;
        lookup(&entry.table, &from, &to)
    }

    /// Converts `amount` and reports the rate and its fetch time.
    ///
    /// Any finite amount is accepted, negative ones included.
    #[instrument(skip(self))]
    pub async fn quote(&self, from: &str, to: &str, amount: f64) -> Result<Conversion, ConvertError> {
        if !amount.is_finite() {
            return Err(ConvertError::InvalidAmount(amount));
        }

        let (from, to) = self.resolve_pair(from, to).await?;
        let entry = self.fresh_entry(&from).await?;
        let rate = lookup(&entry.table, &from, &to)?;

        Ok(Conversion {
            from,
            to,
            amount,
            rate,
            value: amount * rate,
            rates_fetched_at: entry.fetched_at,
        })
    }

    /// Parses both codes and checks them against the supported list,
    /// loading the list first if it was never fetched.
    async fn resolve_pair(
        &self,
        from: &str,
        to: &str,
    ) -> Result<(CurrencyCode, CurrencyCode), ConvertError> {
        let from = CurrencyCode::new(from)?;
        let to = CurrencyCode::new(to)?;

        let currencies = self.ensure_currencies().await?;
        for code in [&from, &to] {
            if !currencies.iter().any(|c| &c.code == code) {
                return Err(ConvertError::InvalidCurrency(code.to_string()));
            }
        }
        Ok((from, to))
    }
}

fn lookup(table: &RateTable, from: &CurrencyCode, to: &CurrencyCode) -> Result<f64, ConvertError> {
    table
        .get(to.as_str())
        .ok_or_else(|| ConvertError::RateNotFound {
            from: from.to_string(),
            to: to.to_string(),
        })
}
