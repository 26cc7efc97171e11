//! Conversion-rate tables and their cache entries.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::currency::CurrencyCode;

/// Freshness window of a cached rate table (3,600,000 ms).
pub const DEFAULT_RATE_TTL: Duration = Duration::from_millis(3_600_000);

/// Multipliers from one base currency to every quoted currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    base: CurrencyCode,
    rates: HashMap<CurrencyCode, f64>,
}

impl RateTable {
    /// Builds a table, keeping only finite, strictly positive multipliers.
    pub fn new(base: CurrencyCode, rates: impl IntoIterator<Item = (CurrencyCode, f64)>) -> Self {
        let rates = rates
            .into_iter()
            .filter(|(_, rate)| rate.is_finite() && *rate > 0.0)
            .collect();
        Self { base, rates }
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    /// Multiplier for `target`, if quoted.
    pub fn get(&self, target: &str) -> Option<f64> {
        self.rates.get(target).copied()
    }

    pub fn contains(&self, target: &str) -> bool {
        self.rates.contains_key(target)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Rates ordered by currency code.
    pub fn sorted(&self) -> Vec<(&CurrencyCode, f64)> {
        let mut entries: Vec<_> = self.rates.iter().map(|(code, rate)| (code, *rate)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

/// A rate table together with the time it was fetched.
#[derive(Debug, Clone)]
pub struct RateCacheEntry {
    pub table: Arc<RateTable>,
    pub fetched_at: DateTime<Utc>,
}

impl RateCacheEntry {
    pub fn new(table: RateTable, fetched_at: DateTime<Utc>) -> Self {
        Self {
            table: Arc::new(table),
            fetched_at,
        }
    }

    pub fn base(&self) -> &CurrencyCode {
        self.table.base()
    }

    /// Whether the entry may still be served at `now`.
    ///
    /// Stale only once its age exceeds `ttl`. A `fetched_at` in the future
    /// (clock moved backwards) is held to the same bound, so a clock step
    /// larger than `ttl` in either direction forces a refetch.
    pub fn is_fresh_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let age = now.signed_duration_since(self.fetched_at);
        let distance = if age < TimeDelta::zero() { -age } else { age };
        match distance.to_std() {
            Ok(distance) => distance <= ttl,
            Err(_) => false,
        }
    }
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: f64,
    pub rate: f64,
    /// `amount * rate`
    pub value: f64,
    pub rates_fetched_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    fn table() -> RateTable {
        RateTable::new(
            code("USD"),
            vec![
                (code("USD"), 1.0),
                (code("BRL"), 5.0),
                (code("EUR"), 0.92),
                (code("BAD"), 0.0),
                (code("NEG"), -1.0),
                (code("NAN"), f64::NAN),
            ],
        )
    }

    #[test]
    fn test_invalid_rates_are_dropped() {
        let table = table();
        assert_eq!(table.len(), 3);
        assert!(!table.contains("BAD"));
        assert!(!table.contains("NEG"));
        assert!(!table.contains("NAN"));
    }

    #[test]
    fn test_lookup() {
        let table = table();
        assert_eq!(table.base().as_str(), "USD");
        assert_eq!(table.get("BRL"), Some(5.0));
        assert_eq!(table.get("JPY"), None);
    }

    #[test]
    fn test_sorted_by_code() {
        let table = table();
        let codes: Vec<&str> = table.sorted().iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(codes, vec!["BRL", "EUR", "USD"]);
    }

    #[test]
    fn test_freshness_window() {
        let fetched_at = Utc::now();
        let entry = RateCacheEntry::new(table(), fetched_at);

        assert!(entry.is_fresh_at(fetched_at, DEFAULT_RATE_TTL));
        assert!(entry.is_fresh_at(fetched_at + TimeDelta::milliseconds(3_600_000), DEFAULT_RATE_TTL));
        assert!(!entry.is_fresh_at(fetched_at + TimeDelta::milliseconds(3_600_001), DEFAULT_RATE_TTL));
    }

    #[test]
    fn test_future_fetch_time_within_window_is_fresh() {
        let now = Utc::now();
        let entry = RateCacheEntry::new(table(), now + TimeDelta::minutes(5));
        assert!(entry.is_fresh_at(now, DEFAULT_RATE_TTL));
    }

    #[test]
    fn test_clock_stepped_back_past_window_is_stale() {
        let now = Utc::now();
        let entry = RateCacheEntry::new(table(), now + TimeDelta::milliseconds(3_600_000));
        assert!(entry.is_fresh_at(now, DEFAULT_RATE_TTL));

        let entry = RateCacheEntry::new(table(), now + TimeDelta::milliseconds(3_600_001));
        assert!(!entry.is_fresh_at(now, DEFAULT_RATE_TTL));

        let entry = RateCacheEntry::new(table(), now + TimeDelta::days(2));
        assert!(!entry.is_fresh_at(now, DEFAULT_RATE_TTL));
    }
}
