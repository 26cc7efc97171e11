//! Domain models for the currency converter.

pub mod currency;
pub mod fetch;
pub mod rates;

pub use currency::{Currency, CurrencyCode};
pub use fetch::FetchState;
pub use rates::{Conversion, DEFAULT_RATE_TTL, RateCacheEntry, RateTable};
