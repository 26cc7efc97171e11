//! # FX Types
//!
//! Domain types and the provider port for the currency converter.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Layout
//!
//! - `domain/` - Currencies, rate tables, cache entries, conversions
//! - `ports/` - The `RateProvider` trait that HTTP adapters implement
//! - `dto/` - Wire shapes of the provider's JSON responses
//! - `error/` - Configuration, fetch and conversion error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

pub use domain::{
    Conversion, Currency, CurrencyCode, DEFAULT_RATE_TTL, FetchState, RateCacheEntry, RateTable,
};
pub use dto::{LatestRatesResponse, SUCCESS_RESULT, SupportedCodesResponse};
pub use error::{ConfigError, ConvertError, FetchError};
pub use ports::{Clock, RateProvider, SystemClock};
