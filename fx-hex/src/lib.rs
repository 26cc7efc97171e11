//! # FX Hex
//!
//! Application service for the currency converter.
//!
//! `RateService` is generic over `P: RateProvider`, so the HTTP adapter is
//! injected by the binary and tests swap in a counting mock. It owns the
//! only mutable state in the system: the lazily loaded currency list and
//! the per-base rate cache.

pub mod service;


pub use service::RateService;
