//! Port traits (interfaces for adapters).
//!
//! The application layer depends on these traits, not on concrete
//! HTTP clients or wall clocks.

mod clock;
mod provider;

pub use clock::{Clock, SystemClock};
pub use provider::RateProvider;
