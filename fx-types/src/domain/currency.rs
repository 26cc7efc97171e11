//! Currency identifiers and display names.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::error::ConvertError;

/// An ISO 4217-like currency identifier, always trimmed and upper-case.
///
/// Implements `Borrow<str>` so maps keyed by `CurrencyCode` can be queried
/// with a plain `&str`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Normalizes and validates a code.
    ///
    /// Rejects empty input and anything that is not ASCII alphanumeric.
    pub fn new(code: &str) -> Result<Self, ConvertError> {
        let normalized = code.trim().to_ascii_uppercase();
        if normalized.is_empty() || !normalized.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConvertError::InvalidCurrency(code.to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Borrow<str> for CurrencyCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A currency supported by the rate provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub code: CurrencyCode,
    /// Human-readable label, e.g. "Brazilian Real".
    pub name: String,
}

impl Currency {
    pub fn new(code: CurrencyCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code, self.name)
    }
}
