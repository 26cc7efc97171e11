//! Wire shapes of the rate provider's JSON responses.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::domain::{Currency, CurrencyCode, RateTable};
use crate::error::FetchError;

/// Value of the `result` field on a successful response.
pub const SUCCESS_RESULT: &str = "success";

fn check_result(result: &str, error_type: Option<&str>) -> Result<(), FetchError> {
    if result == SUCCESS_RESULT {
        return Ok(());
    }
    Err(FetchError::Provider {
        error_type: error_type.unwrap_or(result).to_string(),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Supported codes
// ─────────────────────────────────────────────────────────────────────────────

/// Body of `GET {base}/{key}/codes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportedCodesResponse {
    pub result: String,
    #[serde(rename = "error-type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// `[[code, name], ...]`
    #[serde(default)]
    pub supported_codes: Vec<(String, String)>,
}

impl SupportedCodesResponse {
    /// Converts into domain currencies.
    ///
    /// Entries with unusable codes are skipped; for duplicate codes the
    /// first entry wins.
    pub fn into_currencies(self) -> Result<Vec<Currency>, FetchError> {
        check_result(&self.result, self.error_type.as_deref())?;

        let mut seen = HashSet::new();
        let currencies = self
            .supported_codes
            .into_iter()
            .filter_map(|(code, name)| {
                let code = CurrencyCode::new(&code).ok()?;
                seen.insert(code.clone()).then(|| Currency::new(code, name))
            })
            .collect();
        Ok(currencies)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Latest rates
// ─────────────────────────────────────────────────────────────────────────────

/// Body of `GET {base}/{key}/latest/{BASE}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestRatesResponse {
    pub result: String,
    #[serde(rename = "error-type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_last_update_unix: Option<i64>,
    #[serde(default)]
    pub conversion_rates: HashMap<String, f64>,
}

impl LatestRatesResponse {
    /// Converts into a rate table for `requested`.
    ///
    /// Fails if the provider answered for a different base than asked.
    pub fn into_rate_table(self, requested: &CurrencyCode) -> Result<RateTable, FetchError> {
        check_result(&self.result, self.error_type.as_deref())?;

        if let Some(base_code) = &self.base_code {
            if !base_code.eq_ignore_ascii_case(requested.as_str()) {
                return Err(FetchError::Parse(format!(
                    "asked for {} rates, got {}",
                    requested, base_code
                )));
            }
        }

        let rates = self
            .conversion_rates
            .into_iter()
            .filter_map(|(code, rate)| CurrencyCode::new(&code).ok().map(|code| (code, rate)));
        Ok(RateTable::new(requested.clone(), rates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    #[test]
    fn test_parse_supported_codes() {
        let body = r#"{
            "result": "success",
            "documentation": "https://www.exchangerate-api.com/docs",
            "supported_codes": [["USD", "United States Dollar"], ["BRL", "Brazilian Real"], ["USD", "Duplicate"]]
        }"#;
        let resp: SupportedCodesResponse = serde_json::from_str(body).unwrap();
        let currencies = resp.into_currencies().unwrap();

        assert_eq!(currencies.len(), 2);
        assert_eq!(currencies[0].code.as_str(), "USD");
        assert_eq!(currencies[0].name, "United States Dollar");
        assert_eq!(currencies[1].name, "Brazilian Real");
    }

    #[test]
    fn test_supported_codes_error_result() {
        let body = r#"{"result": "error", "error-type": "invalid-key"}"#;
        let resp: SupportedCodesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            resp.into_currencies(),
            Err(FetchError::Provider {
                error_type: "invalid-key".into()
            })
        );
    }

    #[test]
    fn test_parse_latest_rates() {
        let body = r#"{
            "result": "success",
            "base_code": "USD",
            "time_last_update_unix": 1700000000,
            "conversion_rates": {"USD": 1, "BRL": 5.0, "EUR": 0.92}
        }"#;
        let resp: LatestRatesResponse = serde_json::from_str(body).unwrap();
        let table = resp.into_rate_table(&usd()).unwrap();

        assert_eq!(table.base(), &usd());
        assert_eq!(table.get("BRL"), Some(5.0));
        assert_eq!(table.get("USD"), Some(1.0));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_latest_rates_non_success_without_error_type() {
        let body = r#"{"result": "failure", "conversion_rates": {"BRL": 5.0}}"#;
        let resp: LatestRatesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            resp.into_rate_table(&usd()),
            Err(FetchError::Provider {
                error_type: "failure".into()
            })
        );
    }

    #[test]
    fn test_latest_rates_base_mismatch() {
        let body = r#"{"result": "success", "base_code": "EUR", "conversion_rates": {"BRL": 6.0}}"#;
        let resp: LatestRatesResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            resp.into_rate_table(&usd()),
            Err(FetchError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_result_field_is_parse_error() {
        let body = r#"{"conversion_rates": {"BRL": 5.0}}"#;
        let err: FetchError = serde_json::from_str::<LatestRatesResponse>(body)
            .unwrap_err()
            .into();
        assert!(matches!(err, FetchError::Parse(_)));
    }
}
