use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

pub const BASE_CURRENCY: &str = "USD";

/// Network payload from the rate provider.
///
/// Only `rates` is required; the open.er-api fields are read when present.
#[derive(Debug, Deserialize)]
pub struct RatesApiResponse {
    #[serde(default)]
    pub base_code: Option<String>,
    #[serde(default)]
    pub time_last_update_unix: Option<i64>,
    pub rates: serde_json::Map<String, Value>,
}

impl RatesApiResponse {
    pub fn provider_updated_at(&self) -> Option<DateTime<Utc>> {
        self.time_last_update_unix
            .and_then(|t| Utc.timestamp_opt(t, 0).single())
    }
}

/// Immutable capture of currency rates against [`BASE_CURRENCY`].
///
/// Replaced wholesale on every successful refresh, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateSnapshot {
    pub base_currency: String,
    rates: BTreeMap<String, f64>,
    pub captured_at: DateTime<Utc>,
    pub provider_updated_at: Option<DateTime<Utc>>,
}

impl RateSnapshot {
    /// Builds a snapshot, dropping entries that are not positive finite numbers.
    /// The base currency is always present with rate 1.
    pub fn new<I, K>(rates: I, captured_at: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut table = BTreeMap::new();
        for (code, rate) in rates {
            let code = code.into().trim().to_ascii_uppercase();
            if rate.is_finite() && rate > 0.0 {
                table.insert(code, rate);
            } else {
                warn!(%code, rate, "dropping unusable rate");
            }
        }
        table.insert(BASE_CURRENCY.to_string(), 1.0);

        Self {
            base_currency: BASE_CURRENCY.to_string(),
            rates: table,
            captured_at,
            provider_updated_at: None,
        }
    }

    pub fn from_api(response: RatesApiResponse, captured_at: DateTime<Utc>) -> Self {
        let provider_updated_at = response.provider_updated_at();
        let numeric = response.rates.into_iter().filter_map(|(code, value)| match value {
            Value::Number(num) => num.as_f64().map(|rate| (code, rate)),
            other => {
                warn!(%code, value = %other, "non-numeric rate in payload");
                None
            }
        });

        let mut snapshot = Self::new(numeric, captured_at);
        snapshot.provider_updated_at = provider_updated_at;
        snapshot
    }

    /// Rate for `code`, or `None` when the code is absent. Zero rates never get here.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    /// Known codes: base currency first, then alphabetical.
    pub fn codes(&self) -> Vec<String> {
        std::iter::once(self.base_currency.clone())
            .chain(
                self.rates
                    .keys()
                    .filter(|code| **code != self.base_currency)
                    .cloned(),
            )
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_drops_unusable_rates() {
        let snapshot = RateSnapshot::new(
            [("EUR", 0.9), ("BAD", 0.0), ("NEG", -1.0), ("NAN", f64::NAN)],
            Utc::now(),
        );
        assert_eq!(snapshot.rate("EUR"), Some(0.9));
        assert_eq!(snapshot.rate("BAD"), None);
        assert_eq!(snapshot.rate("NEG"), None);
        assert_eq!(snapshot.rate("NAN"), None);
        assert_eq!(snapshot.rate("USD"), Some(1.0));
    }

    #[test]
    fn test_codes_put_base_first() {
        let snapshot = RateSnapshot::new([("AED", 3.67), ("EUR", 0.9), ("USD", 1.0)], Utc::now());
        assert_eq!(snapshot.codes(), vec!["USD", "AED", "EUR"]);
    }

    #[test]
    fn test_from_api_payload() {
        let json = r#"{
            "base_code": "USD",
            "time_last_update_unix": 1700000000,
            "rates": { "USD": 1, "EUR": 0.92, "INR": 83.1, "XXX": "n/a" }
        }"#;
        let response: RatesApiResponse = serde_json::from_str(json).unwrap();
        let snapshot = RateSnapshot::from_api(response, Utc::now());

        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.rate("INR"), Some(83.1));
        assert!(!snapshot.contains("XXX"));
        assert_eq!(
            snapshot.provider_updated_at.map(|t| t.timestamp()),
            Some(1_700_000_000)
        );
    }

    #[test]
    fn test_payload_without_rates_is_rejected() {
        let parsed = serde_json::from_str::<RatesApiResponse>(r#"{ "base_code": "USD" }"#);
        assert!(parsed.is_err());
    }
}
