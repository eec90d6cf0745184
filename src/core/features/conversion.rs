//! Conversion engine
//!
//! Normalizes every conversion through the domain base unit: kilograms,
//! meters, or the snapshot's base currency.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::shared::error::{ConverterError, ConverterResult};
use crate::shared::types::UnitDomain;

use super::currency::RateSnapshot;
use super::unit_catalog::factor_for;

/// Outcome of a conversion. `Unavailable` is displayed as `"0"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conversion {
    Value(f64),
    Unavailable,
}

impl Conversion {
    pub fn value(&self) -> Option<f64> {
        match self {
            Conversion::Value(v) => Some(*v),
            Conversion::Unavailable => None,
        }
    }
}

static RE_NON_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^0-9.]").expect("Failed to compile amount filter")
});

/// Applies one edit of the amount field.
///
/// Everything but digits and `.` is stripped from `proposed`. An edit that
/// would leave two decimal points is dropped and `current` is returned.
/// Intermediate states such as `"12."` are kept verbatim.
pub fn accept_keystroke(current: &str, proposed: &str) -> String {
    let clean = RE_NON_AMOUNT.replace_all(proposed, "");
    if clean.matches('.').count() > 1 {
        debug!(current, proposed, "rejected second decimal point");
        return current.to_string();
    }
    clean.into_owned()
}

/// Parses amount text after removing grouping separators.
pub fn parse_amount(raw: &str) -> ConverterResult<f64> {
    let cleaned = raw.replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(ConverterError::Input("Empty amount".to_string()));
    }
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ConverterError::Input(format!("Not a number: {}", raw))),
    }
}

/// Converts `amount_raw` from one unit to another within `domain`.
///
/// Never fails: malformed amounts and unknown units yield
/// [`Conversion::Unavailable`].
pub fn convert(
    domain: UnitDomain,
    amount_raw: &str,
    from_unit: &str,
    to_unit: &str,
    snapshot: Option<&RateSnapshot>,
) -> Conversion {
    let result = parse_amount(amount_raw)
        .and_then(|amount| convert_value(domain, amount, from_unit, to_unit, snapshot));

    match result {
        Ok(value) if value.is_finite() => Conversion::Value(value),
        Ok(value) => {
            debug!(%domain, from_unit, to_unit, value, "non-finite conversion result");
            Conversion::Unavailable
        }
        Err(err) => {
            debug!(%domain, from_unit, to_unit, error = %err, "conversion unavailable");
            Conversion::Unavailable
        }
    }
}

/// Numeric conversion with explicit lookup errors.
pub fn convert_value(
    domain: UnitDomain,
    amount: f64,
    from_unit: &str,
    to_unit: &str,
    snapshot: Option<&RateSnapshot>,
) -> ConverterResult<f64> {
    match domain {
        UnitDomain::Currency => {
            let snapshot = snapshot
                .ok_or_else(|| ConverterError::Lookup("No currency rates loaded".to_string()))?;
            let from_rate = currency_rate(snapshot, from_unit)?;
            let to_rate = currency_rate(snapshot, to_unit)?;
            if from_unit == to_unit {
                return Ok(amount);
            }

            // Cross-rate through the base currency: (amount / rate_from) * rate_to
            let in_base = amount / from_rate;
            Ok(in_base * to_rate)
        }
        UnitDomain::Weight | UnitDomain::Length => {
            let from_factor = factor_for(domain, from_unit)?;
            let to_factor = factor_for(domain, to_unit)?;
            if from_unit == to_unit {
                return Ok(amount);
            }

            let in_base = amount * from_factor;
            Ok(in_base / to_factor)
        }
    }
}

fn currency_rate(snapshot: &RateSnapshot, code: &str) -> ConverterResult<f64> {
    snapshot
        .rate(code)
        .filter(|rate| rate.is_finite() && *rate != 0.0)
        .ok_or_else(|| ConverterError::Lookup(format!("Currency not supported: {}", code)))
}
