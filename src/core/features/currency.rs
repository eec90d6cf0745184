//! Currency domain
//!
//! Live USD-based rates fetched on demand, plus name and symbol resolution
//! for currency labels.

pub mod names;
pub mod service;
pub mod types;

pub use names::{currency_label, CurrencyNames, EnglishCurrencyNames};
pub use service::{HttpRateSource, RateResolver, RateSource};
pub use types::{RateSnapshot, BASE_CURRENCY};
