//! Conversion and result-presentation core for the converter front end.
//!
//! Converts amounts between units of one domain (currency, weight, length)
//! and renders the result for display. Currency rates are fetched from a
//! USD-based provider; weight and length use static factors.

pub mod core;
pub mod shared;

#[cfg(test)]
mod test_support;

pub use crate::core::converter::Converter;
pub use crate::core::features::conversion::{accept_keystroke, convert, Conversion};
pub use crate::core::features::currency::{
    CurrencyNames, EnglishCurrencyNames, HttpRateSource, RateResolver, RateSnapshot, RateSource,
};
pub use crate::core::features::format::{format_amount_input, format_result};
pub use crate::core::features::search::matches;
pub use crate::core::features::session::ConverterSession;
pub use crate::core::features::unit_catalog::{default_units, factor_for, label_for, list_units};
pub use crate::shared::error::{ConverterError, ConverterResult};
pub use crate::shared::settings::ConverterSettings;
pub use crate::shared::types::{
    ConversionView, DefaultUnits, RateStatus, UnitCatalogEntry, UnitDomain,
};
