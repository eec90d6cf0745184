//! Interactive session state
//!
//! Everything the user controls (active domain, amount text, selected units)
//! lives in one owned value. The operations on it are synchronous and take
//! the current rate snapshot explicitly, so there is no hidden shared state.

use tracing::debug;

use crate::shared::settings::ConverterSettings;
use crate::shared::types::{ConversionView, DefaultUnits, UnitDomain};

use super::conversion::{accept_keystroke, convert};
use super::currency::RateSnapshot;
use super::format::{format_amount_input, format_conversion};
use super::unit_catalog::{catalog_contains, default_units};

#[derive(Debug, Clone, PartialEq)]
pub struct ConverterSession {
    domain: UnitDomain,
    amount: String,
    from_unit: String,
    to_unit: String,
    settings: ConverterSettings,
}

impl Default for ConverterSession {
    fn default() -> Self {
        Self::new(ConverterSettings::default())
    }
}

impl ConverterSession {
    /// Starts on the currency tab with an amount of 1 and nothing selected.
    pub fn new(settings: ConverterSettings) -> Self {
        Self {
            domain: UnitDomain::Currency,
            amount: "1".to_string(),
            from_unit: String::new(),
            to_unit: String::new(),
            settings,
        }
    }

    pub fn domain(&self) -> UnitDomain {
        self.domain
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn from_unit(&self) -> &str {
        &self.from_unit
    }

    pub fn to_unit(&self) -> &str {
        &self.to_unit
    }

    /// Switches the active domain.
    ///
    /// Weight and length always start from their first two units. Currency
    /// keeps the previous selection when it is still in the snapshot; with no
    /// snapshot yet, units are settled by [`Self::on_snapshot_updated`].
    pub fn activate_domain(&mut self, domain: UnitDomain, snapshot: Option<&RateSnapshot>) {
        self.domain = domain;
        match domain {
            UnitDomain::Currency => {
                if snapshot.is_some() {
                    self.ensure_valid_units(snapshot);
                }
            }
            _ => self.apply_defaults(),
        }
    }

    /// Re-validates the selection after a refresh. Snapshots landing while a
    /// physical domain is active leave the selection alone.
    pub fn on_snapshot_updated(&mut self, snapshot: &RateSnapshot) {
        if self.domain == UnitDomain::Currency {
            self.ensure_valid_units(Some(snapshot));
        }
    }

    /// Resets both units to the domain defaults unless both are in the active catalog.
    /// Returns true when a reset happened.
    pub fn ensure_valid_units(&mut self, snapshot: Option<&RateSnapshot>) -> bool {
        if self.units_valid(snapshot) {
            return false;
        }
        debug!(
            domain = %self.domain,
            from = %self.from_unit,
            to = %self.to_unit,
            "selection not in catalog, resetting to defaults"
        );
        self.apply_defaults();
        true
    }

    pub fn units_valid(&self, snapshot: Option<&RateSnapshot>) -> bool {
        catalog_contains(self.domain, &self.from_unit, snapshot)
            && catalog_contains(self.domain, &self.to_unit, snapshot)
    }

    pub fn default_units(&self) -> DefaultUnits {
        default_units(self.domain, &self.settings)
    }

    fn apply_defaults(&mut self) {
        let DefaultUnits { from_unit, to_unit } = self.default_units();
        self.from_unit = from_unit;
        self.to_unit = to_unit;
    }

    /// Applies an edit of the amount field and returns the accepted text.
    pub fn set_amount(&mut self, proposed: &str) -> &str {
        self.amount = accept_keystroke(&self.amount, proposed);
        &self.amount
    }

    pub fn select_from(&mut self, code: impl Into<String>) {
        self.from_unit = code.into();
    }

    pub fn select_to(&mut self, code: impl Into<String>) {
        self.to_unit = code.into();
    }

    pub fn swap_units(&mut self) {
        std::mem::swap(&mut self.from_unit, &mut self.to_unit);
    }

    /// Converted amount formatted for the target unit.
    pub fn result(&self, snapshot: Option<&RateSnapshot>) -> String {
        let conversion = convert(self.domain, &self.amount, &self.from_unit, &self.to_unit, snapshot);
        format_conversion(conversion, &self.to_unit)
    }

    /// Amount field text as displayed, grouped for the source unit.
    pub fn display_amount(&self) -> String {
        format_amount_input(&self.amount, &self.from_unit)
    }

    pub fn view(&self, snapshot: Option<&RateSnapshot>) -> ConversionView {
        ConversionView {
            domain: self.domain,
            amount: self.display_amount(),
            from_unit: self.from_unit.clone(),
            to_unit: self.to_unit.clone(),
            result: self.result(snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn rates(codes: &[(&str, f64)]) -> RateSnapshot {
        RateSnapshot::new(codes.iter().map(|(c, r)| (*c, *r)), Utc::now())
    }

    #[test]
    fn test_new_session_waits_for_rates() {
        let session = ConverterSession::default();
        assert_eq!(session.domain(), UnitDomain::Currency);
        assert_eq!(session.amount(), "1");
        assert_eq!(session.from_unit(), "");
        assert_eq!(session.result(None), "0");
    }

    #[test]
    fn test_first_snapshot_selects_defaults() {
        let mut session = ConverterSession::default();
        session.on_snapshot_updated(&rates(&[("EUR", 0.9)]));
        assert_eq!(session.from_unit(), "USD");
        assert_eq!(session.to_unit(), "EUR");
    }

    #[test]
    fn test_physical_domains_reset_to_first_two_units() {
        let mut session = ConverterSession::default();
        session.activate_domain(UnitDomain::Weight, None);
        assert_eq!((session.from_unit(), session.to_unit()), ("t", "st"));

        session.select_from("kg");
        session.activate_domain(UnitDomain::Length, None);
        assert_eq!((session.from_unit(), session.to_unit()), ("ly", "au"));
    }

    #[test]
    fn test_returning_to_currency_keeps_valid_selection() {
        let snapshot = rates(&[("EUR", 0.9), ("GBP", 0.8)]);
        let mut session = ConverterSession::default();
        session.on_snapshot_updated(&snapshot);
        session.select_from("GBP");

        // Physical domains overwrite the selection, so coming back resets it
        session.activate_domain(UnitDomain::Weight, Some(&snapshot));
        session.activate_domain(UnitDomain::Currency, Some(&snapshot));
        assert_eq!((session.from_unit(), session.to_unit()), ("USD", "EUR"));

        session.select_from("GBP");
        session.activate_domain(UnitDomain::Currency, Some(&snapshot));
        assert_eq!(session.from_unit(), "GBP");
    }

    #[test]
    fn test_currency_missing_from_snapshot_resets() {
        let mut session = ConverterSession::default();
        session.on_snapshot_updated(&rates(&[("EUR", 0.9), ("CHF", 0.88)]));
        session.select_from("CHF");
        session.select_to("EUR");

        let latest = rates(&[("EUR", 0.91)]);
        session.on_snapshot_updated(&latest);
        assert_eq!((session.from_unit(), session.to_unit()), ("USD", "EUR"));
    }

    #[test]
    fn test_snapshot_while_on_weight_leaves_selection() {
        let mut session = ConverterSession::default();
        session.activate_domain(UnitDomain::Weight, None);
        session.on_snapshot_updated(&rates(&[("EUR", 0.9)]));
        assert_eq!(session.from_unit(), "t");
    }

    #[test]
    fn test_amount_edits_and_result() {
        let mut session = ConverterSession::default();
        session.activate_domain(UnitDomain::Weight, None);
        session.select_from("g");
        session.select_to("kg");

        assert_eq!(session.set_amount("1,500"), "1500");
        assert_eq!(session.display_amount(), "1,500");
        assert_eq!(session.result(None), "1.5");

        assert_eq!(session.set_amount("1500.5"), "1500.5");
        assert_eq!(session.set_amount("1500.5."), "1500.5");

        assert_eq!(session.set_amount(""), "");
        assert_eq!(session.result(None), "0");
    }

    #[test]
    fn test_swap_units() {
        let snapshot = rates(&[("EUR", 0.9)]);
        let mut session = ConverterSession::default();
        session.on_snapshot_updated(&snapshot);
        session.set_amount("90");
        session.swap_units();

        let view = session.view(Some(&snapshot));
        assert_eq!(view.from_unit, "EUR");
        assert_eq!(view.to_unit, "USD");
        assert_eq!(view.result, "100");
    }

    #[test]
    fn test_inr_result_uses_lakhs() {
        let snapshot = rates(&[("INR", 83.0)]);
        let mut session = ConverterSession::default();
        session.on_snapshot_updated(&snapshot);
        session.select_to("INR");
        session.set_amount("10000");
        assert_eq!(session.result(Some(&snapshot)), "8.30 L");
    }
}
