//! Front-end facing converter service
//!
//! Wires the rate resolver, the currency name resolver and the static
//! catalogs together behind the calls the UI makes: domain switches, option
//! lists, search and the rendered conversion.

use std::sync::Arc;

use tracing::{debug, info};

use crate::core::features::currency::{CurrencyNames, EnglishCurrencyNames, RateResolver, RateSnapshot};
use crate::core::features::search::filter_units;
use crate::core::features::session::ConverterSession;
use crate::core::features::unit_catalog::{label_for, list_units};
use crate::shared::error::ConverterResult;
use crate::shared::settings::ConverterSettings;
use crate::shared::types::{ConversionView, RateStatus, UnitCatalogEntry, UnitDomain};

pub struct Converter {
    resolver: Arc<RateResolver>,
    names: Arc<dyn CurrencyNames>,
    settings: ConverterSettings,
}

impl Converter {
    pub fn new(resolver: Arc<RateResolver>, names: Arc<dyn CurrencyNames>, settings: ConverterSettings) -> Self {
        Self {
            resolver,
            names,
            settings,
        }
    }

    /// HTTP-backed converter with English currency names.
    pub fn from_settings(settings: ConverterSettings) -> ConverterResult<Self> {
        let resolver = Arc::new(RateResolver::from_settings(&settings)?);
        Ok(Self::new(resolver, Arc::new(EnglishCurrencyNames), settings))
    }

    pub fn new_session(&self) -> ConverterSession {
        ConverterSession::new(self.settings.clone())
    }

    pub fn resolver(&self) -> &Arc<RateResolver> {
        &self.resolver
    }

    pub fn snapshot(&self) -> Option<Arc<RateSnapshot>> {
        self.resolver.snapshot()
    }

    pub fn status(&self) -> RateStatus {
        self.resolver.status()
    }

    /// Switches `session` to `domain`, fetching currency rates on first use.
    ///
    /// A failed fetch is not an error for the caller: it shows up in
    /// [`Self::status`] and any cached rates stay usable.
    pub async fn switch_domain(&self, session: &mut ConverterSession, domain: UnitDomain) -> RateStatus {
        session.activate_domain(domain, self.snapshot().as_deref());

        if self.resolver.needs_refresh(domain) {
            info!("first currency activation, fetching rates");
            if let Ok(snapshot) = self.resolver.refresh_currency_rates().await {
                session.on_snapshot_updated(&snapshot);
            }
        }
        self.status()
    }

    /// Re-fetches currency rates on request and re-validates the selection.
    pub async fn refresh(&self, session: &mut ConverterSession) -> RateStatus {
        if let Ok(snapshot) = self.resolver.refresh_currency_rates().await {
            session.on_snapshot_updated(&snapshot);
        }
        self.status()
    }

    pub fn list_units(&self, domain: UnitDomain) -> Vec<UnitCatalogEntry> {
        list_units(domain, self.snapshot().as_deref(), self.names.as_ref())
    }

    /// Options for `domain` matching the selector's filter box.
    pub fn search(&self, domain: UnitDomain, query: &str) -> Vec<UnitCatalogEntry> {
        let entries = self.list_units(domain);
        let found: Vec<UnitCatalogEntry> = filter_units(domain, &entries, query, self.names.as_ref())
            .into_iter()
            .cloned()
            .collect();
        debug!(%domain, query, matches = found.len(), "unit search");
        found
    }

    pub fn label_for(&self, domain: UnitDomain, code: &str) -> String {
        label_for(domain, code, self.names.as_ref())
    }

    pub fn view(&self, session: &ConverterSession) -> ConversionView {
        session.view(self.snapshot().as_deref())
    }
}
