use std::sync::{Arc, Mutex, PoisonError, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::shared::error::{ConverterError, ConverterResult, ERR_CURRENCY_SERVICE};
use crate::shared::settings::ConverterSettings;
use crate::shared::types::{RateStatus, UnitDomain};

use super::types::{RateSnapshot, RatesApiResponse, BASE_CURRENCY};

/// Source of USD-based rate tables.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rates(&self) -> ConverterResult<RatesApiResponse>;
}

/// Fetches the rate table over HTTP with a single GET.
pub struct HttpRateSource {
    http: Client,
    url: String,
}

impl HttpRateSource {
    pub fn new(settings: &ConverterSettings) -> ConverterResult<Self> {
        let http = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| ConverterError::Network(e.to_string()))?;

        Ok(Self {
            http,
            url: settings.rates_url.clone(),
        })
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch_rates(&self) -> ConverterResult<RatesApiResponse> {
        debug!(url = %self.url, "fetching currency rates");
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ConverterError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ConverterError::Network(format!(
                "Failed to fetch rates: {}",
                resp.status()
            )));
        }

        let json: RatesApiResponse = resp
            .json()
            .await
            .map_err(|e| ConverterError::Parse(format!("Invalid response: {}", e)))?;

        if let Some(base) = json.base_code.as_deref() {
            if !base.eq_ignore_ascii_case(BASE_CURRENCY) {
                return Err(ConverterError::Parse(format!(
                    "Expected {} based rates, got {}",
                    BASE_CURRENCY, base
                )));
            }
        }

        Ok(json)
    }
}

/// Owns the currency snapshot and the status shown next to it.
///
/// Exactly one writer replaces the snapshot; readers clone the `Arc` and never
/// observe a partially built table. The caller must not start a second refresh
/// while one is in flight.
pub struct RateResolver {
    source: Arc<dyn RateSource>,
    snapshot: RwLock<Option<Arc<RateSnapshot>>>,
    status: Mutex<RateStatus>,
}

impl RateResolver {
    pub fn new(source: Arc<dyn RateSource>) -> Self {
        Self {
            source,
            snapshot: RwLock::new(None),
            status: Mutex::new(RateStatus::default()),
        }
    }

    pub fn from_settings(settings: &ConverterSettings) -> ConverterResult<Self> {
        Ok(Self::new(Arc::new(HttpRateSource::new(settings)?)))
    }

    /// Latest successful snapshot, if any.
    pub fn snapshot(&self) -> Option<Arc<RateSnapshot>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn status(&self) -> RateStatus {
        self.status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Currency fetches once, on first activation. Physical domains never fetch.
    pub fn needs_refresh(&self, domain: UnitDomain) -> bool {
        domain == UnitDomain::Currency && self.snapshot().is_none() && !self.status().loading
    }

    /// Rates for `domain`: `None` for weight and length, which use static factors.
    /// For currency, the cached snapshot or a fresh fetch when nothing is cached.
    pub async fn ensure_rates(&self, domain: UnitDomain) -> ConverterResult<Option<Arc<RateSnapshot>>> {
        if domain.is_physical() {
            return Ok(None);
        }
        match self.snapshot() {
            Some(existing) => Ok(Some(existing)),
            None => self.refresh_currency_rates().await.map(Some),
        }
    }

    /// Fetches a new table and swaps it in.
    ///
    /// On failure the previous snapshot stays in place and `status().error`
    /// carries the user-facing message.
    pub async fn refresh_currency_rates(&self) -> ConverterResult<Arc<RateSnapshot>> {
        self.update_status(|status| {
            status.loading = true;
            status.error = None;
        });

        match self.source.fetch_rates().await {
            Ok(response) => {
                let snapshot = Arc::new(RateSnapshot::from_api(response, Utc::now()));
                info!(rates = snapshot.len(), "currency rates refreshed");
                self.replace_snapshot(snapshot.clone());
                self.update_status(|status| {
                    status.loading = false;
                    status.last_updated = Some(snapshot.captured_at);
                    status.provider_updated_at = snapshot.provider_updated_at;
                });
                Ok(snapshot)
            }
            Err(err) => {
                warn!(error = %err, stale = self.snapshot().is_some(), "currency refresh failed");
                let message = err.user_message().unwrap_or(ERR_CURRENCY_SERVICE);
                self.update_status(|status| {
                    status.loading = false;
                    status.error = Some(message.to_string());
                });
                Err(err)
            }
        }
    }

    fn replace_snapshot(&self, snapshot: Arc<RateSnapshot>) {
        let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(snapshot);
    }

    fn update_status(&self, apply: impl FnOnce(&mut RateStatus)) {
        let mut guard = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        apply(&mut *guard);
    }
}
