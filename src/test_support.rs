//! Shared fixtures for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::features::currency::service::RateSource;
use crate::core::features::currency::types::RatesApiResponse;
use crate::shared::error::{ConverterError, ConverterResult};

/// Rate source that replays a fixed sequence of responses.
pub struct ScriptedSource {
    responses: Mutex<Vec<ConverterResult<RatesApiResponse>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedSource {
    pub fn new(mut responses: Vec<ConverterResult<RatesApiResponse>>) -> Self {
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// One successful response per JSON payload.
    pub fn with_rates(payloads: &[&str]) -> Self {
        Self::new(
            payloads
                .iter()
                .map(|json| Ok(serde_json::from_str(json).expect("fixture payload")))
                .collect(),
        )
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl RateSource for ScriptedSource {
    async fn fetch_rates(&self) -> ConverterResult<RatesApiResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(ConverterError::Network("script exhausted".into())))
    }
}
