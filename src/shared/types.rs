use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Partition of convertible units. Order matches the tab order in the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "converter.ts")]
pub enum UnitDomain {
    Currency,
    Weight,
    Length,
}

impl UnitDomain {
    pub const ALL: [UnitDomain; 3] = [UnitDomain::Currency, UnitDomain::Weight, UnitDomain::Length];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitDomain::Currency => "Currency",
            UnitDomain::Weight => "Weight",
            UnitDomain::Length => "Length",
        }
    }

    /// Weight and length resolve rates synchronously from static tables.
    pub fn is_physical(&self) -> bool {
        !matches!(self, UnitDomain::Currency)
    }
}

impl fmt::Display for UnitDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "converter.ts")]
pub struct UnitCatalogEntry {
    pub code: String,
    pub display_label: String,
    /// Size relative to the domain base unit. `None` for currencies, whose rate is fetched.
    pub conversion_factor: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "converter.ts")]
pub struct DefaultUnits {
    pub from_unit: String,
    pub to_unit: String,
}

impl DefaultUnits {
    pub fn new(from_unit: impl Into<String>, to_unit: impl Into<String>) -> Self {
        Self {
            from_unit: from_unit.into(),
            to_unit: to_unit.into(),
        }
    }
}

/// Status indicator for the currency domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "converter.ts")]
pub struct RateStatus {
    pub loading: bool,
    pub error: Option<String>,
    #[ts(type = "string | null")]
    pub last_updated: Option<DateTime<Utc>>,
    /// Provider's own publish time for the current rates, when it sends one.
    #[ts(type = "string | null")]
    pub provider_updated_at: Option<DateTime<Utc>>,
}

/// What the front end renders after every change to the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "converter.ts")]
pub struct ConversionView {
    pub domain: UnitDomain,
    pub amount: String,
    pub from_unit: String,
    pub to_unit: String,
    pub result: String,
}
