use crate::shared::error::{ConverterError, ConverterResult};
use crate::shared::settings::ConverterSettings;
use crate::shared::types::{DefaultUnits, UnitCatalogEntry, UnitDomain};

use super::currency::{currency_label, CurrencyNames, RateSnapshot};

// ============================================================================
// Unit Registry
// ============================================================================

/// Unit definition with its factor relative to the domain base unit
#[derive(Debug, Clone, Copy)]
pub struct UnitDefinition {
    pub symbol: &'static str,
    pub name: &'static str,
    pub base_factor: f64,
}

const fn unit(symbol: &'static str, name: &'static str, base_factor: f64) -> UnitDefinition {
    UnitDefinition { symbol, name, base_factor }
}

// Weight (base: kilograms). Declaration order drives the option list and defaults.
static WEIGHT_UNITS: [UnitDefinition; 8] = [
    unit("t", "Tonnes", 1000.0),
    unit("st", "Stones", 6.35029),
    unit("kg", "Kilograms", 1.0),
    unit("lb", "Pounds", 0.453592),
    unit("oz", "Ounces", 0.0283495),
    unit("g", "Grams", 0.001),
    unit("ct", "Carats", 0.0002),
    unit("mg", "Milligrams", 0.000001),
];

// Length (base: meters)
static LENGTH_UNITS: [UnitDefinition; 11] = [
    unit("ly", "Light Years", 9_460_730_472_580.8),
    unit("au", "Astronomical Units", 149_597_870_700.0),
    unit("mi", "Miles", 1609.34),
    unit("km", "Kilometers", 1000.0),
    unit("m", "Meters", 1.0),
    unit("ft", "Feet", 0.3048),
    unit("in", "Inches", 0.0254),
    unit("cm", "Centimeters", 0.01),
    unit("mm", "Millimeters", 0.001),
    unit("µm", "Micrometers", 0.000001),
    unit("nm", "Nanometers", 0.000000001),
];

/// Static table for a physical domain. Currency has none.
pub fn physical_units(domain: UnitDomain) -> &'static [UnitDefinition] {
    match domain {
        UnitDomain::Weight => &WEIGHT_UNITS,
        UnitDomain::Length => &LENGTH_UNITS,
        UnitDomain::Currency => &[],
    }
}

fn find_unit(domain: UnitDomain, code: &str) -> Option<&'static UnitDefinition> {
    physical_units(domain).iter().find(|def| def.symbol == code)
}

// ============================================================================
// Catalog Queries
// ============================================================================

/// Ordered option list for `domain`.
///
/// Currency entries come from the snapshot's codes and are empty until rates
/// have been fetched at least once.
pub fn list_units(
    domain: UnitDomain,
    snapshot: Option<&RateSnapshot>,
    names: &dyn CurrencyNames,
) -> Vec<UnitCatalogEntry> {
    match domain {
        UnitDomain::Currency => snapshot
            .map(|s| s.codes())
            .unwrap_or_default()
            .into_iter()
            .map(|code| UnitCatalogEntry {
                display_label: currency_label(names, &code),
                code,
                conversion_factor: None,
            })
            .collect(),
        _ => physical_units(domain)
            .iter()
            .map(|def| UnitCatalogEntry {
                code: def.symbol.to_string(),
                display_label: def.name.to_string(),
                conversion_factor: Some(def.base_factor),
            })
            .collect(),
    }
}

/// Human-readable label. Never fails: unknown codes come back as-is.
pub fn label_for(domain: UnitDomain, code: &str, names: &dyn CurrencyNames) -> String {
    match domain {
        UnitDomain::Currency => currency_label(names, code),
        _ => option_label(domain, code),
    }
}

/// Short label shown per option: the bare code for currencies.
pub fn option_label(domain: UnitDomain, code: &str) -> String {
    find_unit(domain, code)
        .map(|def| def.name.to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Registered name of a physical unit, without the code fallback.
pub fn physical_name(domain: UnitDomain, code: &str) -> Option<&'static str> {
    find_unit(domain, code).map(|def| def.name)
}

pub fn factor_for(domain: UnitDomain, code: &str) -> ConverterResult<f64> {
    if domain == UnitDomain::Currency {
        return Err(ConverterError::Lookup(format!(
            "Currency {} has no static factor; use the rate snapshot",
            code
        )));
    }
    find_unit(domain, code)
        .map(|def| def.base_factor)
        .ok_or_else(|| ConverterError::Lookup(format!("Unknown {} unit: {}", domain, code)))
}

/// Whether `code` may be selected in `domain` right now.
pub fn catalog_contains(domain: UnitDomain, code: &str, snapshot: Option<&RateSnapshot>) -> bool {
    match domain {
        UnitDomain::Currency => snapshot.map_or(false, |s| s.contains(code)),
        _ => find_unit(domain, code).is_some(),
    }
}

/// Units selected on first activation or after the selection became invalid.
pub fn default_units(domain: UnitDomain, settings: &ConverterSettings) -> DefaultUnits {
    match domain {
        UnitDomain::Currency => DefaultUnits::new(
            settings.default_currency_from.as_str(),
            settings.default_currency_to.as_str(),
        ),
        _ => {
            let units = physical_units(domain);
            DefaultUnits::new(units[0].symbol, units[1].symbol)
        }
    }
}
