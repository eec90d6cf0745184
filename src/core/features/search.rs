//! Filter predicate for the unit selector.

use crate::shared::types::{UnitCatalogEntry, UnitDomain};

use super::currency::CurrencyNames;
use super::unit_catalog::physical_name;

/// Case-insensitive substring match against the unit's code, display label,
/// full name and symbol. Any one field is enough; an empty query matches all.
///
/// A field whose resolution fails is treated as empty, so a malformed
/// currency code can still match on its raw code.
pub fn matches(
    domain: UnitDomain,
    entry: &UnitCatalogEntry,
    query: &str,
    names: &dyn CurrencyNames,
) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();

    let (full_name, symbol) = match domain {
        UnitDomain::Currency => (
            names.resolve_name(&entry.code).unwrap_or_default(),
            names.resolve_symbol(&entry.code).unwrap_or_default(),
        ),
        _ => (
            physical_name(domain, &entry.code).unwrap_or_default().to_string(),
            String::new(),
        ),
    };

    [entry.code.as_str(), entry.display_label.as_str(), full_name.as_str(), symbol.as_str()]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

/// Entries matching `query`, in their original order.
pub fn filter_units<'a>(
    domain: UnitDomain,
    entries: &'a [UnitCatalogEntry],
    query: &str,
    names: &dyn CurrencyNames,
) -> Vec<&'a UnitCatalogEntry> {
    entries
        .iter()
        .filter(|entry| matches(domain, entry, query, names))
        .collect()
}
