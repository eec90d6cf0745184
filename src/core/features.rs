//! Conversion features
//!
//! Leaves first: the static unit catalog and the currency rate service, then
//! the conversion engine, formatting and search built on them, and the
//! session that ties them to user input.

pub mod currency;
pub mod unit_catalog;
pub mod conversion;
pub mod format;
pub mod search;
pub mod session;
