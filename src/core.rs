pub mod converter;
pub mod features;
