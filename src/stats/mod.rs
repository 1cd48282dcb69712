//! Stats module - per-country aggregation and color scaling

mod aggregator;
mod normalizer;

pub use aggregator::{AggregateError, Aggregator, CountryAggregate};
pub use normalizer::ColorNormalizer;
