//! Color Normalization Module
//! Clamps outlier countries so they don't wash out the color scale.

use crate::stats::aggregator::{AggregateError, CountryAggregate};
use tracing::info;

pub struct ColorNormalizer;

impl ColorNormalizer {
    /// Largest film count among countries not in `outliers`.
    ///
    /// Errors when no such country exists (every country is an outlier, or
    /// there are no countries at all).
    pub fn reference_max(
        aggregates: &[CountryAggregate],
        outliers: &[String],
    ) -> Result<u64, AggregateError> {
        aggregates
            .iter()
            .filter(|a| !outliers.contains(&a.country))
            .map(|a| a.film_count)
            .max()
            .ok_or_else(|| AggregateError::NoReferenceCountries {
                outliers: outliers.to_vec(),
            })
    }

    /// Set each outlier's adjusted count to the reference max; every other
    /// country keeps its own count. Film counts are untouched.
    pub fn normalize(
        aggregates: Vec<CountryAggregate>,
        outliers: &[String],
    ) -> Result<(Vec<CountryAggregate>, u64), AggregateError> {
        let max_other = Self::reference_max(&aggregates, outliers)?;
        info!("Clamping {:?} to a color count of {}", outliers, max_other);

        let adjusted = aggregates
            .into_iter()
            .map(|a| {
                let adjusted_count = if outliers.contains(&a.country) {
                    max_other
                } else {
                    a.film_count
                };
                CountryAggregate {
                    adjusted_count,
                    ..a
                }
            })
            .collect();
        Ok((adjusted, max_other))
    }
}
