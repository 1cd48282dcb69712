//! Country Aggregation Module
//! Groups submissions by country into counts and ordered title listings.

use crate::data::{DataProcessor, SubmissionRow};
use polars::prelude::*;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Separator between formatted titles in a country listing.
pub const LINE_BREAK: &str = "<br>";

const FILM_COUNT: &str = "Film Count";

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Film counts and title listings disagree for: {}", .countries.join(", "))]
    CountLabelMismatch { countries: Vec<String> },
    #[error("No countries outside the outlier list {outliers:?} to scale colors against")]
    NoReferenceCountries { outliers: Vec<String> },
}

/// Everything the map shows for one country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryAggregate {
    pub country: String,
    /// True number of submissions; this is what tooltips show.
    pub film_count: u64,
    /// Magnitude used only for the color scale.
    pub adjusted_count: u64,
    /// Formatted titles in (season, title) order.
    pub titles: Vec<String>,
}

impl CountryAggregate {
    /// Titles joined with the line-break token.
    pub fn joined_titles(&self) -> String {
        self.titles.join(LINE_BREAK)
    }
}

/// Country grouping over loaded submissions.
pub struct Aggregator;

impl Aggregator {
    /// Build one aggregate per country seen in the data, ordered by country.
    ///
    /// `sorted_rows` must already be in listing order; titles are appended as
    /// they are met and never re-sorted.
    pub fn aggregate(
        frame: &DataFrame,
        country_column: &str,
        sorted_rows: &[SubmissionRow],
    ) -> Result<Vec<CountryAggregate>, AggregateError> {
        let counts = Self::count_by_country(frame, country_column)?;
        let titles = Self::titles_by_country(sorted_rows);
        Self::merge(counts, titles)
    }

    /// Number of rows per country.
    pub fn count_by_country(
        frame: &DataFrame,
        country_column: &str,
    ) -> Result<BTreeMap<String, u64>, AggregateError> {
        let grouped = frame
            .clone()
            .lazy()
            .group_by([col(country_column)])
            .agg([len().alias(FILM_COUNT)])
            .collect()?;

        let names = grouped.column(country_column)?.str()?;
        let counts = grouped.column(FILM_COUNT)?.cast(&DataType::UInt64)?;
        let counts = counts.u64()?;

        let mut result = BTreeMap::new();
        for (name, count) in names.into_iter().zip(counts) {
            if let (Some(name), Some(count)) = (name, count) {
                result.insert(name.to_string(), count);
            }
        }
        debug!("Counted submissions for {} countries", result.len());
        Ok(result)
    }

    /// Formatted titles per country, in the order the rows are given.
    pub fn titles_by_country(sorted_rows: &[SubmissionRow]) -> BTreeMap<String, Vec<String>> {
        let mut result: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for row in sorted_rows {
            result
                .entry(row.country.clone())
                .or_default()
                .push(DataProcessor::format_title(row));
        }
        result
    }

    /// Join the two reductions. Every country must appear in both with the
    /// same number of entries.
    pub fn merge(
        counts: BTreeMap<String, u64>,
        mut titles: BTreeMap<String, Vec<String>>,
    ) -> Result<Vec<CountryAggregate>, AggregateError> {
        let mut mismatched = Vec::new();
        let mut aggregates = Vec::with_capacity(counts.len());

        for (country, film_count) in counts {
            match titles.remove(&country) {
                Some(list) if list.len() as u64 == film_count => {
                    aggregates.push(CountryAggregate {
                        country,
                        film_count,
                        adjusted_count: film_count,
                        titles: list,
                    });
                }
                _ => mismatched.push(country),
            }
        }
        mismatched.extend(titles.into_keys());

        if !mismatched.is_empty() {
            mismatched.sort();
            return Err(AggregateError::CountLabelMismatch {
                countries: mismatched,
            });
        }
        Ok(aggregates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(title: &str, country: &str, date: &str) -> SubmissionRow {
        SubmissionRow::new(
            title,
            country,
            NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
        )
    }

    fn frame_for(rows: &[SubmissionRow]) -> DataFrame {
        let countries: Vec<&str> = rows.iter().map(|r| r.country.as_str()).collect();
        DataFrame::new(vec![Column::new("Normalized Country".into(), countries)]).unwrap()
    }

    fn scenario_rows() -> Vec<SubmissionRow> {
        let mut rows = vec![
            row("Alpha", "France", "2025-09-01"),
            row("Beta", "France", "2025-01-15"),
            row("Gamma", "Brazil", "2024-12-01"),
        ];
        DataProcessor::sort_submissions(&mut rows);
        rows
    }

    #[test]
    fn groups_titles_in_listing_order() {
        let rows = scenario_rows();
        let aggregates =
            Aggregator::aggregate(&frame_for(&rows), "Normalized Country", &rows).unwrap();

        assert_eq!(aggregates.len(), 2);
        let brazil = &aggregates[0];
        assert_eq!(brazil.country, "Brazil");
        assert_eq!(brazil.film_count, 1);
        assert_eq!(brazil.joined_titles(), "Gamma (2025)");

        let france = &aggregates[1];
        assert_eq!(france.country, "France");
        assert_eq!(france.film_count, 2);
        assert_eq!(france.adjusted_count, 2);
        assert_eq!(france.joined_titles(), "Beta (2025)<br>Alpha (2026)");
    }

    #[test]
    fn counts_sum_to_row_total_and_listings_split_back() {
        let mut rows = vec![
            row("Kappa", "Chile", "2023-08-20"),
            row("Iota", "Chile", "not-a-date"),
            row("Eta", "Peru", "2022-02-02"),
            row("Theta", "Chile", "2023-03-03"),
            row("Zeta", "Peru", "2022-02-02"),
            row("Epsilon", "Kenya", "2021-10-10"),
        ];
        DataProcessor::sort_submissions(&mut rows);
        let aggregates =
            Aggregator::aggregate(&frame_for(&rows), "Normalized Country", &rows).unwrap();

        let total: u64 = aggregates.iter().map(|a| a.film_count).sum();
        assert_eq!(total, rows.len() as u64);

        for agg in &aggregates {
            let expected: Vec<String> = rows
                .iter()
                .filter(|r| r.country == agg.country)
                .map(DataProcessor::format_title)
                .collect();
            let joined = agg.joined_titles();
            let split: Vec<&str> = joined.split(LINE_BREAK).collect();
            assert_eq!(split, expected);
        }

        let chile = aggregates.iter().find(|a| a.country == "Chile").unwrap();
        assert_eq!(
            chile.titles,
            vec!["Theta (2023)", "Kappa (2024)", "Iota (Unknown)"]
        );
    }

    #[test]
    fn only_seen_countries_appear() {
        let rows = scenario_rows();
        let aggregates =
            Aggregator::aggregate(&frame_for(&rows), "Normalized Country", &rows).unwrap();
        assert!(aggregates.iter().all(|a| a.film_count >= 1));
        assert!(!aggregates.iter().any(|a| a.country == "Germany"));
    }

    #[test]
    fn line_break_token_in_title_is_kept() {
        let rows = vec![row("Part<br>Two", "Japan", "2025-01-01")];
        let aggregates =
            Aggregator::aggregate(&frame_for(&rows), "Normalized Country", &rows).unwrap();
        assert_eq!(aggregates[0].film_count, 1);
        assert_eq!(aggregates[0].joined_titles(), "Part<br>Two (2025)");
    }

    #[test]
    fn disagreeing_reductions_are_fatal() {
        let counts = BTreeMap::from([("France".to_string(), 2), ("Peru".to_string(), 1)]);
        let titles = BTreeMap::from([
            ("France".to_string(), vec!["A (2025)".to_string()]),
            ("Chile".to_string(), vec!["B (2025)".to_string()]),
        ]);

        let err = Aggregator::merge(counts, titles).unwrap_err();
        match err {
            AggregateError::CountLabelMismatch { countries } => {
                assert_eq!(countries, vec!["Chile", "France", "Peru"]);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}
