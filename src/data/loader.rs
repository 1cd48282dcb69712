//! CSV Data Loader Module
//! Reads a submission export with Polars and materializes typed rows.

use crate::config::ColumnNames;
use crate::data::season::{parse_submission_date, season_year, SeasonYear};
use chrono::NaiveDate;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Missing required column {column:?} (available: {available:?})")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// One submission from the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRow {
    pub title: String,
    pub country: String,
    pub submitted_on: Option<NaiveDate>,
    pub season: SeasonYear,
}

impl SubmissionRow {
    pub fn new(
        title: impl Into<String>,
        country: impl Into<String>,
        submitted_on: Option<NaiveDate>,
    ) -> Self {
        Self {
            title: title.into(),
            country: country.into(),
            submitted_on,
            season: season_year(submitted_on),
        }
    }
}

/// Loaded export: the filtered frame plus the typed rows drawn from it.
#[derive(Debug, Clone)]
pub struct Submissions {
    /// Only the rows that carry a country, every column as text.
    pub frame: DataFrame,
    pub country_column: String,
    pub rows: Vec<SubmissionRow>,
    pub dropped_without_country: usize,
    pub unparsed_dates: usize,
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a submission export.
    ///
    /// Columns are all read as text so numeric-looking titles survive. Rows
    /// without a country are dropped; unreadable dates become `None` and land
    /// in the `Unknown` season.
    pub fn load_csv(path: &Path, columns: &ColumnNames) -> Result<Submissions, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }
        info!("Loading submissions from {}", path.display());

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        Self::check_columns(&df, columns)?;

        let has_country: BooleanChunked = df
            .column(&columns.country)?
            .str()?
            .into_iter()
            .map(|c| c.is_some_and(|s| !s.trim().is_empty()))
            .collect();
        let frame = df.filter(&has_country)?;
        let dropped_without_country = df.height() - frame.height();
        if dropped_without_country > 0 {
            warn!("Dropped {} rows without a country", dropped_without_country);
        }

        let titles = frame.column(&columns.title)?.str()?;
        let countries = frame.column(&columns.country)?.str()?;
        let dates = frame.column(&columns.date)?.str()?;

        let mut unparsed_dates = 0;
        let mut rows = Vec::with_capacity(frame.height());
        for ((title, country), date) in titles.into_iter().zip(countries).zip(dates) {
            let submitted_on = date.and_then(parse_submission_date);
            if submitted_on.is_none() {
                unparsed_dates += 1;
                debug!("Unreadable submission date {:?} for {:?}", date, title);
            }
            rows.push(SubmissionRow::new(
                title.unwrap_or_default(),
                country.unwrap_or_default(),
                submitted_on,
            ));
        }
        if unparsed_dates > 0 {
            warn!(
                "{} submissions have no readable date, filed under Unknown",
                unparsed_dates
            );
        }
        info!("Loaded {} submissions", rows.len());

        Ok(Submissions {
            frame,
            country_column: columns.country.clone(),
            rows,
            dropped_without_country,
            unparsed_dates,
        })
    }

    fn check_columns(df: &DataFrame, columns: &ColumnNames) -> Result<(), LoaderError> {
        let available: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        for required in [&columns.title, &columns.country, &columns.date] {
            if !available.iter().any(|c| c == required) {
                return Err(LoaderError::MissingColumn {
                    column: required.clone(),
                    available,
                });
            }
        }
        Ok(())
    }
}
