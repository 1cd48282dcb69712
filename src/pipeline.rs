//! Map Generation Pipeline
//! load → classify → sort → aggregate → normalize → render → write

use crate::charts::ChoroplethPlotter;
use crate::config::MapConfig;
use crate::data::{DataLoader, DataProcessor, LoaderError, Submissions};
use crate::report::{HtmlReport, PageOptions, ReportError};
use crate::stats::{AggregateError, Aggregator, ColorNormalizer, CountryAggregate};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub submissions: usize,
    pub unknown_seasons: usize,
    pub dropped_without_country: usize,
    pub countries: usize,
    /// Color count the outlier countries were clamped to.
    pub max_other: u64,
}

/// Sort the loaded rows and reduce them to color-normalized country aggregates.
pub fn build_aggregates(
    mut submissions: Submissions,
    outliers: &[String],
) -> Result<(Vec<CountryAggregate>, RunSummary), AggregateError> {
    DataProcessor::sort_submissions(&mut submissions.rows);

    let aggregates = Aggregator::aggregate(
        &submissions.frame,
        &submissions.country_column,
        &submissions.rows,
    )?;
    let (aggregates, max_other) = ColorNormalizer::normalize(aggregates, outliers)?;

    let summary = RunSummary {
        submissions: submissions.rows.len(),
        unknown_seasons: submissions.unparsed_dates,
        dropped_without_country: submissions.dropped_without_country,
        countries: aggregates.len(),
        max_other,
    };
    info!(
        "Aggregated {} submissions into {} countries",
        summary.submissions, summary.countries
    );
    Ok((aggregates, summary))
}

/// Render the full HTML document for a config without writing it.
pub fn render_map(config: &MapConfig) -> Result<(String, RunSummary), PipelineError> {
    let submissions = DataLoader::load_csv(&config.input, &config.columns)?;
    let (aggregates, summary) = build_aggregates(submissions, &config.outlier_countries)?;

    let figure = ChoroplethPlotter::build_figure(&aggregates, &config.map_title);
    let html = HtmlReport::render(
        &figure,
        &PageOptions {
            title: &config.map_title,
            plotly_src: &config.plotly_cdn_url,
            div_id: &config.plot_div_id,
        },
    )?;
    Ok((html, summary))
}

/// Run the whole job and write the map to `config.output`.
pub fn run(config: &MapConfig) -> Result<RunSummary, PipelineError> {
    let (html, summary) = render_map(config)?;
    HtmlReport::write(&html, &config.output)?;
    Ok(summary)
}
