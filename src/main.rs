//! Film Map - submission export to interactive choropleth
//!
//! Reads a film festival submission CSV, groups submissions by country and
//! writes a standalone HTML map with click-to-list titles.

mod charts;
mod config;
mod data;
mod pipeline;
mod report;
mod stats;

use anyhow::{Context, Result};
use clap::Parser;
use config::MapConfig;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "film_map")]
#[command(about = "Render film submissions as a choropleth map with per-country title lists")]
struct Args {
    /// Submission export (CSV with a header row)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the HTML map
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON config file; flags given here override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Country whose color is clamped to the largest other count (repeatable)
    #[arg(long = "outlier", value_name = "COUNTRY")]
    outliers: Vec<String>,

    /// Map title
    #[arg(long)]
    title: Option<String>,

    /// Open the map in the default browser once written
    #[arg(long)]
    open: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Result<MapConfig> {
        let mut config = match &self.config {
            Some(path) => MapConfig::from_json_file(path)?,
            None => MapConfig::default(),
        };
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if !self.outliers.is_empty() {
            config.outlier_countries = self.outliers;
        }
        if let Some(title) = self.title {
            config.map_title = title;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(env).init();

    let open_after = args.open;
    let config = args.into_config()?;

    let summary = pipeline::run(&config)
        .with_context(|| format!("Failed to build map from {}", config.input.display()))?;
    info!(
        "Done: {} submissions, {} countries, {} with unknown season, {} without country",
        summary.submissions,
        summary.countries,
        summary.unknown_seasons,
        summary.dropped_without_country
    );
    info!("Outliers colored as {} films", summary.max_other);

    if open_after {
        if let Err(e) = open::that(&config.output) {
            warn!("Could not open {}: {}", config.output.display(), e);
        }
    }
    Ok(())
}
