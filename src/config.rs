//! Run Configuration Module
//! Every knob of a run lives here; nothing is read from process-wide state.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_TITLE_COLUMN: &str = "Project Title";
pub const DEFAULT_COUNTRY_COLUMN: &str = "Normalized Country";
pub const DEFAULT_DATE_COLUMN: &str = "Submission Date";
pub const DEFAULT_PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Names of the input columns the loader materializes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnNames {
    pub title: String,
    pub country: String,
    pub date: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE_COLUMN.to_string(),
            country: DEFAULT_COUNTRY_COLUMN.to_string(),
            date: DEFAULT_DATE_COLUMN.to_string(),
        }
    }
}

/// Configuration for one map generation run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub columns: ColumnNames,
    /// Countries whose color is clamped to the largest count among the rest.
    pub outlier_countries: Vec<String>,
    pub map_title: String,
    pub plotly_cdn_url: String,
    /// Fixed id of the plot element; keeps repeated runs byte-identical.
    pub plot_div_id: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("submissions.csv"),
            output: PathBuf::from("choropleth_map.html"),
            columns: ColumnNames::default(),
            outlier_countries: vec!["United States".to_string(), "Germany".to_string()],
            map_title: "Film Submissions by Country".to_string(),
            plotly_cdn_url: DEFAULT_PLOTLY_CDN.to_string(),
            plot_div_id: "choropleth-map".to_string(),
        }
    }
}

impl MapConfig {
    /// Load a JSON config file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
