//! Choropleth Figure Module
//! Builds the Plotly figure bound to the per-country aggregates.
//!
//! One mark per country: fill follows the adjusted count, the tooltip shows
//! the true film count, and `customdata` carries `[titles, film_count]` for
//! the click overlay.

use crate::charts::palette::{colorscale, PLASMA};
use crate::stats::CountryAggregate;
use serde::Serialize;

const HOVER_TEMPLATE: &str =
    "<b>%{hovertext}</b><br>Film Count: %{customdata[1]}<br>(Click for titles)<extra></extra>";

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<ChoroplethTrace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChoroplethTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub locations: Vec<String>,
    pub locationmode: &'static str,
    pub z: Vec<u64>,
    pub hovertext: Vec<String>,
    /// `[joined titles, film count]` per country.
    pub customdata: Vec<(String, u64)>,
    pub hovertemplate: &'static str,
    pub colorscale: Vec<(f64, &'static str)>,
    pub colorbar: ColorBar,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorBar {
    pub title: Text,
}

#[derive(Debug, Clone, Serialize)]
pub struct Text {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: Text,
    pub geo: Geo,
    pub margin: Margin,
}

#[derive(Debug, Clone, Serialize)]
pub struct Geo {
    pub showframe: bool,
    pub showcoastlines: bool,
    pub projection: Projection,
}

#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

/// Creates the choropleth figure.
pub struct ChoroplethPlotter;

impl ChoroplethPlotter {
    pub fn build_figure(aggregates: &[CountryAggregate], title: &str) -> Figure {
        let locations: Vec<String> = aggregates.iter().map(|a| a.country.clone()).collect();

        let trace = ChoroplethTrace {
            kind: "choropleth",
            hovertext: locations.clone(),
            locations,
            locationmode: "country names",
            z: aggregates.iter().map(|a| a.adjusted_count).collect(),
            customdata: aggregates
                .iter()
                .map(|a| (a.joined_titles(), a.film_count))
                .collect(),
            hovertemplate: HOVER_TEMPLATE,
            colorscale: colorscale(&PLASMA),
            colorbar: ColorBar {
                title: Text {
                    text: "Film Count".to_string(),
                },
            },
        };

        Figure {
            data: vec![trace],
            layout: Layout {
                title: Text {
                    text: title.to_string(),
                },
                geo: Geo {
                    showframe: false,
                    showcoastlines: true,
                    projection: Projection {
                        kind: "natural earth",
                    },
                },
                margin: Margin {
                    l: 0,
                    r: 0,
                    t: 50,
                    b: 0,
                },
            },
        }
    }
}
