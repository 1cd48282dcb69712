//! Charts module - Choropleth figure construction

mod choropleth;
mod palette;

pub use choropleth::{ChoroplethPlotter, Figure};
