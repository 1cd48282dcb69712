//! HTML Report Generator Module
//! Assembles the standalone map page: Plotly from a CDN, the figure, and the
//! click-to-list overlay.
//!
//! Page shell and overlay are static assets with `{{name}}` substitution
//! points. Substitution is a single pass, so values are never rescanned.

use crate::charts::Figure;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const PAGE_TEMPLATE: &str = include_str!("../assets/map_page.html");
const OVERLAY_TEMPLATE: &str = include_str!("../assets/title_box.html");

/// Shown in the overlay when a clicked country has no listing.
pub const NO_FILMS_MESSAGE: &str = "No films available";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to serialize figure: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Template error: {0}")]
    Template(String),
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Page-level settings for the generated document.
#[derive(Debug, Clone)]
pub struct PageOptions<'a> {
    pub title: &'a str,
    pub plotly_src: &'a str,
    pub div_id: &'a str,
}

/// HTML document generator for the choropleth map.
pub struct HtmlReport;

impl HtmlReport {
    /// Render the complete document.
    pub fn render(figure: &Figure, options: &PageOptions<'_>) -> Result<String, ReportError> {
        // `</` inside a script block would close it early; `<\/` is the same JSON string.
        let figure_json = serde_json::to_string(figure)?.replace("</", "<\\/");

        let overlay = render_template(
            OVERLAY_TEMPLATE,
            &[("div_id", options.div_id), ("fallback", NO_FILMS_MESSAGE)],
        )?;
        let page_title = escape_html(options.title);

        render_template(
            PAGE_TEMPLATE,
            &[
                ("page_title", page_title.as_str()),
                ("plotly_src", options.plotly_src),
                ("div_id", options.div_id),
                ("figure_json", figure_json.as_str()),
                ("overlay", overlay.as_str()),
            ],
        )
    }

    /// Write the document in one shot. Not atomic; a failed write may leave a
    /// partial file behind.
    pub fn write(html: &str, output_path: &Path) -> Result<(), ReportError> {
        fs::write(output_path, html).map_err(|source| ReportError::Io {
            path: output_path.to_path_buf(),
            source,
        })?;
        info!(
            "Map generated: {} ({} bytes)",
            output_path.display(),
            html.len()
        );
        Ok(())
    }
}

/// Replace every `{{name}}` in `template` with its value.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> Result<String, ReportError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .ok_or_else(|| ReportError::Template("unclosed placeholder".to_string()))?;
        let name = after[..end].trim();
        let value = values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| {
                ReportError::Template(format!("no value for placeholder {:?}", name))
            })?;
        out.push_str(value);
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
