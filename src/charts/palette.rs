//! Sequential color scale for the choropleth fill.

/// Plasma, dark purple to yellow. Perceptually ordered and colorblind-safe.
pub const PLASMA: [&str; 10] = [
    "#0d0887", // Deep indigo
    "#46039f",
    "#7201a8",
    "#9c179e",
    "#bd3786",
    "#d8576b",
    "#ed7953",
    "#fb9f3a",
    "#fdca26",
    "#f0f921", // Yellow
];

/// Evenly spaced `[position, color]` stops over `[0, 1]`.
pub fn colorscale(colors: &[&'static str]) -> Vec<(f64, &'static str)> {
    match colors.len() {
        0 => Vec::new(),
        1 => vec![(0.0, colors[0]), (1.0, colors[0])],
        n => {
            let last = (n - 1) as f64;
            colors
                .iter()
                .enumerate()
                .map(|(i, &c)| (i as f64 / last, c))
                .collect()
        }
    }
}
