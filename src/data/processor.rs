//! Data Processor Module
//! Orders submissions for listing and renders their display titles.

use crate::data::loader::SubmissionRow;

/// Submission ordering and title formatting.
pub struct DataProcessor;

impl DataProcessor {
    /// Sort by season year, then title.
    ///
    /// `Unknown` seasons come after every numbered year. Titles compare
    /// byte-wise (case-sensitive). The sort is stable, so exact ties keep
    /// their input order.
    pub fn sort_submissions(rows: &mut [SubmissionRow]) {
        rows.sort_by(|a, b| a.season.cmp(&b.season).then_with(|| a.title.cmp(&b.title)));
    }

    /// `"<title> (<season year>)"`. Titles are not escaped.
    pub fn format_title(row: &SubmissionRow) -> String {
        format!("{} ({})", row.title, row.season)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(title: &str, country: &str, date: Option<(i32, u32, u32)>) -> SubmissionRow {
        SubmissionRow::new(
            title,
            country,
            date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        )
    }

    fn titles(rows: &[SubmissionRow]) -> Vec<String> {
        rows.iter().map(DataProcessor::format_title).collect()
    }

    #[test]
    fn sorts_by_season_then_title() {
        let mut rows = vec![
            row("Alpha", "France", Some((2025, 9, 1))),
            row("Beta", "France", Some((2025, 1, 15))),
            row("Gamma", "Brazil", Some((2024, 12, 1))),
            row("Aardvark", "Brazil", Some((2025, 3, 1))),
        ];
        DataProcessor::sort_submissions(&mut rows);
        assert_eq!(
            titles(&rows),
            vec![
                "Aardvark (2025)",
                "Beta (2025)",
                "Gamma (2025)",
                "Alpha (2026)"
            ]
        );
    }

    #[test]
    fn unknown_season_sorts_last() {
        let mut rows = vec![
            row("Zed", "Chile", None),
            row("Late", "Chile", Some((2030, 1, 1))),
            row("Early", "Chile", Some((1990, 1, 1))),
            row("Abc", "Chile", None),
        ];
        DataProcessor::sort_submissions(&mut rows);
        assert_eq!(
            titles(&rows),
            vec!["Early (1990)", "Late (2030)", "Abc (Unknown)", "Zed (Unknown)"]
        );
    }

    #[test]
    fn titles_compare_case_sensitively_and_ties_are_stable() {
        let mut rows = vec![
            row("apple", "Peru", Some((2025, 1, 1))),
            row("Zebra", "Peru", Some((2025, 1, 1))),
            row("Same", "Chile", Some((2025, 1, 1))),
            row("Same", "Peru", Some((2025, 2, 1))),
        ];
        DataProcessor::sort_submissions(&mut rows);
        let order: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.title.as_str(), r.country.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Same", "Chile"),
                ("Same", "Peru"),
                ("Zebra", "Peru"),
                ("apple", "Peru")
            ]
        );
    }

    #[test]
    fn markup_in_titles_passes_through() {
        let r = row("One<br>Two & <i>Three</i>", "Japan", Some((2025, 8, 1)));
        assert_eq!(
            DataProcessor::format_title(&r),
            "One<br>Two & <i>Three</i> (2026)"
        );
    }
}
