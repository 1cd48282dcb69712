//! Season Classification Module
//! Maps submission dates onto festival season years.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use std::fmt;

/// First month (1-based) that counts toward the following season.
pub const SEASON_START_MONTH: u32 = 8;

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d-%b-%Y",
];

/// Season a submission belongs to.
///
/// Variant order is the sort order: every numbered year ascending, then
/// `Unknown` after all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeasonYear {
    Year(i32),
    Unknown,
}

impl fmt::Display for SeasonYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonYear::Year(y) => write!(f, "{}", y),
            SeasonYear::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Season year of a submission date. August onward rolls into next year.
pub fn season_year(date: Option<NaiveDate>) -> SeasonYear {
    match date {
        None => SeasonYear::Unknown,
        Some(d) if d.month() >= SEASON_START_MONTH => SeasonYear::Year(d.year() + 1),
        Some(d) => SeasonYear::Year(d.year()),
    }
}

/// Best-effort parse of an export date cell. Unrecognized text yields `None`.
pub fn parse_submission_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}
