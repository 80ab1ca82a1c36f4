use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::engine::SearchResult;
use crate::error::{Error, Result};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
];

/// Parses the publication dates seen in stored records: plain ISO dates,
/// RFC 3339 timestamps (the date in the publisher's own offset) and the
/// day-first forms used by Vietnamese news sites.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    {
        return Some(date);
    }
    if let Some(ts) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(ts.date());
    }

    // "2024-05-01T10:00:00.000+0700" and similar
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Inclusive publication-date bounds. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        DateRange { from, to }
    }

    /// Parses caller-supplied bounds. Unlike document dates, a bound that
    /// does not parse is an error.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self> {
        let bound = |raw: Option<&str>| -> Result<Option<NaiveDate>> {
            match raw.map(str::trim).filter(|s| !s.is_empty()) {
                None => Ok(None),
                Some(s) => parse_date(s)
                    .map(Some)
                    .ok_or_else(|| Error::InvalidDate(s.to_string())),
            }
        };
        Ok(DateRange::new(bound(from)?, bound(to)?))
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| from <= date) && self.to.is_none_or(|to| date <= to)
    }

    /// Documents without a parsable date always pass.
    pub fn admits(&self, date: Option<NaiveDate>) -> bool {
        date.is_none_or(|d| self.contains(d))
    }
}

pub fn filter(results: Vec<SearchResult>, range: &DateRange) -> Vec<SearchResult> {
    if range.is_unbounded() {
        return results;
    }
    results
        .into_iter()
        .filter(|result| range.admits(result.document.published()))
        .collect()
}
