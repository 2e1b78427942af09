//! # Temporal Parsing — Laboratory Collection Times
//!
//! Laboratory exports record collection times as naive local wall-clock
//! values, split inconsistently across a `Sample_Date` column and a
//! `Collection_Time` column. Either column may carry a full timestamp, a
//! bare date, or a bare time of day.
//!
//! Collection times are never converted to UTC: the reporting utility's
//! local clock is what the regulator expects to see on a notice. Rendering
//! is always `YYYY-MM-DD HH:MM`.
//!
//! ## Accepted Formats
//!
//! | Kind | Formats |
//! |------|---------|
//! | Timestamp | RFC 3339, `%Y-%m-%dT%H:%M:%S`, `%Y-%m-%dT%H:%M`, `%Y-%m-%d %H:%M:%S`, `%Y-%m-%d %H:%M`, `%m/%d/%Y %H:%M` |
//! | Date | `%Y-%m-%d`, `%m/%d/%Y`, `%Y/%m/%d` |
//! | Time of day | `%H:%M:%S`, `%H:%M` |

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Rendering format for collection times on notices and reports.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a full timestamp. Offsets in RFC 3339 input are dropped, keeping
/// the wall-clock value as written.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Parse a calendar date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
}

/// Combine a sample-date column and a collection-time column into one
/// collection timestamp.
///
/// Resolution order:
/// 1. `time` holds a full timestamp → use it.
/// 2. `date` holds a full timestamp → use it.
/// 3. `date` is a calendar date → combine with `time` as time of day, or
///    midnight if `time` is absent or unparseable.
///
/// Returns `None` when no date can be recovered.
pub fn parse_collection_time(date: Option<&str>, time: Option<&str>) -> Option<NaiveDateTime> {
    if let Some(dt) = time.and_then(parse_datetime) {
        return Some(dt);
    }
    if let Some(dt) = date.and_then(parse_datetime) {
        return Some(dt);
    }
    let day = date.and_then(parse_date).or_else(|| time.and_then(parse_date))?;
    let clock = time
        .and_then(parse_time_of_day)
        .unwrap_or(NaiveTime::MIN);
    Some(day.and_time(clock))
}

/// Render a collection time as `YYYY-MM-DD HH:MM`.
pub fn format_collection_time(dt: &NaiveDateTime) -> String {
    dt.format(DISPLAY_FORMAT).to_string()
}
