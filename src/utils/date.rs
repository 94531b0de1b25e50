//! Date parsing and formatting for post dates.
//!
//! Authors write dates in a handful of shapes; all of them are read as UTC:
//!
//! | Input | Parsed as |
//! |-------|-----------|
//! | `2024-01-15T10:30:00Z`, `2024-01-15T10:30:00+09:00` | RFC 3339 |
//! | `2024-01-15T10:30:00.250`, `2024-01-15 10:30:00`, `2024-01-15 10:30` | naive datetime |
//! | `2024-01-15`, `2024/01/15` | midnight |

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Naive datetime layouts tried after RFC 3339
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a post date string. Returns `None` for anything unrecognised.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Format a timestamp as ISO 8601 with millisecond precision: `2024-01-15T10:30:00.000Z`.
pub fn to_iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format a post date as `YYYY-MM-DD`, falling back to the raw string.
pub fn format_ymd(s: &str) -> String {
    parse_date(s)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| s.to_owned())
}

/// Describe how long ago a post date was, relative to `now`.
///
/// Future dates read as `today`; unparseable dates are returned unchanged.
pub fn relative_time(s: &str, now: DateTime<Utc>) -> String {
    let Some(dt) = parse_date(s) else {
        return s.to_owned();
    };

    let days = (now - dt).num_days().max(0);
    match days {
        0 => "today".into(),
        1 => "yesterday".into(),
        2..=6 => format!("{days} days ago"),
        7..=29 => plural(days / 7, "week"),
        30..=364 => plural(days / 30, "month"),
        _ => plural(days / 365, "year"),
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
