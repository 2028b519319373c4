//! Display formatting shared by tables, CSV export and request logs.
//!
//! Only string rendering lives here; the numbers come from the metric functions.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

/// Formats a number with thousands separators
///
/// # Examples
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(42), "42");
/// assert_eq!(format_number(0), "0");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// "45 minutes" below an hour, "2 hours 5 minutes" from an hour up
pub fn format_minutes(minutes: i64) -> String {
    if minutes < 60 {
        return format!("{} minutes", minutes);
    }
    format!("{} hours {} minutes", minutes / 60, minutes % 60)
}

/// Picking rate rounded to one decimal, halves away from zero
pub fn round_rate(rate: f64) -> f64 {
    (rate * 10.0).round() / 10.0
}

/// Picking rate with one decimal
pub fn format_rate(rate: f64) -> String {
    format!("{:.1}", round_rate(rate))
}

/// Picking rate as shown in table cells
pub fn format_rate_cell(rate: f64) -> String {
    format!("{}/h", format_rate(rate))
}

/// Absolute timestamp for file export, e.g. "2024-01-01T09:00:00.000Z"
pub fn format_iso(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn format_iso_opt(ts: Option<&DateTime<Utc>>) -> String {
    ts.map(format_iso).unwrap_or_default()
}

/// Local wall-clock rendering for table cells
pub fn format_local(ts: &DateTime<Utc>, offset: &FixedOffset) -> String {
    ts.with_timezone(offset).format("%Y/%m/%d %H:%M:%S").to_string()
}

pub fn format_local_opt(ts: Option<&DateTime<Utc>>, offset: &FixedOffset) -> String {
    ts.map(|t| format_local(t, offset)).unwrap_or_default()
}
