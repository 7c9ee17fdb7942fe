//! Lenient date parsing and display formatting for schedule fields. The
//! planner emits a mix of RFC 3339 and bare date strings; anything
//! unparseable is shown raw.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    None
}

pub fn ordinal_suffix(n: u32) -> String {
    let j = n % 10;
    let k = n % 100;
    let suffix = match (j, k) {
        (1, k) if k != 11 => "st",
        (2, k) if k != 12 => "nd",
        (3, k) if k != 13 => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// `"12th Sep 2025 4:05 PM"`, year optional.
pub fn format_date_time_nice(dt: NaiveDateTime, include_year: bool) -> String {
    use chrono::{Datelike, Timelike};
    let day = ordinal_suffix(dt.day());
    let month = dt.format("%b");
    let hour24 = dt.hour();
    let hour12 = if hour24 % 12 == 0 { 12 } else { hour24 % 12 };
    let minutes = dt.minute();
    let ampm = if hour24 >= 12 { "PM" } else { "AM" };
    if include_year {
        format!("{day} {month} {} {hour12}:{minutes:02} {ampm}", dt.year())
    } else {
        format!("{day} {month} {hour12}:{minutes:02} {ampm}")
    }
}

pub fn format_time_only(dt: NaiveDateTime) -> String {
    use chrono::Timelike;
    let hour24 = dt.hour();
    let hour12 = if hour24 % 12 == 0 { 12 } else { hour24 % 12 };
    let ampm = if hour24 >= 12 { "PM" } else { "AM" };
    format!("{hour12}:{:02} {ampm}", dt.minute())
}

/// Display helper for optional raw schedule strings: nicely formatted when
/// parseable, the raw string when not, `"N/A"` when absent.
pub fn format_schedule_field(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => match parse_date(raw) {
            Some(dt) => format_date_time_nice(dt, true),
            None => raw.to_string(),
        },
        None => "N/A".to_string(),
    }
}
