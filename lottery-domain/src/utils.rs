use chrono::{Datelike, NaiveDate};

use crate::error::DomainError;

/// Turns `2025/01/01` into `2025-01-01`; other input is only trimmed.
pub fn normalize_date(raw: &str) -> String {
    raw.trim().replace('/', "-")
}

/// Parses the calendar day at the start of a draw date such as
/// `2024-03-12T00:00:00` or `2024/03/12`.
pub fn parse_draw_date(raw: &str) -> Option<NaiveDate> {
    let normalized = normalize_date(raw);
    let day = normalized.get(..10).unwrap_or(&normalized);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

pub fn parse_year_month(raw: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidMonth(raw.to_string()))
}

pub fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

pub fn next_month(day: NaiveDate) -> NaiveDate {
    let first = first_of_month(day);
    let (year, month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(first)
}
