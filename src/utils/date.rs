use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// `--as-of DATE` when given, else today.
pub fn reference_date(as_of: Option<&str>) -> AppResult<NaiveDate> {
    match as_of {
        Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())),
        None => Ok(today()),
    }
}

/// Long form used in event titles: `February 11, 2024`.
pub fn format_long(d: NaiveDate) -> String {
    d.format("%B %d, %Y").to_string()
}

/// `YYYY-MM-DD`, or `--` when absent.
pub fn format_optional(d: Option<NaiveDate>) -> String {
    d.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "--".to_string())
}
