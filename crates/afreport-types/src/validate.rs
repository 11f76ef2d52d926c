//! Date and report-name validation.

use chrono::{Local, NaiveDate, TimeDelta};
use tracing::debug;

use crate::{ReportError, Result};

/// Date format accepted by the reporting API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Checks that `name` is one of the allowed report names.
///
/// # Errors
///
/// Returns a validation error if the name is unknown.
pub fn validate_report_name<'a>(name: &'a str, allowed: &[String]) -> Result<&'a str> {
    if allowed.iter().any(|n| n == name) {
        return Ok(name);
    }
    Err(ReportError::Validation(format!(
        "no such report name in API documentation: '{name}'"
    )))
}

/// Checks that a date string, when present, is a strict `YYYY-MM-DD`
/// calendar date.
///
/// An absent value is accepted silently; the caller substitutes the default
/// date range later.
///
/// # Errors
///
/// Returns a validation error for a present malformed value.
pub fn validate_date_format(value: Option<&str>) -> Result<()> {
    let Some(value) = value else {
        debug!("no date given, default range will be used");
        return Ok(());
    };
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|err| {
        ReportError::Validation(format!("date format is invalid: '{value}' ({err})"))
    })?;
    Ok(())
}

/// Runs name validation, then validates both date bounds.
///
/// Short-circuits on the first failure.
///
/// # Errors
///
/// Returns the first validation error encountered.
pub fn validate_dates_and_names(
    report_name: &str,
    allowed: &[String],
    from_date: Option<&str>,
    to_date: Option<&str>,
) -> Result<()> {
    validate_report_name(report_name, allowed)?;
    validate_date_format(from_date)?;
    validate_date_format(to_date)?;
    Ok(())
}

/// Returns `(from, to)` as `YYYY-MM-DD` strings: today minus `days_back`,
/// and today.
#[must_use]
pub fn default_date_range(days_back: i64) -> (String, String) {
    let today = Local::now().date_naive();
    let from = today - TimeDelta::days(days_back);
    (
        from.format(DATE_FORMAT).to_string(),
        today.format(DATE_FORMAT).to_string(),
    )
}

/// Returns `all` minus any member of `excluded`, preserving order.
#[must_use]
pub fn exclude_names(all: &[String], excluded: &[String]) -> Vec<String> {
    all.iter()
        .filter(|name| !excluded.contains(name))
        .cloned()
        .collect()
}
