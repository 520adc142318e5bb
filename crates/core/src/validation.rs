//! Field validation helpers.
//!
//! Each helper checks one rule, pushes a violation message when the rule
//! fails, and returns the parsed value when one exists. DTO `validate()`
//! functions run every rule so a single response reports all violations at
//! once, then bail with [`ClinicaError::InvalidInput`] if anything was
//! collected.

use chrono::NaiveDate;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ClinicaError;

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Required text: must be non-empty after trimming.
pub(crate) fn check_not_empty(field: &str, value: &str, violations: &mut Vec<String>) {
    if value.trim().is_empty() {
        violations.push(format!("{field} should not be empty"));
    }
}

/// Required text: must be non-empty (after trimming) and within `max_len`.
pub(crate) fn check_required_text(
    field: &str,
    value: &str,
    max_len: usize,
    violations: &mut Vec<String>,
) {
    check_not_empty(field, value, violations);
    check_max_len(field, value, max_len, violations);
}

/// Length-only rule, applied to optional or already-required text.
pub(crate) fn check_max_len(
    field: &str,
    value: &str,
    max_len: usize,
    violations: &mut Vec<String>,
) {
    if value.chars().count() > max_len {
        violations.push(format!(
            "{field} must be shorter than or equal to {max_len} characters"
        ));
    }
}

/// Calendar date in `YYYY-MM-DD` form.
pub(crate) fn check_date(
    field: &str,
    value: &str,
    violations: &mut Vec<String>,
) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            violations.push(format!("{field} must be a valid ISO 8601 date string"));
            None
        }
    }
}

/// Membership in a closed enumeration; `allowed` feeds the message.
pub(crate) fn check_enum<T: FromStr>(
    field: &str,
    value: &str,
    allowed: &[&str],
    violations: &mut Vec<String>,
) -> Option<T> {
    match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            violations.push(format!(
                "{field} must be one of the following values: {}",
                allowed.join(", ")
            ));
            None
        }
    }
}

/// UUID in canonical textual form.
pub(crate) fn check_uuid(field: &str, value: &str, violations: &mut Vec<String>) -> Option<Uuid> {
    match Uuid::parse_str(value) {
        Ok(id) => Some(id),
        Err(_) => {
            violations.push(format!("{field} must be a UUID"));
            None
        }
    }
}

/// Finishes a validation pass: `Ok(())` when nothing was collected.
pub(crate) fn finish(violations: Vec<String>) -> Result<(), ClinicaError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ClinicaError::invalid_input(violations))
    }
}
