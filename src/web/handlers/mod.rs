//! Request handlers grouped by page.

pub mod auth;
pub mod cars;
pub mod drivers;
pub mod journal;
pub mod reports;
pub mod routes;

use crate::errors::{Error, Result};

/// Parses a numeric form field. Forms post ids as text.
pub(crate) fn parse_id(value: &str, field: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::validation(format!("{field} must be a number, got '{value}'")))
}

/// Like [`parse_id`], but an empty field means "none".
pub(crate) fn parse_optional_id(value: &str, field: &str) -> Result<Option<i64>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_id(value, field).map(Some)
}
