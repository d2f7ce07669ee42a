//! Core business logic - validation and cross-entity rules for the fleet.
//!
//! Every function validates its input before touching storage, then delegates
//! to the persistence gateway in [`crate::db`]. Functions are framework
//! agnostic and return structured data for the web layer to render.

/// Car operations
pub mod car;
/// Driver operations
pub mod driver;
/// Trip journal operations
pub mod journal;
/// Journal spreadsheet export
pub mod report;
/// Route operations and statistics
pub mod route;
/// Account registration and authentication
pub mod user;

use crate::errors::{Error, Result};

/// Trims a required form field, rejecting empty or whitespace-only input.
pub(crate) fn required(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Rejects zero and negative identifiers.
pub(crate) fn positive_id(id: i64, field: &str) -> Result<i64> {
    if id <= 0 {
        return Err(Error::validation(format!("{field} must be positive")));
    }
    Ok(id)
}
