//! Trip journal business logic.
//!
//! A journal entry records one departure of a car on a route. It is created
//! open (departure only) and closed by recording the arrival. Timestamps come
//! from the dispatch form as `YYYY-MM-DDTHH:MM` local time without seconds.
//!
//! Completion may be repeated; the arrival is simply overwritten. An arrival
//! earlier than the departure is rejected.

use crate::{
    core::positive_id,
    db::{self, JournalRow},
    entities::journal_entry,
    errors::{Error, Result},
};
use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;
use tracing::info;

/// Timestamp layout produced by `<input type="datetime-local">`.
pub const FORM_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Parses a form timestamp.
///
/// # Errors
/// Returns `Validation` if the value is empty or does not match [`FORM_TIMESTAMP_FORMAT`].
pub fn parse_form_timestamp(value: &str, field: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::validation(format!("{field} is required")));
    }
    NaiveDateTime::parse_from_str(value, FORM_TIMESTAMP_FORMAT).map_err(|e| {
        Error::validation(format!(
            "{field} '{value}' is not a valid YYYY-MM-DDTHH:MM timestamp: {e}"
        ))
    })
}

/// Formats a stored timestamp back into the form layout, for edit pages.
#[must_use]
pub fn format_form_timestamp(value: &NaiveDateTime) -> String {
    value.format(FORM_TIMESTAMP_FORMAT).to_string()
}

/// All journal entries with route, car and driver details, ordered by departure.
pub async fn list_journal(db: &DatabaseConnection) -> Result<Vec<JournalRow>> {
    db::list_journal_rows(db).await
}

/// Finds one journal entry with its details.
///
/// # Errors
/// Returns `Validation` for a non-positive id and `NotFound` if the entry does not exist.
pub async fn get_journal_entry(db: &DatabaseConnection, entry_id: i64) -> Result<JournalRow> {
    let entry_id = positive_id(entry_id, "journal entry id")?;
    db::journal::find_journal_row(db, entry_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "journal entry",
            id: entry_id,
        })
}

/// Records a departure, creating an open journal entry.
///
/// # Errors
/// - `Validation` if an id is not positive or `time_out` is empty or malformed
/// - `NotFound` if the car or the route does not exist
pub async fn add_journal_entry(
    db: &DatabaseConnection,
    car_id: i64,
    route_id: i64,
    time_out: &str,
) -> Result<journal_entry::Model> {
    let car_id = positive_id(car_id, "car id")?;
    let route_id = positive_id(route_id, "route id")?;
    let time_out = parse_form_timestamp(time_out, "departure time")?;

    if db::cars::find_car(db, car_id).await?.is_none() {
        return Err(Error::NotFound {
            entity: "car",
            id: car_id,
        });
    }
    if db::routes::find_route(db, route_id).await?.is_none() {
        return Err(Error::NotFound {
            entity: "route",
            id: route_id,
        });
    }

    db::journal::insert_journal_entry(db, car_id, route_id, time_out).await
}

/// Records the arrival of a trip, closing the entry.
///
/// # Errors
/// - `Validation` if the id is not positive, `time_in` is empty or malformed,
///   or the arrival is earlier than the departure
/// - `NotFound` if the entry does not exist
pub async fn complete_journal_entry(
    db: &DatabaseConnection,
    entry_id: i64,
    time_in: &str,
) -> Result<journal_entry::Model> {
    let entry_id = positive_id(entry_id, "journal entry id")?;
    let time_in = parse_form_timestamp(time_in, "arrival time")?;

    let not_found = Error::NotFound {
        entity: "journal entry",
        id: entry_id,
    };

    let Some(mut entry) = db::journal::find_journal_entry(db, entry_id).await? else {
        return Err(not_found);
    };

    if time_in < entry.time_out {
        return Err(Error::validation(format!(
            "arrival {} is earlier than departure {}",
            format_form_timestamp(&time_in),
            format_form_timestamp(&entry.time_out)
        )));
    }

    if db::journal::set_time_in(db, entry_id, time_in).await? == 0 {
        return Err(not_found);
    }

    info!("Journal entry {} closed at {}", entry_id, time_in);
    entry.time_in = Some(time_in);
    Ok(entry)
}

/// Deletes a journal entry, open or closed.
///
/// # Errors
/// Returns `Validation` for a non-positive id and `NotFound` if the entry does not exist.
pub async fn delete_journal_entry(db: &DatabaseConnection, entry_id: i64) -> Result<()> {
    let entry_id = positive_id(entry_id, "journal entry id")?;
    if db::journal::delete_journal_entry(db, entry_id).await? == 0 {
        return Err(Error::NotFound {
            entity: "journal entry",
            id: entry_id,
        });
    }
    Ok(())
}
