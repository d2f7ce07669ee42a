//! Trip journal queries.

use crate::entities::{Car, Driver, JournalEntry, car, driver, journal_entry, route};
use crate::entities::journal_entry::TripStatus;
use crate::errors::{DbResultExt, Result};
use chrono::NaiveDateTime;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, Related, RelationTrait, Select, Set,
};
use serde::Serialize;
use tracing::{info, instrument};

/// A journal entry joined with its route, car and (optional) driver.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct JournalRow {
    /// Journal entry id
    pub id: i64,
    /// Car that made the trip
    pub car_id: i64,
    /// Route travelled
    pub route_id: i64,
    /// Departure
    pub time_out: NaiveDateTime,
    /// Arrival, `None` while in transit
    pub time_in: Option<NaiveDateTime>,
    /// Route start
    pub start_point: String,
    /// Route end
    pub end_point: String,
    /// Plate number of the car
    pub car_num: String,
    /// Mark of the car
    pub car_mark: String,
    /// Driver names are `None` when the car has no resolvable driver
    pub driver_first_name: Option<String>,
    /// See `driver_first_name`
    pub driver_last_name: Option<String>,
    /// See `driver_first_name`
    pub driver_father_name: Option<String>,
}

impl JournalRow {
    /// "start - end"
    #[must_use]
    pub fn route_name(&self) -> String {
        format!("{} - {}", self.start_point, self.end_point)
    }

    /// "plate (mark)"
    #[must_use]
    pub fn vehicle(&self) -> String {
        format!("{} ({})", self.car_num, self.car_mark)
    }

    /// Driver full name in "last first father" order, empty if the car has no driver.
    #[must_use]
    pub fn driver_name(&self) -> String {
        [
            &self.driver_last_name,
            &self.driver_first_name,
            &self.driver_father_name,
        ]
        .iter()
        .filter_map(|part| part.as_deref())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Open until an arrival is recorded.
    #[must_use]
    pub const fn status(&self) -> TripStatus {
        if self.time_in.is_some() {
            TripStatus::Closed
        } else {
            TripStatus::Open
        }
    }
}

fn journal_view() -> Select<JournalEntry> {
    JournalEntry::find()
        .select_only()
        .column_as(journal_entry::Column::Id, "id")
        .column_as(journal_entry::Column::CarId, "car_id")
        .column_as(journal_entry::Column::RouteId, "route_id")
        .column_as(journal_entry::Column::TimeOut, "time_out")
        .column_as(journal_entry::Column::TimeIn, "time_in")
        .column_as(route::Column::StartPoint, "start_point")
        .column_as(route::Column::EndPoint, "end_point")
        .column_as(car::Column::Num, "car_num")
        .column_as(car::Column::Mark, "car_mark")
        .column_as(driver::Column::FirstName, "driver_first_name")
        .column_as(driver::Column::LastName, "driver_last_name")
        .column_as(driver::Column::FatherName, "driver_father_name")
        .join(JoinType::InnerJoin, journal_entry::Relation::Route.def())
        .join(JoinType::InnerJoin, journal_entry::Relation::Car.def())
        .join(JoinType::LeftJoin, <Car as Related<Driver>>::to())
}

/// Every journal entry with its joined details, ordered by departure time.
#[instrument(skip(db))]
pub async fn list_journal_rows<C: ConnectionTrait>(db: &C) -> Result<Vec<JournalRow>> {
    journal_view()
        .order_by_asc(journal_entry::Column::TimeOut)
        .order_by_asc(journal_entry::Column::Id)
        .into_model::<JournalRow>()
        .all(db)
        .await
        .context(|| "listing journal entries".to_string())
}

/// One journal entry with its joined details.
#[instrument(skip(db))]
pub async fn find_journal_row<C: ConnectionTrait>(
    db: &C,
    entry_id: i64,
) -> Result<Option<JournalRow>> {
    journal_view()
        .filter(journal_entry::Column::Id.eq(entry_id))
        .into_model::<JournalRow>()
        .one(db)
        .await
        .context(|| format!("loading journal entry {entry_id}"))
}

/// The bare journal row, for lifecycle checks.
#[instrument(skip(db))]
pub async fn find_journal_entry<C: ConnectionTrait>(
    db: &C,
    entry_id: i64,
) -> Result<Option<journal_entry::Model>> {
    JournalEntry::find_by_id(entry_id)
        .one(db)
        .await
        .context(|| format!("loading journal entry {entry_id}"))
}

/// Inserts an open entry (no arrival time).
#[instrument(skip(db))]
pub async fn insert_journal_entry<C: ConnectionTrait>(
    db: &C,
    car_id: i64,
    route_id: i64,
    time_out: NaiveDateTime,
) -> Result<journal_entry::Model> {
    let model = journal_entry::ActiveModel {
        car_id: Set(car_id),
        route_id: Set(route_id),
        time_out: Set(time_out),
        time_in: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .context(|| format!("inserting journal entry for car {car_id} on route {route_id}"))?;

    info!(
        "Car {} departed on route {} at {} (entry {})",
        car_id, route_id, time_out, model.id
    );
    Ok(model)
}

/// Sets the arrival time. Returns the number of rows updated.
#[instrument(skip(db))]
pub async fn set_time_in<C: ConnectionTrait>(
    db: &C,
    entry_id: i64,
    time_in: NaiveDateTime,
) -> Result<u64> {
    let result = JournalEntry::update_many()
        .col_expr(journal_entry::Column::TimeIn, Expr::value(Some(time_in)))
        .filter(journal_entry::Column::Id.eq(entry_id))
        .exec(db)
        .await
        .context(|| format!("completing journal entry {entry_id}"))?;
    Ok(result.rows_affected)
}

/// Returns the number of rows deleted.
#[instrument(skip(db))]
pub async fn delete_journal_entry<C: ConnectionTrait>(db: &C, entry_id: i64) -> Result<u64> {
    let result = JournalEntry::delete_many()
        .filter(journal_entry::Column::Id.eq(entry_id))
        .exec(db)
        .await
        .context(|| format!("deleting journal entry {entry_id}"))?;
    Ok(result.rows_affected)
}
