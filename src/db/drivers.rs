//! Driver queries and the cascading driver delete.

use crate::entities::{Car, Driver, JournalEntry, car, driver, journal_entry};
use crate::errors::{DbResultExt, Result};
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info, instrument};

/// Lists every driver, ordered by first name.
#[instrument(skip(db))]
pub async fn list_drivers<C: ConnectionTrait>(db: &C) -> Result<Vec<driver::Model>> {
    Driver::find()
        .order_by_asc(driver::Column::FirstName)
        .order_by_asc(driver::Column::Id)
        .all(db)
        .await
        .context(|| "listing drivers".to_string())
}

/// One driver by id.
#[instrument(skip(db))]
pub async fn find_driver<C: ConnectionTrait>(
    db: &C,
    driver_id: i64,
) -> Result<Option<driver::Model>> {
    Driver::find_by_id(driver_id)
        .one(db)
        .await
        .context(|| format!("loading driver {driver_id}"))
}

/// Inserts a driver with already validated names.
#[instrument(skip(db))]
pub async fn insert_driver<C: ConnectionTrait>(
    db: &C,
    first_name: &str,
    last_name: &str,
    father_name: &str,
) -> Result<driver::Model> {
    let model = driver::ActiveModel {
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        father_name: Set(father_name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .context(|| "inserting driver".to_string())?;

    info!("Added driver {} (ID: {})", model.full_name(), model.id);
    Ok(model)
}

/// Replaces the three name fields. Returns the number of rows updated.
#[instrument(skip(db))]
pub async fn update_driver<C: ConnectionTrait>(
    db: &C,
    driver_id: i64,
    first_name: &str,
    last_name: &str,
    father_name: &str,
) -> Result<u64> {
    let result = Driver::update_many()
        .col_expr(driver::Column::FirstName, Expr::value(first_name))
        .col_expr(driver::Column::LastName, Expr::value(last_name))
        .col_expr(driver::Column::FatherName, Expr::value(father_name))
        .filter(driver::Column::Id.eq(driver_id))
        .exec(db)
        .await
        .context(|| format!("updating driver {driver_id}"))?;
    Ok(result.rows_affected)
}

/// Cars owned by a driver, ordered by plate number.
#[instrument(skip(db))]
pub async fn cars_by_driver<C: ConnectionTrait>(db: &C, driver_id: i64) -> Result<Vec<car::Model>> {
    Car::find()
        .filter(car::Column::DriverId.eq(driver_id))
        .order_by_asc(car::Column::Num)
        .all(db)
        .await
        .context(|| format!("listing cars of driver {driver_id}"))
}

/// Deletes a driver together with its cars and their journal entries.
///
/// All three statements run in one transaction. Deleting a driver that does
/// not exist is not an error; the returned count is the number of driver rows
/// removed (0 or 1).
#[instrument(skip(db))]
pub async fn delete_driver_cascade(db: &DatabaseConnection, driver_id: i64) -> Result<u64> {
    let txn = db
        .begin()
        .await
        .context(|| format!("starting transaction to delete driver {driver_id}"))?;

    let owned_cars = Query::select()
        .column(car::Column::Id)
        .from(Car)
        .and_where(Expr::col(car::Column::DriverId).eq(driver_id))
        .to_owned();

    let journal = JournalEntry::delete_many()
        .filter(journal_entry::Column::CarId.in_subquery(owned_cars))
        .exec(&txn)
        .await
        .context(|| format!("deleting journal entries of driver {driver_id}"))?;

    let cars = Car::delete_many()
        .filter(car::Column::DriverId.eq(driver_id))
        .exec(&txn)
        .await
        .context(|| format!("deleting cars of driver {driver_id}"))?;

    let drivers = Driver::delete_many()
        .filter(driver::Column::Id.eq(driver_id))
        .exec(&txn)
        .await
        .context(|| format!("deleting driver {driver_id}"))?;

    txn.commit()
        .await
        .context(|| format!("committing deletion of driver {driver_id}"))?;

    debug!(
        "Driver {} delete removed {} cars and {} journal entries",
        driver_id, cars.rows_affected, journal.rows_affected
    );
    Ok(drivers.rows_affected)
}
