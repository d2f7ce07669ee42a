//! Car queries and the cascading car delete.

use crate::entities::{Car, Driver, JournalEntry, car, driver, journal_entry};
use crate::errors::{DbResultExt, Error, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{info, instrument, warn};

/// Every car with its driver (if the reference resolves), ordered by plate number.
///
/// The driver is joined with a left join, so cars without a driver, or with a
/// driver id that no longer exists, are included with `None`.
#[instrument(skip(db))]
pub async fn list_cars_with_drivers<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<(car::Model, Option<driver::Model>)>> {
    Car::find()
        .find_also_related(Driver)
        .order_by_asc(car::Column::Num)
        .order_by_asc(car::Column::Id)
        .all(db)
        .await
        .context(|| "listing cars".to_string())
}

/// One car with its driver, if the reference resolves.
#[instrument(skip(db))]
pub async fn find_car_with_driver<C: ConnectionTrait>(
    db: &C,
    car_id: i64,
) -> Result<Option<(car::Model, Option<driver::Model>)>> {
    Car::find_by_id(car_id)
        .find_also_related(Driver)
        .one(db)
        .await
        .context(|| format!("loading car {car_id}"))
}

/// One car without the driver join.
#[instrument(skip(db))]
pub async fn find_car<C: ConnectionTrait>(db: &C, car_id: i64) -> Result<Option<car::Model>> {
    Car::find_by_id(car_id)
        .one(db)
        .await
        .context(|| format!("loading car {car_id}"))
}

/// Inserts a car. The driver id is stored as given, without a lookup.
#[instrument(skip(db))]
pub async fn insert_car<C: ConnectionTrait>(
    db: &C,
    num: &str,
    color: &str,
    mark: &str,
    driver_id: Option<i64>,
) -> Result<car::Model> {
    let model = car::ActiveModel {
        num: Set(num.to_string()),
        color: Set(color.to_string()),
        mark: Set(mark.to_string()),
        driver_id: Set(driver_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .context(|| format!("inserting car {num}"))?;

    info!("Added car {} (ID: {}) for driver {:?}", model.num, model.id, driver_id);
    Ok(model)
}

/// Replaces all car fields. Returns the number of rows updated.
#[instrument(skip(db))]
pub async fn update_car<C: ConnectionTrait>(
    db: &C,
    car_id: i64,
    num: &str,
    color: &str,
    mark: &str,
    driver_id: Option<i64>,
) -> Result<u64> {
    let result = Car::update_many()
        .col_expr(car::Column::Num, Expr::value(num))
        .col_expr(car::Column::Color, Expr::value(color))
        .col_expr(car::Column::Mark, Expr::value(mark))
        .col_expr(car::Column::DriverId, Expr::value(driver_id))
        .filter(car::Column::Id.eq(car_id))
        .exec(db)
        .await
        .context(|| format!("updating car {car_id}"))?;
    Ok(result.rows_affected)
}

/// Deletes a car and its journal entries as one atomic unit.
///
/// Returns the number of journal entries removed with the car.
///
/// # Errors
/// - `NotFound` if the car does not exist
/// - `ConcurrentModification` if the car vanished between the check and the delete
/// - `Persistence` if any statement fails; nothing is deleted in that case
#[instrument(skip(db))]
pub async fn delete_car_cascade(db: &DatabaseConnection, car_id: i64) -> Result<u64> {
    let txn = db
        .begin()
        .await
        .context(|| format!("starting transaction to delete car {car_id}"))?;

    if find_car(&txn, car_id).await?.is_none() {
        return Err(Error::NotFound {
            entity: "car",
            id: car_id,
        });
    }

    let journal = JournalEntry::delete_many()
        .filter(journal_entry::Column::CarId.eq(car_id))
        .exec(&txn)
        .await
        .context(|| format!("deleting journal entries of car {car_id}"))?;

    let deleted = Car::delete_many()
        .filter(car::Column::Id.eq(car_id))
        .exec(&txn)
        .await
        .context(|| format!("deleting car {car_id}"))?;

    if deleted.rows_affected == 0 {
        warn!("Car {} disappeared before it could be deleted", car_id);
        return Err(Error::ConcurrentModification {
            entity: "car",
            id: car_id,
        });
    }

    txn.commit()
        .await
        .context(|| format!("committing deletion of car {car_id}"))?;

    info!(
        "Deleted car {} with {} journal entries",
        car_id, journal.rows_affected
    );
    Ok(journal.rows_affected)
}
