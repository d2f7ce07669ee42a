//! Car business logic - Handles all car-related operations.
//!
//! Plate number, color and mark are required. The driver assignment is a weak
//! reference: it is optional and is not checked against existing drivers, so a
//! car may point at a driver that does not exist. Listings show such cars with
//! an empty driver name.

use crate::{
    core::required,
    db,
    entities::{car, driver},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Serialize;

/// A car together with the display name of its driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarListing {
    /// The stored car
    #[serde(flatten)]
    pub car: car::Model,
    /// Driver full name, empty when no driver resolves
    pub driver_name: String,
}

impl From<(car::Model, Option<driver::Model>)> for CarListing {
    fn from((car, driver): (car::Model, Option<driver::Model>)) -> Self {
        Self {
            driver_name: driver.map(|d| d.full_name()).unwrap_or_default(),
            car,
        }
    }
}

/// Retrieves all cars ordered by plate number, each with its driver's name.
pub async fn list_cars(db: &DatabaseConnection) -> Result<Vec<CarListing>> {
    Ok(db::list_cars_with_drivers(db)
        .await?
        .into_iter()
        .map(CarListing::from)
        .collect())
}

/// Finds a car by id together with its driver's name.
///
/// # Errors
/// Returns `NotFound` if no car has this id.
pub async fn get_car(db: &DatabaseConnection, car_id: i64) -> Result<CarListing> {
    db::find_car_with_driver(db, car_id)
        .await?
        .map(CarListing::from)
        .ok_or(Error::NotFound {
            entity: "car",
            id: car_id,
        })
}

/// Adds a car after validating the descriptive fields.
///
/// # Errors
/// Returns `Validation` if the plate number, color or mark is empty.
pub async fn add_car(
    db: &DatabaseConnection,
    num: &str,
    color: &str,
    mark: &str,
    driver_id: Option<i64>,
) -> Result<car::Model> {
    let num = required(num, "plate number")?;
    let color = required(color, "color")?;
    let mark = required(mark, "mark")?;

    db::cars::insert_car(db, &num, &color, &mark, driver_id).await
}

/// Replaces every field of a car.
///
/// # Errors
/// Returns `Validation` for empty fields and `NotFound` if the car does not exist.
pub async fn update_car(
    db: &DatabaseConnection,
    car_id: i64,
    num: &str,
    color: &str,
    mark: &str,
    driver_id: Option<i64>,
) -> Result<CarListing> {
    let num = required(num, "plate number")?;
    let color = required(color, "color")?;
    let mark = required(mark, "mark")?;

    let updated = db::cars::update_car(db, car_id, &num, &color, &mark, driver_id).await?;
    if updated == 0 {
        return Err(Error::NotFound {
            entity: "car",
            id: car_id,
        });
    }
    get_car(db, car_id).await
}

/// Deletes a car and every journal entry of that car in one transaction.
///
/// # Errors
/// Returns `NotFound` if the car does not exist and `ConcurrentModification`
/// if it was removed by someone else while this delete was in flight.
pub async fn delete_car(db: &DatabaseConnection, car_id: i64) -> Result<()> {
    db::delete_car_cascade(db, car_id).await.map(|_| ())
}
