//! Driver business logic - Handles all driver-related operations.
//!
//! First and last name are required; the father's name may be left empty.
//! Deleting a driver removes the driver's cars and their journal entries.

use crate::{
    core::required,
    db,
    entities::{car, driver},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;

/// Retrieves all drivers ordered alphabetically by first name.
pub async fn list_drivers(db: &DatabaseConnection) -> Result<Vec<driver::Model>> {
    db::drivers::list_drivers(db).await
}

/// Finds a driver by id.
///
/// # Errors
/// Returns `NotFound` if no driver has this id.
pub async fn get_driver(db: &DatabaseConnection, driver_id: i64) -> Result<driver::Model> {
    db::drivers::find_driver(db, driver_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "driver",
            id: driver_id,
        })
}

/// Registers a new driver after validating the names.
///
/// # Errors
/// Returns `Validation` if the first or last name is empty.
pub async fn add_driver(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
    father_name: &str,
) -> Result<driver::Model> {
    let first_name = required(first_name, "first name")?;
    let last_name = required(last_name, "last name")?;

    db::drivers::insert_driver(db, &first_name, &last_name, father_name.trim()).await
}

/// Replaces a driver's names.
///
/// # Errors
/// Returns `Validation` for empty names and `NotFound` if the driver does not exist.
pub async fn update_driver(
    db: &DatabaseConnection,
    driver_id: i64,
    first_name: &str,
    last_name: &str,
    father_name: &str,
) -> Result<driver::Model> {
    let first_name = required(first_name, "first name")?;
    let last_name = required(last_name, "last name")?;

    let updated =
        db::drivers::update_driver(db, driver_id, &first_name, &last_name, father_name.trim())
            .await?;
    if updated == 0 {
        return Err(Error::NotFound {
            entity: "driver",
            id: driver_id,
        });
    }
    get_driver(db, driver_id).await
}

/// Deletes a driver with every car it owns, atomically.
///
/// Deleting a driver that does not exist succeeds without effect.
pub async fn delete_driver(db: &DatabaseConnection, driver_id: i64) -> Result<()> {
    let removed = db::delete_driver_cascade(db, driver_id).await?;
    if removed == 0 {
        tracing::debug!("Delete of unknown driver {} was a no-op", driver_id);
    }
    Ok(())
}

/// Cars assigned to a driver, ordered by plate number.
pub async fn cars_for_driver(
    db: &DatabaseConnection,
    driver_id: i64,
) -> Result<Vec<car::Model>> {
    db::drivers::cars_by_driver(db, driver_id).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{Car, JournalEntry};
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, EntityTrait, MockDatabase, PaginatorTrait};

    #[tokio::test]
    async fn test_add_driver_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = add_driver(&db, "", "Petrov", "Ivanovich").await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = add_driver(&db, "Ivan", "   ", "Ivanovich").await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        // Nothing reached the database
        assert!(db.into_transaction_log().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_add_driver_allows_empty_father_name() -> Result<()> {
        let db = setup_test_db().await?;

        let driver = add_driver(&db, " Ivan ", "Petrov", "").await?;
        assert_eq!(driver.first_name, "Ivan");
        assert_eq!(driver.father_name, "");
        assert_eq!(driver.full_name(), "Petrov Ivan");

        Ok(())
    }

    #[tokio::test]
    async fn test_list_drivers_ordered_by_first_name() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_driver(&db, "Boris").await?;
        create_test_driver(&db, "Anna").await?;
        create_test_driver(&db, "Viktor").await?;

        let names: Vec<String> = list_drivers(&db)
            .await?
            .into_iter()
            .map(|d| d.first_name)
            .collect();
        assert_eq!(names, vec!["Anna", "Boris", "Viktor"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_driver_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = get_driver(&db, 42).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                entity: "driver",
                id: 42
            }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_driver() -> Result<()> {
        let db = setup_test_db().await?;
        let driver = create_test_driver(&db, "Ivan").await?;

        let updated = update_driver(&db, driver.id, "Ivan", "Sidorov", "Petrovich").await?;
        assert_eq!(updated.last_name, "Sidorov");
        assert_eq!(updated.father_name, "Petrovich");

        let missing = update_driver(&db, 999, "Ivan", "Sidorov", "").await;
        assert!(matches!(missing.unwrap_err(), Error::NotFound { .. }));

        let invalid = update_driver(&db, driver.id, "", "Sidorov", "").await;
        assert!(matches!(invalid.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_driver_cascades_to_cars_and_journal() -> Result<()> {
        let db = setup_test_db().await?;

        let driver = create_test_driver(&db, "Ivan").await?;
        let other = create_test_driver(&db, "Oleg").await?;
        let car1 = create_test_car(&db, "A111AA", Some(driver.id)).await?;
        let car2 = create_test_car(&db, "B222BB", Some(driver.id)).await?;
        let kept = create_test_car(&db, "C333CC", Some(other.id)).await?;
        let route = create_test_route(&db, "Depot", "Airport").await?;
        create_test_entry(&db, car1.id, route.id).await?;
        create_test_entry(&db, car2.id, route.id).await?;
        create_test_entry(&db, kept.id, route.id).await?;

        delete_driver(&db, driver.id).await?;

        assert!(matches!(
            get_driver(&db, driver.id).await.unwrap_err(),
            Error::NotFound { .. }
        ));
        assert!(cars_for_driver(&db, driver.id).await?.is_empty());
        assert!(Car::find_by_id(car1.id).one(&db).await?.is_none());
        assert!(Car::find_by_id(car2.id).one(&db).await?.is_none());

        // The other driver's car and its trip are untouched
        assert!(Car::find_by_id(kept.id).one(&db).await?.is_some());
        assert_eq!(JournalEntry::find().count(&db).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unknown_driver_is_noop() -> Result<()> {
        let db = setup_test_db().await?;
        delete_driver(&db, 12345).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_cars_for_driver_ordered_by_plate() -> Result<()> {
        let db = setup_test_db().await?;
        let driver = create_test_driver(&db, "Ivan").await?;
        create_test_car(&db, "K500KK", Some(driver.id)).await?;
        create_test_car(&db, "A100AA", Some(driver.id)).await?;
        create_test_car(&db, "M700MM", None).await?;

        let plates: Vec<String> = cars_for_driver(&db, driver.id)
            .await?
            .into_iter()
            .map(|c| c.num)
            .collect();
        assert_eq!(plates, vec!["A100AA", "K500KK"]);
        Ok(())
    }
}
