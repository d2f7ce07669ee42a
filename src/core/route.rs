//! Route business logic - fixed point-to-point paths and their usage statistics.
//!
//! A route referenced by journal entries cannot be deleted; the entries have to
//! be removed first.

use crate::{
    core::required,
    db::{self, RouteVehicleCount},
    entities::route,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;

/// Retrieves all routes ordered by id.
pub async fn list_routes(db: &DatabaseConnection) -> Result<Vec<route::Model>> {
    db::routes::list_routes(db).await
}

/// Finds a route by id.
///
/// # Errors
/// Returns `NotFound` if no route has this id.
pub async fn get_route(db: &DatabaseConnection, route_id: i64) -> Result<route::Model> {
    db::routes::find_route(db, route_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "route",
            id: route_id,
        })
}

/// Adds a route.
///
/// # Errors
/// Returns `Validation` if either endpoint is empty.
pub async fn add_route(
    db: &DatabaseConnection,
    start_point: &str,
    end_point: &str,
) -> Result<route::Model> {
    let start_point = required(start_point, "start point")?;
    let end_point = required(end_point, "end point")?;

    db::routes::insert_route(db, &start_point, &end_point).await
}

/// Replaces both endpoints of a route.
///
/// # Errors
/// Returns `Validation` for empty endpoints and `NotFound` if the route does not exist.
pub async fn update_route(
    db: &DatabaseConnection,
    route_id: i64,
    start_point: &str,
    end_point: &str,
) -> Result<route::Model> {
    let start_point = required(start_point, "start point")?;
    let end_point = required(end_point, "end point")?;

    let updated = db::routes::update_route(db, route_id, &start_point, &end_point).await?;
    if updated == 0 {
        return Err(Error::NotFound {
            entity: "route",
            id: route_id,
        });
    }
    get_route(db, route_id).await
}

/// Deletes a route that no journal entry references.
///
/// # Errors
/// Returns `Conflict` while journal entries use the route and `NotFound` if it does not exist.
pub async fn delete_route(db: &DatabaseConnection, route_id: i64) -> Result<()> {
    db::delete_route_restricted(db, route_id).await
}

/// How many distinct cars travelled each route, in route order.
pub async fn route_vehicle_counts(db: &DatabaseConnection) -> Result<Vec<RouteVehicleCount>> {
    db::route_vehicle_counts(db).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_add_route_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = add_route(&db, "", "Airport").await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
        let result = add_route(&db, "Depot", "  ").await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        assert!(db.into_transaction_log().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_list_routes_ordered_by_id() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_test_route(&db, "Zelenograd", "Center").await?;
        let second = create_test_route(&db, "Airport", "Depot").await?;

        let routes = list_routes(&db).await?;
        assert_eq!(routes, vec![first, second]);
        assert_eq!(routes[0].name(), "Zelenograd - Center");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_route() -> Result<()> {
        let db = setup_test_db().await?;
        let route = create_test_route(&db, "Depot", "Airport").await?;

        let updated = update_route(&db, route.id, "Depot", "Station").await?;
        assert_eq!(updated.end_point, "Station");

        let missing = update_route(&db, 404, "Depot", "Station").await;
        assert!(matches!(missing.unwrap_err(), Error::NotFound { entity: "route", .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_route_restricted_by_journal() -> Result<()> {
        let db = setup_test_db().await?;
        let route = create_test_route(&db, "Depot", "Airport").await?;
        let car = create_test_car(&db, "A123BC", None).await?;
        let entry = create_test_entry(&db, car.id, route.id).await?;

        let result = delete_route(&db, route.id).await;
        assert!(matches!(result.unwrap_err(), Error::Conflict { .. }));
        assert_eq!(get_route(&db, route.id).await?, route);

        crate::core::journal::delete_journal_entry(&db, entry.id).await?;
        delete_route(&db, route.id).await?;
        assert!(matches!(
            get_route(&db, route.id).await.unwrap_err(),
            Error::NotFound { .. }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_route() -> Result<()> {
        let db = setup_test_db().await?;
        let result = delete_route(&db, 3).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound { entity: "route", id: 3 }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_route_vehicle_counts() -> Result<()> {
        let db = setup_test_db().await?;
        let busy = create_test_route(&db, "Depot", "Airport").await?;
        let quiet = create_test_route(&db, "Depot", "Station").await?;
        let car1 = create_test_car(&db, "A111AA", None).await?;
        let car2 = create_test_car(&db, "B222BB", None).await?;

        // Two trips by the same car count once
        create_test_entry(&db, car1.id, busy.id).await?;
        create_test_entry(&db, car1.id, busy.id).await?;
        create_test_entry(&db, car2.id, busy.id).await?;

        let counts = route_vehicle_counts(&db).await?;
        assert_eq!(
            counts,
            vec![
                RouteVehicleCount {
                    route_name: busy.name(),
                    vehicle_count: 2,
                },
                RouteVehicleCount {
                    route_name: quiet.name(),
                    vehicle_count: 0,
                },
            ]
        );
        Ok(())
    }
}
