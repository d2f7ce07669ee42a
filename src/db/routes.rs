//! Route queries, the restricted route delete and route statistics.

use crate::entities::{JournalEntry, Route, journal_entry, route};
use crate::errors::{DbResultExt, Error, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, Set, Statement, TransactionTrait,
};
use serde::Serialize;
use tracing::{info, instrument};

/// Number of distinct cars that travelled a route.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct RouteVehicleCount {
    /// Route display name ("start - end")
    pub route_name: String,
    /// Distinct cars with at least one journal entry on the route
    pub vehicle_count: i64,
}

/// Lists every route, ordered by id.
#[instrument(skip(db))]
pub async fn list_routes<C: ConnectionTrait>(db: &C) -> Result<Vec<route::Model>> {
    Route::find()
        .order_by_asc(route::Column::Id)
        .all(db)
        .await
        .context(|| "listing routes".to_string())
}

/// One route by id.
#[instrument(skip(db))]
pub async fn find_route<C: ConnectionTrait>(db: &C, route_id: i64) -> Result<Option<route::Model>> {
    Route::find_by_id(route_id)
        .one(db)
        .await
        .context(|| format!("loading route {route_id}"))
}

/// Inserts a route with already validated endpoints.
#[instrument(skip(db))]
pub async fn insert_route<C: ConnectionTrait>(
    db: &C,
    start_point: &str,
    end_point: &str,
) -> Result<route::Model> {
    let model = route::ActiveModel {
        start_point: Set(start_point.to_string()),
        end_point: Set(end_point.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .context(|| "inserting route".to_string())?;

    info!("Added route {} (ID: {})", model.name(), model.id);
    Ok(model)
}

/// Replaces both endpoints. Returns the number of rows updated.
#[instrument(skip(db))]
pub async fn update_route<C: ConnectionTrait>(
    db: &C,
    route_id: i64,
    start_point: &str,
    end_point: &str,
) -> Result<u64> {
    let result = Route::update_many()
        .col_expr(route::Column::StartPoint, Expr::value(start_point))
        .col_expr(route::Column::EndPoint, Expr::value(end_point))
        .filter(route::Column::Id.eq(route_id))
        .exec(db)
        .await
        .context(|| format!("updating route {route_id}"))?;
    Ok(result.rows_affected)
}

/// Deletes a route unless a journal entry still references it.
///
/// # Errors
/// - `Conflict` if journal entries reference the route
/// - `NotFound` if the route does not exist
#[instrument(skip(db))]
pub async fn delete_route_restricted(db: &DatabaseConnection, route_id: i64) -> Result<()> {
    let txn = db
        .begin()
        .await
        .context(|| format!("starting transaction to delete route {route_id}"))?;

    let references = JournalEntry::find()
        .filter(journal_entry::Column::RouteId.eq(route_id))
        .count(&txn)
        .await
        .context(|| format!("counting journal entries of route {route_id}"))?;

    if references > 0 {
        return Err(Error::Conflict {
            message: format!("route {route_id} is used by {references} journal entries"),
        });
    }

    let deleted = Route::delete_many()
        .filter(route::Column::Id.eq(route_id))
        .exec(&txn)
        .await
        .context(|| format!("deleting route {route_id}"))?;

    if deleted.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "route",
            id: route_id,
        });
    }

    txn.commit()
        .await
        .context(|| format!("committing deletion of route {route_id}"))?;

    info!("Deleted route {}", route_id);
    Ok(())
}

/// Per-route count of distinct cars found in the journal, ordered by route id.
#[instrument(skip(db))]
pub async fn route_vehicle_counts<C: ConnectionTrait>(db: &C) -> Result<Vec<RouteVehicleCount>> {
    let statement = Statement::from_string(
        db.get_database_backend(),
        "SELECT r.start_point || ' - ' || r.end_point AS route_name, \
                COUNT(DISTINCT j.car_id) AS vehicle_count \
         FROM routes r \
         LEFT JOIN journal_entries j ON j.route_id = r.id \
         GROUP BY r.id, r.start_point, r.end_point \
         ORDER BY r.id",
    );

    RouteVehicleCount::find_by_statement(statement)
        .all(db)
        .await
        .context(|| "counting vehicles per route".to_string())
}
