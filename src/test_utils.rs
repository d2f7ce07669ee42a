//! Shared test utilities for the fleet journal.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{car, driver, journal, route},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Installs a test-writer subscriber so `tracing` output shows up in failing tests.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("autopark=debug")
        .try_init();
}

/// Creates a test driver with sensible defaults.
///
/// # Defaults
/// * `last_name`: "Petrov"
/// * `father_name`: "" (optional in the domain)
pub async fn create_test_driver(
    db: &DatabaseConnection,
    first_name: &str,
) -> Result<entities::driver::Model> {
    driver::add_driver(db, first_name, "Petrov", "").await
}

/// Creates a test driver with every name part given.
pub async fn create_custom_driver(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
    father_name: &str,
) -> Result<entities::driver::Model> {
    driver::add_driver(db, first_name, last_name, father_name).await
}

/// Creates a test car.
///
/// # Defaults
/// * `color`: "white"
/// * `mark`: "Lada"
pub async fn create_test_car(
    db: &DatabaseConnection,
    num: &str,
    driver_id: Option<i64>,
) -> Result<entities::car::Model> {
    car::add_car(db, num, "white", "Lada", driver_id).await
}

/// Creates a test route between two points.
pub async fn create_test_route(
    db: &DatabaseConnection,
    start_point: &str,
    end_point: &str,
) -> Result<entities::route::Model> {
    route::add_route(db, start_point, end_point).await
}

/// Creates an open journal entry departing at 2024-03-01 08:00.
pub async fn create_test_entry(
    db: &DatabaseConnection,
    car_id: i64,
    route_id: i64,
) -> Result<entities::journal_entry::Model> {
    journal::add_journal_entry(db, car_id, route_id, "2024-03-01T08:00").await
}

/// Sets up one unassigned car and one route.
/// Returns (car, route) for journal tests.
pub async fn setup_car_and_route(
    db: &DatabaseConnection,
) -> Result<(entities::car::Model, entities::route::Model)> {
    let car = create_test_car(db, "A123BC", None).await?;
    let route = create_test_route(db, "Depot", "Airport").await?;
    Ok((car, route))
}
