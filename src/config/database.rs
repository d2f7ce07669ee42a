//! Database configuration module.
//!
//! This module handles the `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs. Foreign keys are only emitted for
//! journal entries (to cars and routes); cars reference drivers without one.

use crate::entities::{Car, Driver, JournalEntry, Route, User};
use crate::errors::{Error, Result};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::{debug, info, instrument};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/autopark.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection pool to the database named by `DATABASE_URL`.
///
/// Falls back to a local `SQLite` file if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    ensure_sqlite_parent_dir(&database_url)?;
    Database::connect(&database_url)
        .await
        .map_err(|e| Error::Config {
            message: format!("Failed to connect to database: {e}"),
        })
}

/// Creates the directory holding a file-backed `SQLite` database.
///
/// In-memory and non-`SQLite` URLs are left alone.
fn ensure_sqlite_parent_dir(database_url: &str) -> Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let file = rest.split('?').next().unwrap_or_default();
    match std::path::Path::new(file).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)?,
        _ => {}
    }
    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    debug!("Ensuring table {}", entity.table_name());
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates all tables if they do not exist yet.
///
/// Journal entries are created last because they reference cars and routes.
#[instrument(skip(db))]
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Driver).await?;
    create_table(db, &schema, Car).await?;
    create_table(db, &schema, Route).await?;
    create_table(db, &schema, JournalEntry).await?;
    create_table(db, &schema, User).await?;

    info!("Database tables ensured.");
    Ok(())
}
