//! Account storage.

use crate::entities::{User, user};
use crate::errors::{DbResultExt, Error, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    Set, SqlErr,
};
use tracing::{info, instrument};

/// Exact, case-sensitive username lookup.
#[instrument(skip(db))]
pub async fn find_user_by_username<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
        .context(|| format!("loading user {username}"))
}

/// Inserts an account. A unique-index violation on the username maps to `Conflict`.
#[instrument(skip(db, password_hash))]
pub async fn insert_user<C: ConnectionTrait>(
    db: &C,
    username: &str,
    password_hash: &str,
    role: &str,
) -> Result<user::Model> {
    let model = user::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(password_hash.to_string()),
        role: Set(role.to_string()),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };

    match model.insert(db).await {
        Ok(created) => {
            info!("Registered user {} (ID: {})", created.username, created.id);
            Ok(created)
        }
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Err(Error::Conflict {
                message: format!("user '{username}' already exists"),
            })
        }
        Err(e) => Err(e).context(|| format!("inserting user {username}")),
    }
}

/// Number of registered accounts.
#[instrument(skip(db))]
pub async fn count_users<C: ConnectionTrait>(db: &C) -> Result<u64> {
    User::find()
        .count(db)
        .await
        .context(|| "counting users".to_string())
}
