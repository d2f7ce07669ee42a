//! Account registration and login.
//!
//! Passwords are stored only as salted bcrypt hashes. Hashing and verifying
//! are CPU bound, so both run on the blocking thread pool.

use crate::{
    db,
    entities::user,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use tracing::{info, instrument, warn};

/// Minimum username length after trimming
pub const MIN_USERNAME_LEN: usize = 3;
/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 6;
/// Role given to self-registered accounts
pub const DEFAULT_ROLE: &str = "user";

/// Verifies a username and password.
///
/// # Errors
/// Returns `Authentication` if the username is unknown or the password does not match.
/// Both cases produce the same error.
#[instrument(skip(db, password))]
pub async fn authenticate_user(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<user::Model> {
    let Some(account) = db::find_user_by_username(db, username.trim()).await? else {
        warn!("Login attempt for unknown user");
        return Err(Error::Authentication);
    };

    let password = password.to_string();
    let hash = account.password_hash.clone();
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| Error::PasswordHash {
            message: format!("verification task failed: {e}"),
        })?
        // A corrupt stored hash is indistinguishable from a wrong password
        .unwrap_or(false);

    if !verified {
        warn!("Wrong password for user {}", account.username);
        return Err(Error::Authentication);
    }
    Ok(account)
}

/// Registers an account using the default bcrypt cost.
///
/// # Errors
/// See [`register_user_with_cost`].
pub async fn register_user(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<user::Model> {
    register_user_with_cost(db, username, password, bcrypt::DEFAULT_COST).await
}

/// Registers an account, hashing the password with the given bcrypt cost.
///
/// # Errors
/// - `Validation` if the trimmed username is shorter than 3 characters or
///   the password is shorter than 6
/// - `Conflict` if the username is taken
#[instrument(skip(db, password))]
pub async fn register_user_with_cost(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
    cost: u32,
) -> Result<user::Model> {
    let username = username.trim();
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(Error::validation(format!(
            "username must be at least {MIN_USERNAME_LEN} characters"
        )));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    if db::find_user_by_username(db, username).await?.is_some() {
        return Err(Error::Conflict {
            message: format!("user '{username}' already exists"),
        });
    }

    let password = password.to_string();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| Error::PasswordHash {
            message: format!("hashing task failed: {e}"),
        })?
        .map_err(|e| Error::PasswordHash {
            message: format!("cannot hash password with cost {cost}: {e}"),
        })?;

    // A concurrent registration can still win the race; the unique index maps it to Conflict
    let created = db::insert_user(db, username, &hash, DEFAULT_ROLE).await?;
    info!("User {} registered", created.username);
    Ok(created)
}
