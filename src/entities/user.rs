//! User entity - An account that can sign in to the web interface.

use sea_orm::entity::prelude::*;
use serde::Serialize;

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, unique across accounts
    #[sea_orm(unique)]
    pub username: String,
    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role name; self-registered accounts get `"user"`
    pub role: String,
    /// When the account was registered
    pub created_at: DateTime,
}

/// `User` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
