//! Route entity - A fixed point-to-point path a car can be dispatched on.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Route database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "routes")]
pub struct Model {
    /// Unique identifier for the route
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Departure point
    pub start_point: String,
    /// Destination point
    pub end_point: String,
}

impl Model {
    /// Display name used in listings, statistics and the export ("start - end").
    #[must_use]
    pub fn name(&self) -> String {
        format!("{} - {}", self.start_point, self.end_point)
    }
}

/// Defines relationships between Route and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One route has many journal entries
    #[sea_orm(has_many = "super::journal_entry::Entity")]
    JournalEntries,
}

impl Related<super::journal_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
