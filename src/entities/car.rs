//! Car entity - Represents a vehicle of the fleet.
//!
//! `driver_id` is a weak reference: it is nullable, not backed by a foreign
//! key, and may point at a driver that no longer exists. Reads join the
//! driver with a left join so such cars are listed with an empty driver name.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Car database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    /// Unique identifier for the car
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Plate number (e.g., "A123BC")
    pub num: String,
    /// Body color
    pub color: String,
    /// Manufacturer or model name (e.g., "Toyota")
    pub mark: String,
    /// Owning driver, if one is assigned
    pub driver_id: Option<i64>,
}

/// Defines relationships between Car and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One car has many journal entries
    #[sea_orm(has_many = "super::journal_entry::Entity")]
    JournalEntries,
}

impl Related<super::journal_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntries.def()
    }
}

// Kept out of `Relation` so schema generation does not emit a foreign key.
impl Related<super::driver::Entity> for Entity {
    fn to() -> RelationDef {
        Entity::belongs_to(super::driver::Entity)
            .from(Column::DriverId)
            .to(super::driver::Column::Id)
            .into()
    }
}

impl ActiveModelBehavior for ActiveModel {}
