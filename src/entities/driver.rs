//! Driver entity - Represents a member of the fleet personnel.
//!
//! A driver may own any number of cars. Deleting a driver removes the cars
//! that reference it, which is handled explicitly by the persistence layer
//! because cars only hold a weak reference (no foreign key) to their driver.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Driver database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "drivers")]
pub struct Model {
    /// Unique identifier for the driver
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Patronymic, may be empty
    pub father_name: String,
}

impl Model {
    /// Full name in "last first father" order, the way it is shown next to a car.
    #[must_use]
    pub fn full_name(&self) -> String {
        [&self.last_name, &self.first_name, &self.father_name]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Drivers are referenced by cars without a declared relation.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
