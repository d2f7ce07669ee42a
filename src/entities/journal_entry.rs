//! Journal entry entity - One trip of one car along one route.
//!
//! An entry is created with a departure time (`time_out`) only and is "open"
//! until the arrival time (`time_in`) is recorded. Both columns hold naive
//! local timestamps, the same way the dispatch form submits them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Journal entry database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Car that made the trip
    pub car_id: i64,
    /// Route the car was dispatched on
    pub route_id: i64,
    /// Departure time
    pub time_out: DateTime,
    /// Arrival time, `None` while the trip is in progress
    pub time_in: Option<DateTime>,
}

/// Lifecycle state of a trip.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    /// Departed, arrival not recorded yet
    Open,
    /// Arrival recorded
    Closed,
}

impl Model {
    /// Reports whether the trip is still in progress.
    #[must_use]
    pub const fn status(&self) -> TripStatus {
        if self.time_in.is_some() {
            TripStatus::Closed
        } else {
            TripStatus::Open
        }
    }
}

/// Defines relationships between JournalEntry and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each entry belongs to one car
    #[sea_orm(
        belongs_to = "super::car::Entity",
        from = "Column::CarId",
        to = "super::car::Column::Id"
    )]
    Car,
    /// Each entry belongs to one route
    #[sea_orm(
        belongs_to = "super::route::Entity",
        from = "Column::RouteId",
        to = "super::route::Column::Id"
    )]
    Route,
}

impl Related<super::car::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Car.def()
    }
}

impl Related<super::route::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Route.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
