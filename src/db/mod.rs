//! Persistence gateway - parameterized statements against the fleet database.
//!
//! Single-statement functions are generic over [`sea_orm::ConnectionTrait`] so they
//! run equally on the pool or inside a caller's transaction. Multi-statement
//! mutations take the pool, open their own transaction and commit it only
//! after every statement succeeded; an early return drops the transaction,
//! which rolls it back.

pub mod cars;
pub mod drivers;
pub mod journal;
pub mod routes;
pub mod users;

pub use cars::{delete_car_cascade, find_car_with_driver, list_cars_with_drivers};
pub use drivers::{delete_driver_cascade, list_drivers};
pub use journal::{JournalRow, list_journal_rows};
pub use routes::{RouteVehicleCount, delete_route_restricted, route_vehicle_counts};
pub use users::{find_user_by_username, insert_user};
