//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod car;
pub mod driver;
pub mod journal_entry;
pub mod route;
pub mod user;

// Re-export specific types to avoid conflicts
pub use car::{Column as CarColumn, Entity as Car, Model as CarModel};
pub use driver::{Column as DriverColumn, Entity as Driver, Model as DriverModel};
pub use journal_entry::{
    Column as JournalEntryColumn, Entity as JournalEntry, Model as JournalEntryModel,
};
pub use route::{Column as RouteColumn, Entity as Route, Model as RouteModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
