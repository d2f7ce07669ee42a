//! Unified error type for the fleet journal.

use sea_orm::DbErr;
use thiserror::Error;

/// Every failure the crate reports, from input validation to storage.
#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected before any storage access
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// The addressed row does not exist
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind, e.g. `"car"`
        entity: &'static str,
        /// Requested id
        id: i64,
    },

    /// Uniqueness or referential rule violated (duplicate username, route in use)
    #[error("Conflict: {message}")]
    Conflict {
        /// Which rule was violated
        message: String,
    },

    /// The row vanished between check and write
    #[error("{entity} {id} was modified concurrently")]
    ConcurrentModification {
        /// Entity kind
        entity: &'static str,
        /// Id of the row that disappeared
        id: i64,
    },

    /// Unknown username or wrong password
    #[error("Invalid username or password")]
    Authentication,

    /// The request carries no live session
    #[error("No valid session")]
    Unauthenticated,

    /// Storage failure, with the operation that was running
    #[error("Database error while {context}: {source}")]
    Persistence {
        /// Operation and entity id, e.g. "deleting car 9"
        context: String,
        /// Underlying sea-orm error
        #[source]
        source: DbErr,
    },

    /// Hashing or verifying a password failed
    #[error("Password hashing error: {message}")]
    PasswordHash {
        /// bcrypt or worker failure
        message: String,
    },

    /// A view could not be rendered
    #[error("Render error: {message}")]
    Render {
        /// Renderer failure
        message: String,
    },

    /// The journal spreadsheet could not be produced
    #[error("Export error: {message}")]
    Export {
        /// Writer failure
        message: String,
    },

    /// Settings or database URL unusable
    #[error("Configuration error: {message}")]
    Config {
        /// What is misconfigured
        message: String,
    },

    /// Filesystem or socket failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl From<DbErr> for Error {
    fn from(source: DbErr) -> Self {
        Self::Persistence {
            context: "running a database operation".to_string(),
            source,
        }
    }
}

/// Attaches an operation description to storage failures.
pub(crate) trait DbResultExt<T> {
    fn context<F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> DbResultExt<T> for std::result::Result<T, DbErr> {
    fn context<F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|source| Error::Persistence {
            context: context(),
            source,
        })
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
