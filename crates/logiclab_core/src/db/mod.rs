//! SQLite storage bootstrap, session handle and unit-of-work wrapper.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the employee store.
//! - Make sure the `employee` table exists before any record access.
//! - Hand out one working session per logical operation.
//!
//! # Invariants
//! - Schema bootstrap is idempotent; no versioned migrations are tracked.
//! - A unit of work either commits fully or leaves no trace.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
mod session;
mod transaction;

pub use open::{open_db, open_db_in_memory};
pub use session::Database;
pub use transaction::run_in_transaction;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
