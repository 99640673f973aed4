//! Shared database handle.
//!
//! # Invariants
//! - At most one session holds the connection at a time.
//! - A session is released when its closure returns, even on error.
//! - A panic inside one session never locks out later sessions.

use super::{open_db, open_db_in_memory, DbError, DbResult};
use log::warn;
use rusqlite::Connection;
use std::fmt::{Debug, Formatter};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Process-wide handle to the employee store.
///
/// Callers never touch the connection directly; they borrow it for the
/// duration of one logical operation through [`Database::session`].
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Opens a file-backed store, creating the schema when needed.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        open_db(path).map(Self::from_connection)
    }

    /// Opens a fresh in-memory store.
    pub fn open_in_memory() -> DbResult<Self> {
        open_db_in_memory().map(Self::from_connection)
    }

    /// Wraps an already bootstrapped connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Runs `work` with exclusive access to the connection.
    ///
    /// When an earlier session panicked, the connection is taken back and
    /// any transaction it left open is rolled back first.
    ///
    /// # Errors
    /// - Returns `DbError::Sqlite` when that rollback fails.
    /// - Otherwise returns whatever `work` returns.
    pub fn session<T, E>(&self, work: impl FnOnce(&Connection) -> Result<T, E>) -> Result<T, E>
    where
        E: From<DbError>,
    {
        let conn = self.lock()?;
        work(&conn)
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        match self.conn.lock() {
            Ok(conn) => Ok(conn),
            Err(poisoned) => {
                let conn = poisoned.into_inner();
                self.conn.clear_poison();
                let open_transaction = !conn.is_autocommit();
                warn!(
                    "event=db_session module=db status=recovered open_transaction={open_transaction}"
                );
                if open_transaction {
                    conn.execute_batch("ROLLBACK;")?;
                }
                Ok(conn)
            }
        }
    }
}

impl Debug for Database {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}
