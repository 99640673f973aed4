//! Explicit unit-of-work demarcation.

use super::DbError;
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Runs `work` inside one `BEGIN IMMEDIATE` transaction on `conn`.
///
/// The closure keeps using `conn` (or anything borrowing it); every statement
/// it issues belongs to the open transaction.
///
/// # Contract
/// - `Ok` from `work` commits; a failed commit is returned as an error.
/// - `Err` from `work`, a panic, or any early exit rolls back.
/// - Nested calls on the same connection fail with a SQLite error.
pub fn run_in_transaction<T, E>(
    conn: &Connection,
    work: impl FnOnce() -> Result<T, E>,
) -> Result<T, E>
where
    E: From<DbError>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(DbError::from)?;
    let value = work()?;
    tx.commit().map_err(DbError::from)?;
    Ok(value)
}
