//! Employee storage gateway contract and SQLite implementation.
//!
//! # Responsibility
//! - Map list/get/save/delete one-to-one onto the `employee` table.
//! - Provide the unit-of-work hook used by the service layer.
//!
//! # Invariants
//! - `save` is an upsert: existing keys are overwritten, anything else is
//!   inserted under a newly generated key.
//! - `delete_by_id` reports a missing key as `RepoError::NotFound`.

use crate::db::{run_in_transaction, DbError};
use crate::model::employee::{Employee, EmployeeId};
use rusqlite::{params, Connection, Row};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPLOYEE_TABLE: &str = "employee";
const EMPLOYEE_COLUMNS: &[&str] = &["id", "first_name", "last_name", "email"];
const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    email
FROM employee";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for employee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(EmployeeId),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` does not exist")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` does not exist")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_)
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage gateway for employee records.
pub trait EmployeeRepository {
    fn find_all(&self) -> RepoResult<Vec<Employee>>;
    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn save(&self, employee: &Employee) -> RepoResult<Employee>;
    fn delete_by_id(&self, id: EmployeeId) -> RepoResult<()>;

    /// Runs `work` against this repository as one unit of work.
    ///
    /// Commits when `work` returns `Ok`, rolls back otherwise.
    fn in_transaction<T>(&self, work: impl FnOnce(&Self) -> RepoResult<T>) -> RepoResult<T>;
}

/// SQLite-backed employee repository.
#[derive(Debug)]
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Binds the repository to a connection after checking its schema.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when `employee` does not exist.
    /// - `MissingRequiredColumn` when one of its mapped columns is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_employee_table(conn)?;
        Ok(Self { conn })
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();

        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }

        Ok(None)
    }

    fn save(&self, employee: &Employee) -> RepoResult<Employee> {
        if employee.is_persisted() {
            let changed = self.conn.execute(
                "UPDATE employee
                 SET
                    first_name = ?1,
                    last_name = ?2,
                    email = ?3
                 WHERE id = ?4;",
                params![
                    employee.first_name.as_deref(),
                    employee.last_name.as_deref(),
                    employee.email.as_deref(),
                    employee.id,
                ],
            )?;

            if changed > 0 {
                return Ok(employee.clone());
            }
        }

        self.conn.execute(
            "INSERT INTO employee (
                first_name,
                last_name,
                email
            ) VALUES (?1, ?2, ?3);",
            params![
                employee.first_name.as_deref(),
                employee.last_name.as_deref(),
                employee.email.as_deref(),
            ],
        )?;

        Ok(Employee {
            id: self.conn.last_insert_rowid(),
            ..employee.clone()
        })
    }

    fn delete_by_id(&self, id: EmployeeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM employee WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn in_transaction<T>(&self, work: impl FnOnce(&Self) -> RepoResult<T>) -> RepoResult<T> {
        run_in_transaction(self.conn, || work(self))
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
    })
}

fn ensure_employee_table(conn: &Connection) -> RepoResult<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([EMPLOYEE_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<HashSet<_>, _>>()?;

    if columns.is_empty() {
        return Err(RepoError::MissingRequiredTable(EMPLOYEE_TABLE));
    }

    if let Some(column) = EMPLOYEE_COLUMNS
        .iter()
        .copied()
        .find(|column| !columns.contains(*column))
    {
        return Err(RepoError::MissingRequiredColumn {
            table: EMPLOYEE_TABLE,
            column,
        });
    }

    Ok(())
}
