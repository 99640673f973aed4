//! Core record logic for the LogicLab employee service.
//! This crate owns the employee model, its storage and the service facade.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, run_in_transaction, Database, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{Employee, EmployeeId, UNSAVED_ID};
pub use repo::employee_repo::{
    EmployeeRepository, RepoError, RepoResult, SqliteEmployeeRepository,
};
pub use service::employee_service::EmployeeService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
