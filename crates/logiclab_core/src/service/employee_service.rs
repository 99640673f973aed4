//! Employee record service.
//!
//! # Invariants
//! - Every call is forwarded to the repository without transformation.
//! - `save` and `delete_by_id` each run as a single unit of work.
//! - Reads run outside any transaction.

use crate::model::employee::{Employee, EmployeeId};
use crate::repo::employee_repo::{EmployeeRepository, RepoResult};
use log::debug;

/// Use-case facade over an employee repository.
#[derive(Debug)]
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every stored employee.
    pub fn find_all(&self) -> RepoResult<Vec<Employee>> {
        self.repo.find_all()
    }

    /// Gets one employee by key; `None` when no such record exists.
    pub fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        self.repo.find_by_id(id)
    }

    /// Inserts or overwrites an employee and returns the persisted record.
    pub fn save(&self, employee: &Employee) -> RepoResult<Employee> {
        let saved = self.repo.in_transaction(|repo| repo.save(employee))?;
        debug!(
            "event=employee_save module=service status=ok id={} created={}",
            saved.id,
            saved.id != employee.id
        );
        Ok(saved)
    }

    /// Deletes an employee by key.
    ///
    /// Returns `RepoError::NotFound` unchanged when the key does not exist.
    pub fn delete_by_id(&self, id: EmployeeId) -> RepoResult<()> {
        self.repo.in_transaction(|repo| repo.delete_by_id(id))?;
        debug!("event=employee_delete module=service status=ok id={id}");
        Ok(())
    }
}
