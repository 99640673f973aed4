//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage gateway contract for employee records.
//! - Isolate SQLite query details from the service layer.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - No validation or business rules live here.

pub mod employee_repo;
