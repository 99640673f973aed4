//! Domain model for employee records.
//!
//! # Invariants
//! - Every persisted record is identified by a store-generated `EmployeeId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod employee;
