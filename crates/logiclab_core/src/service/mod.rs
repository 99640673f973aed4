//! Core use-case services.
//!
//! # Responsibility
//! - Expose repository operations to the HTTP layer.
//! - Demarcate write paths as units of work.

pub mod employee_service;
