//! Employee domain model.
//!
//! # Invariants
//! - `id` is `UNSAVED_ID` until the store assigns a key on first insert.
//! - Once assigned, `id` never changes and is never reused.
//! - Name and email fields carry no constraints.

use serde::{Deserialize, Deserializer, Serialize};

/// Surrogate key generated by the store.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EmployeeId = i64;

/// Key value of a record that has never been saved.
pub const UNSAVED_ID: EmployeeId = 0;

/// The single record type of the service.
///
/// Serialized with camelCase keys (`id`, `firstName`, `lastName`, `email`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Missing or `null` on input means "not saved yet".
    #[serde(default, deserialize_with = "id_or_unsaved")]
    pub id: EmployeeId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl Employee {
    /// Creates an unsaved record with all fields set.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self::with_id(UNSAVED_ID, first_name, last_name, email)
    }

    /// Creates a record carrying a caller-provided key.
    ///
    /// Saving it updates the row with that key, or inserts a new row with a
    /// freshly generated key when no such row exists.
    pub fn with_id(
        id: EmployeeId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            email: Some(email.into()),
        }
    }

    /// Returns whether this record carries a store-assigned key.
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_ID
    }
}

fn id_or_unsaved<'de, D>(deserializer: D) -> Result<EmployeeId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<EmployeeId>::deserialize(deserializer)?.unwrap_or(UNSAVED_ID))
}
