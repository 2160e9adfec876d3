//! Error types for the store layer.

use rallypoint_types::EntityKind;

/// Errors raised by store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No record with the given id exists in the collection.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// The collection that was searched.
        kind: EntityKind,
        /// The id that was looked up.
        id: String,
    },

    /// A record with the given id already exists. Only raised when
    /// inserting records with caller-chosen ids (seeding).
    #[error("duplicate {kind} id: {id}")]
    Duplicate {
        /// The collection that was written.
        kind: EntityKind,
        /// The conflicting id.
        id: String,
    },
}

impl StoreError {
    /// Build a [`StoreError::NotFound`] for the given id.
    pub fn not_found(kind: EntityKind, id: impl core::fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}
