//! Unified error handling for the dashboard services.
//!
//! Guard failures (`Unauthenticated`, `Unauthorized`, `InvalidInput`,
//! `Conflict`) are raised before any write is attempted, in that order, so a
//! rejected call never leaves a partial write behind. Write-phase failures
//! from the persistence layer pass through unmodified inside [`Repo`].
//!
//! Messages are written to be shown to end users directly.
//!
//! [`Repo`]: ServiceError::Repo

use thiserror::Error;

use vendora_core::{ActorRole, UniqueField};

use crate::db::RepositoryError;

/// Service-level error type for all dashboard operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No authenticated actor was attached to the operation.
    #[error("Unauthenticated.")]
    Unauthenticated,

    /// The actor's role does not match the entity's required tier.
    #[error("Unauthorized Access: {required} Privileges Required for Entry.")]
    Unauthorized {
        /// The role the operation requires.
        required: ActorRole,
    },

    /// A required part of the payload is missing or blank.
    #[error("{0}")]
    InvalidInput(String),

    /// Another record already claims one of the payload's unique fields.
    #[error("A {entity} with the same {field} already exists")]
    Conflict {
        /// Human-readable entity kind ("category", "store", ...).
        entity: &'static str,
        /// The colliding field, reported in fixed priority order.
        field: UniqueField,
    },

    /// A referenced record does not exist.
    #[error("{0} not found.")]
    NotFound(&'static str),

    /// The slug generator exhausted its bounded retry budget.
    #[error("could not find a free slug for \"{0}\"")]
    SlugExhausted(String),

    /// Opaque passthrough from the persistence layer.
    #[error(transparent)]
    Repo(#[from] RepositoryError),
}
