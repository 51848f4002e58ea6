//! Store domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendora_core::{Email, StoreId, UserId};

/// A seller's store (domain type).
///
/// Name, url, email, and phone are each globally unique. Ownership is
/// established when the store is created and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Unique store ID.
    pub id: StoreId,
    /// Display name, unique across stores.
    pub name: String,
    /// URL segment, unique across stores.
    pub url: String,
    /// Contact email, unique across stores.
    pub email: Email,
    /// Contact phone number, unique across stores.
    pub phone: String,
    /// The seller who created the store.
    pub owner_id: UserId,
    /// When the store was created.
    pub created_at: DateTime<Utc>,
    /// When the store was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Upsert payload for a store.
///
/// The owner is not part of the payload - it is taken from the authenticated
/// actor on create and left untouched on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreData {
    pub id: StoreId,
    pub name: String,
    pub url: String,
    pub email: Email,
    pub phone: String,
}
