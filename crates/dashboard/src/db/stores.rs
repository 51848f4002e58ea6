//! Store repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use vendora_core::{Email, StoreId, UniqueField, UserId};

use super::{RepositoryError, map_write_error};
use crate::models::{Store, StoreData};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    id: StoreId,
    name: String,
    url: String,
    email: Email,
    phone: String,
    owner_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StoreRow> for Store {
    fn from(row: StoreRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            url: row.url,
            email: row.email,
            phone: row.phone,
            owner_id: row.owner_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UniqueFieldsRow {
    name: String,
    url: String,
    email: String,
    phone: String,
}

// =============================================================================
// Repository
// =============================================================================

/// Persistence operations for stores.
#[async_trait]
pub trait StoresRepo: Send + Sync {
    /// Report which unique field another store (not `exclude`) already
    /// claims, in fixed priority order (name, url, email, phone). `None`
    /// means all four candidate values are free.
    async fn find_conflict(
        &self,
        name: &str,
        url: &str,
        email: &Email,
        phone: &str,
        exclude: StoreId,
    ) -> Result<Option<UniqueField>, RepositoryError>;

    /// Create the store if its ID is new, update it otherwise.
    ///
    /// `owner` is written only on create; updates never touch the ownership
    /// link.
    async fn upsert(&self, data: &StoreData, owner: UserId) -> Result<Store, RepositoryError>;

    /// Look a store up by its unique url segment.
    async fn get_by_url(&self, url: &str) -> Result<Option<Store>, RepositoryError>;

    /// All stores, most recently updated first.
    async fn list_all(&self) -> Result<Vec<Store>, RepositoryError>;

    /// Fetch a single store.
    async fn get(&self, id: StoreId) -> Result<Option<Store>, RepositoryError>;

    /// Hard-delete a store, returning the deleted record.
    async fn delete(&self, id: StoreId) -> Result<Store, RepositoryError>;
}

/// `PostgreSQL`-backed store repository.
pub struct PgStoresRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PgStoresRepo<'a> {
    /// Create a new store repository over an injected pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoresRepo for PgStoresRepo<'_> {
    async fn find_conflict(
        &self,
        name: &str,
        url: &str,
        email: &Email,
        phone: &str,
        exclude: StoreId,
    ) -> Result<Option<UniqueField>, RepositoryError> {
        let existing = sqlx::query_as::<_, UniqueFieldsRow>(
            "SELECT name, url, email, phone FROM stores
             WHERE (name = $1 OR url = $2 OR email = $3 OR phone = $4) AND id <> $5
             LIMIT 1",
        )
        .bind(name)
        .bind(url)
        .bind(email)
        .bind(phone)
        .bind(exclude)
        .fetch_optional(self.pool)
        .await?;

        Ok(existing.and_then(|row| {
            if row.name == name {
                Some(UniqueField::Name)
            } else if row.url == url {
                Some(UniqueField::Url)
            } else if row.email == email.as_str() {
                Some(UniqueField::Email)
            } else if row.phone == phone {
                Some(UniqueField::Phone)
            } else {
                None
            }
        }))
    }

    async fn upsert(&self, data: &StoreData, owner: UserId) -> Result<Store, RepositoryError> {
        // owner_id is deliberately absent from the DO UPDATE set: ownership
        // is fixed at creation.
        let row = sqlx::query_as::<_, StoreRow>(
            "INSERT INTO stores (id, name, url, email, phone, owner_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (id) DO UPDATE
             SET name = EXCLUDED.name,
                 url = EXCLUDED.url,
                 email = EXCLUDED.email,
                 phone = EXCLUDED.phone,
                 updated_at = now()
             RETURNING id, name, url, email, phone, owner_id, created_at, updated_at",
        )
        .bind(data.id)
        .bind(&data.name)
        .bind(&data.url)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(owner)
        .fetch_one(self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    async fn get_by_url(&self, url: &str) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            "SELECT id, name, url, email, phone, owner_id, created_at, updated_at
             FROM stores
             WHERE url = $1",
        )
        .bind(url)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Store>, RepositoryError> {
        let rows = sqlx::query_as::<_, StoreRow>(
            "SELECT id, name, url, email, phone, owner_id, created_at, updated_at
             FROM stores
             ORDER BY updated_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            "SELECT id, name, url, email, phone, owner_id, created_at, updated_at
             FROM stores
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: StoreId) -> Result<Store, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            "DELETE FROM stores
             WHERE id = $1
             RETURNING id, name, url, email, phone, owner_id, created_at, updated_at",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(map_write_error)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }
}
