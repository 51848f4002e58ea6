//! Category repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use vendora_core::{CategoryId, UniqueField};

use super::{RepositoryError, map_write_error};
use crate::models::{Category, CategoryData};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: CategoryId,
    name: String,
    url: String,
    image: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            url: row.url,
            image: row.image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct NameUrlRow {
    name: String,
    url: String,
}

// =============================================================================
// Repository
// =============================================================================

/// Persistence operations for categories.
#[async_trait]
pub trait CategoriesRepo: Send + Sync {
    /// Report which unique field another category (not `exclude`) already
    /// claims, in fixed priority order (name before url). `None` means the
    /// candidate is free.
    async fn find_conflict(
        &self,
        name: &str,
        url: &str,
        exclude: CategoryId,
    ) -> Result<Option<UniqueField>, RepositoryError>;

    /// Create the category if its ID is new, update it otherwise.
    async fn upsert(&self, data: &CategoryData) -> Result<Category, RepositoryError>;

    /// All categories, most recently updated first.
    async fn list_all(&self) -> Result<Vec<Category>, RepositoryError>;

    /// Fetch a single category.
    async fn get(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError>;

    /// Hard-delete a category, returning the deleted record.
    async fn delete(&self, id: CategoryId) -> Result<Category, RepositoryError>;
}

/// `PostgreSQL`-backed category repository.
pub struct PgCategoriesRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PgCategoriesRepo<'a> {
    /// Create a new category repository over an injected pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoriesRepo for PgCategoriesRepo<'_> {
    async fn find_conflict(
        &self,
        name: &str,
        url: &str,
        exclude: CategoryId,
    ) -> Result<Option<UniqueField>, RepositoryError> {
        let existing = sqlx::query_as::<_, NameUrlRow>(
            "SELECT name, url FROM categories WHERE (name = $1 OR url = $2) AND id <> $3 LIMIT 1",
        )
        .bind(name)
        .bind(url)
        .bind(exclude)
        .fetch_optional(self.pool)
        .await?;

        Ok(existing.map(|row| {
            if row.name == name {
                UniqueField::Name
            } else {
                UniqueField::Url
            }
        }))
    }

    async fn upsert(&self, data: &CategoryData) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO categories (id, name, url, image)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO UPDATE
             SET name = EXCLUDED.name,
                 url = EXCLUDED.url,
                 image = EXCLUDED.image,
                 updated_at = now()
             RETURNING id, name, url, image, created_at, updated_at",
        )
        .bind(data.id)
        .bind(&data.name)
        .bind(&data.url)
        .bind(&data.image)
        .fetch_one(self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    async fn list_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, url, image, created_at, updated_at
             FROM categories
             ORDER BY updated_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, url, image, created_at, updated_at
             FROM categories
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: CategoryId) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "DELETE FROM categories
             WHERE id = $1
             RETURNING id, name, url, image, created_at, updated_at",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(map_write_error)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }
}
