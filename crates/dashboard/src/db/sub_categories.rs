//! Subcategory repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use vendora_core::{CategoryId, SubCategoryId, UniqueField};

use super::{RepositoryError, map_write_error};
use crate::models::{Category, SubCategory, SubCategoryData, SubCategoryWithCategory};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct SubCategoryRow {
    id: SubCategoryId,
    name: String,
    url: String,
    category_id: CategoryId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SubCategoryRow> for SubCategory {
    fn from(row: SubCategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            url: row.url,
            category_id: row.category_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Subcategory joined with its parent category (aliased columns).
#[derive(Debug, sqlx::FromRow)]
struct JoinedRow {
    id: SubCategoryId,
    name: String,
    url: String,
    category_id: CategoryId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    category_name: String,
    category_url: String,
    category_image: String,
    category_created_at: DateTime<Utc>,
    category_updated_at: DateTime<Utc>,
}

impl From<JoinedRow> for SubCategoryWithCategory {
    fn from(row: JoinedRow) -> Self {
        Self {
            category: Category {
                id: row.category_id,
                name: row.category_name,
                url: row.category_url,
                image: row.category_image,
                created_at: row.category_created_at,
                updated_at: row.category_updated_at,
            },
            sub_category: SubCategory {
                id: row.id,
                name: row.name,
                url: row.url,
                category_id: row.category_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
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

/// Persistence operations for subcategories.
#[async_trait]
pub trait SubCategoriesRepo: Send + Sync {
    /// Report which unique field another subcategory (not `exclude`) already
    /// claims, name before url. `None` means the candidate is free.
    async fn find_conflict(
        &self,
        name: &str,
        url: &str,
        exclude: SubCategoryId,
    ) -> Result<Option<UniqueField>, RepositoryError>;

    /// Create the subcategory if its ID is new, update it otherwise.
    ///
    /// The category linkage is enforced by the database; an unknown
    /// `category_id` fails as a foreign-key violation.
    async fn upsert(&self, data: &SubCategoryData) -> Result<SubCategory, RepositoryError>;

    /// All subcategories with their parent category, most recently updated
    /// first.
    async fn list_all(&self) -> Result<Vec<SubCategoryWithCategory>, RepositoryError>;

    /// All subcategories of one category, most recently updated first.
    async fn list_for_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<SubCategory>, RepositoryError>;

    /// Fetch a single subcategory.
    async fn get(&self, id: SubCategoryId) -> Result<Option<SubCategory>, RepositoryError>;

    /// Hard-delete a subcategory, returning the deleted record.
    async fn delete(&self, id: SubCategoryId) -> Result<SubCategory, RepositoryError>;
}

/// `PostgreSQL`-backed subcategory repository.
pub struct PgSubCategoriesRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PgSubCategoriesRepo<'a> {
    /// Create a new subcategory repository over an injected pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubCategoriesRepo for PgSubCategoriesRepo<'_> {
    async fn find_conflict(
        &self,
        name: &str,
        url: &str,
        exclude: SubCategoryId,
    ) -> Result<Option<UniqueField>, RepositoryError> {
        let existing = sqlx::query_as::<_, NameUrlRow>(
            "SELECT name, url FROM sub_categories
             WHERE (name = $1 OR url = $2) AND id <> $3
             LIMIT 1",
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

    async fn upsert(&self, data: &SubCategoryData) -> Result<SubCategory, RepositoryError> {
        let row = sqlx::query_as::<_, SubCategoryRow>(
            "INSERT INTO sub_categories (id, name, url, category_id)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO UPDATE
             SET name = EXCLUDED.name,
                 url = EXCLUDED.url,
                 category_id = EXCLUDED.category_id,
                 updated_at = now()
             RETURNING id, name, url, category_id, created_at, updated_at",
        )
        .bind(data.id)
        .bind(&data.name)
        .bind(&data.url)
        .bind(data.category_id)
        .fetch_one(self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    async fn list_all(&self) -> Result<Vec<SubCategoryWithCategory>, RepositoryError> {
        let rows = sqlx::query_as::<_, JoinedRow>(
            "SELECT sc.id, sc.name, sc.url, sc.category_id, sc.created_at, sc.updated_at,
                    c.name AS category_name,
                    c.url AS category_url,
                    c.image AS category_image,
                    c.created_at AS category_created_at,
                    c.updated_at AS category_updated_at
             FROM sub_categories sc
             JOIN categories c ON c.id = sc.category_id
             ORDER BY sc.updated_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_for_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<SubCategory>, RepositoryError> {
        let rows = sqlx::query_as::<_, SubCategoryRow>(
            "SELECT id, name, url, category_id, created_at, updated_at
             FROM sub_categories
             WHERE category_id = $1
             ORDER BY updated_at DESC",
        )
        .bind(category_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: SubCategoryId) -> Result<Option<SubCategory>, RepositoryError> {
        let row = sqlx::query_as::<_, SubCategoryRow>(
            "SELECT id, name, url, category_id, created_at, updated_at
             FROM sub_categories
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: SubCategoryId) -> Result<SubCategory, RepositoryError> {
        let row = sqlx::query_as::<_, SubCategoryRow>(
            "DELETE FROM sub_categories
             WHERE id = $1
             RETURNING id, name, url, category_id, created_at, updated_at",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(map_write_error)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }
}
