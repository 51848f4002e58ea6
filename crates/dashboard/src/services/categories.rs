//! Category management: admin-only writes, public reads.

use vendora_core::{Actor, ActorRole, CategoryId};

use super::{authorize, require_field};
use crate::db::{CategoriesRepo, RepositoryError};
use crate::error::ServiceError;
use crate::models::{Category, CategoryData};

/// Service for category upserts, reads, and deletes.
pub struct CategoryService<R> {
    repo: R,
}

impl<R: CategoriesRepo> CategoryService<R> {
    /// Create the service around an injected repository.
    pub const fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create or update a category, keyed on the payload's ID.
    ///
    /// Permission level: Admin only.
    ///
    /// # Errors
    ///
    /// `Unauthenticated`/`Unauthorized`/`InvalidInput`/`Conflict` per the
    /// guard sequence; `Repo` for write-phase failures.
    pub async fn upsert_category(
        &self,
        actor: Option<&Actor>,
        category: CategoryData,
    ) -> Result<Category, ServiceError> {
        authorize(actor, ActorRole::Admin)?;
        require_field(&category.name, "Please provide category data.")?;
        require_field(&category.url, "Please provide category data.")?;
        require_field(&category.image, "Please provide category data.")?;

        if let Some(field) = self
            .repo
            .find_conflict(&category.name, &category.url, category.id)
            .await?
        {
            return Err(ServiceError::Conflict {
                entity: "category",
                field,
            });
        }

        self.repo.upsert(&category).await.map_err(|err| {
            tracing::error!(error = %err, category_id = %category.id, "category upsert failed");
            ServiceError::from(err)
        })
    }

    /// All categories, most recently updated first.
    ///
    /// Permission level: public.
    ///
    /// # Errors
    ///
    /// `Repo` when the query fails.
    pub async fn get_all_categories(&self) -> Result<Vec<Category>, ServiceError> {
        Ok(self.repo.list_all().await?)
    }

    /// One category by ID, or `None`.
    ///
    /// Permission level: public.
    ///
    /// # Errors
    ///
    /// `Repo` when the query fails.
    pub async fn get_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Option<Category>, ServiceError> {
        Ok(self.repo.get(category_id).await?)
    }

    /// Hard-delete a category and return the deleted record.
    ///
    /// Permission level: Admin only. Fails with a foreign-key error while
    /// subcategories or products still reference the category (RESTRICT).
    ///
    /// # Errors
    ///
    /// `Unauthenticated`/`Unauthorized` per the guard sequence; `NotFound`
    /// when no such category exists; `Repo` for write-phase failures.
    pub async fn delete_category(
        &self,
        actor: Option<&Actor>,
        category_id: CategoryId,
    ) -> Result<Category, ServiceError> {
        authorize(actor, ActorRole::Admin)?;

        self.repo.delete(category_id).await.map_err(|err| match err {
            RepositoryError::NotFound => ServiceError::NotFound("Category"),
            other => {
                tracing::error!(error = %other, category_id = %category_id, "category delete failed");
                ServiceError::from(other)
            }
        })
    }
}
