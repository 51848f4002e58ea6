//! Subcategory management: admin-only writes, public reads.

use vendora_core::{Actor, ActorRole, CategoryId, SubCategoryId};

use super::{authorize, require_field};
use crate::db::{RepositoryError, SubCategoriesRepo};
use crate::error::ServiceError;
use crate::models::{SubCategory, SubCategoryData, SubCategoryWithCategory};

/// Service for subcategory upserts, reads, and deletes.
pub struct SubCategoryService<R> {
    repo: R,
}

impl<R: SubCategoriesRepo> SubCategoryService<R> {
    /// Create the service around an injected repository.
    pub const fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create or update a subcategory, keyed on the payload's ID.
    ///
    /// Permission level: Admin only. The parent category must already exist;
    /// a dangling `category_id` surfaces as a write-phase foreign-key error
    /// rather than a validation failure.
    ///
    /// # Errors
    ///
    /// `Unauthenticated`/`Unauthorized`/`InvalidInput`/`Conflict` per the
    /// guard sequence; `Repo` for write-phase failures.
    pub async fn upsert_sub_category(
        &self,
        actor: Option<&Actor>,
        sub_category: SubCategoryData,
    ) -> Result<SubCategory, ServiceError> {
        authorize(actor, ActorRole::Admin)?;
        require_field(&sub_category.name, "Please provide subCategory data.")?;
        require_field(&sub_category.url, "Please provide subCategory data.")?;

        if let Some(field) = self
            .repo
            .find_conflict(&sub_category.name, &sub_category.url, sub_category.id)
            .await?
        {
            return Err(ServiceError::Conflict {
                entity: "subcategory",
                field,
            });
        }

        self.repo.upsert(&sub_category).await.map_err(|err| {
            tracing::error!(
                error = %err,
                sub_category_id = %sub_category.id,
                "subcategory upsert failed"
            );
            ServiceError::from(err)
        })
    }

    /// All subcategories with their parent category, most recently updated
    /// first.
    ///
    /// Permission level: public.
    ///
    /// # Errors
    ///
    /// `Repo` when the query fails.
    pub async fn get_all_sub_categories(
        &self,
    ) -> Result<Vec<SubCategoryWithCategory>, ServiceError> {
        Ok(self.repo.list_all().await?)
    }

    /// All subcategories of one category, most recently updated first.
    ///
    /// Permission level: public.
    ///
    /// # Errors
    ///
    /// `Repo` when the query fails.
    pub async fn get_sub_categories_for_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<SubCategory>, ServiceError> {
        Ok(self.repo.list_for_category(category_id).await?)
    }

    /// One subcategory by ID, or `None`.
    ///
    /// Permission level: public.
    ///
    /// # Errors
    ///
    /// `Repo` when the query fails.
    pub async fn get_sub_category(
        &self,
        sub_category_id: SubCategoryId,
    ) -> Result<Option<SubCategory>, ServiceError> {
        Ok(self.repo.get(sub_category_id).await?)
    }

    /// Hard-delete a subcategory and return the deleted record.
    ///
    /// Permission level: Admin only. Fails with a foreign-key error while
    /// products still reference the subcategory (RESTRICT).
    ///
    /// # Errors
    ///
    /// `Unauthenticated`/`Unauthorized` per the guard sequence; `NotFound`
    /// when no such subcategory exists; `Repo` for write-phase failures.
    pub async fn delete_sub_category(
        &self,
        actor: Option<&Actor>,
        sub_category_id: SubCategoryId,
    ) -> Result<SubCategory, ServiceError> {
        authorize(actor, ActorRole::Admin)?;

        self.repo
            .delete(sub_category_id)
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound => ServiceError::NotFound("SubCategory"),
                other => {
                    tracing::error!(
                        error = %other,
                        sub_category_id = %sub_category_id,
                        "subcategory delete failed"
                    );
                    ServiceError::from(other)
                }
            })
    }
}
