//! Store onboarding: seller-only writes, admin-only deletes, public reads.

use vendora_core::{Actor, ActorRole, StoreId};

use super::{authorize, require_field};
use crate::db::{RepositoryError, StoresRepo};
use crate::error::ServiceError;
use crate::models::{Store, StoreData};

/// Service for store upserts, reads, and deletes.
pub struct StoreService<R> {
    repo: R,
}

impl<R: StoresRepo> StoreService<R> {
    /// Create the service around an injected repository.
    pub const fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create or update a store, keyed on the payload's ID.
    ///
    /// Permission level: Seller only. On create, the store is linked to the
    /// authenticated seller; the link never changes on update.
    ///
    /// # Errors
    ///
    /// `Unauthenticated`/`Unauthorized`/`InvalidInput`/`Conflict` per the
    /// guard sequence; `Repo` for write-phase failures.
    pub async fn upsert_store(
        &self,
        actor: Option<&Actor>,
        store: StoreData,
    ) -> Result<Store, ServiceError> {
        let actor = authorize(actor, ActorRole::Seller)?;
        require_field(&store.name, "Please provide store data.")?;
        require_field(&store.url, "Please provide store data.")?;
        require_field(&store.phone, "Please provide store data.")?;

        if let Some(field) = self
            .repo
            .find_conflict(&store.name, &store.url, &store.email, &store.phone, store.id)
            .await?
        {
            return Err(ServiceError::Conflict {
                entity: "store",
                field,
            });
        }

        self.repo
            .upsert(&store, actor.user_id)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, store_id = %store.id, "store upsert failed");
                ServiceError::from(err)
            })
    }

    /// All stores, most recently updated first.
    ///
    /// Permission level: public.
    ///
    /// # Errors
    ///
    /// `Repo` when the query fails.
    pub async fn get_all_stores(&self) -> Result<Vec<Store>, ServiceError> {
        Ok(self.repo.list_all().await?)
    }

    /// One store by ID, or `None`.
    ///
    /// Permission level: public.
    ///
    /// # Errors
    ///
    /// `Repo` when the query fails.
    pub async fn get_store(&self, store_id: StoreId) -> Result<Option<Store>, ServiceError> {
        Ok(self.repo.get(store_id).await?)
    }

    /// Hard-delete a store and return the deleted record.
    ///
    /// Permission level: Admin only. Fails with a foreign-key error while
    /// products still reference the store (RESTRICT).
    ///
    /// # Errors
    ///
    /// `Unauthenticated`/`Unauthorized` per the guard sequence; `NotFound`
    /// when no such store exists; `Repo` for write-phase failures.
    pub async fn delete_store(
        &self,
        actor: Option<&Actor>,
        store_id: StoreId,
    ) -> Result<Store, ServiceError> {
        authorize(actor, ActorRole::Admin)?;

        self.repo.delete(store_id).await.map_err(|err| match err {
            RepositoryError::NotFound => ServiceError::NotFound("Store"),
            other => {
                tracing::error!(error = %other, store_id = %store_id, "store delete failed");
                ServiceError::from(other)
            }
        })
    }
}
