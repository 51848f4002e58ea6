//! Database operations for the dashboard `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `categories` - top-level categories (unique name/url)
//! - `sub_categories` - subcategories, each under one category
//! - `stores` - seller stores (unique name/url/email/phone)
//! - `products` - products, each under one store/category/subcategory
//! - `product_variants` - sellable variants, cascade from their product
//! - `variant_images` / `variant_colors` / `variant_sizes` - variant child
//!   rows, cascade from their variant
//!
//! Every uniqueness field carries a database-level UNIQUE constraint; the
//! repositories translate write-time violations into
//! [`RepositoryError::Conflict`] so concurrent check-then-write callers
//! cannot slip a duplicate past the validator. Parent rows referenced by
//! children are protected with `ON DELETE RESTRICT`, surfaced as
//! [`RepositoryError::ForeignKey`].
//!
//! # Migrations
//!
//! Migrations are stored in `crates/dashboard/migrations/` and applied with
//! [`run_migrations`].

pub mod categories;
pub mod products;
pub mod stores;
pub mod sub_categories;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use categories::{CategoriesRepo, PgCategoriesRepo};
pub use products::{PgProductsRepo, ProductsRepo};
pub use stores::{PgStoresRepo, StoresRepo};
pub use sub_categories::{PgSubCategoriesRepo, SubCategoriesRepo};

use crate::config::DashboardConfig;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Unique constraint violation (e.g., duplicate store email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// The row is still referenced by children (RESTRICT delete policy).
    #[error("still referenced: {0}")]
    ForeignKey(String),
}

/// Create a `PostgreSQL` connection pool from the dashboard configuration.
///
/// The pool is the single shared handle of the data-access layer; the
/// application builds it once at startup and hands it to the repositories.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(config: &DashboardConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(config.database_url.expose_secret())
        .await
}

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `sqlx::migrate::MigrateError` if a migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}

/// Translate write-phase sqlx errors into the repository taxonomy.
///
/// Unique violations become [`RepositoryError::Conflict`] (the backstop for
/// concurrent upserts that both passed validation) and foreign-key
/// violations become [`RepositoryError::ForeignKey`] (RESTRICT deletes,
/// dangling category/subcategory references).
pub(crate) fn map_write_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(db_err.message().to_owned());
    }
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::ForeignKey(db_err.message().to_owned());
    }
    RepositoryError::Database(e)
}
