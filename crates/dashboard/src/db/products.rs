//! Product and variant repository.
//!
//! Products and their first variant are written in one transaction, as are
//! added variants with their child rows, so a half-created product can never
//! be observed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use vendora_core::{CategoryId, ProductId, Slug, StoreId, SubCategoryId, VariantId};

use super::{RepositoryError, map_write_error};
use crate::models::{
    NewProduct, NewVariant, Product, ProductVariant, SlugKind, VariantColor, VariantImage,
    VariantSize,
};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    slug: Slug,
    description: String,
    brand: String,
    store_id: StoreId,
    category_id: CategoryId,
    sub_category_id: SubCategoryId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self, variants: Vec<ProductVariant>) -> Product {
        Product {
            id: self.id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            brand: self.brand,
            store_id: self.store_id,
            category_id: self.category_id,
            sub_category_id: self.sub_category_id,
            variants,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VariantRow {
    id: VariantId,
    product_id: ProductId,
    variant_name: String,
    variant_description: String,
    slug: Slug,
    is_sale: bool,
    sku: String,
    keywords: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl VariantRow {
    fn into_variant(
        self,
        images: Vec<VariantImage>,
        colors: Vec<VariantColor>,
        sizes: Vec<VariantSize>,
    ) -> ProductVariant {
        ProductVariant {
            id: self.id,
            product_id: self.product_id,
            variant_name: self.variant_name,
            variant_description: self.variant_description,
            slug: self.slug,
            is_sale: self.is_sale,
            sku: self.sku,
            keywords: split_keywords(&self.keywords),
            images,
            colors,
            sizes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ImageRow {
    url: String,
    alt: String,
}

#[derive(Debug, sqlx::FromRow)]
struct ColorRow {
    name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct SizeRow {
    size: String,
    quantity: i32,
    price: Decimal,
    discount: Decimal,
}

/// Keywords are persisted as one comma-joined column.
fn split_keywords(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .filter(|part| !part.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

const VARIANT_COLUMNS: &str = "id, product_id, variant_name, variant_description, slug, is_sale, \
                               sku, keywords, created_at, updated_at";

// =============================================================================
// Repository
// =============================================================================

/// Persistence operations for products and their variants.
#[async_trait]
pub trait ProductsRepo: Send + Sync {
    /// Whether a product with this ID already exists.
    async fn exists(&self, id: ProductId) -> Result<bool, RepositoryError>;

    /// Whether a slug is already taken in the given namespace. Read-only;
    /// used by the slug generator's probe loop.
    async fn slug_exists(&self, kind: SlugKind, candidate: &str) -> Result<bool, RepositoryError>;

    /// Create a product together with its first variant (and the variant's
    /// child rows) in one transaction.
    async fn create_with_variant(
        &self,
        product: &NewProduct,
        variant: &NewVariant,
    ) -> Result<Product, RepositoryError>;

    /// Add a variant (and its child rows) to an existing product in one
    /// transaction.
    async fn add_variant(
        &self,
        product_id: ProductId,
        variant: &NewVariant,
    ) -> Result<ProductVariant, RepositoryError>;

    /// All products, most recently updated first. Variant collections are
    /// not loaded here.
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Fetch a single product with all variants and their children.
    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Hard-delete a product, returning the deleted record (variants cascade
    /// away with it).
    async fn delete(&self, id: ProductId) -> Result<Product, RepositoryError>;
}

/// `PostgreSQL`-backed product repository.
pub struct PgProductsRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PgProductsRepo<'a> {
    /// Create a new product repository over an injected pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    async fn load_children(
        &self,
        variant_id: VariantId,
    ) -> Result<(Vec<VariantImage>, Vec<VariantColor>, Vec<VariantSize>), RepositoryError> {
        let images = sqlx::query_as::<_, ImageRow>(
            "SELECT url, alt FROM variant_images WHERE variant_id = $1 ORDER BY id",
        )
        .bind(variant_id)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(|row| VariantImage {
            url: row.url,
            alt: row.alt,
        })
        .collect();

        let colors = sqlx::query_as::<_, ColorRow>(
            "SELECT name FROM variant_colors WHERE variant_id = $1 ORDER BY id",
        )
        .bind(variant_id)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(|row| VariantColor { name: row.name })
        .collect();

        let sizes = sqlx::query_as::<_, SizeRow>(
            "SELECT size, quantity, price, discount
             FROM variant_sizes
             WHERE variant_id = $1
             ORDER BY id",
        )
        .bind(variant_id)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(|row| VariantSize {
            size: row.size,
            quantity: row.quantity,
            price: row.price,
            discount: row.discount,
        })
        .collect();

        Ok((images, colors, sizes))
    }
}

/// Insert a variant row plus its children inside an open transaction.
async fn insert_variant(
    tx: &mut Transaction<'_, Postgres>,
    product_id: ProductId,
    variant: &NewVariant,
) -> Result<ProductVariant, RepositoryError> {
    let sql = format!(
        "INSERT INTO product_variants \
             (id, product_id, variant_name, variant_description, slug, is_sale, sku, keywords)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING {VARIANT_COLUMNS}"
    );
    let row = sqlx::query_as::<_, VariantRow>(&sql)
        .bind(variant.id)
        .bind(product_id)
        .bind(&variant.variant_name)
        .bind(&variant.variant_description)
        .bind(&variant.slug)
        .bind(variant.is_sale)
        .bind(&variant.sku)
        .bind(variant.keywords.join(","))
        .fetch_one(&mut **tx)
        .await
        .map_err(map_write_error)?;

    for image in &variant.images {
        sqlx::query("INSERT INTO variant_images (variant_id, url, alt) VALUES ($1, $2, $3)")
            .bind(variant.id)
            .bind(&image.url)
            .bind(&image.alt)
            .execute(&mut **tx)
            .await
            .map_err(map_write_error)?;
    }

    for color in &variant.colors {
        sqlx::query("INSERT INTO variant_colors (variant_id, name) VALUES ($1, $2)")
            .bind(variant.id)
            .bind(&color.name)
            .execute(&mut **tx)
            .await
            .map_err(map_write_error)?;
    }

    for size in &variant.sizes {
        sqlx::query(
            "INSERT INTO variant_sizes (variant_id, size, quantity, price, discount)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(variant.id)
        .bind(&size.size)
        .bind(size.quantity)
        .bind(size.price)
        .bind(size.discount)
        .execute(&mut **tx)
        .await
        .map_err(map_write_error)?;
    }

    Ok(row.into_variant(
        variant.images.clone(),
        variant.colors.clone(),
        variant.sizes.clone(),
    ))
}

#[async_trait]
impl ProductsRepo for PgProductsRepo<'_> {
    async fn exists(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    async fn slug_exists(&self, kind: SlugKind, candidate: &str) -> Result<bool, RepositoryError> {
        let sql = match kind {
            SlugKind::Product => "SELECT EXISTS(SELECT 1 FROM products WHERE slug = $1)",
            SlugKind::Variant => "SELECT EXISTS(SELECT 1 FROM product_variants WHERE slug = $1)",
        };

        let exists = sqlx::query_scalar::<_, bool>(sql)
            .bind(candidate)
            .fetch_one(self.pool)
            .await?;

        Ok(exists)
    }

    async fn create_with_variant(
        &self,
        product: &NewProduct,
        variant: &NewVariant,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let product_row = sqlx::query_as::<_, ProductRow>(
            "INSERT INTO products \
                 (id, name, slug, description, brand, store_id, category_id, sub_category_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id, name, slug, description, brand, store_id, category_id, \
                       sub_category_id, created_at, updated_at",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.slug)
        .bind(&product.description)
        .bind(&product.brand)
        .bind(product.store_id)
        .bind(product.category_id)
        .bind(product.sub_category_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error)?;

        let first_variant = insert_variant(&mut tx, product.id, variant).await?;

        tx.commit().await?;

        Ok(product_row.into_product(vec![first_variant]))
    }

    async fn add_variant(
        &self,
        product_id: ProductId,
        variant: &NewVariant,
    ) -> Result<ProductVariant, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let created = insert_variant(&mut tx, product_id, variant).await?;
        tx.commit().await?;

        Ok(created)
    }

    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, slug, description, brand, store_id, category_id, \
                    sub_category_id, created_at, updated_at
             FROM products
             ORDER BY updated_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| row.into_product(Vec::new()))
            .collect())
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let Some(product_row) = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, slug, description, brand, store_id, category_id, \
                    sub_category_id, created_at, updated_at
             FROM products
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        else {
            return Ok(None);
        };

        let sql = format!(
            "SELECT {VARIANT_COLUMNS} FROM product_variants
             WHERE product_id = $1
             ORDER BY created_at"
        );
        let variant_rows = sqlx::query_as::<_, VariantRow>(&sql)
            .bind(id)
            .fetch_all(self.pool)
            .await?;

        let mut variants = Vec::with_capacity(variant_rows.len());
        for row in variant_rows {
            let (images, colors, sizes) = self.load_children(row.id).await?;
            variants.push(row.into_variant(images, colors, sizes));
        }

        Ok(Some(product_row.into_product(variants)))
    }

    async fn delete(&self, id: ProductId) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "DELETE FROM products
             WHERE id = $1
             RETURNING id, name, slug, description, brand, store_id, category_id, \
                       sub_category_id, created_at, updated_at",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(map_write_error)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into_product(Vec::new()))
    }
}
