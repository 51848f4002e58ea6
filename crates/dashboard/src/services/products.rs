//! Product and variant creation: seller-only writes, public reads.
//!
//! A product upsert is keyed on the payload's product ID. An unknown ID
//! creates the product together with its first variant; a known ID is
//! interpreted as adding another variant to that product.

use vendora_core::{Actor, ActorRole, ProductId};

use super::slug::generate_unique_slug;
use super::{authorize, require_field};
use crate::db::{ProductsRepo, RepositoryError, StoresRepo};
use crate::error::ServiceError;
use crate::models::{
    NewProduct, NewVariant, Product, ProductData, ProductUpsert, SlugKind, VariantColor,
    VariantImage, VariantSize,
};

/// Service for product upserts, reads, and deletes.
pub struct ProductService<P, S> {
    products: P,
    stores: S,
}

impl<P: ProductsRepo, S: StoresRepo> ProductService<P, S> {
    /// Create the service around injected repositories.
    pub const fn new(products: P, stores: S) -> Self {
        Self { products, stores }
    }

    /// Create a product with its first variant, or add a variant to an
    /// existing product, keyed on the payload's product ID.
    ///
    /// Permission level: Seller only. `store_url` names the store the
    /// product is listed under; category and subcategory linkage is by
    /// reference and enforced by the database.
    ///
    /// # Errors
    ///
    /// `Unauthenticated`/`Unauthorized`/`InvalidInput` per the guard
    /// sequence; `NotFound` when no store matches `store_url`;
    /// `SlugExhausted` when no free slug can be found; `Repo` for
    /// write-phase failures (including dangling category/subcategory
    /// references).
    pub async fn upsert_product(
        &self,
        actor: Option<&Actor>,
        product: ProductData,
        store_url: &str,
    ) -> Result<ProductUpsert, ServiceError> {
        authorize(actor, ActorRole::Seller)?;
        require_field(&product.name, "Please provide product data.")?;
        require_field(&product.variant_name, "Please provide product data.")?;

        let product_exists = self.products.exists(product.product_id).await?;

        let store = self
            .stores
            .get_by_url(store_url)
            .await?
            .ok_or(ServiceError::NotFound("Store"))?;

        let variant_slug =
            generate_unique_slug(&self.products, SlugKind::Variant, &product.variant_name).await?;
        let variant = build_variant(&product, variant_slug);

        if product_exists {
            // The product is already there: this upsert only adds a variant.
            let created = self
                .products
                .add_variant(product.product_id, &variant)
                .await
                .map_err(|err| {
                    tracing::error!(
                        error = %err,
                        product_id = %product.product_id,
                        "variant create failed"
                    );
                    ServiceError::from(err)
                })?;
            return Ok(ProductUpsert::VariantAdded(created));
        }

        let product_slug =
            generate_unique_slug(&self.products, SlugKind::Product, &product.name).await?;
        let new_product = NewProduct {
            id: product.product_id,
            name: product.name.clone(),
            slug: product_slug,
            description: product.description.clone(),
            brand: product.brand.clone(),
            store_id: store.id,
            category_id: product.category_id,
            sub_category_id: product.sub_category_id,
        };

        let created = self
            .products
            .create_with_variant(&new_product, &variant)
            .await
            .map_err(|err| {
                tracing::error!(
                    error = %err,
                    product_id = %product.product_id,
                    "product create failed"
                );
                ServiceError::from(err)
            })?;

        Ok(ProductUpsert::Created(created))
    }

    /// All products, most recently updated first (variant collections not
    /// loaded).
    ///
    /// Permission level: public.
    ///
    /// # Errors
    ///
    /// `Repo` when the query fails.
    pub async fn get_all_products(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.products.list_all().await?)
    }

    /// One product by ID with all variants and children, or `None`.
    ///
    /// Permission level: public.
    ///
    /// # Errors
    ///
    /// `Repo` when the query fails.
    pub async fn get_product(
        &self,
        product_id: ProductId,
    ) -> Result<Option<Product>, ServiceError> {
        Ok(self.products.get(product_id).await?)
    }

    /// Hard-delete a product and return the deleted record. Its variants and
    /// their children cascade away with it.
    ///
    /// Permission level: Seller only (the product write tier).
    ///
    /// # Errors
    ///
    /// `Unauthenticated`/`Unauthorized` per the guard sequence; `NotFound`
    /// when no such product exists; `Repo` for write-phase failures.
    pub async fn delete_product(
        &self,
        actor: Option<&Actor>,
        product_id: ProductId,
    ) -> Result<Product, ServiceError> {
        authorize(actor, ActorRole::Seller)?;

        self.products
            .delete(product_id)
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound => ServiceError::NotFound("Product"),
                other => {
                    tracing::error!(
                        error = %other,
                        product_id = %product_id,
                        "product delete failed"
                    );
                    ServiceError::from(other)
                }
            })
    }
}

/// Assemble the variant write shape from the payload, deriving image alt
/// texts from the url file names.
fn build_variant(product: &ProductData, slug: vendora_core::Slug) -> NewVariant {
    NewVariant {
        id: product.variant_id,
        variant_name: product.variant_name.clone(),
        variant_description: product.variant_description.clone(),
        slug,
        is_sale: product.is_sale,
        sku: product.sku.clone(),
        keywords: product.keywords.clone(),
        images: product
            .images
            .iter()
            .map(|image| VariantImage {
                url: image.url.clone(),
                alt: derive_alt(&image.url),
            })
            .collect(),
        colors: product
            .colors
            .iter()
            .map(|color| VariantColor {
                name: color.name.clone(),
            })
            .collect(),
        sizes: product
            .sizes
            .iter()
            .map(|size| VariantSize {
                size: size.size.clone(),
                quantity: size.quantity,
                price: size.price,
                discount: size.discount,
            })
            .collect(),
    }
}

/// Alt text is the last path segment of the image url.
fn derive_alt(url: &str) -> String {
    url.rsplit('/').next().unwrap_or_default().to_owned()
}
