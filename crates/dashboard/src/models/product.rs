//! Product and variant domain types.
//!
//! A product always owns at least one variant; the first variant is created
//! atomically with the product. A variant owns three child collections
//! (images, colors, sizes) that are recreated wholesale on every variant
//! write - there is no partial merge.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vendora_core::{CategoryId, ProductId, Slug, StoreId, SubCategoryId, VariantId};

/// Which slug namespace a candidate is checked against.
///
/// Product slugs and variant slugs are disjoint uniqueness domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlugKind {
    Product,
    Variant,
}

/// A product listed by a store (domain type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Generated slug, unique across products.
    pub slug: Slug,
    /// Long-form description.
    pub description: String,
    /// Brand name.
    pub brand: String,
    /// The store listing this product.
    pub store_id: StoreId,
    /// The category the product is filed under.
    pub category_id: CategoryId,
    /// The subcategory the product is filed under.
    pub sub_category_id: SubCategoryId,
    /// Variants owned by this product. Loaded on single-product reads;
    /// list queries return products with this collection empty.
    pub variants: Vec<ProductVariant>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A sellable variant of a product (domain type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Unique variant ID.
    pub id: VariantId,
    /// The owning product.
    pub product_id: ProductId,
    /// Variant display name ("Red", "XL bundle", ...).
    pub variant_name: String,
    /// Variant-specific description.
    pub variant_description: String,
    /// Generated slug, unique across variants.
    pub slug: Slug,
    /// Whether the variant is currently on sale.
    pub is_sale: bool,
    /// Stock-keeping unit.
    pub sku: String,
    /// Search keywords (persisted comma-joined).
    pub keywords: Vec<String>,
    /// Gallery images.
    pub images: Vec<VariantImage>,
    /// Available colors.
    pub colors: Vec<VariantColor>,
    /// Available sizes with stock and pricing.
    pub sizes: Vec<VariantSize>,
    /// When the variant was created.
    pub created_at: DateTime<Utc>,
    /// When the variant was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A variant gallery image. The alt text is derived from the last path
/// segment of the url at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantImage {
    pub url: String,
    pub alt: String,
}

/// A variant color option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantColor {
    pub name: String,
}

/// A variant size option with stock and pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSize {
    pub size: String,
    pub quantity: i32,
    pub price: Decimal,
    pub discount: Decimal,
}

/// Upsert payload for a product together with one variant.
///
/// When `product_id` already names a product, the call adds `variant_*` as a
/// new variant of it; otherwise the product and its first variant are
/// created together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductData {
    pub product_id: ProductId,
    pub variant_id: VariantId,
    pub name: String,
    pub description: String,
    pub brand: String,
    pub category_id: CategoryId,
    pub sub_category_id: SubCategoryId,
    pub variant_name: String,
    pub variant_description: String,
    pub is_sale: bool,
    pub sku: String,
    pub keywords: Vec<String>,
    pub images: Vec<VariantImageData>,
    pub colors: Vec<VariantColorData>,
    pub sizes: Vec<VariantSizeData>,
}

/// Image payload: the alt text is derived server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantImageData {
    pub url: String,
}

/// Color payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantColorData {
    pub name: String,
}

/// Size payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSizeData {
    pub size: String,
    pub quantity: i32,
    pub price: Decimal,
    pub discount: Decimal,
}

/// Write shape for a new product row, with its slug already generated and
/// its store resolved.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub id: ProductId,
    pub name: String,
    pub slug: Slug,
    pub description: String,
    pub brand: String,
    pub store_id: StoreId,
    pub category_id: CategoryId,
    pub sub_category_id: SubCategoryId,
}

/// Write shape for a new variant row plus its child collections.
#[derive(Debug, Clone)]
pub struct NewVariant {
    pub id: VariantId,
    pub variant_name: String,
    pub variant_description: String,
    pub slug: Slug,
    pub is_sale: bool,
    pub sku: String,
    pub keywords: Vec<String>,
    pub images: Vec<VariantImage>,
    pub colors: Vec<VariantColor>,
    pub sizes: Vec<VariantSize>,
}

/// Result of a product upsert: either a brand-new product (with its first
/// variant) or a new variant added to an existing product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductUpsert {
    /// The payload's product ID was unknown: product + first variant created.
    Created(Product),
    /// The payload's product ID already existed: a variant was added to it.
    VariantAdded(ProductVariant),
}
