//! Category and subcategory domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vendora_core::{CategoryId, SubCategoryId};

/// A top-level product category (domain type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Display name, unique across categories.
    pub name: String,
    /// URL segment, unique across categories.
    pub url: String,
    /// Image reference shown in listings.
    pub image: String,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Upsert payload for a category.
///
/// The caller mints the ID; an upsert with an ID that already names a record
/// updates it, otherwise a new record is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryData {
    pub id: CategoryId,
    pub name: String,
    pub url: String,
    pub image: String,
}

/// A subcategory nested under exactly one [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategory {
    /// Unique subcategory ID.
    pub id: SubCategoryId,
    /// Display name, unique across subcategories.
    pub name: String,
    /// URL segment, unique across subcategories.
    pub url: String,
    /// The owning category.
    pub category_id: CategoryId,
    /// When the subcategory was created.
    pub created_at: DateTime<Utc>,
    /// When the subcategory was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Upsert payload for a subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategoryData {
    pub id: SubCategoryId,
    pub name: String,
    pub url: String,
    pub category_id: CategoryId,
}

/// A subcategory joined with its parent category, as returned by the
/// all-subcategories listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategoryWithCategory {
    pub sub_category: SubCategory,
    pub category: Category,
}
